/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 可训练参数及其存储（arena）。
 *                 参数由调用方持有并通过`ParamId`（稳定的下标句柄）引用，
 *                 优化器只读取梯度、原地改写参数值，自身不拥有任何参数数据。
 */

use std::fmt;

use serde::{Deserialize, Serialize};

use super::optimizer::OptimizerError;
use crate::tensor::{SparseTensor, Tensor};

/// 参数句柄：即参数在`ParameterStore`中的下标，在整个训练过程中保持不变
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParamId(pub usize);

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "参数#{}", self.0)
    }
}

/// 梯度：稠密张量或稀疏张量（COO）
#[derive(Debug, Clone, PartialEq)]
pub enum Gradient {
    Dense(Tensor),
    Sparse(SparseTensor),
}

impl Gradient {
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Dense(tensor) => tensor.shape(),
            Self::Sparse(sparse) => sparse.shape(),
        }
    }

    pub const fn is_sparse(&self) -> bool {
        matches!(self, Self::Sparse(_))
    }
}

impl From<Tensor> for Gradient {
    fn from(tensor: Tensor) -> Self {
        Self::Dense(tensor)
    }
}

impl From<SparseTensor> for Gradient {
    fn from(sparse: SparseTensor) -> Self {
        Self::Sparse(sparse)
    }
}

/// 单个可训练参数：当前值 + （可缺省的）梯度
#[derive(Debug, Clone)]
pub struct Parameter {
    name: Option<String>,
    value: Tensor,
    grad: Option<Gradient>,
}

impl Parameter {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub const fn value(&self) -> &Tensor {
        &self.value
    }

    pub const fn grad(&self) -> Option<&Gradient> {
        self.grad.as_ref()
    }

    /// 同时取得可变的值与只读的梯度（供优化器原地更新）
    pub(crate) fn value_mut_and_grad(&mut self) -> (&mut Tensor, Option<&Gradient>) {
        (&mut self.value, self.grad.as_ref())
    }
}

/// 参数仓库：按`ParamId`下标存放所有参数
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    params: Vec<Parameter>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一个新参数（初始无梯度），返回其句柄
    pub fn add(&mut self, value: Tensor) -> ParamId {
        self.push(None, value)
    }

    /// 同`add`，但附带名称（仅用于调试、日志）
    pub fn add_named(&mut self, name: &str, value: Tensor) -> ParamId {
        self.push(Some(name.to_string()), value)
    }

    fn push(&mut self, name: Option<String>, value: Tensor) -> ParamId {
        let id = ParamId(self.params.len());
        self.params.push(Parameter {
            name,
            value,
            grad: None,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn get(&self, id: ParamId) -> Option<&Parameter> {
        self.params.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: ParamId) -> Option<&mut Parameter> {
        self.params.get_mut(id.0)
    }

    pub fn value(&self, id: ParamId) -> Option<&Tensor> {
        self.get(id).map(Parameter::value)
    }

    pub fn grad(&self, id: ParamId) -> Option<&Gradient> {
        self.get(id).and_then(Parameter::grad)
    }

    /// 覆盖参数值，新值的形状须与原值一致
    pub fn set_value(&mut self, id: ParamId, value: Tensor) -> Result<(), OptimizerError> {
        let param = self
            .get_mut(id)
            .ok_or(OptimizerError::ParameterNotFound(id))?;
        if !param.value.is_same_shape(&value) {
            return Err(OptimizerError::ShapeMismatch {
                param: id,
                expected: param.value.shape().to_vec(),
                got: value.shape().to_vec(),
            });
        }
        param.value = value;
        Ok(())
    }

    /// 设置参数的梯度，梯度形状须与参数值一致
    pub fn set_grad(
        &mut self,
        id: ParamId,
        grad: impl Into<Gradient>,
    ) -> Result<(), OptimizerError> {
        let grad = grad.into();
        let param = self
            .get_mut(id)
            .ok_or(OptimizerError::ParameterNotFound(id))?;
        if grad.shape() != param.value.shape() {
            return Err(OptimizerError::ShapeMismatch {
                param: id,
                expected: param.value.shape().to_vec(),
                got: grad.shape().to_vec(),
            });
        }
        param.grad = Some(grad);
        Ok(())
    }

    /// 清除参数的梯度（不存在的句柄直接忽略）
    pub fn clear_grad(&mut self, id: ParamId) {
        if let Some(param) = self.get_mut(id) {
            param.grad = None;
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = ParamId> + '_ {
        (0..self.params.len()).map(ParamId)
    }
}
