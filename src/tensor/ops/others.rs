use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;

impl From<f32> for Tensor {
    /// 实现 From<f32> trait 用于将`f32`类型转换为形状为`[1]`的张量
    fn from(scalar: f32) -> Self {
        Self::new(&[scalar], &[1])
    }
}

impl Tensor {
    /// 逐元素开平方
    pub fn sqrt(&self) -> Self {
        self.map(f32::sqrt)
    }

    /// 逐元素平方
    pub fn square(&self) -> Self {
        self.map(|x| x * x)
    }

    /// 对每个元素应用`f`，返回同形状的新张量
    pub fn map<F: Fn(f32) -> f32>(&self, f: F) -> Self {
        Self {
            data: self.data.mapv(f),
        }
    }

    /// 对张量中的所有元素求和并返回纯数
    pub fn sum(&self) -> f32 {
        self.data.sum()
    }
}

/// 两个张量逐元素运算：形状严格一致时逐元素计算；
/// 否则其中一个须为标量（此时结果形状与另一个张量一致）；都不满足则panic。
pub(super) fn elementwise<F>(tensor_1: &Tensor, tensor_2: &Tensor, operator: Operator, f: F) -> Tensor
where
    F: Fn(f32, f32) -> f32,
{
    if tensor_1.is_same_shape(tensor_2) {
        let mut data = tensor_1.data.clone();
        data.zip_mut_with(&tensor_2.data, |a, &b| *a = f(*a, b));
        return Tensor { data };
    }
    match (tensor_1.number(), tensor_2.number()) {
        (_, Some(b)) => Tensor {
            data: tensor_1.data.mapv(|a| f(a, b)),
        },
        (Some(a), None) => Tensor {
            data: tensor_2.data.mapv(|b| f(a, b)),
        },
        (None, None) => panic!(
            "{}",
            TensorError::OperatorError {
                operator,
                tensor1_shape: tensor_1.shape().to_vec(),
                tensor2_shape: tensor_2.shape().to_vec(),
            }
        ),
    }
}
