/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 优化器模块的错误类型
 */

use thiserror::Error;

use super::config::HyperParam;
use crate::errors::ComparisonOperator;
use crate::nn::ParamId;

#[derive(Error, Debug, PartialEq)]
pub enum OptimizerError {
    /// 构造时超参数不在合法取值范围内
    #[error("无效的优化器配置：{param}={value}，须{operator}{threshold}")]
    InvalidConfiguration {
        param: HyperParam,
        value: f64,
        operator: ComparisonOperator,
        threshold: f64,
    },
    #[error("{0}的梯度为稀疏格式，AdamW 仅支持稠密梯度")]
    UnsupportedGradientFormat(ParamId),
    #[error("{0}在参数组中重复出现")]
    DuplicateParameter(ParamId),
    #[error("{0}不存在")]
    ParameterNotFound(ParamId),
    #[error("{param}的形状不一致：期望{expected:?}，实际为{got:?}")]
    ShapeMismatch {
        param: ParamId,
        expected: Vec<usize>,
        got: Vec<usize>,
    },
    #[error("优化器状态字典不匹配：{0}")]
    StateDictMismatch(String),
    #[error("优化器状态（反）序列化失败：{0}")]
    Serialization(String),
}
