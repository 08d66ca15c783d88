/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : AdamW 超参数组及参数组
 */

use std::fmt;

use serde::{Deserialize, Serialize};

use super::OptimizerError;
use crate::errors::ComparisonOperator;
use crate::nn::ParamId;

/// 需要校验取值范围的超参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HyperParam {
    LearningRate,
    Beta1,
    Beta2,
    Epsilon,
}

impl fmt::Display for HyperParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LearningRate => "learning_rate",
            Self::Beta1 => "beta1",
            Self::Beta2 => "beta2",
            Self::Epsilon => "epsilon",
        };
        write!(f, "{name}")
    }
}

/// AdamW 超参数组
///
/// 默认值：`learning_rate=1e-3`，`beta1=0.9`，`beta2=0.999`，`epsilon=1e-6`，
/// `weight_decay=0`，开启偏差修正。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdamWConfig {
    pub learning_rate: f64,
    /// 一阶矩衰减率，取值[0, 1)
    pub beta1: f64,
    /// 二阶矩衰减率，取值[0, 1)
    pub beta2: f64,
    /// 加在`sqrt(v)`上（而非`v`上）的数值稳定项
    pub epsilon: f64,
    /// 解耦权重衰减系数，不做校验
    pub weight_decay: f64,
    pub bias_correction: bool,
}

impl Default for AdamWConfig {
    fn default() -> Self {
        Self {
            learning_rate: 1e-3,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-6,
            weight_decay: 0.0,
            bias_correction: true,
        }
    }
}

impl AdamWConfig {
    pub const fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub const fn with_betas(mut self, beta1: f64, beta2: f64) -> Self {
        self.beta1 = beta1;
        self.beta2 = beta2;
        self
    }

    pub const fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub const fn with_weight_decay(mut self, weight_decay: f64) -> Self {
        self.weight_decay = weight_decay;
        self
    }

    pub const fn with_bias_correction(mut self, enabled: bool) -> Self {
        self.bias_correction = enabled;
        self
    }

    /// 从JSON读取配置，缺省字段取默认值；读取后立即校验
    pub fn from_json(json: &str) -> Result<Self, OptimizerError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| OptimizerError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 校验取值范围：`learning_rate ≥ 0`，`0 ≤ beta1, beta2 < 1`，`epsilon ≥ 0`。
    /// NaN 不满足任何比较，因此同样会被拒绝。
    pub fn validate(&self) -> Result<(), OptimizerError> {
        at_least_zero(HyperParam::LearningRate, self.learning_rate)?;
        at_least_zero(HyperParam::Beta1, self.beta1)?;
        below_one(HyperParam::Beta1, self.beta1)?;
        at_least_zero(HyperParam::Beta2, self.beta2)?;
        below_one(HyperParam::Beta2, self.beta2)?;
        at_least_zero(HyperParam::Epsilon, self.epsilon)
    }

    /// 第`step`步（从1开始计）的实际步长：
    /// 开启偏差修正时为 `lr * sqrt(1 - beta2^t) / (1 - beta1^t)`，否则即为`lr`。
    ///
    /// 两次偏差修正被折算进同一个纯数里，无需再对一阶矩、二阶矩整体做除法。
    pub fn step_size(&self, step: u64) -> f64 {
        if !self.bias_correction {
            return self.learning_rate;
        }
        let t = step as f64;
        let bias_correction1 = 1.0 - self.beta1.powf(t);
        let bias_correction2 = 1.0 - self.beta2.powf(t);
        self.learning_rate * bias_correction2.sqrt() / bias_correction1
    }
}

fn at_least_zero(param: HyperParam, value: f64) -> Result<(), OptimizerError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(OptimizerError::InvalidConfiguration {
            param,
            value,
            operator: ComparisonOperator::GreaterOrEqual,
            threshold: 0.0,
        })
    }
}

fn below_one(param: HyperParam, value: f64) -> Result<(), OptimizerError> {
    if value < 1.0 {
        Ok(())
    } else {
        Err(OptimizerError::InvalidConfiguration {
            param,
            value,
            operator: ComparisonOperator::LessThan,
            threshold: 1.0,
        })
    }
}

/// 参数组：一组参数共享同一套超参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamGroup {
    pub params: Vec<ParamId>,
    pub config: AdamWConfig,
}

impl ParamGroup {
    pub fn new(params: &[ParamId], config: AdamWConfig) -> Self {
        Self {
            params: params.to_vec(),
            config,
        }
    }
}
