/*
 * @Author       : 老董
 * @Date         : 2024-01-31 20:23:53
 * @LastEditors  : 老董
 * @LastEditTime : 2026-10-19
 * @Description  : 可训练参数与优化器
 */

pub mod optimizer;
mod parameter;

pub use optimizer::{AdamW, AdamWConfig, Optimizer, OptimizerError, ParamGroup};
pub use parameter::{Gradient, ParamId, Parameter, ParameterStore};
