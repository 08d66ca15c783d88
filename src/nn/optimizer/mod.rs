/*
 * @Author       : 老董
 * @Date         : 2025-07-24 16:00:00
 * @LastEditors  : 老董
 * @LastEditTime : 2026-10-19
 * @Description  : 优化器模块，实现 PyTorch 风格的 AdamW（解耦权重衰减）优化算法
 */

mod adamw;
mod base;
mod config;
mod error;
mod state;
mod state_dict;

pub use adamw::AdamW;
pub use base::Optimizer;
pub use config::{AdamWConfig, HyperParam, ParamGroup};
pub use error::OptimizerError;
pub use state::{ParamState, StateArena};
pub use state_dict::{AdamWStateDict, StateEntry};
