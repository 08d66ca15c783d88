//! # AdamW Torch
//!
//! `adamw_torch`用纯rust实现了[pytorch](https://pytorch.org)风格的AdamW优化器
//! （[Decoupled Weight Decay Regularization](https://arxiv.org/abs/1711.05101)）：
//! 调用方持有参数与梯度（`nn::ParameterStore`），优化器按参数句柄维护一阶矩、二阶矩与步数，
//! 每次`step`原地更新所有带梯度的参数。
//!
//! ```ignore
//! use adamw_torch::nn::{AdamW, AdamWConfig, Optimizer, ParameterStore};
//! use adamw_torch::tensor::Tensor;
//!
//! let mut params = ParameterStore::new();
//! let w = params.add_named("w", Tensor::new(&[1.0, 2.0], &[2]));
//! let mut optimizer = AdamW::with_params(&[w], AdamWConfig::default().with_weight_decay(0.01))?;
//!
//! params.set_grad(w, Tensor::new(&[0.5, -0.5], &[2]))?;
//! optimizer.step(&mut params)?;
//! ```

pub mod errors;
pub mod nn;
pub mod tensor;
