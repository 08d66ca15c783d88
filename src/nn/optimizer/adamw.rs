/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : AdamW优化器实现（Adam + 解耦权重衰减）
 *
 * 每个参数的一次更新（t 为该参数自己的步数）：
 * - t' = t + 1
 * - m' = β1 * m + (1 - β1) * g
 * - v' = β2 * v + (1 - β2) * g²
 * - α_t = lr * √(1 - β2^t') / (1 - β1^t')    （关闭偏差修正时 α_t = lr）
 * - θ_new = θ - α_t * m' / (√v' + ε)
 * - θ' = θ_new - lr * weight_decay * θ      （θ 为更新前的值，lr 不做偏差修正）
 */

use std::collections::HashSet;

use tracing::{debug, trace, warn};

use super::state_dict::{AdamWStateDict, StateEntry};
use super::{AdamWConfig, Optimizer, OptimizerError, ParamGroup, ParamState, StateArena};
use crate::nn::{Gradient, ParamId, ParameterStore};
use crate::tensor::Tensor;

/// 参数句柄与其所属参数组超参数的绑定，构造时解析一次
#[derive(Debug, Clone, Copy)]
struct Binding {
    id: ParamId,
    config: AdamWConfig,
}

/// AdamW优化器
pub struct AdamW {
    groups: Vec<ParamGroup>,
    bindings: Vec<Binding>,
    state: StateArena,
}

impl AdamW {
    /// 以若干参数组创建优化器，每组各自的超参数在此校验
    pub fn new(groups: Vec<ParamGroup>) -> Result<Self, OptimizerError> {
        let mut optimizer = Self {
            groups: Vec::with_capacity(groups.len()),
            bindings: Vec::new(),
            state: StateArena::new(),
        };
        for group in groups {
            optimizer.add_param_group(group)?;
        }
        Ok(optimizer)
    }

    /// 单参数组的便捷构造
    pub fn with_params(params: &[ParamId], config: AdamWConfig) -> Result<Self, OptimizerError> {
        Self::new(vec![ParamGroup::new(params, config)])
    }

    /// 追加一个参数组。同一参数不得出现在多个组（或同一组内多次）
    pub fn add_param_group(&mut self, group: ParamGroup) -> Result<(), OptimizerError> {
        group.config.validate()?;

        let mut seen: HashSet<ParamId> = self.bindings.iter().map(|b| b.id).collect();
        for &id in &group.params {
            if !seen.insert(id) {
                return Err(OptimizerError::DuplicateParameter(id));
            }
        }

        self.bindings
            .extend(group.params.iter().map(|&id| Binding {
                id,
                config: group.config,
            }));
        debug!(
            group = self.groups.len(),
            params = group.params.len(),
            "AdamW 添加参数组"
        );
        self.groups.push(group);
        Ok(())
    }

    pub fn param_groups(&self) -> &[ParamGroup] {
        &self.groups
    }

    /// 参数的当前状态；从未被更新过的参数返回`None`
    pub fn state(&self, id: ParamId) -> Option<&ParamState> {
        self.state.get(id)
    }

    /// 导出可序列化的状态快照（超参数 + 逐参数状态）
    pub fn state_dict(&self) -> AdamWStateDict {
        AdamWStateDict {
            param_groups: self.groups.clone(),
            state: self
                .state
                .iter()
                .map(|(param, state)| StateEntry {
                    param,
                    state: state.clone(),
                })
                .collect(),
        }
    }

    /// 从快照恢复。快照的参数组须与当前优化器逐组一致（参数句柄相同、顺序相同），
    /// 其中的超参数会替换当前值；校验失败时优化器保持不变。
    pub fn load_state_dict(&mut self, dict: AdamWStateDict) -> Result<(), OptimizerError> {
        if dict.param_groups.len() != self.groups.len() {
            return Err(OptimizerError::StateDictMismatch(format!(
                "参数组数量不同：当前为{}，快照为{}",
                self.groups.len(),
                dict.param_groups.len()
            )));
        }
        for (i, (current, loaded)) in self.groups.iter().zip(&dict.param_groups).enumerate() {
            if current.params != loaded.params {
                return Err(OptimizerError::StateDictMismatch(format!(
                    "第{i}个参数组的参数不同"
                )));
            }
            loaded.config.validate()?;
        }

        let mut state = StateArena::new();
        for entry in dict.state {
            if !self.bindings.iter().any(|b| b.id == entry.param) {
                return Err(OptimizerError::StateDictMismatch(format!(
                    "{}不属于该优化器",
                    entry.param
                )));
            }
            if !entry
                .state
                .first_moment
                .is_same_shape(&entry.state.second_moment)
            {
                return Err(OptimizerError::ShapeMismatch {
                    param: entry.param,
                    expected: entry.state.first_moment.shape().to_vec(),
                    got: entry.state.second_moment.shape().to_vec(),
                });
            }
            // 步数已到上限时无法再更新
            if entry.state.step == u64::MAX {
                return Err(OptimizerError::StateDictMismatch(format!(
                    "{}的步数已达上限{}",
                    entry.param,
                    u64::MAX
                )));
            }
            state.insert(entry.param, entry.state);
        }

        self.bindings = dict
            .param_groups
            .iter()
            .flat_map(|group| {
                group.params.iter().map(|&id| Binding {
                    id,
                    config: group.config,
                })
            })
            .collect();
        self.groups = dict.param_groups;
        self.state = state;
        Ok(())
    }

    /// 校验本轮要用到的所有梯度，返回需要更新的参数绑定。
    /// 只要有一个参数不合格就整体失败，此时尚未修改任何参数或状态。
    fn collect_updates(&self, params: &ParameterStore) -> Result<Vec<Binding>, OptimizerError> {
        let mut updates = Vec::with_capacity(self.bindings.len());
        for binding in &self.bindings {
            let id = binding.id;
            let param = params
                .get(id)
                .ok_or(OptimizerError::ParameterNotFound(id))?;
            let grad = match param.grad() {
                None => continue,
                Some(Gradient::Sparse(_)) => {
                    warn!(param = %id, "AdamW 不支持稀疏梯度");
                    return Err(OptimizerError::UnsupportedGradientFormat(id));
                }
                Some(Gradient::Dense(grad)) => grad,
            };
            if !grad.is_same_shape(param.value()) {
                return Err(OptimizerError::ShapeMismatch {
                    param: id,
                    expected: param.value().shape().to_vec(),
                    got: grad.shape().to_vec(),
                });
            }
            if let Some(state) = self.state.get(id) {
                if state.shape() != param.value().shape() {
                    return Err(OptimizerError::ShapeMismatch {
                        param: id,
                        expected: param.value().shape().to_vec(),
                        got: state.shape().to_vec(),
                    });
                }
            }
            updates.push(*binding);
        }
        Ok(updates)
    }
}

impl Optimizer for AdamW {
    fn step(&mut self, params: &mut ParameterStore) -> Result<(), OptimizerError> {
        let updates = self.collect_updates(params)?;
        debug!(
            updated = updates.len(),
            skipped = self.bindings.len() - updates.len(),
            "AdamW step"
        );

        for Binding { id, config } in updates {
            let Some(param) = params.get_mut(id) else {
                continue;
            };
            let (value, grad) = param.value_mut_and_grad();
            let Some(Gradient::Dense(grad)) = grad else {
                continue;
            };
            let state = self.state.get_or_create(id, value.shape());
            adamw_update(&config, state, value, grad);
            trace!(param = %id, step = state.step, "AdamW 更新参数");
        }
        Ok(())
    }

    fn zero_grad(&self, params: &mut ParameterStore) {
        for binding in &self.bindings {
            params.clear_grad(binding.id);
        }
    }

    fn reset(&mut self) {
        self.state.clear();
    }
}

/// 单个参数的一次 AdamW 更新。新值全部算好后才一并写回参数和状态。
fn adamw_update(config: &AdamWConfig, state: &mut ParamState, value: &mut Tensor, grad: &Tensor) {
    let step = state.step + 1;

    let first_moment =
        &state.first_moment * config.beta1 as f32 + grad * (1.0 - config.beta1) as f32;
    let second_moment =
        &state.second_moment * config.beta2 as f32 + grad.square() * (1.0 - config.beta2) as f32;

    let step_size = config.step_size(step) as f32;
    let denominator = second_moment.sqrt() + config.epsilon as f32;
    let mut new_value = &*value - (&first_moment / &denominator) * step_size;

    // 解耦权重衰减：作用于更新前的参数值，且不做偏差修正。为0时整项跳过，保证结果逐位不变
    if config.weight_decay != 0.0 {
        new_value -= &*value * (config.learning_rate * config.weight_decay) as f32;
    }

    *value = new_value;
    state.first_moment = first_moment;
    state.second_moment = second_moment;
    state.step = step;
}
