/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 逐参数的优化器状态，以及按`ParamId`下标存放状态的arena
 */

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::nn::ParamId;
use crate::tensor::Tensor;

/// 单个参数的 AdamW 状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamState {
    /// 一阶矩：梯度的指数滑动平均
    pub(super) first_moment: Tensor,
    /// 二阶矩：梯度平方的指数滑动平均
    pub(super) second_moment: Tensor,
    /// 该参数已被更新的次数
    pub(super) step: u64,
}

impl ParamState {
    fn zeros(shape: &[usize]) -> Self {
        Self {
            first_moment: Tensor::zeros(shape),
            second_moment: Tensor::zeros(shape),
            step: 0,
        }
    }

    pub const fn first_moment(&self) -> &Tensor {
        &self.first_moment
    }

    pub const fn second_moment(&self) -> &Tensor {
        &self.second_moment
    }

    pub const fn step(&self) -> u64 {
        self.step
    }

    pub fn shape(&self) -> &[usize] {
        self.first_moment.shape()
    }
}

/// 状态arena：按`ParamId`存放已创建的状态，大小只取决于已创建状态的参数个数（与句柄数值无关）。
/// 迭代按句柄升序进行，保证快照内容确定。
#[derive(Debug, Clone, Default)]
pub struct StateArena {
    slots: BTreeMap<ParamId, ParamState>,
}

impl StateArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ParamId) -> Option<&ParamState> {
        self.slots.get(&id)
    }

    /// 取出参数的状态；首次访问时按`shape`创建全零的一阶矩、二阶矩，步数为0
    pub fn get_or_create(&mut self, id: ParamId, shape: &[usize]) -> &mut ParamState {
        self.slots
            .entry(id)
            .or_insert_with(|| ParamState::zeros(shape))
    }

    pub(super) fn insert(&mut self, id: ParamId, state: ParamState) {
        self.slots.insert(id, state);
    }

    /// 已创建状态的参数个数
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParamId, &ParamState)> {
        self.slots.iter().map(|(&id, state)| (id, state))
    }
}
