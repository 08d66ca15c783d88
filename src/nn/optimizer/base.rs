/*
 * @Author       : 老董
 * @Date         : 2025-07-24 16:00:00
 * @LastEditors  : 老董
 * @LastEditTime : 2026-10-19
 * @Description  : 优化器基础trait
 */

use super::OptimizerError;
use crate::nn::ParameterStore;

/// 优化器核心 trait
pub trait Optimizer {
    /// 参数更新（使用已计算的梯度）
    ///
    /// `PyTorch` 风格训练循环：
    /// ```ignore
    /// optimizer.zero_grad(&mut params);
    /// // ...外部计算梯度，并通过 params.set_grad(id, grad) 写入...
    /// optimizer.step(&mut params)?;
    /// ```
    ///
    /// 没有梯度的参数会被跳过。
    fn step(&mut self, params: &mut ParameterStore) -> Result<(), OptimizerError>;

    /// 先调用一次`closure`（通常用于重新计算loss），再执行`step`，
    /// 成功后原样返回`closure`的返回值。`closure`对更新本身没有任何影响。
    fn step_with_closure<L, F>(
        &mut self,
        params: &mut ParameterStore,
        closure: F,
    ) -> Result<L, OptimizerError>
    where
        Self: Sized,
        F: FnOnce() -> L,
    {
        let loss = closure();
        self.step(params)?;
        Ok(loss)
    }

    /// 清零（清除）优化器绑定的所有参数的梯度
    fn zero_grad(&self, params: &mut ParameterStore);

    /// 重置累积状态
    fn reset(&mut self);
}
