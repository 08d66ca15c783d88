/*
 * @Author       : 老董
 * @Date         : 2025-12-20
 * @LastEditTime : 2026-10-19
 * @Description  : Optimizer trait 通用行为测试
 */

use crate::nn::{AdamW, AdamWConfig, Optimizer, ParameterStore};
use crate::tensor::Tensor;

#[test]
fn test_optimizer_as_trait_object() {
    let mut params = ParameterStore::new();
    let w = params.add(Tensor::new(&[1.0, 2.0], &[2]));
    let mut optimizer: Box<dyn Optimizer> =
        Box::new(AdamW::with_params(&[w], AdamWConfig::default()).unwrap());

    params.set_grad(w, Tensor::new(&[1.0, -1.0], &[2])).unwrap();
    optimizer.step(&mut params).unwrap();
    let updated = params.value(w).unwrap().to_vec();
    assert!(updated[0] < 1.0);
    assert!(updated[1] > 2.0);

    optimizer.zero_grad(&mut params);
    assert!(params.grad(w).is_none());

    // 没有梯度时 step 不改变任何参数
    let before = params.value(w).unwrap().clone();
    optimizer.step(&mut params).unwrap();
    assert_eq!(params.value(w).unwrap(), &before);

    optimizer.reset();
}

#[test]
fn test_empty_optimizer() {
    let mut params = ParameterStore::new();
    let w = params.add(Tensor::new(&[1.0], &[1]));
    params.set_grad(w, Tensor::new(&[1.0], &[1])).unwrap();

    let mut optimizer = AdamW::new(Vec::new()).unwrap();
    optimizer.step(&mut params).unwrap();
    assert_eq!(params.value(w).unwrap(), &Tensor::new(&[1.0], &[1]));
    assert!(optimizer.param_groups().is_empty());
}
