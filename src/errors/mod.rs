/*
 * @Author       : 老董
 * @Date         : 2023-08-17 17:24:24
 * @LastEditors  : 老董
 * @LastEditTime : 2026-10-19
 * @Description  : 张量层面的错误类型（优化器层面的错误见`nn::optimizer::OptimizerError`）
 */

use thiserror::Error;
mod ops;
pub use self::ops::*;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TensorError {
    // 张量二元运算
    #[error(
        "形状不一致，故无法{operator}：第一个张量的形状为{tensor1_shape:?}，第二个张量的形状为{tensor2_shape:?}"
    )]
    OperatorError {
        operator: Operator,
        tensor1_shape: Vec<usize>,
        tensor2_shape: Vec<usize>,
    },
    // 构造张量时数据长度与形状不符
    #[error("数据长度为{data_len}，与形状{shape:?}所需的元素个数{expected}不一致")]
    DataShapeMismatch {
        data_len: usize,
        shape: Vec<usize>,
        expected: usize,
    },
    // 稀疏张量的坐标越界或阶数不符
    #[error("稀疏张量的第{position}个坐标{index:?}不在形状{shape:?}之内")]
    SparseIndexOutOfBounds {
        position: usize,
        index: Vec<usize>,
        shape: Vec<usize>,
    },
}
