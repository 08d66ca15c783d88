/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 稀疏张量（COO格式：坐标 + 值 + 稠密形状）。
 *                 目前仅作为梯度的一种表示形式出现，AdamW 会拒绝此类梯度。
 */

use serde::{Deserialize, Serialize};

use crate::errors::TensorError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseTensor {
    shape: Vec<usize>,
    /// 每个非零元素的坐标，长度均等于`shape.len()`
    indices: Vec<Vec<usize>>,
    values: Vec<f32>,
}

impl SparseTensor {
    /// 创建稀疏张量，`indices`与`values`须一一对应且每个坐标都落在`shape`之内
    pub fn new(
        shape: &[usize],
        indices: Vec<Vec<usize>>,
        values: Vec<f32>,
    ) -> Result<Self, TensorError> {
        if indices.len() != values.len() {
            return Err(TensorError::DataShapeMismatch {
                data_len: values.len(),
                shape: vec![indices.len()],
                expected: indices.len(),
            });
        }
        for (position, index) in indices.iter().enumerate() {
            let in_bounds = index.len() == shape.len()
                && index.iter().zip(shape).all(|(i, dim)| i < dim);
            if !in_bounds {
                return Err(TensorError::SparseIndexOutOfBounds {
                    position,
                    index: index.clone(),
                    shape: shape.to_vec(),
                });
            }
        }
        Ok(Self {
            shape: shape.to_vec(),
            indices,
            values,
        })
    }

    /// 对应的稠密形状
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn indices(&self) -> &[Vec<usize>] {
        &self.indices
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// 显式存储的元素个数（number of non-zeros）
    pub fn nnz(&self) -> usize {
        self.values.len()
    }
}
