/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 优化器状态快照（state dict）的保存与加载
 */

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use super::{OptimizerError, ParamGroup, ParamState};
use crate::nn::ParamId;

/// 单个参数的状态条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateEntry {
    pub param: ParamId,
    pub state: ParamState,
}

/// AdamW 的完整状态快照：各参数组（含超参数）及所有已创建的逐参数状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdamWStateDict {
    pub param_groups: Vec<ParamGroup>,
    pub state: Vec<StateEntry>,
}

impl AdamWStateDict {
    /// 以bincode格式写入
    pub fn save<W: Write>(&self, writer: W) -> Result<(), OptimizerError> {
        bincode::serialize_into(writer, self)
            .map_err(|e| OptimizerError::Serialization(e.to_string()))
    }

    /// 读取`save`写入的bincode数据
    pub fn load<R: Read>(reader: R) -> Result<Self, OptimizerError> {
        bincode::deserialize_from(reader)
            .map_err(|e| OptimizerError::Serialization(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, OptimizerError> {
        serde_json::to_string(self).map_err(|e| OptimizerError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, OptimizerError> {
        serde_json::from_str(json).map_err(|e| OptimizerError::Serialization(e.to_string()))
    }
}
