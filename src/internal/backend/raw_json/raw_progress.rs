//! 进度载荷的原始形状：推送消息与轮询响应共用。
//!
//! 字段全部可缺——推送消息可能只带 `overall` 或只带 `files`，
//! 轮询响应两者都带。归一化只在这里做一次，钳制进度值、解析状态串，
//! 往上不再鸭子类型。

use std::collections::HashMap;

use serde::Deserialize;

use crate::internal::progress::structs::snapshot::{
    FileProgress, OverallProgress, ProgressSnapshot, ProgressStatus,
};

#[derive(Debug, Clone, Deserialize)]
pub struct RawProgressPayload {
    #[serde(default)]
    pub overall: Option<RawOverallProgress>,
    #[serde(default)]
    pub files: Option<HashMap<String, RawFileProgress>>,
}

impl RawProgressPayload {
    /// 归一化为完整快照；缺失的部分取默认值。
    pub fn normalize(self) -> ProgressSnapshot {
        ProgressSnapshot {
            overall: self
                .overall
                .map(RawOverallProgress::normalize)
                .unwrap_or_default(),
            files: self
                .files
                .unwrap_or_default()
                .into_iter()
                .map(|(name, fp)| (name, fp.normalize()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOverallProgress {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub downloaded: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RawOverallProgress {
    pub fn normalize(self) -> OverallProgress {
        OverallProgress {
            status: ProgressStatus::parse(self.status.as_deref().unwrap_or("")),
            progress: clamp_progress(self.progress.unwrap_or(0.0)),
            total: self.total,
            downloaded: self.downloaded,
            message: self.message,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFileProgress {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
}

impl RawFileProgress {
    pub fn normalize(self) -> FileProgress {
        FileProgress {
            status: self.status.unwrap_or_default(),
            progress: clamp_progress(self.progress.unwrap_or(0.0)),
        }
    }
}

/// 进度值钳制到 0～100；后端自身不保证范围，非有限值按 0 处理。
pub(crate) fn clamp_progress(p: f64) -> f64 {
    if !p.is_finite() {
        return 0.0;
    }
    p.clamp(0.0, 100.0)
}
