//! 进度快照：推送消息与轮询响应统一归一化后的规范模型。
//!
//! 后端的载荷是松散 JSON（字段可缺、状态是自由字符串），只在
//! `backend::raw_json` 边界做一次归一化，往上全部使用本模块的类型。

use std::collections::HashMap;
use std::fmt;

/// 整体下载状态。
///
/// 后端的状态字段是自由字符串；已知取值映射为具体变体，
/// 未知取值保留在 [`ProgressStatus::Other`] 中供 UI 原样展示。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProgressStatus {
    #[default]
    Idle,
    Starting,
    Fetching,
    Downloading,
    Complete,
    Completed,
    Error,
    Other(String),
}

impl ProgressStatus {
    /// 从后端状态字符串解析（大小写不敏感；`not_started` 归为 Idle）。
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "idle" | "not_started" => Self::Idle,
            "starting" => Self::Starting,
            "fetching" => Self::Fetching,
            "downloading" => Self::Downloading,
            "complete" => Self::Complete,
            "completed" => Self::Completed,
            "error" => Self::Error,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Idle => "idle",
            Self::Starting => "starting",
            Self::Fetching => "fetching",
            Self::Downloading => "downloading",
            Self::Complete => "complete",
            Self::Completed => "completed",
            Self::Error => "error",
            Self::Other(s) => s.as_str(),
        }
    }

    /// 是否为完成态（`complete` / `completed`）。
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Complete | Self::Completed)
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 整体进度。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverallProgress {
    pub status: ProgressStatus,
    /// 百分比，归一化时已钳制到 0～100
    pub progress: f64,
    /// 总条目数，后端未提供时为 `None`
    pub total: Option<u64>,
    /// 已完成条目数
    pub downloaded: Option<u64>,
    /// 人类可读的状态说明
    pub message: Option<String>,
}

impl OverallProgress {
    /// 是否已到终态：完成状态，或进度达到 99% 以上。
    ///
    /// 轮询回退在终态后停止发请求。
    pub fn is_terminal(&self) -> bool {
        self.status.is_finished() || self.progress >= 99.0
    }
}

/// 单个文件的进度。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileProgress {
    pub status: String,
    pub progress: f64,
}

/// 一次进度更新的完整快照。
///
/// 推送消息可能只带 `overall` 或只带 `files`，通道内部会与上一份快照
/// 合并后再交给消费者，所以消费者拿到的始终是完整快照。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressSnapshot {
    pub overall: OverallProgress,
    /// 文件名 → 文件进度；条目之间相互独立，无顺序要求
    pub files: HashMap<String, FileProgress>,
}
