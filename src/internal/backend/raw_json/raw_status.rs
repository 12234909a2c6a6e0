//! 目标 / 轮询管理与任务发起相关响应的原始形状。
//!
//! Snapchat 的 `/status` 用 `target_username`，Instagram 的 `/target`
//! 用 `current_target`；两边的布尔字段在缺省时都按 false 处理，
//! 归一化为同一个 [`PollingStatus`]。

use serde::Deserialize;

use crate::internal::backend::structs::polling_status::{
    ActionOutcome, CacheCleared, JobStart, PollingStatus,
};
use crate::internal::backend::structs::relay::RelayOutcome;

#[derive(Debug, Clone, Deserialize)]
pub struct RawPollingStatus {
    #[serde(default)]
    pub target_username: Option<String>,
    #[serde(default)]
    pub current_target: Option<String>,
    #[serde(default)]
    pub polling_enabled: Option<bool>,
    #[serde(default)]
    pub polling_active: Option<bool>,
    #[serde(default)]
    pub polling_started: Option<bool>,
}

impl RawPollingStatus {
    pub fn normalize(self) -> PollingStatus {
        PollingStatus {
            target: self
                .target_username
                .or(self.current_target)
                .filter(|s| !s.is_empty()),
            enabled: self.polling_enabled.unwrap_or(false),
            active: self.polling_active.unwrap_or(false),
            started: self.polling_started.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawActionOutcome {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RawActionOutcome {
    pub fn normalize(self) -> ActionOutcome {
        ActionOutcome {
            success: self.success.unwrap_or(false),
            message: self.message.or(self.error).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawChangeTarget {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub new_target: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCacheCleared {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub processed_deleted: Option<u64>,
    #[serde(default)]
    pub cache_deleted: Option<u64>,
    #[serde(default)]
    pub processed_stories_deleted: Option<u64>,
    #[serde(default)]
    pub stories_cache_deleted: Option<u64>,
    #[serde(default)]
    pub deleted: Option<u64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RawCacheCleared {
    pub fn normalize(self) -> CacheCleared {
        CacheCleared {
            success: self.success.unwrap_or(false),
            processed_deleted: self
                .processed_deleted
                .or(self.processed_stories_deleted)
                .unwrap_or(0),
            cache_deleted: self
                .cache_deleted
                .or(self.stories_cache_deleted)
                .or(self.deleted)
                .unwrap_or(0),
            username: self.username.unwrap_or_default(),
            message: self.message.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawJobStart {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub media_urls: Option<Vec<String>>,
    #[serde(default)]
    pub telegram_sent: Option<bool>,
    #[serde(default)]
    pub telegram_message: Option<String>,
}

impl RawJobStart {
    pub fn normalize(self) -> JobStart {
        JobStart {
            status: self.status.unwrap_or_default(),
            message: self.message.unwrap_or_default(),
            media_urls: self.media_urls.unwrap_or_default(),
            telegram_sent: self.telegram_sent,
            telegram_message: self.telegram_message,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRelayOutcome {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub sent_files: Option<Vec<String>>,
    #[serde(default)]
    pub failed_files: Option<Vec<String>>,
}

impl RawRelayOutcome {
    pub fn normalize(self) -> RelayOutcome {
        RelayOutcome {
            status: self.status.unwrap_or_default(),
            message: self.message.unwrap_or_default(),
            sent_files: self.sent_files.unwrap_or_default(),
            failed_files: self.failed_files.unwrap_or_default(),
        }
    }
}
