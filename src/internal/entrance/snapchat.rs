//! Snapchat 服务入口：任务发起、进度、画廊、目标管理与 Telegram 转发。
//!
//! 所有函数返回归一化后的领域类型；与实时进度订阅配合使用时，
//! 先 [`start_download`] 再通过
//! [`BackendClient::progress_channel`](crate::backend::BackendClient::progress_channel)
//! 打开通道。
//!
//! example:
//! ```rust,no_run
//! use socialdl_client::backend::{BackendClient, MediaKind};
//! use socialdl_client::snapchat;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = BackendClient::new("http://localhost:8000/snapchat-api/")?;
//!
//! let job = snapchat::start_download(
//!     &client, "alice", MediaKind::Stories, true,
//! ).await?;
//! println!("{}", job.message);
//! # Ok(())
//! # }
//! ```

use crate::internal::backend::enums::{MediaKind, RelayMediaType};
use crate::internal::backend::functions::snapchat_api::{
    self, SnapRelayRequest,
};
use crate::internal::backend::structs::api_error::ApiError;
use crate::internal::backend::structs::backend_client::BackendClient;
use crate::internal::backend::structs::gallery_item::GalleryItem;
use crate::internal::backend::structs::polling_status::{
    ActionOutcome, CacheCleared, JobStart, PollingStatus,
};
use crate::internal::backend::structs::relay::{RelayOptions, RelayOutcome};
use crate::internal::progress::structs::snapshot::ProgressSnapshot;

/// 发起一次抓取任务；成功后进度可通过推送通道或 [`fetch_progress`] 观察。
pub async fn start_download(
    client: &BackendClient,
    username: &str,
    kind: MediaKind,
    send_to_telegram: bool,
) -> Result<JobStart, ApiError> {
    let raw =
        snapchat_api::post_download(client, username, kind, send_to_telegram)
            .await?;
    Ok(raw.normalize())
}

/// 拉取一份当前进度快照（单次请求，轮询回退也走这里）。
pub async fn fetch_progress(
    client: &BackendClient,
    username: &str,
    kind: MediaKind,
) -> Result<ProgressSnapshot, ApiError> {
    let raw = snapchat_api::get_progress_raw(client, username, kind).await?;
    Ok(raw.normalize())
}

/// 获取已下载媒体列表；相对地址已补全为绝对地址。
pub async fn fetch_gallery(
    client: &BackendClient,
    username: &str,
    kind: MediaKind,
) -> Result<Vec<GalleryItem>, ApiError> {
    let raw = snapchat_api::get_gallery_raw(client, username, kind).await?;
    let prefix = client.url_prefix();
    Ok(raw
        .media
        .into_iter()
        .map(|item| item.normalize(&prefix))
        .collect())
}

/// 当前跟踪目标与后端轮询循环的状态。
pub async fn fetch_polling_status(
    client: &BackendClient,
) -> Result<PollingStatus, ApiError> {
    let raw = snapchat_api::get_status_raw(client).await?;
    Ok(raw.normalize())
}

/// 切换跟踪目标。
pub async fn set_target(
    client: &BackendClient,
    username: &str,
) -> Result<(), ApiError> {
    snapchat_api::post_set_target(client, username).await
}

/// 启动后端轮询循环。
pub async fn start_polling(
    client: &BackendClient,
) -> Result<ActionOutcome, ApiError> {
    let raw = snapchat_api::post_action(client, "start-polling").await?;
    Ok(raw.normalize())
}

/// 停止后端轮询循环。
pub async fn stop_polling(
    client: &BackendClient,
) -> Result<ActionOutcome, ApiError> {
    let raw = snapchat_api::post_action(client, "stop-polling").await?;
    Ok(raw.normalize())
}

/// 手动触发一次后端轮询。
pub async fn poll_now(
    client: &BackendClient,
    force: bool,
) -> Result<ActionOutcome, ApiError> {
    let raw = snapchat_api::get_poll_now(client, force).await?;
    Ok(raw.normalize())
}

/// 清空全部进度与缓存数据。
pub async fn clear_cache(
    client: &BackendClient,
) -> Result<ActionOutcome, ApiError> {
    let raw = snapchat_api::post_action(client, "clear-cache").await?;
    Ok(raw.normalize())
}

/// 清理单个用户的缓存。
pub async fn clear_user_cache(
    client: &BackendClient,
    username: &str,
) -> Result<CacheCleared, ApiError> {
    let raw = snapchat_api::post_clear_user_cache(client, username).await?;
    Ok(raw.normalize())
}

/// 把一个媒体地址转发到 Telegram 频道。
pub async fn send_media_to_telegram(
    client: &BackendClient,
    media_url: &str,
    media_type: RelayMediaType,
    options: &RelayOptions,
) -> Result<RelayOutcome, ApiError> {
    let request = SnapRelayRequest {
        media_url,
        media_type: media_type.as_str(),
        source: options.source.as_deref().unwrap_or("snapchat"),
        caption: options.caption.as_deref(),
        original_url: options.original_url.as_deref(),
    };
    let raw = snapchat_api::post_relay(client, &request).await?;
    Ok(raw.normalize())
}
