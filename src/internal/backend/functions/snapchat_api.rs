//! Snapchat 服务的原始端点调用。
//!
//! 这里只负责发请求、区分 2xx 与错误、反序列化为 raw 形状；
//! 归一化与对外形状在入口模块 [`crate::snapchat`] 完成。

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;

use crate::internal::backend::enums::MediaKind;
use crate::internal::backend::raw_json::raw_gallery::RawGalleryResponse;
use crate::internal::backend::raw_json::raw_progress::RawProgressPayload;
use crate::internal::backend::raw_json::raw_status::{
    RawActionOutcome, RawCacheCleared, RawJobStart, RawPollingStatus,
    RawRelayOutcome,
};
use crate::internal::backend::structs::api_error::{ApiError, backend_error};
use crate::internal::backend::structs::backend_client::{
    BackendClient, encode_path_segment,
};
use crate::internal::progress::structs::channel_subject::ChannelSubject;
use crate::internal::progress::structs::snapshot::ProgressSnapshot;
use crate::internal::progress::traits::transport::ProgressSource;

/// POST /download：发起抓取任务。
pub(crate) async fn post_download(
    client: &BackendClient,
    username: &str,
    kind: MediaKind,
    send_to_telegram: bool,
) -> Result<RawJobStart, ApiError> {
    let url = client.api_url("download")?;
    let body = json!({
        "username": username,
        "download_type": kind.as_str(),
        "send_to_telegram": send_to_telegram,
    });
    let res = client.client.post(url).json(&body).send().await?;
    if !res.status().is_success() {
        return Err(backend_error(res).await);
    }
    Ok(res.json().await?)
}

/// GET /progress/{username}/{kind}：拉取一份当前进度。
pub(crate) async fn get_progress_raw(
    client: &BackendClient,
    username: &str,
    kind: MediaKind,
) -> Result<RawProgressPayload, ApiError> {
    let url = client.api_url(&format!(
        "progress/{}/{}",
        encode_path_segment(username),
        kind.as_str(),
    ))?;
    let res = client.client.get(url).send().await?;
    if !res.status().is_success() {
        return Err(backend_error(res).await);
    }
    Ok(res.json().await?)
}

/// GET /gallery/{username}/{kind}：已下载媒体列表。
pub(crate) async fn get_gallery_raw(
    client: &BackendClient,
    username: &str,
    kind: MediaKind,
) -> Result<RawGalleryResponse, ApiError> {
    let url = client.api_url(&format!(
        "gallery/{}/{}",
        encode_path_segment(username),
        kind.as_str(),
    ))?;
    let res = client.client.get(url).send().await?;
    if !res.status().is_success() {
        return Err(backend_error(res).await);
    }
    Ok(res.json().await?)
}

/// GET /status：目标与轮询状态。
pub(crate) async fn get_status_raw(
    client: &BackendClient,
) -> Result<RawPollingStatus, ApiError> {
    let url = client.api_url("status")?;
    let res = client.client.get(url).send().await?;
    if !res.status().is_success() {
        return Err(backend_error(res).await);
    }
    Ok(res.json().await?)
}

/// POST /set-target?username=…：切换跟踪目标。
pub(crate) async fn post_set_target(
    client: &BackendClient,
    username: &str,
) -> Result<(), ApiError> {
    let url = client.api_url("set-target")?;
    let res = client
        .client
        .post(url)
        .query(&[("username", username)])
        .send()
        .await?;
    if !res.status().is_success() {
        return Err(backend_error(res).await);
    }
    Ok(())
}

/// POST 到无请求体的管理端点（start-polling / stop-polling / clear-cache）。
pub(crate) async fn post_action(
    client: &BackendClient,
    path: &str,
) -> Result<RawActionOutcome, ApiError> {
    let url = client.api_url(path)?;
    let res = client.client.post(url).send().await?;
    if !res.status().is_success() {
        return Err(backend_error(res).await);
    }
    Ok(res.json().await?)
}

/// GET /poll-now：手动触发一次后端轮询。
pub(crate) async fn get_poll_now(
    client: &BackendClient,
    force: bool,
) -> Result<RawActionOutcome, ApiError> {
    let url = client.api_url("poll-now")?;
    let mut req = client.client.get(url);
    if force {
        req = req.query(&[("force", "true")]);
    }
    let res = req.send().await?;
    if !res.status().is_success() {
        return Err(backend_error(res).await);
    }
    Ok(res.json().await?)
}

/// POST /clear-user-cache?username=…：清理单个用户的缓存。
pub(crate) async fn post_clear_user_cache(
    client: &BackendClient,
    username: &str,
) -> Result<RawCacheCleared, ApiError> {
    let url = client.api_url("clear-user-cache")?;
    let res = client
        .client
        .post(url)
        .query(&[("username", username)])
        .send()
        .await?;
    if !res.status().is_success() {
        return Err(backend_error(res).await);
    }
    Ok(res.json().await?)
}

/// POST /send-to-telegram 的请求体（Snapchat 形状）。
#[derive(Debug, Serialize)]
pub(crate) struct SnapRelayRequest<'a> {
    #[serde(rename = "mediaUrl")]
    pub media_url: &'a str,
    #[serde(rename = "type")]
    pub media_type: &'a str,
    pub source: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<&'a str>,
    #[serde(
        rename = "originalInstagramUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_url: Option<&'a str>,
}

/// POST /send-to-telegram：转发一个媒体地址。
pub(crate) async fn post_relay(
    client: &BackendClient,
    request: &SnapRelayRequest<'_>,
) -> Result<RawRelayOutcome, ApiError> {
    let url = client.api_url("send-to-telegram")?;
    let res = client.client.post(url).json(request).send().await?;
    if !res.status().is_success() {
        return Err(backend_error(res).await);
    }
    Ok(res.json().await?)
}

/// 轮询源实现：进度通道的拉取回退直接复用 /progress 端点。
#[async_trait]
impl ProgressSource for BackendClient {
    async fn fetch(
        &self,
        subject: &ChannelSubject,
    ) -> Result<ProgressSnapshot, ApiError> {
        let raw =
            get_progress_raw(self, &subject.username, subject.kind).await?;
        Ok(raw.normalize())
    }
}
