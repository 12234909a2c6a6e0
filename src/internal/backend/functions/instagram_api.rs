//! Instagram 服务的原始端点调用。

use serde::Serialize;
use serde_json::json;

use crate::internal::backend::raw_json::raw_media::RawIgLinksResponse;
use crate::internal::backend::raw_json::raw_status::{
    RawCacheCleared, RawChangeTarget, RawPollingStatus,
};
use crate::internal::backend::structs::api_error::{ApiError, backend_error};
use crate::internal::backend::structs::backend_client::BackendClient;

/// GET /igdl?url=…：解析帖子的可下载链接。
pub(crate) async fn get_download_links_raw(
    client: &BackendClient,
    post_url: &str,
) -> Result<RawIgLinksResponse, ApiError> {
    let url = client.api_url("igdl")?;
    let res = client
        .client
        .get(url)
        .query(&[("url", post_url)])
        .send()
        .await?;
    if !res.status().is_success() {
        return Err(backend_error(res).await);
    }
    Ok(res.json().await?)
}

/// GET /target：当前跟踪目标与轮询状态。
pub(crate) async fn get_target_raw(
    client: &BackendClient,
) -> Result<RawPollingStatus, ApiError> {
    let url = client.api_url("target")?;
    let res = client.client.get(url).send().await?;
    if !res.status().is_success() {
        return Err(backend_error(res).await);
    }
    Ok(res.json().await?)
}

/// POST /target：切换跟踪目标。
pub(crate) async fn post_target(
    client: &BackendClient,
    username: &str,
) -> Result<RawChangeTarget, ApiError> {
    let url = client.api_url("target")?;
    let res = client
        .client
        .post(url)
        .json(&json!({ "username": username }))
        .send()
        .await?;
    if !res.status().is_success() {
        return Err(backend_error(res).await);
    }
    Ok(res.json().await?)
}

/// POST 到清理端点（reset-processed / clear-stories-cache）。
pub(crate) async fn post_clear(
    client: &BackendClient,
    path: &str,
) -> Result<RawCacheCleared, ApiError> {
    let url = client.api_url(path)?;
    let res = client.client.post(url).send().await?;
    if !res.status().is_success() {
        return Err(backend_error(res).await);
    }
    Ok(res.json().await?)
}

/// POST /send-to-telegram 的请求体（Instagram 形状）。
#[derive(Debug, Serialize)]
pub(crate) struct IgRelayRequest<'a> {
    #[serde(rename = "videoUrl")]
    pub video_url: &'a str,
    #[serde(
        rename = "originalInstagramUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<&'a str>,
}

/// POST /send-to-telegram：转发一个视频/图片地址。
pub(crate) async fn post_relay(
    client: &BackendClient,
    request: &IgRelayRequest<'_>,
) -> Result<(), ApiError> {
    let url = client.api_url("send-to-telegram")?;
    let res = client.client.post(url).json(request).send().await?;
    if !res.status().is_success() {
        return Err(backend_error(res).await);
    }
    Ok(())
}
