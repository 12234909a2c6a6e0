//! Instagram 服务入口：链接解析、目标管理、缓存清理与 Telegram 转发。

use url::Url;

use crate::internal::backend::functions::instagram_api::{
    self, IgRelayRequest,
};
use crate::internal::backend::functions::snapchat_api::post_action;
use crate::internal::backend::raw_json::raw_media::normalize_media_entries;
use crate::internal::backend::structs::api_error::ApiError;
use crate::internal::backend::structs::backend_client::BackendClient;
use crate::internal::backend::structs::media_entry::MediaEntry;
use crate::internal::backend::structs::polling_status::{
    ActionOutcome, CacheCleared, PollingStatus,
};

/// 解析帖子的可下载链接。
///
/// 后端以 `status: false` 表示业务失败（私密帖、无效链接等），
/// 原因在 `msg` 字段里；条目去重与质量择优在归一化时完成。
pub async fn fetch_download_links(
    client: &BackendClient,
    post_url: &str,
) -> Result<Vec<MediaEntry>, ApiError> {
    let raw = instagram_api::get_download_links_raw(client, post_url).await?;
    if !raw.status.unwrap_or(false) {
        return Err(ApiError::Rejected(
            raw.msg.unwrap_or_else(|| "下载链接获取失败".to_string()),
        ));
    }
    Ok(normalize_media_entries(raw.data.unwrap_or_default()))
}

/// 清理用户粘贴的帖子链接：去掉多图定位用的 `img_index` 参数。
///
/// 解析失败时原样返回输入。
pub fn clean_post_url(input: &str) -> String {
    let Ok(mut url) = Url::parse(input) else {
        return input.to_string();
    };
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "img_index")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if retained.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(
            retained.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        );
    }
    url.to_string()
}

/// 是否为受支持的 Instagram 帖子链接（p / reel / tv / stories）。
///
/// 允许省略协议与 www 前缀。
pub fn is_post_url(input: &str) -> bool {
    let input = input.trim();
    if input.is_empty() {
        return false;
    }
    let with_scheme = if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{input}")
    };
    let Ok(url) = Url::parse(&with_scheme) else {
        return false;
    };
    let Some(host) = url.host_str() else {
        return false;
    };
    if host != "instagram.com" && !host.ends_with(".instagram.com") {
        return false;
    }
    let mut segments = match url.path_segments() {
        Some(s) => s,
        None => return false,
    };
    let kind = segments.next().unwrap_or("");
    matches!(kind, "p" | "reel" | "tv" | "stories")
        && segments.next().is_some()
}

/// 当前跟踪目标与轮询状态。
pub async fn fetch_target(
    client: &BackendClient,
) -> Result<PollingStatus, ApiError> {
    let raw = instagram_api::get_target_raw(client).await?;
    Ok(raw.normalize())
}

/// 切换跟踪目标；成功时返回后端确认的新目标用户名。
pub async fn change_target(
    client: &BackendClient,
    username: &str,
) -> Result<String, ApiError> {
    let raw = instagram_api::post_target(client, username).await?;
    if !raw.success.unwrap_or(false) {
        return Err(ApiError::Rejected(
            raw.error.unwrap_or_else(|| "目标切换失败".to_string()),
        ));
    }
    Ok(raw.new_target.unwrap_or_else(|| username.to_string()))
}

/// 启动后端轮询循环。
pub async fn start_polling(
    client: &BackendClient,
) -> Result<ActionOutcome, ApiError> {
    let raw = post_action(client, "start-polling").await?;
    Ok(raw.normalize())
}

/// 停止后端轮询循环。
pub async fn stop_polling(
    client: &BackendClient,
) -> Result<ActionOutcome, ApiError> {
    let raw = post_action(client, "stop-polling").await?;
    Ok(raw.normalize())
}

/// 清理已处理帖子与帖子缓存，允许重新处理。
pub async fn reset_processed(
    client: &BackendClient,
) -> Result<CacheCleared, ApiError> {
    let raw = instagram_api::post_clear(client, "reset-processed").await?;
    Ok(raw.normalize())
}

/// 清理快拍缓存，允许重新处理。
pub async fn clear_stories_cache(
    client: &BackendClient,
) -> Result<CacheCleared, ApiError> {
    let raw =
        instagram_api::post_clear(client, "clear-stories-cache").await?;
    Ok(raw.normalize())
}

/// 把一个媒体地址转发到 Telegram 频道。
pub async fn send_to_telegram(
    client: &BackendClient,
    video_url: &str,
    original_url: Option<&str>,
    caption: Option<&str>,
) -> Result<(), ApiError> {
    let request = IgRelayRequest { video_url, original_url, caption };
    instagram_api::post_relay(client, &request).await
}
