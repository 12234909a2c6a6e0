//! 画廊响应的原始形状与媒体地址补全。

use serde::Deserialize;

use crate::internal::backend::structs::gallery_item::GalleryItem;

use super::raw_progress::clamp_progress;

#[derive(Debug, Clone, Deserialize)]
pub struct RawGalleryResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub media: Vec<RawGalleryItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawGalleryItem {
    pub filename: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub download_status: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub download_url: Option<String>,
}

impl RawGalleryItem {
    /// 归一化单个条目；相对媒体地址补上 API 前缀。
    pub fn normalize(self, prefix: &str) -> GalleryItem {
        GalleryItem {
            filename: self.filename,
            kind: self.kind.unwrap_or_else(|| "image".to_string()),
            thumbnail_url: self
                .thumbnail_url
                .as_deref()
                .map(|u| absolutize_media_url(u, prefix))
                .filter(|u| !u.is_empty()),
            download_status: self.download_status.unwrap_or_default(),
            progress: self.progress.map(clamp_progress),
            download_url: self
                .download_url
                .as_deref()
                .map(|u| absolutize_media_url(u, prefix))
                .filter(|u| !u.is_empty()),
        }
    }
}

/// 相对地址补上 API 前缀；绝对地址原样返回。
pub fn absolutize_media_url(url: &str, prefix: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    let prefix = prefix.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{prefix}{url}")
    } else {
        format!("{prefix}/{url}")
    }
}
