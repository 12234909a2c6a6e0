use crate::internal::backend::enums::is_video_filename;

/// 画廊中的单个媒体文件（归一化后，地址已补全为绝对地址）。
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryItem {
    pub filename: String,
    /// "image" 或 "video"
    pub kind: String,
    pub thumbnail_url: Option<String>,
    pub download_status: String,
    pub progress: Option<f64>,
    pub download_url: Option<String>,
}

impl GalleryItem {
    pub fn is_video(&self) -> bool {
        self.kind.eq_ignore_ascii_case("video")
            || is_video_filename(&self.filename)
    }

    /// 展示 / 转发用的媒体地址：优先直链，退回缩略图。
    pub fn media_url(&self) -> Option<&str> {
        self.download_url
            .as_deref()
            .or(self.thumbnail_url.as_deref())
    }
}
