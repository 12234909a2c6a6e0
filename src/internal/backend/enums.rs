use std::fmt;

/// 媒体类型：快拍 / 精选 / 聚光灯。
///
/// 进度、画廊、下载端点都以它作为路径段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Stories,
    Highlights,
    Spotlights,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Stories => "stories",
            MediaKind::Highlights => "highlights",
            MediaKind::Spotlights => "spotlights",
        }
    }

    /// 从端点字符串解析（大小写不敏感）。
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "stories" => Some(MediaKind::Stories),
            "highlights" => Some(MediaKind::Highlights),
            "spotlights" => Some(MediaKind::Spotlights),
            _ => None,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 转发到 Telegram 时的媒体类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayMediaType {
    Photo,
    Video,
}

impl RelayMediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelayMediaType::Photo => "photo",
            RelayMediaType::Video => "video",
        }
    }

    /// 按文件扩展名推断类别。
    pub fn for_filename(name: &str) -> Self {
        if is_video_filename(name) {
            RelayMediaType::Video
        } else {
            RelayMediaType::Photo
        }
    }
}

/// 按扩展名判断是否视频文件（mp4/mov/webm/avi，大小写不敏感）。
pub fn is_video_filename(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    [".mp4", ".mov", ".webm", ".avi"]
        .iter()
        .any(|ext| lower.ends_with(ext))
}
