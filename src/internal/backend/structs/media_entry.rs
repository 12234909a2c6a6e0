/// Instagram 下载条目（归一化后的规范形状）。
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEntry {
    /// 质量描述（如 "HD"、"SD 480p"），后端未提供时为 `None`
    pub quality: Option<String>,
    pub thumbnail: Option<String>,
    /// 直接可下载的媒体地址
    pub url: String,
    /// 地址是否指向进度型 API 而非静态文件
    pub is_progress: bool,
    /// 多图帖中的序号（从 1 起）
    pub carousel_index: Option<u32>,
    pub is_video: Option<bool>,
}
