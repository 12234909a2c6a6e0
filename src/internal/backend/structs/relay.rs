/// 转发到 Telegram 的可选项。
#[derive(Debug, Clone, Default)]
pub struct RelayOptions {
    pub caption: Option<String>,
    /// 原始帖子的回链（如 `snapchat:@user/stories`）
    pub original_url: Option<String>,
    /// 来源标识（"snapchat" / "instagram"），缺省由入口函数填写
    pub source: Option<String>,
}

/// 转发结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayOutcome {
    /// "success" / "partial" / "error"
    pub status: String,
    pub message: String,
    pub sent_files: Vec<String>,
    pub failed_files: Vec<String>,
}
