use std::sync::Arc;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Client;
use url::Url;

use crate::internal::backend::enums::MediaKind;

use super::api_error::ApiError;

/// URL 路径段编码集，对齐 encodeURIComponent
/// （字母数字与 `-_.!~*'()` 之外全部转义）。
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub(crate) fn encode_path_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

/// 后端客户端
///
/// 该结构体定位
/// - 持有 reqwest 客户端与规范化后的基础地址
/// - 各端点函数、进度通道与控制器共用同一个实例
#[derive(Clone, Debug)]
pub struct BackendClient {
    pub client: Client,     // 内部是 Arc，不需要特殊处理
    pub base_url: Arc<Url>, // Arc 避免深拷贝；进度通道的驱动任务也会持有
}

impl BackendClient {
    /// 创建客户端；基础地址必须是 http/https，路径补齐尾部斜杠。
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = format_base_url(base_url)?;
        let client = Client::builder().build()?;
        Ok(Self { client, base_url: Arc::new(base_url) })
    }

    /// 基于基础地址拼接端点路径。
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// 基础地址字符串（去掉尾部斜杠），用于给相对媒体地址补前缀。
    pub(crate) fn url_prefix(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }

    /// 已下载文件的直链：`downloads/{username}/{kind}/{filename}`。
    pub fn download_url(
        &self,
        username: &str,
        kind: MediaKind,
        filename: &str,
    ) -> Result<Url, ApiError> {
        self.api_url(&format!(
            "downloads/{}/{}/{}",
            encode_path_segment(username),
            kind.as_str(),
            encode_path_segment(filename),
        ))
    }
}

fn format_base_url(url: &str) -> Result<Url, ApiError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ApiError::BaseUrl("路径为空".to_string()));
    }

    let mut base_url =
        Url::parse(url).map_err(|e| ApiError::BaseUrl(e.to_string()))?;

    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(ApiError::BaseUrl(format!(
            "不支持的协议: {}",
            base_url.scheme()
        )));
    }

    if !base_url.path().ends_with('/') {
        let new_path = format!("{}/", base_url.path());
        base_url.set_path(&new_path);
    }

    Ok(base_url)
}
