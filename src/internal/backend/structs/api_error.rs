//! 后端 API 相关错误类型。

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    /// 非 2xx 响应；message 取自错误体的 detail/error/message/msg 字段。
    #[error("后端返回错误 ({status}): {message}")]
    Backend { status: u16, message: String },

    /// 2xx 响应但业务层面拒绝（如 igdl 的 `status: false`）。
    #[error("后端拒绝请求: {0}")]
    Rejected(String),

    #[error("路径格式错误: {0}")]
    Path(#[from] url::ParseError),

    #[error("基础地址无效: {0}")]
    BaseUrl(String),
}

/// 错误响应体：不同端点分别用 detail（FastAPI）/ error / message / msg
/// 携带原因，统一在这里吸收。
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl RawErrorBody {
    pub(crate) fn first_message(self) -> Option<String> {
        self.detail.or(self.error).or(self.message).or(self.msg)
    }
}

/// 从非 2xx 响应提取可读错误；错误体不是 JSON 时退化为状态码。
pub(crate) async fn backend_error(res: reqwest::Response) -> ApiError {
    let status = res.status().as_u16();
    let body = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<RawErrorBody>(&body)
        .ok()
        .and_then(RawErrorBody::first_message)
        .unwrap_or_else(|| format!("HTTP {status}"));
    ApiError::Backend { status, message }
}
