//! 传输层 trait：推送通道与轮询源的抽象接缝。
//!
//! 生产实现分别是 [`WsTransport`](crate::progress::WsTransport)（WebSocket）
//! 和 [`BackendClient`](crate::backend::BackendClient)（HTTP 轮询）；
//! 测试中注入脚本化的假实现来驱动状态机。

use async_trait::async_trait;
use thiserror::Error;

use crate::internal::backend::structs::api_error::ApiError;
use crate::internal::progress::structs::channel_subject::ChannelSubject;
use crate::internal::progress::structs::snapshot::ProgressSnapshot;

/// 推送传输相关错误。
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("WebSocket 错误: {0}")]
    Ws(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("推送通道不可用: {0}")]
    Unavailable(String),
}

/// 推送传输：按主体建立一条推送连接。
///
/// 连接建立失败是可恢复错误，由通道按退避策略重试。
#[async_trait]
pub trait ProgressTransport: Send + Sync {
    async fn connect(
        &self,
        subject: &ChannelSubject,
    ) -> Result<Box<dyn ProgressConnection>, TransportError>;
}

/// 一条已建立的推送连接。
#[async_trait]
pub trait ProgressConnection: Send {
    /// 等待下一条文本载荷。
    ///
    /// - `Some(Ok(_))`：收到一条载荷（是否合法由通道解析时判断）
    /// - `Some(Err(_))`：连接出错，通道视为断开
    /// - `None`：对端正常关闭
    async fn next_payload(&mut self) -> Option<Result<String, TransportError>>;

    /// 发送一帧保活消息；失败只记录日志，不升级为断开
    /// （真正的断开由 `next_payload` 的错误/结束侧探测）。
    async fn send_keepalive(&mut self) -> Result<(), TransportError>;

    /// 主动关闭连接；尽力而为，失败忽略。
    async fn shutdown(&mut self);
}

/// 轮询源：按主体拉取一份当前进度快照。
#[async_trait]
pub trait ProgressSource: Send + Sync {
    async fn fetch(
        &self,
        subject: &ChannelSubject,
    ) -> Result<ProgressSnapshot, ApiError>;
}
