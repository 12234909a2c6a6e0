//! WebSocket 推送传输：[`ProgressTransport`] 的生产实现。
//!
//! 端点形如 `ws(s)://…/ws/progress/{username}/{kind}`，用户名按
//! URL 路径段编码。对端以 JSON 文本帧推送进度，保活帧为文本 `"ping"`，
//! 无需应答。

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use url::Url;

use crate::internal::backend::structs::backend_client::{
    BackendClient, encode_path_segment,
};
use crate::internal::progress::structs::channel_subject::ChannelSubject;
use crate::internal::progress::traits::transport::{
    ProgressConnection, ProgressTransport, TransportError,
};

/// WebSocket 传输；按主体拼出进度端点并建立连接。
#[derive(Debug, Clone)]
pub struct WsTransport {
    ws_base: Url,
}

impl WsTransport {
    /// 从后端客户端派生：`http → ws`，`https → wss`，路径不变。
    pub fn from_client(client: &BackendClient) -> Self {
        let mut ws_base = (*client.base_url).clone();
        let scheme = match ws_base.scheme() {
            "https" => "wss",
            _ => "ws",
        };
        // http/https 与 ws/wss 同为 special scheme，set_scheme 不会失败
        let _ = ws_base.set_scheme(scheme);
        Self { ws_base }
    }

    fn progress_url(
        &self,
        subject: &ChannelSubject,
    ) -> Result<String, TransportError> {
        let path = format!(
            "ws/progress/{}/{}",
            encode_path_segment(&subject.username),
            subject.kind.as_str(),
        );
        let url = self.ws_base.join(&path).map_err(|e| {
            TransportError::Unavailable(format!("进度端点拼接失败: {e}"))
        })?;
        Ok(url.into())
    }
}

#[async_trait]
impl ProgressTransport for WsTransport {
    async fn connect(
        &self,
        subject: &ChannelSubject,
    ) -> Result<Box<dyn ProgressConnection>, TransportError> {
        let url = self.progress_url(subject)?;
        let (stream, _) = connect_async(url.as_str()).await?;
        Ok(Box::new(WsConnection { inner: stream }))
    }
}

/// 一条已建立的 WebSocket 连接。
pub struct WsConnection {
    inner: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl ProgressConnection for WsConnection {
    async fn next_payload(&mut self) -> Option<Result<String, TransportError>> {
        loop {
            match self.inner.next().await {
                Some(Ok(Message::Text(text))) => return Some(Ok(text)),
                Some(Ok(Message::Close(_))) => return None,
                // Ping/Pong/二进制帧与进度无关，跳过
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Some(Err(e.into())),
                None => return None,
            }
        }
    }

    async fn send_keepalive(&mut self) -> Result<(), TransportError> {
        self.inner
            .send(Message::Text("ping".to_string()))
            .await
            .map_err(Into::into)
    }

    async fn shutdown(&mut self) {
        let _ = self.inner.close(None).await;
    }
}
