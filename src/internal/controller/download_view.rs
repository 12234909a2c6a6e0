//! 下载视图控制器：每个下载页面一个实例，持有该视图的全部状态。
//!
//! 挂载时创建、卸载时 [`stop`](DownloadView::stop)，视图状态不进全局。
//! `overall` / `files` / `busy` 都是响应式属性，UI 直接 watch 渲染。

use std::collections::HashMap;

use thiserror::Error;
use tokio::sync::Mutex;

use crate::internal::backend::enums::MediaKind;
use crate::internal::backend::structs::api_error::ApiError;
use crate::internal::backend::structs::backend_client::BackendClient;
use crate::internal::backend::structs::polling_status::JobStart;
use crate::internal::entrance::snapchat;
use crate::internal::progress::structs::channel_error::ChannelError;
use crate::internal::progress::structs::channel_subject::ChannelSubject;
use crate::internal::progress::structs::progress_channel::ProgressChannel;
use crate::internal::progress::structs::snapshot::{
    FileProgress, OverallProgress, ProgressStatus,
};
use crate::states::reactive_value::ReactiveValue;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("已有任务在进行中")]
    Busy,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Channel(#[from] ChannelError),
}

/// 下载视图的控制器。
pub struct DownloadView {
    client: BackendClient,
    kind: MediaKind,
    busy: ReactiveValue<bool>,
    overall: ReactiveValue<OverallProgress>,
    files: ReactiveValue<HashMap<String, FileProgress>>,
    channel: Mutex<Option<ProgressChannel>>,
}

impl DownloadView {
    pub fn new(client: BackendClient, kind: MediaKind) -> Self {
        Self {
            client,
            kind,
            busy: ReactiveValue::new(false),
            overall: ReactiveValue::new(OverallProgress::default()),
            files: ReactiveValue::new(HashMap::new()),
            channel: Mutex::new(None),
        }
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// 整体进度（可 watch 监听）。
    pub fn overall(&self) -> ReactiveValue<OverallProgress> {
        self.overall.clone()
    }

    /// 逐文件进度（可 watch 监听）。
    pub fn files(&self) -> ReactiveValue<HashMap<String, FileProgress>> {
        self.files.clone()
    }

    pub fn busy(&self) -> ReactiveValue<bool> {
        self.busy.clone()
    }

    /// 发起下载并订阅实时进度。
    ///
    /// 旧订阅（若有）先关闭——换主体需要新通道。任务发起失败时
    /// 错误会同时写进 `overall`（status = error），与返回值二选一消费。
    pub async fn start(
        &self,
        username: &str,
        send_to_telegram: bool,
    ) -> Result<JobStart, ViewError> {
        let subject = ChannelSubject::new(username, self.kind)?;
        if self.busy.get() {
            return Err(ViewError::Busy);
        }
        self.busy.update(true);
        self.overall.update(OverallProgress {
            status: ProgressStatus::Fetching,
            progress: 0.0,
            total: None,
            downloaded: None,
            message: Some(format!(
                "Starting download for {}",
                subject.username
            )),
        });
        self.files.update(HashMap::new());
        self.stop().await;

        let started = match snapchat::start_download(
            &self.client,
            &subject.username,
            self.kind,
            send_to_telegram,
        )
        .await
        {
            Ok(job) => job,
            Err(e) => {
                self.overall.update(OverallProgress {
                    status: ProgressStatus::Error,
                    progress: 0.0,
                    message: Some(e.to_string()),
                    ..Default::default()
                });
                self.busy.update(false);
                return Err(e.into());
            }
        };

        let overall = self.overall.clone();
        let files = self.files.clone();
        let opened = self
            .client
            .progress_channel(subject)
            .with_snapshot_hook(move |snap| {
                overall.update(snap.overall.clone());
                files.update(snap.files.clone());
            })
            .open();
        match opened {
            Ok(channel) => {
                *self.channel.lock().await = Some(channel);
                self.busy.update(false);
                Ok(started)
            }
            Err(e) => {
                self.busy.update(false);
                Err(e.into())
            }
        }
    }

    /// 关闭进度订阅；卸载视图、切换主体时调用。幂等。
    pub async fn stop(&self) {
        if let Some(channel) = self.channel.lock().await.take() {
            channel.close().await;
        }
    }
}
