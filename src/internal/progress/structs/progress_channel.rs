//! 进度通道
//!
//! 本模块实现单个 (用户名, 媒体类型) 主体的实时进度订阅，
//! 推送优先、轮询兜底。
//!
//! ## 功能特性
//!
//! - **推送优先**：通过 WebSocket 接收后端的进度消息，到达即送达
//! - **心跳保活**：live 期间定期发送 `"ping"` 帧，探测代理/NAT 后的假死连接
//! - **指数退避重连**：断开后按 1s、2s、4s、8s、10s（封顶）的延迟重试
//! - **轮询回退**：重连次数耗尽后改为固定间隔拉取进度，保证最终可达
//! - **钩子机制**：快照与模式变化通过钩子送达，也可通过响应式属性监听
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! # use socialdl_client::backend::{BackendClient, MediaKind};
//! # use socialdl_client::progress::ChannelSubject;
//! # fn example(client: BackendClient) -> Result<(), Box<dyn std::error::Error>> {
//! let subject = ChannelSubject::new("alice", MediaKind::Stories)?;
//! let channel = client
//!     .progress_channel(subject)
//!     .with_snapshot_hook(|snap| {
//!         println!("整体进度 {:.0}%", snap.overall.progress);
//!     })
//!     .open()?;
//! // …视图卸载时：
//! // channel.close().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## 状态机
//!
//! `disconnected → connecting → live`，失败回到 `disconnected` 并安排
//! 重连；重连耗尽后 `→ polling`（对本实例是终点）。`close()` 在任何
//! 状态下都可调用，幂等，返回后不再有任何钩子回调。
//!
//! ## 内部实现说明
//!
//! - `runtime` 子模块：驱动任务主循环（connecting / live / 退避重连）
//! - `polling` 子模块：轮询回退循环，终态后停止

mod polling;
mod runtime;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::internal::backend::structs::backend_client::BackendClient;
use crate::internal::progress::structs::channel_command::ChannelCommand;
use crate::internal::progress::structs::channel_config::ChannelConfig;
use crate::internal::progress::structs::channel_error::ChannelError;
use crate::internal::progress::structs::channel_mode::ChannelMode;
use crate::internal::progress::structs::channel_subject::ChannelSubject;
use crate::internal::progress::structs::hook_adapters::{
    ModeHookAdapter, SnapshotHookAdapter,
};
use crate::internal::progress::structs::progress_hooks_container::ProgressHooksContainer;
use crate::internal::progress::structs::reactive_state::ChannelReactiveState;
use crate::internal::progress::structs::snapshot::ProgressSnapshot;
use crate::internal::progress::structs::ws_transport::WsTransport;
use crate::internal::progress::traits::progress_hook::ProgressHook;
use crate::internal::progress::traits::transport::{
    ProgressSource, ProgressTransport,
};
use crate::internal::states::command_queue::{CommandQueue, command_channel};
use crate::states::reactive_value::ReactiveValue;

use runtime::ChannelRuntime;

/// 进度通道句柄。
///
/// 一个实例对应一条订阅；主体不可变，关闭后不可复用。
/// 卸载视图、切换主体、显式停止时都必须调用 [`close`](Self::close)，
/// 否则驱动任务要到句柄 Drop 时才会收到关闭命令。
pub struct ProgressChannel {
    subject: ChannelSubject,
    closed: Arc<AtomicBool>,
    commands: CommandQueue<ChannelCommand>,
    driver: Mutex<Option<JoinHandle<()>>>,
    reactive: ChannelReactiveState,
}

impl ProgressChannel {
    /// 从自定义传输/轮询源创建构建器（测试注入假实现时使用）。
    pub fn builder(
        transport: Arc<dyn ProgressTransport>,
        source: Arc<dyn ProgressSource>,
        subject: ChannelSubject,
    ) -> ProgressChannelBuilder {
        ProgressChannelBuilder {
            subject,
            config: ChannelConfig::default(),
            transport,
            source,
            hooks: ProgressHooksContainer::default(),
        }
    }

    pub fn subject(&self) -> &ChannelSubject {
        &self.subject
    }

    /// 当前连接模式（可 watch 监听）。
    pub fn mode(&self) -> ReactiveValue<ChannelMode> {
        self.reactive.mode.clone()
    }

    /// 最近一份送达的快照（可 watch 监听）。
    pub fn latest_snapshot(&self) -> ReactiveValue<Option<ProgressSnapshot>> {
        self.reactive.latest.clone()
    }

    /// 当前重连计数（连接成功时清零）。
    pub fn reconnect_attempts(&self) -> ReactiveValue<u32> {
        self.reactive.reconnect_attempts.clone()
    }

    /// 订阅模式变化；回调在独立任务中执行。
    pub fn subscribe_mode<F>(&self, callback: F)
    where
        F: Fn(ChannelMode) + Send + 'static,
    {
        let mut watcher = self.reactive.mode.watch();
        tokio::spawn(async move {
            loop {
                match watcher.changed().await {
                    Ok(mode) => callback(mode),
                    Err(_) => break,
                }
            }
        });
    }

    /// 关闭通道：取消全部定时器、关闭传输、等待驱动任务退出。
    ///
    /// 幂等，可在任何状态下调用。关闭标志在入口同步置位，
    /// 因此本方法开始执行后不会再有任何钩子回调。
    pub async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        let _ = self.commands.send(ChannelCommand::Close);
        let handle = self.driver.lock().await.take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

/// 句柄未显式关闭就被丢弃时，尽力通知驱动任务退出（无法等待其完成）。
impl Drop for ProgressChannel {
    fn drop(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
        let _ = self.commands.send(ChannelCommand::Close);
    }
}

/// 进度通道构建器；`open()` 校验主体并启动驱动任务。
pub struct ProgressChannelBuilder {
    subject: ChannelSubject,
    config: ChannelConfig,
    transport: Arc<dyn ProgressTransport>,
    source: Arc<dyn ProgressSource>,
    hooks: ProgressHooksContainer,
}

impl ProgressChannelBuilder {
    /// 覆盖时间参数（心跳 / 轮询间隔 / 退避）。
    pub fn with_config(mut self, config: ChannelConfig) -> Self {
        self.config = config;
        self
    }

    /// 注册一个完整钩子。
    pub fn with_hook(mut self, hook: impl ProgressHook + 'static) -> Self {
        self.hooks.add(hook);
        self
    }

    /// 注册一个只关心快照的闭包钩子。
    pub fn with_snapshot_hook<F>(mut self, f: F) -> Self
    where
        F: FnMut(&ProgressSnapshot) + Send + 'static,
    {
        self.hooks.add(SnapshotHookAdapter(f));
        self
    }

    /// 注册一个只关心模式变化的闭包钩子。
    pub fn with_mode_hook<F>(mut self, f: F) -> Self
    where
        F: FnMut(ChannelMode) + Send + 'static,
    {
        self.hooks.add(ModeHookAdapter(f));
        self
    }

    /// 启动订阅。立即返回；更新通过钩子与响应式属性异步到达。
    ///
    /// 主体用户名为空是唯一的同步错误；运行期的传输/轮询失败
    /// 全部在通道内部消化。
    pub fn open(self) -> Result<ProgressChannel, ChannelError> {
        if self.subject.username.trim().is_empty() {
            return Err(ChannelError::EmptySubject);
        }

        let closed = Arc::new(AtomicBool::new(false));
        let (commands, consumer) = command_channel();
        let reactive = ChannelReactiveState::new();

        let driver = ChannelRuntime {
            subject: self.subject.clone(),
            config: self.config,
            transport: self.transport,
            source: self.source,
            hooks: self.hooks,
            reactive: reactive.clone(),
            consumer,
            closed: Arc::clone(&closed),
            current: ProgressSnapshot::default(),
            reconnect_attempts: 0,
        };
        let handle = tokio::spawn(driver.run());

        Ok(ProgressChannel {
            subject: self.subject,
            closed,
            commands,
            driver: Mutex::new(Some(handle)),
            reactive,
        })
    }
}

impl BackendClient {
    /// 创建指定主体的进度通道构建器；可链式注册钩子后调用
    /// [`ProgressChannelBuilder::open`] 启动订阅。
    pub fn progress_channel(
        &self,
        subject: ChannelSubject,
    ) -> ProgressChannelBuilder {
        ProgressChannel::builder(
            Arc::new(WsTransport::from_client(self)),
            Arc::new(self.clone()),
            subject,
        )
    }
}
