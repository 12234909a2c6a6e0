//! 通道驱动任务：connecting / live / 重连退避的主循环。
//!
//! 状态全部由这一个任务独占，外部只能通过命令队列（关闭）和响应式
//! 属性（模式、最新快照、重连计数）与它交互。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep};
use tracing::{debug, info, warn};

use crate::internal::backend::raw_json::raw_progress::RawProgressPayload;
use crate::internal::progress::structs::channel_command::ChannelCommand;
use crate::internal::progress::structs::channel_config::ChannelConfig;
use crate::internal::progress::structs::channel_mode::ChannelMode;
use crate::internal::progress::structs::channel_subject::ChannelSubject;
use crate::internal::progress::structs::progress_hooks_container::ProgressHooksContainer;
use crate::internal::progress::structs::reactive_state::ChannelReactiveState;
use crate::internal::progress::structs::snapshot::ProgressSnapshot;
use crate::internal::progress::traits::transport::{
    ProgressConnection, ProgressSource, ProgressTransport,
};
use crate::internal::states::command_queue::CommandConsumer;

/// live 阶段的退出原因。
pub(crate) enum LiveExit {
    /// 收到关闭命令
    Closed,
    /// 连接断开或出错，需要安排重连
    Lost,
}

/// 轮询阶段的退出原因。
pub(crate) enum PollExit {
    Closed,
    /// 快照到达终态，轮询不再发请求
    Finished,
}

pub(crate) struct ChannelRuntime {
    pub(crate) subject: ChannelSubject,
    pub(crate) config: ChannelConfig,
    pub(crate) transport: Arc<dyn ProgressTransport>,
    pub(crate) source: Arc<dyn ProgressSource>,
    pub(crate) hooks: ProgressHooksContainer,
    pub(crate) reactive: ChannelReactiveState,
    pub(crate) consumer: CommandConsumer<ChannelCommand>,
    pub(crate) closed: Arc<AtomicBool>,
    /// 累积的当前快照；推送消息按字段合并进来
    pub(crate) current: ProgressSnapshot,
    pub(crate) reconnect_attempts: u32,
}

impl ChannelRuntime {
    pub(crate) async fn run(mut self) {
        self.drive().await;
        self.reactive.mode.update(ChannelMode::Disconnected);
    }

    async fn drive(&mut self) {
        loop {
            self.set_mode(ChannelMode::Connecting);
            let subject = self.subject.clone();
            let transport = Arc::clone(&self.transport);
            let connected = tokio::select! {
                biased;
                _ = self.consumer.recv() => return,
                res = transport.connect(&subject) => res,
            };

            match connected {
                Ok(conn) => {
                    info!(
                        "推送通道已连接: {}/{}",
                        subject.username, subject.kind
                    );
                    self.reconnect_attempts = 0;
                    self.reactive.reconnect_attempts.update(0);
                    self.set_mode(ChannelMode::Live);
                    match self.live_loop(conn).await {
                        LiveExit::Closed => return,
                        LiveExit::Lost => {}
                    }
                }
                Err(e) => warn!("推送通道建立失败: {e}"),
            }

            // 断开：超过重连上限则回退到轮询，否则按退避延迟重试
            if self.reconnect_attempts >= self.config.max_reconnect_attempts {
                warn!("重连次数已达上限，回退到轮询");
                self.set_mode(ChannelMode::Polling);
                match self.polling_loop().await {
                    PollExit::Closed => return,
                    PollExit::Finished => {
                        // 终态后保持静默，只等待关闭命令
                        let _ = self.consumer.recv().await;
                        return;
                    }
                }
            }

            self.reconnect_attempts += 1;
            self.reactive
                .reconnect_attempts
                .update(self.reconnect_attempts);
            let delay = self.config.backoff_delay(self.reconnect_attempts);
            warn!(
                "第 {} 次重连将在 {} 毫秒后发起",
                self.reconnect_attempts,
                delay.as_millis()
            );
            self.set_mode(ChannelMode::Disconnected);
            tokio::select! {
                biased;
                _ = self.consumer.recv() => return,
                _ = sleep(delay) => {}
            }
        }
    }

    async fn live_loop(
        &mut self,
        mut conn: Box<dyn ProgressConnection>,
    ) -> LiveExit {
        let period = self.config.heartbeat_interval;
        let mut heartbeat = interval_at(Instant::now() + period, period);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = self.consumer.recv() => {
                    conn.shutdown().await;
                    return LiveExit::Closed;
                }
                _ = heartbeat.tick() => {
                    if let Err(e) = conn.send_keepalive().await {
                        // 发送失败不升级；真正断开由 next_payload 一侧探测
                        debug!("心跳发送失败: {e}");
                    }
                }
                payload = conn.next_payload() => match payload {
                    Some(Ok(text)) => self.apply_push_payload(&text),
                    Some(Err(e)) => {
                        warn!("推送连接出错: {e}");
                        return LiveExit::Lost;
                    }
                    None => {
                        warn!("推送连接已关闭");
                        return LiveExit::Lost;
                    }
                },
            }
        }
    }

    /// 解析一条推送消息并合并进当前快照。
    ///
    /// 解析失败只记录日志，不改变状态、不打扰消费者。
    fn apply_push_payload(&mut self, text: &str) {
        let raw: RawProgressPayload = match serde_json::from_str(text) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("推送消息解析失败，已忽略: {e}");
                return;
            }
        };
        // 消息可能只带 overall 或只带 files；两者都没有时视为无内容
        if raw.overall.is_none() && raw.files.is_none() {
            return;
        }
        if let Some(overall) = raw.overall {
            self.current.overall = overall.normalize();
        }
        if let Some(files) = raw.files {
            self.current.files = files
                .into_iter()
                .map(|(name, fp)| (name, fp.normalize()))
                .collect();
        }
        self.deliver_current();
    }

    pub(crate) fn deliver_current(&mut self) {
        if self.closed.load(Ordering::SeqCst) {
            return;
        }
        let snapshot = self.current.clone();
        self.reactive.latest.update(Some(snapshot.clone()));
        self.hooks.run_on_snapshot(&snapshot);
    }

    pub(crate) fn set_mode(&mut self, mode: ChannelMode) {
        if self.reactive.mode.get() == mode {
            return;
        }
        self.reactive.mode.update(mode);
        if self.closed.load(Ordering::SeqCst) {
            return;
        }
        self.hooks.run_on_mode_change(mode);
    }
}
