//! 轮询回退：推送通道重连耗尽后的拉取循环。
//!
//! 对本通道实例而言轮询是终点：一旦进入就不再尝试推送传输。
//! 快照到达终态（完成或进度 ≥ 99%）后停止发请求。

use std::sync::Arc;

use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info};

use super::runtime::{ChannelRuntime, PollExit};

impl ChannelRuntime {
    pub(crate) async fn polling_loop(&mut self) -> PollExit {
        let period = self.config.poll_interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = self.consumer.recv() => return PollExit::Closed,
                _ = ticker.tick() => {
                    // 在本轮 await 完成前不会进入下一个 tick，天然不重叠
                    if self.poll_once().await {
                        return PollExit::Finished;
                    }
                }
            }
        }
    }

    /// 单次轮询；返回是否到达终态。
    ///
    /// 失败只记录日志，下个周期重试；对消费者唯一可见的影响是
    /// 更新暂时不再到达。
    async fn poll_once(&mut self) -> bool {
        let subject = self.subject.clone();
        let source = Arc::clone(&self.source);
        match source.fetch(&subject).await {
            Ok(snapshot) => {
                self.current = snapshot;
                self.deliver_current();
                if self.current.overall.is_terminal() {
                    info!(
                        "轮询已停止（状态: {}，进度 {:.0}%）",
                        self.current.overall.status,
                        self.current.overall.progress
                    );
                    return true;
                }
                false
            }
            Err(e) => {
                debug!("轮询失败，等待下个周期: {e}");
                false
            }
        }
    }
}
