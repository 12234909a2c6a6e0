use std::time::Duration;

/// 进度通道的时间参数。
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// 心跳间隔（连接存活探测）
    pub heartbeat_interval: Duration,
    /// 轮询回退的请求间隔
    pub poll_interval: Duration,
    /// 回退到轮询前允许的重连次数
    pub max_reconnect_attempts: u32,
    /// 重连退避的基础延迟
    pub backoff_base: Duration,
    /// 重连退避的延迟上限
    pub backoff_cap: Duration,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval: Duration::from_secs(20),
            poll_interval: Duration::from_millis(1500),
            max_reconnect_attempts: 5,
            backoff_base: Duration::from_millis(1000),
            backoff_cap: Duration::from_millis(10_000),
        }
    }
}

impl ChannelConfig {
    /// 第 `attempt` 次重连前的退避延迟：`min(base * 2^(attempt-1), cap)`。
    ///
    /// attempt 从 1 起；默认参数下依次为 1s、2s、4s、8s、10s（封顶）。
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.backoff_base
            .saturating_mul(factor)
            .min(self.backoff_cap)
    }
}
