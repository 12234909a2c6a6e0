//! 通道相关错误类型。

use thiserror::Error;

/// `open()` 能对外抛出的错误。
///
/// 运行期的传输失败、轮询失败都在通道内部吸收（重连 / 回退 / 下个周期
/// 重试），不会通过错误传播给消费者。
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("用户名为空，无法订阅进度")]
    EmptySubject,
}
