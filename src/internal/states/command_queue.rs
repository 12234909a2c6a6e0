//! # CommandQueue — 单消费者命令队列
//!
//! 基于 [`tokio::sync::mpsc`] 的无界队列，严格 FIFO，用于向进度通道的
//! 驱动任务传递控制命令。生产者可 Clone，消费者只有一个（驱动任务独占）。

use tokio::sync::mpsc;

/// 命令队列生产者端。
#[derive(Clone, Debug)]
pub(crate) struct CommandQueue<T> {
    sender: mpsc::UnboundedSender<T>,
}

/// 命令队列消费者端，不可 Clone。
#[derive(Debug)]
pub(crate) struct CommandConsumer<T> {
    receiver: mpsc::UnboundedReceiver<T>,
}

/// 创建一对 (生产者, 消费者)。
pub(crate) fn command_channel<T>() -> (CommandQueue<T>, CommandConsumer<T>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (CommandQueue { sender }, CommandConsumer { receiver })
}

impl<T> CommandQueue<T> {
    /// 发送命令；消费者已销毁时原样返回命令。
    pub(crate) fn send(&self, value: T) -> Result<(), T> {
        self.sender.send(value).map_err(|e| e.0)
    }
}

impl<T> CommandConsumer<T> {
    /// 异步等待下一条命令；所有生产者销毁后返回 `None`。
    pub(crate) async fn recv(&mut self) -> Option<T> {
        self.receiver.recv().await
    }
}
