//! # ReactiveValue — 可监听的状态容器
//!
//! 基于 [`tokio::sync::watch`] 的轻量响应式值：持有方通过 `update` 写入，
//! 任意多个观察者通过 [`ReactiveValue::watch`] 异步监听变化。
//! 进度通道的 `mode`、最新快照、重连计数等状态都用它对外暴露。

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

/// 所有持有端都被销毁后继续监听时返回的错误。
#[derive(Debug, Error)]
#[error("属性已被销毁")]
pub struct ValueClosed;

/// 可监听的状态容器。
///
/// Clone 共享同一份内部状态；读写都不阻塞，适合高频更新场景
/// （如逐文件的下载进度）。
#[derive(Clone, Debug)]
pub struct ReactiveValue<T> {
    sender: Arc<watch::Sender<T>>,
}

impl<T> ReactiveValue<T>
where
    T: Clone + Send + Sync,
{
    /// 以初始值创建。
    pub fn new(value: T) -> Self {
        let (sender, _) = watch::channel(value);
        Self { sender: Arc::new(sender) }
    }

    /// 更新值，所有监听者都会收到通知。
    ///
    /// 没有监听者时也会写入（后续 watch 可读到最新值）。
    pub fn update(&self, value: T) {
        self.sender.send_replace(value);
    }

    /// 获取当前值的快照（会 clone）。
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// 创建一个监听器，用于异步等待值变化。
    pub fn watch(&self) -> ValueWatcher<T> {
        ValueWatcher { receiver: self.sender.subscribe() }
    }
}

/// 值监听器；由 [`ReactiveValue::watch`] 创建。
#[derive(Debug)]
pub struct ValueWatcher<T> {
    receiver: watch::Receiver<T>,
}

impl<T> ValueWatcher<T>
where
    T: Clone + Send + Sync,
{
    /// 异步等待下一次变化，返回新值。
    ///
    /// 所有 [`ReactiveValue`] 持有端都销毁后返回 [`ValueClosed`]。
    pub async fn changed(&mut self) -> Result<T, ValueClosed> {
        self.receiver.changed().await.map_err(|_| ValueClosed)?;
        Ok(self.receiver.borrow_and_update().clone())
    }

    /// 同步读当前值。
    pub fn current(&self) -> T {
        self.receiver.borrow().clone()
    }
}
