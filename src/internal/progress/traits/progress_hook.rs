//! 进度钩子 trait：快照送达与模式变化时插入自定义逻辑。
//!
//! 使用方式二选一（可混用）：
//! - **闭包**：用通道构建器的 `with_snapshot_hook` 传入闭包；
//! - **完整钩子**：实现本 trait，通过 `with_hook` 注册。

use crate::internal::progress::structs::channel_mode::ChannelMode;
use crate::internal::progress::structs::snapshot::ProgressSnapshot;

/// 进度钩子。快照按传输到达顺序逐条送达；`close()` 返回后不再调用。
pub trait ProgressHook: Send {
    /// 每份归一化后的完整快照送达时调用。
    fn on_snapshot(&mut self, snapshot: &ProgressSnapshot);

    /// 通道模式变化时调用（connecting / live / polling …）。
    fn on_mode_change(&mut self, _mode: ChannelMode) {}
}
