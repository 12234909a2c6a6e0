//! 单阶段钩子适配器：将闭包包装成 [`ProgressHook`]，供 `with_xx_hook` 使用。

use crate::internal::progress::structs::channel_mode::ChannelMode;
use crate::internal::progress::structs::snapshot::ProgressSnapshot;
use crate::internal::progress::traits::progress_hook::ProgressHook;

/// 仅关心快照的钩子适配器。
pub(crate) struct SnapshotHookAdapter<F>(pub(crate) F);

impl<F> ProgressHook for SnapshotHookAdapter<F>
where
    F: FnMut(&ProgressSnapshot) + Send + 'static,
{
    fn on_snapshot(&mut self, snapshot: &ProgressSnapshot) {
        (self.0)(snapshot);
    }
}

/// 仅关心模式变化的钩子适配器。
pub(crate) struct ModeHookAdapter<F>(pub(crate) F);

impl<F> ProgressHook for ModeHookAdapter<F>
where
    F: FnMut(ChannelMode) + Send + 'static,
{
    fn on_snapshot(&mut self, _snapshot: &ProgressSnapshot) {}

    fn on_mode_change(&mut self, mode: ChannelMode) {
        (self.0)(mode);
    }
}
