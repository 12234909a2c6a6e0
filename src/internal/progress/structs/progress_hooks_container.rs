use crate::internal::progress::structs::channel_mode::ChannelMode;
use crate::internal::progress::structs::snapshot::ProgressSnapshot;
use crate::internal::progress::traits::progress_hook::ProgressHook;

/// 钩子容器：持有注册的全部钩子，按添加顺序依次执行。
#[derive(Default)]
pub struct ProgressHooksContainer {
    hooks: Vec<Box<dyn ProgressHook>>,
}

impl ProgressHooksContainer {
    /// 添加一个钩子；支持多次调用以注册多个。
    pub(crate) fn add(&mut self, hook: impl ProgressHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub(crate) fn run_on_snapshot(&mut self, snapshot: &ProgressSnapshot) {
        for h in self.hooks.iter_mut() {
            h.on_snapshot(snapshot);
        }
    }

    pub(crate) fn run_on_mode_change(&mut self, mode: ChannelMode) {
        for h in self.hooks.iter_mut() {
            h.on_mode_change(mode);
        }
    }
}
