use crate::internal::progress::structs::channel_mode::ChannelMode;
use crate::internal::progress::structs::snapshot::ProgressSnapshot;
use crate::states::reactive_value::ReactiveValue;

/// 通道对外可监听的状态。
#[derive(Clone, Debug)]
pub struct ChannelReactiveState {
    /// 连接模式（只读）：内部更新，外部通过 watch 监听
    pub mode: ReactiveValue<ChannelMode>,
    /// 最近一份送达的快照（只读）
    pub latest: ReactiveValue<Option<ProgressSnapshot>>,
    /// 当前重连计数（只读）：连接成功时清零
    pub reconnect_attempts: ReactiveValue<u32>,
}

impl ChannelReactiveState {
    pub(crate) fn new() -> Self {
        Self {
            mode: ReactiveValue::new(ChannelMode::Disconnected),
            latest: ReactiveValue::new(None),
            reconnect_attempts: ReactiveValue::new(0),
        }
    }
}
