/// 通道所处的连接模式（由通道内部维护，外部只读监听）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelMode {
    #[default]
    Disconnected,
    Connecting,
    Live,
    Polling,
}
