/// 通道控制命令（通过 CommandQueue 传递，FIFO 保证顺序）
#[derive(Debug, Clone)]
pub enum ChannelCommand {
    Close,
}
