pub mod channel_command;
pub mod channel_config;
pub mod channel_error;
pub mod channel_mode;
pub mod channel_subject;
pub mod hook_adapters;
pub mod progress_channel;
pub mod progress_hooks_container;
pub mod reactive_state;
pub mod snapshot;
pub mod ws_transport;

// 重导出公共类型
pub use channel_config::ChannelConfig;
pub use channel_error::ChannelError;
pub use channel_mode::ChannelMode;
pub use channel_subject::ChannelSubject;
pub use progress_channel::{ProgressChannel, ProgressChannelBuilder};
pub use reactive_state::ChannelReactiveState;
pub use snapshot::{
    FileProgress, OverallProgress, ProgressSnapshot, ProgressStatus,
};
pub use ws_transport::WsTransport;
