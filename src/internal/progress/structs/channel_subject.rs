use crate::internal::backend::enums::MediaKind;

use super::channel_error::ChannelError;

/// 进度订阅的主体：用户名 + 媒体类型。
///
/// 通道实例的生命周期内不可变；换主体需要新建通道。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSubject {
    pub username: String,
    pub kind: MediaKind,
}

impl ChannelSubject {
    /// 创建主体；用户名去除首尾空白后不能为空。
    pub fn new(username: &str, kind: MediaKind) -> Result<Self, ChannelError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ChannelError::EmptySubject);
        }
        Ok(Self { username: username.to_string(), kind })
    }
}
