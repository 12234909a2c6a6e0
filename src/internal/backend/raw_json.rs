//! 后端载荷的原始形状与归一化。
//!
//! 后端的 JSON 是松散的：字段可缺、命名不稳定、数值不保证范围。
//! 本模块在系统边界把它们一次性映射到规范类型，链路更深处
//! 不再出现鸭子类型。

pub mod raw_gallery;
pub mod raw_media;
pub mod raw_progress;
pub mod raw_status;
