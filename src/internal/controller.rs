//! 视图控制器模块：每个页面一个控制器实例，挂载时创建、卸载时销毁。

pub mod download_view;
pub mod relay_tracker;
