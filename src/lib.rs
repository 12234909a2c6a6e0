/// 内部导出的模块
mod internal;

#[cfg(test)]
mod tests;

/// 导出两个服务的入口模块（函数有同名，不做 glob 展开）
pub use internal::entrance::instagram;
pub use internal::entrance::snapchat;

pub mod backend {
    use crate::internal;
    pub use internal::backend::enums::{
        MediaKind, RelayMediaType, is_video_filename,
    };
    pub use internal::backend::structs::api_error::ApiError;
    pub use internal::backend::structs::backend_client::BackendClient;
    pub use internal::backend::structs::gallery_item::GalleryItem;
    pub use internal::backend::structs::media_entry::MediaEntry;
    pub use internal::backend::structs::polling_status::{
        ActionOutcome, CacheCleared, JobStart, PollingStatus,
    };
    pub use internal::backend::structs::relay::{RelayOptions, RelayOutcome};
}

/// 对外提供载荷归一化能力，不能限制死在入口函数中，以防有人要直接喂 JSON
pub mod raw_json {
    pub mod progress {
        pub use crate::internal::backend::raw_json::raw_progress::*;
    }

    pub mod media {
        pub use crate::internal::backend::raw_json::raw_media::*;
    }

    pub mod gallery {
        pub use crate::internal::backend::raw_json::raw_gallery::*;
    }

    pub mod status {
        pub use crate::internal::backend::raw_json::raw_status::*;
    }
}

pub mod progress {
    use crate::internal;
    // 通道与规范快照模型
    pub use internal::progress::structs::*;
    // 传输与钩子 trait（测试注入假实现时使用）
    pub use internal::progress::traits::progress_hook::ProgressHook;
    pub use internal::progress::traits::transport::{
        ProgressConnection, ProgressSource, ProgressTransport,
        TransportError,
    };
}

pub mod controller {
    use crate::internal;
    pub use internal::controller::download_view::{DownloadView, ViewError};
    pub use internal::controller::relay_tracker::{
        RelayState, RelayTracker, is_relayable_status,
    };
}

pub mod states {
    pub mod reactive_value {
        use crate::internal;
        pub use internal::states::reactive_value::*;
    }
}
