pub mod api_error;
pub mod backend_client;
pub mod gallery_item;
pub mod media_entry;
pub mod polling_status;
pub mod relay;

// 重导出公共类型
pub use api_error::ApiError;
pub use backend_client::BackendClient;
pub use gallery_item::GalleryItem;
pub use media_entry::MediaEntry;
pub use polling_status::{ActionOutcome, CacheCleared, JobStart, PollingStatus};
pub use relay::{RelayOptions, RelayOutcome};
