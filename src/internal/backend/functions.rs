pub mod instagram_api;
pub mod snapchat_api;
