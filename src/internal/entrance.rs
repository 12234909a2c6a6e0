pub mod instagram;
pub mod snapchat;
