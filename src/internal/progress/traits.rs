pub mod progress_hook;
pub mod transport;
