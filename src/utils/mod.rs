//! Utility modules for genstudio

pub mod cancel;
pub mod data_url;
pub mod mime;

pub use data_url::{data_url_from_base64, to_binary, to_data_url};
