pub mod channels;
pub mod chat;
pub mod dashboard;
pub mod follows;
pub mod hive_auth;
pub mod hls;
pub mod http;
pub mod streams;

pub use http::{ApiClient, ApiError};
