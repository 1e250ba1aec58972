pub mod auth_components;
pub mod context;
pub mod keychain;
pub mod storage;
mod types;

pub use auth_components::*;
pub use types::*;
