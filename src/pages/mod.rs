pub mod channel_settings;
pub mod dashboard;
pub mod directory;
pub mod faq;
pub mod following;
pub mod home;
pub mod login;
pub mod stream_key;
pub mod watch;
