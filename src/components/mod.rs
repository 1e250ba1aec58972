pub mod chat;
pub mod dashboard;
pub mod follow_button;
pub mod footer;
pub mod hive_login;
pub mod main_content;
pub mod navbar;
pub mod player;
pub mod sidebar;
pub mod stream_card;
pub mod theme_toggle;
pub mod toast;
pub mod ui;
pub mod upvote_button;
