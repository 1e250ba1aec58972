pub mod chat_moderation;
pub mod live_stats;
pub mod stream_preview;
pub mod stream_settings_editor;
