use leptos::{prelude::*, task::spawn_local};
use leptos_router::hooks::use_navigate;
use std::time::Duration;

use crate::auth::context::use_auth;
use crate::components::dashboard::chat_moderation::ChatModeration;
use crate::components::dashboard::live_stats::LiveStats;
use crate::components::dashboard::stream_preview::StreamPreview;
use crate::components::dashboard::stream_settings_editor::StreamSettingsEditor;
use crate::models::dashboard::{FollowerGrowthPoint, StreamSettings, StreamStats};
use crate::models::streams::StreamInfo;
use crate::services::dashboard::GROWTH_DAYS;
use crate::services::ApiClient;

const STATS_REFRESH: Duration = Duration::from_secs(30);
const SUCCESS_DISPLAY: Duration = Duration::from_secs(5);

/// Channel settings are authoritative; the public stream record fills in when they can't be read.
fn settings_from_stream(info: StreamInfo) -> StreamSettings {
    StreamSettings {
        title: if info.has_custom_title() { info.title } else { String::new() },
        description: info.description,
        language: info.language.unwrap_or_default(),
        ..Default::default()
    }
}

#[component]
pub fn StreamerDashboard() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if !auth.is_loading() && !auth.is_authenticated() {
            navigate("/", Default::default());
        }
    });

    let signed_in = Memo::new(move |_| auth.user().filter(|_| auth.is_authenticated()));

    move || signed_in.get().map(|username| view! { <Dashboard username /> })
}

#[component]
fn Dashboard(username: String) -> impl IntoView {
    let auth = use_auth();
    let user = StoredValue::new(username);
    let stats = RwSignal::new(StreamStats::default());
    let growth = RwSignal::new(Vec::<FollowerGrowthPoint>::new());
    let settings = RwSignal::new(Option::<StreamSettings>::None);
    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);
    let (success, set_success) = signal(Option::<String>::None);

    Effect::new(move |_| {
        let username = user.get_value();
        let token = auth.bearer();
        spawn_local(async move {
            let client = ApiClient::from_config();
            stats.set(client.stream_stats(&username, token.as_deref()).await);
            growth.set(client.follower_growth(&username, token.as_deref(), GROWTH_DAYS).await);
            let initial = match client.my_channel(token.as_deref()).await {
                Ok(channel) => channel.into(),
                Err(e) => {
                    log::warn!("Falling back to stream info for settings: {e}");
                    settings_from_stream(client.stream_info(&username).await)
                }
            };
            settings.set(Some(initial));
            set_loading.set(false);
        });
    });

    Effect::new(move |_| {
        if let Ok(handle) = set_interval_with_handle(
            move || {
                let username = user.get_value();
                let token = auth.bearer();
                spawn_local(async move {
                    let fresh = ApiClient::from_config()
                        .stream_stats(&username, token.as_deref())
                        .await;
                    stats.set(fresh);
                });
            },
            STATS_REFRESH,
        ) {
            on_cleanup(move || handle.clear());
        }
    });

    let on_save = Callback::new(move |next: StreamSettings| {
        let username = user.get_value();
        let token = auth.bearer();
        set_saving.set(true);
        set_error.set(None);
        set_success.set(None);
        spawn_local(async move {
            match ApiClient::from_config()
                .update_stream_settings(&username, &next, token.as_deref())
                .await
            {
                Ok(_) => {
                    let saved = StreamSettings {
                        last_updated: Some(chrono::Utc::now().to_rfc3339()),
                        ..next
                    };
                    settings.set(Some(saved));
                    set_success.set(Some("Stream settings saved successfully!".to_string()));
                    set_timeout(move || set_success.set(None), SUCCESS_DISPLAY);
                }
                Err(e) => {
                    log::error!("Failed to save settings: {e}");
                    set_error.set(Some(e.to_string()));
                }
            }
            set_saving.set(false);
        });
    });

    let is_live = Signal::derive(move || stats.with(|s| s.is_live));
    let viewers = Signal::derive(move || stats.with(|s| s.current_viewers));
    let alert = "flex items-center justify-between p-3 rounded text-sm";

    view! {
        <div class="p-6 space-y-6">
            <header>
                <h1 class="text-3xl font-bold text-seafoam-600 dark:text-mint-400">"Streamer Dashboard"</h1>
                <p class="text-gray-600 dark:text-gray-300">{format!("Welcome back, @{}!", user.get_value())}</p>
            </header>

            {move || error.get().map(|e| view! {
                <div class=format!("{alert} bg-salmon-100 dark:bg-salmon-900 text-salmon-700 dark:text-salmon-200")>
                    <span>{e}</span>
                    <button on:click=move |_| set_error.set(None)>"×"</button>
                </div>
            })}
            {move || success.get().map(|s| view! {
                <div class=format!("{alert} bg-seafoam-100 dark:bg-seafoam-800 text-seafoam-700 dark:text-mint-200")>
                    <span>{s}</span>
                    <button on:click=move |_| set_success.set(None)>"×"</button>
                </div>
            })}

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="text-gray-500 dark:text-gray-400">"Loading dashboard..."</p> }
            >
                <div class="grid gap-6 xl:grid-cols-3">
                    <div class="xl:col-span-2 space-y-6">
                        <StreamPreview username=user.get_value() is_live viewers />
                        <LiveStats stats growth />
                        <StreamSettingsEditor initial=settings on_save saving />
                    </div>
                    <ChatModeration account=user.get_value() />
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_titles_are_not_carried_into_settings() {
        let info = StreamInfo::offline("alice", "hello");
        let settings = settings_from_stream(info);
        assert_eq!(settings.title, "");
        assert_eq!(settings.description, "hello");
    }
}
