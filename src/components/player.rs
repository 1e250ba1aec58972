use leptos::{html, prelude::*, task::spawn_local};
use std::time::Duration;
use thiserror::Error;

use crate::interop::hls::{plays_hls_natively, HlsPlayer, PlayerEvent};
use crate::services::hls::{tokenized_url, HlsToken};
use crate::services::{ApiClient, ApiError};

#[derive(Clone, Debug, PartialEq)]
enum PlayerStatus {
    Loading,
    Playing,
    Demo,
}

type PlayerSlot = StoredValue<Option<HlsPlayer>, LocalStorage>;

#[derive(Debug, Error, PartialEq)]
enum StartupError {
    #[error("stream unavailable: {0}")]
    Unavailable(#[from] ApiError),
    #[error("video element is not mounted")]
    NoVideoElement,
    #[error("{0}")]
    Attach(String),
}

/// Every startup failure lands on the demo player; success leaves status to the hls events.
fn status_after_start(started: &Result<(), StartupError>) -> Option<PlayerStatus> {
    started.as_ref().err().map(|_| PlayerStatus::Demo)
}

/// Token-authenticated HLS player for a channel; drops to a demo shell when the stream can't be reached.
#[component]
pub fn CustomPlayer(
    #[prop(into)] username: String,
    #[prop(optional, into)] muted: Signal<bool>,
) -> impl IntoView {
    let username = StoredValue::new(username);
    let status = RwSignal::new(PlayerStatus::Loading);
    let video_ref = NodeRef::<html::Video>::new();
    let player: PlayerSlot = StoredValue::new_local(None);
    let refresh_timer = StoredValue::new(Option::<TimeoutHandle>::None);

    Effect::new(move |_| {
        let username = username.get_value();
        spawn_local(async move {
            let started = start(&username, video_ref, status, player, refresh_timer).await;
            if let Err(e) = &started {
                log::warn!("Showing demo player for {username}: {e}");
            }
            if let Some(next) = status_after_start(&started) {
                status.set(next);
            }
        });
    });

    on_cleanup(move || {
        if let Some(Some(handle)) = refresh_timer.try_get_value() {
            handle.clear();
        }
        player.try_set_value(None);
    });

    view! {
        <div class="relative w-full aspect-video bg-black rounded-lg overflow-hidden">
            <video
                node_ref=video_ref
                class=move || if status.get() == PlayerStatus::Demo { "hidden" } else { "w-full h-full" }
                controls=true
                playsinline=true
                prop:muted=move || muted.get()
            ></video>
            <Show when=move || status.get() == PlayerStatus::Loading>
                <div class="absolute inset-0 flex items-center justify-center text-gray-300">
                    "Loading stream..."
                </div>
            </Show>
            <Show when=move || status.get() == PlayerStatus::Playing>
                <span class="absolute top-3 left-3 px-2 py-0.5 rounded text-xs font-bold bg-salmon-600 text-white">
                    "LIVE"
                </span>
            </Show>
            <Show when=move || status.get() == PlayerStatus::Demo>
                <DemoPlayer />
            </Show>
        </div>
    }
}

async fn start(
    username: &str,
    video_ref: NodeRef<html::Video>,
    status: RwSignal<PlayerStatus>,
    player: PlayerSlot,
    refresh_timer: StoredValue<Option<TimeoutHandle>>,
) -> Result<(), StartupError> {
    let client = ApiClient::from_config();
    let stream_id = client.stream_id_for(username).await?;
    let token = client.hls_token(&stream_id).await?;
    let video = video_ref.get_untracked().ok_or(StartupError::NoVideoElement)?;
    let playlist = client.playlist_url(&stream_id);
    attach(&video, &playlist, &token.token, status, player).map_err(StartupError::Attach)?;
    schedule_refresh(stream_id, token, player, refresh_timer);
    Ok(())
}

fn attach(
    video: &web_sys::HtmlVideoElement,
    playlist: &str,
    token: &str,
    status: RwSignal<PlayerStatus>,
    player: PlayerSlot,
) -> Result<(), String> {
    if plays_hls_natively(video) {
        video.set_src(&tokenized_url(playlist, token));
        status.set(PlayerStatus::Playing);
        return Ok(());
    }
    if !HlsPlayer::is_available() {
        return Err("HLS playback is not supported in this browser".to_string());
    }

    let media = video.clone();
    let hls = HlsPlayer::attach(video, playlist, token, move |event| match event {
        PlayerEvent::ManifestParsed => {
            status.set(PlayerStatus::Playing);
            if let Err(e) = media.play() {
                log::debug!("autoplay blocked: {e:?}");
            }
        }
        PlayerEvent::Error { fatal: true, details } => {
            log::error!("Fatal HLS error: {details}");
            status.set(PlayerStatus::Demo);
        }
        PlayerEvent::Error { details, .. } => log::warn!("HLS error: {details}"),
    })
    .map_err(|e| format!("{e:?}"))?;

    player.set_value(Some(hls));
    Ok(())
}

fn schedule_refresh(
    stream_id: String,
    current: HlsToken,
    player: PlayerSlot,
    timer: StoredValue<Option<TimeoutHandle>>,
) {
    let delay = Duration::from_secs(current.refresh_delay_secs());
    let handle = set_timeout_with_handle(
        move || {
            spawn_local(async move {
                match ApiClient::from_config()
                    .refresh_hls_token(&stream_id, &current.token)
                    .await
                {
                    Ok(fresh) => {
                        let alive = player
                            .try_with_value(|p| {
                                if let Some(p) = p {
                                    p.set_token(&fresh.token);
                                }
                            })
                            .is_some();
                        if alive {
                            log::debug!("HLS token refreshed for stream {stream_id}");
                            schedule_refresh(stream_id, fresh, player, timer);
                        }
                    }
                    Err(e) => log::error!("Failed to refresh HLS token: {e}"),
                }
            });
        },
        delay,
    );
    if let Ok(handle) = handle {
        timer.try_set_value(Some(handle));
    }
}

#[component]
fn DemoPlayer() -> impl IntoView {
    let (playing, set_playing) = signal(false);
    let (muted, set_muted) = signal(false);
    let container = NodeRef::<html::Div>::new();

    let go_fullscreen = move |_| {
        if let Some(el) = container.get() {
            if let Err(e) = el.request_fullscreen() {
                log::debug!("fullscreen rejected: {e:?}");
            }
        }
    };

    let control = "px-3 py-1.5 rounded bg-white/10 hover:bg-white/20 text-white text-sm";

    view! {
        <div
            node_ref=container
            class="absolute inset-0 flex flex-col items-center justify-center gap-4 bg-gradient-to-br from-teal-900 to-gray-900 text-center p-6"
        >
            <h3 class="text-xl font-semibold text-white">"Custom Video Player Demo"</h3>
            <p class="text-sm text-gray-300 max-w-md">
                "This is a demo of the custom video player interface. The live stream could not be loaded right now."
            </p>
            <div class="flex gap-2">
                <button class=control on:click=move |_| set_playing.update(|p| *p = !*p)>
                    {move || if playing.get() { "Pause" } else { "Play" }}
                </button>
                <button class=control on:click=move |_| set_muted.update(|m| *m = !*m)>
                    {move || if muted.get() { "Unmute" } else { "Mute" }}
                </button>
                <button class=control on:click=go_fullscreen>
                    "Fullscreen"
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_startup_failure_shows_demo() {
        let failures = [
            StartupError::NoVideoElement,
            StartupError::Unavailable(ApiError::Network("offline".into())),
            StartupError::Attach("HLS playback is not supported in this browser".into()),
        ];
        for failure in failures {
            assert_eq!(status_after_start(&Err(failure)), Some(PlayerStatus::Demo));
        }
    }

    #[test]
    fn successful_start_waits_for_the_manifest() {
        assert_eq!(status_after_start(&Ok(())), None);
    }
}
