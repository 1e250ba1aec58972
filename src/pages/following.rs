use leptos::prelude::*;
use leptos_fetch::QueryClient;
use std::time::Duration;

use crate::auth::auth_components::AuthGate;
use crate::auth::context::use_auth;
use crate::components::follow_button::FollowButton;
use crate::components::sidebar::{active_streams_query, poll_active_streams};
use crate::format::compact_count;
use crate::models::follows::{partition_followed, FollowedChannel};
use crate::services::ApiClient;

const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

async fn following_query(token: Option<String>) -> Result<Vec<FollowedChannel>, String> {
    ApiClient::from_config()
        .following(token.as_deref())
        .await
        .map_err(|e| e.to_string())
}

#[component]
pub fn Following() -> impl IntoView {
    view! {
        <div class="p-6 space-y-6">
            <header>
                <h1 class="text-3xl font-bold text-seafoam-600 dark:text-mint-400">"Following"</h1>
                <p class="text-gray-600 dark:text-gray-300">"Stay updated with your favorite streamers"</p>
            </header>
            <AuthGate message="You need to be logged in to see your followed channels.">
                <FollowedChannels />
            </AuthGate>
        </div>
    }
}

#[component]
fn FollowedChannels() -> impl IntoView {
    let auth = use_auth();
    let client: QueryClient = expect_context();
    let followed = client.local_resource(following_query, move || auth.token());
    let streams = client.local_resource(active_streams_query, || ());
    let unfollowed = RwSignal::new(Vec::<String>::new());

    poll_active_streams(client.clone(), REFRESH_INTERVAL);
    Effect::new(move |_| {
        let client = client.clone();
        if let Ok(handle) = set_interval_with_handle(
            move || {
                client.invalidate_query(following_query, auth.bearer());
            },
            REFRESH_INTERVAL,
        ) {
            on_cleanup(move || handle.clear());
        }
    });

    let on_change = Callback::new(move |(username, following): (String, bool)| {
        unfollowed.update(|list| {
            if following {
                list.retain(|u| u != &username);
            } else if !list.contains(&username) {
                list.push(username);
            }
        });
    });

    let partitioned = move || {
        let channels = followed.get()?;
        let live_streams = match streams.get() {
            Some(Ok(list)) => list,
            _ => Vec::new(),
        };
        Some(channels.map(|channels| {
            let removed = unfollowed.get();
            let kept: Vec<FollowedChannel> = channels
                .into_iter()
                .filter(|c| !removed.contains(&c.username))
                .collect();
            partition_followed(&kept, &live_streams)
        }))
    };

    view! {
        <Transition fallback=|| {
            view! { <p class="text-gray-500 dark:text-gray-400">"Loading your followed channels..."</p> }
        }>
            {move || match partitioned() {
                None => view! { <div></div> }.into_any(),
                Some(Err(e)) => {
                    view! {
                        <div class="p-4 rounded bg-salmon-100 dark:bg-salmon-900 text-salmon-700 dark:text-salmon-200">
                            <h2 class="font-semibold">"Error Loading Following"</h2>
                            <p class="text-sm">{e}</p>
                        </div>
                    }
                        .into_any()
                }
                Some(Ok((live, offline))) if live.is_empty() && offline.is_empty() => {
                    view! {
                        <div class="text-center py-12 space-y-3">
                            <h2 class="text-xl font-semibold">"You're not following anyone yet"</h2>
                            <p class="text-gray-600 dark:text-gray-300">
                                "Discover amazing streamers in the "
                                <a href="/directory" class="text-seafoam-600 dark:text-mint-400 underline">"Directory"</a>
                                " and start following them!"
                            </p>
                            <a
                                href="/directory"
                                class="inline-block px-4 py-2 rounded bg-seafoam-600 dark:bg-teal-600 text-white"
                            >
                                "Browse Streams"
                            </a>
                        </div>
                    }
                        .into_any()
                }
                Some(Ok((live, offline))) => {
                    view! {
                        <ChannelSection title="Live Now" channels=live on_change />
                        <ChannelSection title="Offline" channels=offline on_change />
                    }
                        .into_any()
                }
            }}
        </Transition>
    }
}

#[component]
fn ChannelSection(
    title: &'static str,
    channels: Vec<FollowedChannel>,
    on_change: Callback<(String, bool)>,
) -> impl IntoView {
    if channels.is_empty() {
        return view! { <div></div> }.into_any();
    }
    let heading = format!("{title} ({})", channels.len());

    view! {
        <section class="space-y-3">
            <h2 class="text-xl font-semibold">{heading}</h2>
            <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
                {channels
                    .into_iter()
                    .map(|channel| view! { <FollowedCard channel on_change /> })
                    .collect_view()}
            </div>
        </section>
    }
        .into_any()
}

#[component]
fn FollowedCard(channel: FollowedChannel, on_change: Callback<(String, bool)>) -> impl IntoView {
    let href = format!("/watch?user={}", urlencoding::encode(&channel.username));
    let avatar = channel.avatar();
    let alt = format!("{}'s avatar", channel.username);
    let username = channel.username.clone();
    let is_live = channel.is_live;
    let follow_name = channel.username.clone();
    let status = if channel.is_live {
        format!("{} viewers", compact_count(channel.viewers))
    } else {
        format!("Last seen: {}", channel.last_seen_label())
    };

    view! {
        <div class="rounded-lg bg-white dark:bg-teal-800 shadow overflow-hidden">
            <a href=href.clone() class="block relative aspect-video bg-gray-200 dark:bg-teal-900">
                {channel.thumbnail.clone().map(|src| view! { <img src=src alt="" class="w-full h-full object-cover" /> })}
                <Show when=move || is_live>
                    <span class="absolute top-2 left-2 px-2 py-0.5 rounded bg-salmon-600 text-white text-xs font-bold">
                        "LIVE"
                    </span>
                </Show>
            </a>
            <div class="p-3 flex items-center gap-3">
                <img src=avatar alt=alt class="w-10 h-10 rounded-full" />
                <div class="flex-1 min-w-0">
                    <a href=href class="font-semibold hover:underline">{username}</a>
                    {channel.title.clone().map(|t| view! { <p class="text-sm truncate">{t}</p> })}
                    <p class="text-xs text-gray-500 dark:text-gray-400">{status}</p>
                </div>
                <FollowButton
                    username=follow_name.clone()
                    on_change=Callback::new(move |following| on_change.run((follow_name.clone(), following)))
                />
            </div>
        </div>
    }
}
