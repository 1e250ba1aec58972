use leptos::{prelude::*, task::spawn_local};
use leptos_router::hooks::use_query_map;

use crate::components::chat::Chat;
use crate::components::follow_button::FollowButton;
use crate::components::player::CustomPlayer;
use crate::components::upvote_button::UpvoteButton;
use crate::format::{avatar_url, compact_count};
use crate::models::streams::{StreamInfo, WELCOME_DESCRIPTION};
use crate::services::ApiClient;

/// `?user=` wins over the older `?channel=` spelling.
fn watched_user(user: Option<String>, channel: Option<String>) -> Option<String> {
    user.into_iter()
        .chain(channel)
        .map(|u| u.trim().to_string())
        .find(|u| !u.is_empty())
}

#[component]
pub fn WatchPage() -> impl IntoView {
    let query = use_query_map();
    let username = Memo::new(move |_| query.with(|q| watched_user(q.get("user"), q.get("channel"))));

    move || match username.get() {
        Some(username) => view! { <Watch username /> }.into_any(),
        None => {
            view! {
                <div class="p-8 text-center space-y-2">
                    <h2 class="text-2xl font-bold">"Missing User Parameter"</h2>
                    <p class="text-gray-600 dark:text-gray-300">
                        "Please provide a user parameter in the URL (e.g., /watch?user=username)"
                    </p>
                </div>
            }
                .into_any()
        }
    }
}

#[component]
fn Watch(username: String) -> impl IntoView {
    let info = RwSignal::new(Option::<StreamInfo>::None);
    let channel = StoredValue::new(username.clone());
    Effect::new(move |_| {
        let channel = channel.get_value();
        spawn_local(async move {
            let loaded = ApiClient::from_config().stream_info(&channel).await;
            info.set(Some(loaded));
        });
    });

    let permlink = Signal::derive(move || info.with(|i| i.as_ref().and_then(|i| i.permlink.clone())));
    let is_live = move || info.with(|i| i.as_ref().is_some_and(|i| i.is_live));
    let viewers = move || info.with(|i| i.as_ref().map_or(0, |i| i.viewers));
    let avatar = avatar_url(&username);
    let alt = format!("{username}'s avatar");

    view! {
        <div class="flex flex-col xl:flex-row gap-4 p-4">
            <div class="flex-1 min-w-0 space-y-4">
                <CustomPlayer username=username.clone() />
                <div class="bg-white dark:bg-teal-800 rounded-lg shadow p-4 space-y-3">
                    <div class="flex flex-wrap items-center gap-3">
                        <img src=avatar alt=alt class="w-12 h-12 rounded-full" />
                        <div class="flex-1 min-w-0">
                            <h1 class="text-xl font-bold">{username.clone()}</h1>
                            <div class="flex items-center gap-2 text-sm">
                                <span class=move || {
                                    if is_live() {
                                        "px-2 py-0.5 rounded bg-salmon-600 text-white text-xs font-bold"
                                    } else {
                                        "px-2 py-0.5 rounded bg-gray-500 text-white text-xs font-bold"
                                    }
                                }>{move || if is_live() { "LIVE" } else { "OFFLINE" }}</span>
                                <Show when=move || { viewers() > 0 }>
                                    <span class="text-gray-500 dark:text-gray-400">
                                        {move || format!("{} viewers", compact_count(viewers()))}
                                    </span>
                                </Show>
                            </div>
                        </div>
                        <FollowButton username=username.clone() show_follow_count=true />
                        <UpvoteButton author=username.clone() permlink />
                    </div>
                    {move || match info.get() {
                        None => {
                            view! { <p class="text-gray-500 dark:text-gray-400">"Loading stream information..."</p> }
                                .into_any()
                        }
                        Some(info) => {
                            let title = info.has_custom_title().then(|| info.title.clone());
                            let description = if info.description.is_empty() {
                                WELCOME_DESCRIPTION.to_string()
                            } else {
                                info.description
                            };
                            view! {
                                {title.map(|t| view! { <h2 class="text-lg font-semibold">{t}</h2> })}
                                <div>
                                    <h3 class="font-medium">"Stream Description"</h3>
                                    <p class="text-gray-600 dark:text-gray-300 whitespace-pre-line">{description}</p>
                                </div>
                            }
                                .into_any()
                        }
                    }}
                </div>
            </div>
            <aside class="w-full xl:w-96 h-[70vh]">
                <Chat account=username />
            </aside>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_user_over_channel() {
        assert_eq!(
            watched_user(Some("alice".into()), Some("bob".into())),
            Some("alice".to_string())
        );
        assert_eq!(watched_user(None, Some("bob".into())), Some("bob".to_string()));
        assert_eq!(watched_user(Some("  ".into()), Some("bob".into())), Some("bob".to_string()));
        assert_eq!(watched_user(None, None), None);
    }
}
