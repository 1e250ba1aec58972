use leptos::{prelude::*, task::spawn_local};
use std::time::Duration;

use crate::auth::context::use_auth;
use crate::format::compact_count;
use crate::services::ApiClient;

const ERROR_DISPLAY: Duration = Duration::from_secs(3);

#[component]
pub fn FollowButton(
    #[prop(into)] username: String,
    #[prop(optional)] show_follow_count: bool,
    /// Called with the new follow state after a successful toggle.
    #[prop(optional)]
    on_change: Option<Callback<bool>>,
) -> impl IntoView {
    let auth = use_auth();
    let username = StoredValue::new(username);
    let (is_following, set_is_following) = signal(false);
    let (loading, set_loading) = signal(false);
    let (follower_count, set_follower_count) = signal(0u64);
    let (error, set_error) = signal(Option::<String>::None);

    Effect::new(move |_| {
        let authenticated = auth.is_authenticated();
        let channel = username.get_value();
        if channel.is_empty() {
            return;
        }
        let token = auth.bearer();
        spawn_local(async move {
            let client = ApiClient::from_config();
            if authenticated {
                set_is_following.set(client.is_following(token.as_deref(), &channel).await);
            }
            if show_follow_count {
                let stats = client.follow_stats(&channel).await;
                set_follower_count.set(stats.follower_count);
            }
        });
    });

    let on_toggle = move |_| {
        if !auth.is_authenticated() || loading.get_untracked() {
            return;
        }
        let channel = username.get_value();
        let following = is_following.get_untracked();
        let token = auth.bearer();
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            let client = ApiClient::from_config();
            let result = if following {
                client.unfollow(token.as_deref(), &channel).await
            } else {
                client.follow(token.as_deref(), &channel).await
            };
            match result {
                Ok(_) => {
                    set_is_following.set(!following);
                    if let Some(on_change) = on_change {
                        on_change.run(!following);
                    }
                    if show_follow_count {
                        set_follower_count.update(|n| {
                            *n = if following { n.saturating_sub(1) } else { *n + 1 };
                        });
                    }
                }
                Err(e) => {
                    log::error!("Follow operation error: {e}");
                    set_error.set(Some(e.to_string()));
                    set_timeout(move || set_error.set(None), ERROR_DISPLAY);
                }
            }
            set_loading.set(false);
        });
    };

    let title = move || {
        let channel = username.get_value();
        if !auth.is_authenticated() {
            "Login to follow channels".to_string()
        } else if is_following.get() {
            format!("Unfollow {channel}")
        } else {
            format!("Follow {channel}")
        }
    };

    let button_class = move || {
        let state = if is_following.get() {
            "bg-gray-200 dark:bg-teal-700 text-gray-800 dark:text-gray-100 hover:bg-salmon-100 dark:hover:bg-salmon-900"
        } else {
            "bg-salmon-500 text-white hover:bg-salmon-600"
        };
        let disabled = if !auth.is_authenticated() || loading.get() {
            "opacity-60 cursor-not-allowed"
        } else {
            ""
        };
        format!("inline-flex items-center gap-2 px-4 py-1.5 rounded font-medium text-sm transition-colors {state} {disabled}")
    };

    let label = move || {
        let following = is_following.get();
        if loading.get() {
            if following { "Unfollowing..." } else { "Following..." }.to_string()
        } else {
            let base = if following { "✓ Following" } else { "+ Follow" };
            let count = follower_count.get();
            if show_follow_count && count > 0 {
                format!("{base} · {}", compact_count(count))
            } else {
                base.to_string()
            }
        }
    };

    view! {
        <div class="relative inline-block">
            <button
                class=button_class
                title=title
                disabled=move || !auth.is_authenticated() || loading.get()
                on:click=on_toggle
            >
                {label}
            </button>
            {move || {
                error.get()
                    .map(|e| {
                        view! {
                            <div class="absolute left-0 mt-1 whitespace-nowrap px-2 py-1 rounded text-xs bg-salmon-100 dark:bg-salmon-900 text-salmon-700 dark:text-salmon-200">
                                {e}
                            </div>
                        }
                    })
            }}
        </div>
    }
}
