use leptos::{prelude::*, task::spawn_local};
use leptos_icons::Icon;
use std::time::Duration;

use crate::auth::context::use_auth;
use crate::auth::keychain;

const QUICK_WEIGHTS: [u32; 4] = [25, 50, 75, 100];
const VOTED_RESET: Duration = Duration::from_secs(5);

/// Keychain vote weights run from 0 to 10000.
pub fn keychain_weight(percent: u32) -> i32 {
    (percent.clamp(1, 100) * 100) as i32
}

#[component]
pub fn UpvoteButton(
    #[prop(into)] author: String,
    #[prop(into)] permlink: Signal<Option<String>>,
) -> impl IntoView {
    let auth = use_auth();
    let author = StoredValue::new(author);
    let (show_slider, set_show_slider) = signal(false);
    let (percent, set_percent) = signal(100u32);
    let (voting, set_voting) = signal(false);
    let (voted, set_voted) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);

    let upvote = move || {
        let Some(account) = auth.user_untracked() else {
            set_error.set(Some("Please log in to upvote".to_string()));
            return;
        };
        if !keychain::is_installed() {
            set_error.set(Some("Hive Keychain not detected. Please install it to vote.".to_string()));
            return;
        }
        let Some(permlink) = permlink.get_untracked() else {
            set_error.set(Some("Stream post not found".to_string()));
            return;
        };
        let weight = keychain_weight(percent.get_untracked());
        let author = author.get_value();
        set_voting.set(true);
        set_error.set(None);

        spawn_local(async move {
            let result = keychain::vote(&account, &permlink, &author, weight).await;
            set_voting.set(false);
            match result {
                Ok(_) => {
                    log::info!("{account} upvoted @{author}/{permlink} at {weight}");
                    set_voted.set(true);
                    set_show_slider.set(false);
                    set_timeout(move || set_voted.set(false), VOTED_RESET);
                }
                Err(e) => {
                    log::error!("Upvote error: {e}");
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    };

    let unavailable = move || !auth.is_authenticated() || permlink.get().is_none();

    let title = move || {
        if permlink.get().is_none() {
            "Stream post not available"
        } else if !auth.is_authenticated() {
            "Log in to upvote"
        } else {
            "Upvote this stream"
        }
    };

    view! {
        <div
            class="relative inline-block"
            on:mouseenter=move |_| {
                if auth.is_authenticated() {
                    set_show_slider.set(true);
                }
            }
            on:mouseleave=move |_| set_show_slider.set(false)
        >
            <button
                class=move || {
                    let state = if voted.get() {
                        "bg-mint-500 text-teal-900"
                    } else {
                        "bg-gray-200 dark:bg-teal-700 hover:bg-seafoam-100 dark:hover:bg-teal-600"
                    };
                    let disabled = if unavailable() { "opacity-60 cursor-not-allowed" } else { "" };
                    format!("inline-flex items-center gap-2 px-4 py-1.5 rounded text-sm font-medium {state} {disabled}")
                }
                title=title
                disabled=move || voting.get() || unavailable()
                on:click=move |_| upvote()
            >
                <Icon icon=icondata_mdi::MdiArrowUpBold width="16" height="16" />
                {move || {
                    if voted.get() {
                        "Voted!"
                    } else if voting.get() {
                        "Voting..."
                    } else {
                        "Upvote"
                    }
                }}
            </button>

            <Show when=move || show_slider.get() && auth.is_authenticated()>
                <div class="absolute right-0 z-30 mt-1 w-64 p-3 rounded-lg shadow-lg bg-white dark:bg-teal-800 border border-gray-200 dark:border-teal-700">
                    <div class="flex justify-between text-sm mb-2">
                        <span>"Vote Weight"</span>
                        <span class="font-semibold">{move || format!("{}%", percent.get())}</span>
                    </div>
                    <input
                        type="range"
                        min="1"
                        max="100"
                        prop:value=move || percent.get().to_string()
                        on:input=move |ev| {
                            if let Ok(value) = event_target_value(&ev).parse::<u32>() {
                                set_percent.set(value.clamp(1, 100));
                            }
                        }
                        class="w-full accent-seafoam-600"
                    />
                    <div class="flex gap-1 my-2">
                        {QUICK_WEIGHTS
                            .iter()
                            .map(|&weight| {
                                view! {
                                    <button
                                        class=move || {
                                            if percent.get() == weight {
                                                "flex-1 py-1 rounded text-xs bg-seafoam-600 text-white"
                                            } else {
                                                "flex-1 py-1 rounded text-xs bg-gray-100 dark:bg-teal-700"
                                            }
                                        }
                                        on:click=move |_| set_percent.set(weight)
                                    >
                                        {format!("{weight}%")}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                    <button
                        class="w-full py-1.5 rounded bg-seafoam-600 dark:bg-teal-600 text-white text-sm disabled:opacity-50"
                        disabled=move || voting.get()
                        on:click=move |_| upvote()
                    >
                        {move || {
                            if voting.get() {
                                "Voting...".to_string()
                            } else {
                                format!("Upvote {}%", percent.get())
                            }
                        }}
                    </button>
                </div>
            </Show>

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_is_scaled_to_basis_points() {
        assert_eq!(keychain_weight(100), 10000);
        assert_eq!(keychain_weight(25), 2500);
        assert_eq!(keychain_weight(0), 100);
        assert_eq!(keychain_weight(250), 10000);
    }
}
