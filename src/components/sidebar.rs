use leptos::prelude::*;
use leptos_fetch::QueryClient;
use leptos_icons::Icon;
use leptos_router::hooks::use_location;
use std::time::Duration;

use crate::format::compact_count;
use crate::models::streams::Stream;
use crate::services::ApiClient;

const STREAMS_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// The shared live-stream listing. Sidebar, home and directory all read it through the query cache.
pub async fn active_streams_query() -> Result<Vec<Stream>, String> {
    ApiClient::from_config()
        .list_streams()
        .await
        .map_err(|e| e.to_string())
}

/// Invalidates the stream listing every `every` until the calling owner is dropped.
pub fn poll_active_streams(client: QueryClient, every: Duration) {
    Effect::new(move |_| {
        let client = client.clone();
        if let Ok(handle) = set_interval_with_handle(
            move || {
                client.invalidate_query(active_streams_query, ());
            },
            every,
        ) {
            on_cleanup(move || handle.clear());
        }
    });
}

struct NavLink {
    label: &'static str,
    href: &'static str,
    icon: icondata_core::Icon,
}

fn nav_links() -> [NavLink; 5] {
    [
        NavLink { label: "Home", href: "/", icon: icondata_bs::BsHouseDoor },
        NavLink { label: "Directory", href: "/directory", icon: icondata_bs::BsGrid },
        NavLink { label: "Following", href: "/following", icon: icondata_bs::BsHeart },
        NavLink { label: "FAQ", href: "/faq", icon: icondata_bs::BsQuestionCircle },
        NavLink { label: "Settings", href: "/settings", icon: icondata_bs::BsGear },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let client: QueryClient = expect_context();
    let streams = client.local_resource(active_streams_query, || ());
    poll_active_streams(client, STREAMS_POLL_INTERVAL);

    let pathname = use_location().pathname;

    view! {
        <aside class="hidden md:flex flex-col w-60 shrink-0 bg-white dark:bg-teal-800 border-r border-gray-200 dark:border-teal-700">
            <nav class="flex flex-col p-2 space-y-1">
                {nav_links()
                    .into_iter()
                    .map(|link| {
                        let href = link.href;
                        let is_active = move || pathname.get() == href;
                        view! {
                            <a
                                href=href
                                class=move || {
                                    if is_active() {
                                        "flex items-center gap-3 px-3 py-2 rounded bg-seafoam-100 dark:bg-teal-700 text-seafoam-700 dark:text-mint-300"
                                    } else {
                                        "flex items-center gap-3 px-3 py-2 rounded text-gray-700 dark:text-gray-300 hover:bg-gray-100 dark:hover:bg-teal-700"
                                    }
                                }
                            >
                                <Icon icon=link.icon width="18" height="18" />
                                <span>{link.label}</span>
                            </a>
                        }
                    })
                    .collect_view()}
            </nav>

            <div class="border-t border-gray-200 dark:border-teal-700 my-2"></div>

            <div class="flex-1 overflow-y-auto px-2">
                <h3 class="px-3 py-1 text-xs font-semibold uppercase tracking-wide text-gray-500 dark:text-gray-400">
                    "Active Streams"
                </h3>
                <Transition fallback=|| {
                    view! { <p class="px-3 text-sm text-gray-500 dark:text-gray-400">"Loading streams..."</p> }
                }>
                    {move || match streams.get() {
                        Some(Ok(list)) if !list.is_empty() => {
                            list.into_iter()
                                .map(|stream| view! { <ActiveStreamItem stream /> })
                                .collect_view()
                                .into_any()
                        }
                        Some(Ok(_)) => {
                            view! {
                                <p class="px-3 text-sm text-gray-500 dark:text-gray-400">"No active streams"</p>
                            }
                                .into_any()
                        }
                        Some(Err(e)) => {
                            log::warn!("sidebar streams unavailable: {e}");
                            view! {
                                <p class="px-3 text-sm text-salmon-600 dark:text-salmon-400">"Streams unavailable"</p>
                            }
                                .into_any()
                        }
                        None => view! { <div></div> }.into_any(),
                    }}
                </Transition>
            </div>
        </aside>
    }
}

#[component]
fn ActiveStreamItem(stream: Stream) -> impl IntoView {
    let href = format!("/watch?user={}", urlencoding::encode(&stream.username));
    let alt = format!("{}'s avatar", stream.username);

    view! {
        <a
            href=href
            class="flex items-center gap-2 px-3 py-2 rounded hover:bg-gray-100 dark:hover:bg-teal-700"
        >
            <img src=stream.avatar alt=alt class="w-8 h-8 rounded-full object-cover" />
            <div class="min-w-0">
                <div class="text-sm font-medium truncate">{stream.username}</div>
                <div class="text-xs text-gray-500 dark:text-gray-400 truncate">{stream.title}</div>
                <div class="text-xs text-salmon-600 dark:text-salmon-400">
                    {format!("{} viewers", compact_count(stream.viewers))}
                </div>
            </div>
        </a>
    }
}
