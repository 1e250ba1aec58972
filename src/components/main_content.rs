use leptos::prelude::*;
use leptos_fetch::QueryClient;

use crate::components::sidebar::active_streams_query;
use crate::components::stream_card::StreamCard;
use crate::components::ui::{ButtonVariant, LinkButton};
use crate::models::streams::top_by_viewers;

const FEATURED_COUNT: usize = 3;

#[component]
pub fn MainContent() -> impl IntoView {
    let client: QueryClient = expect_context();
    let streams = client.local_resource(active_streams_query, || ());

    view! {
        <div class="p-6 space-y-8">
            <section>
                <h1 class="text-3xl font-bold text-seafoam-600 dark:text-mint-400">"Welcome to VIMM"</h1>
                <p class="mt-2 text-gray-600 dark:text-gray-300">
                    "Live streams from the Hive community. Follow creators, chat in real time and reward great content."
                </p>
            </section>

            <section>
                <div class="flex items-center justify-between mb-4">
                    <h2 class="text-xl font-semibold">"Featured Streams"</h2>
                    <LinkButton href="/directory" variant=ButtonVariant::Outline>
                        "Browse all"
                    </LinkButton>
                </div>
                <Transition fallback=|| {
                    view! { <p class="text-gray-500 dark:text-gray-400">"Loading streams..."</p> }
                }>
                    {move || match streams.get() {
                        Some(Ok(list)) if !list.is_empty() => {
                            view! {
                                <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
                                    {top_by_viewers(&list, FEATURED_COUNT)
                                        .into_iter()
                                        .map(|stream| view! { <StreamCard stream /> })
                                        .collect_view()}
                                </div>
                            }
                                .into_any()
                        }
                        Some(Ok(_)) => {
                            view! {
                                <p class="text-gray-500 dark:text-gray-400">
                                    "Nobody is live right now. Check back soon!"
                                </p>
                            }
                                .into_any()
                        }
                        Some(Err(e)) => {
                            view! {
                                <p class="text-salmon-600 dark:text-salmon-400">
                                    "Could not load streams: " {e}
                                </p>
                            }
                                .into_any()
                        }
                        None => view! { <div></div> }.into_any(),
                    }}
                </Transition>
            </section>
        </div>
    }
}
