use leptos::prelude::*;
use leptos_fetch::QueryClient;
use leptos_router::hooks::use_query_map;

use crate::components::follow_button::FollowButton;
use crate::components::sidebar::active_streams_query;
use crate::components::stream_card::StreamCard;
use crate::models::streams::{categories, filter_streams, stream_count_label, StreamSort, ALL_CATEGORIES};
use crate::services::streams::placeholder_streams;

const SORTS: [(StreamSort, &str); 3] = [
    (StreamSort::Viewers, "Sort by Viewers"),
    (StreamSort::Username, "Sort by Username"),
    (StreamSort::Title, "Sort by Title"),
];

#[component]
pub fn Directory() -> impl IntoView {
    let client: QueryClient = expect_context();
    let streams = client.local_resource(active_streams_query, || ());
    let query = use_query_map();

    let (search, set_search) = signal(String::new());
    let (category, set_category) = signal(ALL_CATEGORIES.to_string());
    let (sort, set_sort) = signal(StreamSort::default());

    // the navbar search lands here as ?search=
    Effect::new(move |_| {
        if let Some(term) = query.with(|q| q.get("search")).filter(|t| !t.is_empty()) {
            set_search.set(term);
        }
    });

    let failed = move || matches!(streams.get(), Some(Err(_)));
    let all_streams = Memo::new(move |_| match streams.get() {
        Some(Ok(list)) => list,
        Some(Err(e)) => {
            log::error!("Failed to fetch streams: {e}");
            placeholder_streams()
        }
        None => Vec::new(),
    });
    let visible = Memo::new(move |_| {
        all_streams.with(|list| filter_streams(list, &search.get(), &category.get(), sort.get()))
    });
    let category_options = Memo::new(move |_| all_streams.with(|list| categories(list)));

    view! {
        <div class="p-6 space-y-6">
            <header>
                <h1 class="text-3xl font-bold text-seafoam-600 dark:text-mint-400">"Stream Directory"</h1>
                <p class="text-gray-600 dark:text-gray-300">"Discover live streams from the VIMM community"</p>
            </header>

            <Show when=failed>
                <div class="p-3 rounded bg-salmon-100 dark:bg-salmon-900 text-salmon-700 dark:text-salmon-200 text-sm">
                    "Live streams could not be loaded. Showing example streams instead."
                </div>
            </Show>

            <div class="flex flex-col md:flex-row gap-3">
                <input
                    type="text"
                    placeholder="Search streams, users, or categories..."
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                    class="flex-1 px-3 py-2 rounded border border-gray-300 dark:border-teal-600 bg-white dark:bg-teal-800"
                />
                <select
                    prop:value=move || category.get()
                    on:change=move |ev| set_category.set(event_target_value(&ev))
                    class="px-3 py-2 rounded border border-gray-300 dark:border-teal-600 bg-white dark:bg-teal-800"
                >
                    <option value=ALL_CATEGORIES>"All Categories"</option>
                    {move || {
                        category_options
                            .get()
                            .into_iter()
                            .map(|c| view! { <option value=c.clone()>{c.clone()}</option> })
                            .collect_view()
                    }}
                </select>
                <select
                    prop:value=move || sort.get().as_str()
                    on:change=move |ev| set_sort.set(StreamSort::parse(&event_target_value(&ev)))
                    class="px-3 py-2 rounded border border-gray-300 dark:border-teal-600 bg-white dark:bg-teal-800"
                >
                    {SORTS
                        .into_iter()
                        .map(|(s, label)| view! { <option value=s.as_str()>{label}</option> })
                        .collect_view()}
                </select>
            </div>

            <Transition fallback=|| {
                view! { <p class="text-gray-500 dark:text-gray-400">"Loading streams..."</p> }
            }>
                <p class="text-sm text-gray-500 dark:text-gray-400">
                    {move || stream_count_label(visible.with(Vec::len))}
                </p>
                <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4">
                    <For
                        each=move || visible.get()
                        key=|stream| stream.username.clone()
                        children=|stream| {
                            let username = stream.username.clone();
                            let description = stream.description.clone().filter(|d| !d.is_empty());
                            view! {
                                <div class="space-y-2">
                                    <StreamCard stream />
                                    {description.map(|d| {
                                        view! { <p class="text-sm text-gray-600 dark:text-gray-300 line-clamp-2">{d}</p> }
                                    })}
                                    <FollowButton username show_follow_count=true />
                                </div>
                            }
                        }
                    />
                </div>
            </Transition>
        </div>
    }
}
