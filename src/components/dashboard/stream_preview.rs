use leptos::prelude::*;
use leptos_icons::Icon;

use crate::components::player::CustomPlayer;

#[component]
pub fn StreamPreview(
    #[prop(into)] username: String,
    #[prop(into)] is_live: Signal<bool>,
    #[prop(into)] viewers: Signal<u64>,
) -> impl IntoView {
    let (muted, set_muted) = signal(true);
    let username = StoredValue::new(username);

    view! {
        <section class="bg-white dark:bg-teal-800 rounded-lg shadow p-4">
            <div class="flex items-center justify-between mb-3">
                <h2 class="text-lg font-semibold">"Stream Preview"</h2>
                {move || {
                    if is_live.get() {
                        view! {
                            <span class="inline-flex items-center gap-1 text-xs font-bold text-salmon-600">
                                <span class="w-2 h-2 rounded-full bg-salmon-600 animate-pulse"></span>
                                "LIVE"
                            </span>
                        }
                            .into_any()
                    } else {
                        view! {
                            <span class="inline-flex items-center gap-1 text-xs font-bold text-gray-500">
                                <span class="w-2 h-2 rounded-full bg-gray-400"></span>
                                "OFFLINE"
                            </span>
                        }
                            .into_any()
                    }
                }}
            </div>

            <Show
                when=move || is_live.get()
                fallback=|| {
                    view! {
                        <div class="aspect-video flex flex-col items-center justify-center rounded bg-gray-100 dark:bg-teal-900 text-gray-500 dark:text-gray-400">
                            <Icon icon=icondata_bs::BsCameraVideoOff width="40" height="40" />
                            <p class="mt-2">"Your stream is currently offline"</p>
                            <p class="text-sm">"Start streaming to see a live preview"</p>
                        </div>
                    }
                }
            >
                <CustomPlayer username=username.get_value() muted />
                <div class="flex items-center justify-between mt-2 text-sm">
                    <button
                        class="px-3 py-1 rounded bg-gray-100 dark:bg-teal-700 hover:bg-gray-200 dark:hover:bg-teal-600"
                        on:click=move |_| set_muted.update(|m| *m = !*m)
                    >
                        {move || if muted.get() { "Unmute" } else { "Mute" }}
                    </button>
                    <span class="text-gray-600 dark:text-gray-300">
                        {move || format!("{} viewers", viewers.get())}
                    </span>
                </div>
            </Show>
        </section>
    }
}
