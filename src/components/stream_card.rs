use leptos::prelude::*;
use leptos_icons::Icon;

use crate::format::compact_count;
use crate::models::streams::Stream;

#[component]
pub fn StreamCard(stream: Stream) -> impl IntoView {
    let href = format!("/watch?user={}", urlencoding::encode(&stream.username));
    let alt = format!("{}'s avatar", stream.username);
    let viewers = format!("{} viewers", compact_count(stream.viewers));
    let has_thumbnail = stream.thumbnail.is_some();

    view! {
        <a
            href=href
            class="group block bg-white dark:bg-teal-800 rounded-lg shadow hover:shadow-lg transition-shadow overflow-hidden"
        >
            <div class="relative aspect-video bg-gray-200 dark:bg-teal-700">
                {if has_thumbnail {
                    view! {
                        <img
                            src=stream.thumbnail.clone()
                            alt=stream.title.clone()
                            class="w-full h-full object-cover"
                        />
                    }
                        .into_any()
                } else {
                    view! {
                        <div class="w-full h-full flex items-center justify-center text-gray-400 dark:text-teal-500">
                            <Icon icon=icondata_bs::BsCameraVideo width="40" height="40" />
                        </div>
                    }
                        .into_any()
                }}
                <span class="absolute top-2 left-2 px-2 py-0.5 rounded text-xs font-bold bg-salmon-600 text-white">
                    "LIVE"
                </span>
                <span class="absolute bottom-2 left-2 px-2 py-0.5 rounded text-xs bg-black/70 text-white">
                    {viewers}
                </span>
            </div>
            <div class="flex gap-3 p-3">
                <img src=stream.avatar alt=alt class="w-10 h-10 rounded-full object-cover" />
                <div class="min-w-0">
                    <h3 class="font-semibold truncate group-hover:text-seafoam-600 dark:group-hover:text-mint-300">
                        {stream.title}
                    </h3>
                    <p class="text-sm text-gray-600 dark:text-gray-400 truncate">{stream.username}</p>
                    <span class="inline-block mt-1 px-2 py-0.5 rounded-full text-xs bg-gray-100 dark:bg-teal-700 text-gray-600 dark:text-gray-300">
                        {stream.category}
                    </span>
                </div>
            </div>
        </a>
    }
}
