use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <div class="flex flex-row left-0 pl-4 p-4 space-x-2 text-sm text-teal-400 dark:text-teal-600">
            <span>"vimm"</span>
            <span>"•"</span>
            <span>"live on hive"</span>
            <span>"•"</span>
            <a href="/faq" class="font-bold">
                "faq"
            </a>
        </div>
    }
}
