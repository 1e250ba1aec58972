use leptos::prelude::*;
use leptos_icons::Icon;
use leptos_router::hooks::use_navigate;

use crate::auth::context::use_auth;
use crate::auth::LogoutButton;
use crate::components::theme_toggle::ThemeToggle;
use crate::components::hive_login::HiveLogin;
use crate::format::avatar_url;

pub fn directory_search_path(query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        "/directory".to_string()
    } else {
        format!("/directory?search={}", urlencoding::encode(query))
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let (search, set_search) = signal(String::new());
    let (show_login, set_show_login) = signal(false);

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        navigate(&directory_search_path(&search.get_untracked()), Default::default());
    };

    view! {
        <nav class="sticky top-0 z-40 flex items-center justify-between gap-4 px-4 h-14 bg-white dark:bg-teal-800 border-b border-gray-200 dark:border-teal-700">
            <a href="/" class="text-2xl font-bold tracking-wide text-seafoam-600 dark:text-mint-400">
                "VIMM"
            </a>

            <form on:submit=on_search class="flex flex-1 max-w-xl">
                <input
                    type="text"
                    placeholder="Search streams or users..."
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                    class="flex-1 px-3 py-1.5 rounded-l border border-gray-300 dark:border-teal-600 bg-gray-50 dark:bg-teal-900 focus:outline-none focus:border-seafoam-500"
                />
                <button
                    type="submit"
                    class="px-3 rounded-r bg-gray-200 dark:bg-teal-700 hover:bg-gray-300 dark:hover:bg-teal-600"
                    title="Search"
                >
                    <Icon icon=icondata_fi::FiSearch width="16" height="16" />
                </button>
            </form>

            <div class="flex items-center gap-2">
                <ThemeToggle />
                {move || {
                    if auth.is_loading() {
                        view! { <div class="w-8 h-8"></div> }.into_any()
                    } else if let Some(user) = auth.user() {
                        view! { <UserMenu user /> }.into_any()
                    } else {
                        view! {
                            <button
                                on:click=move |_| set_show_login.set(true)
                                class="px-4 py-1.5 rounded bg-seafoam-600 dark:bg-teal-600 text-white hover:bg-seafoam-700 dark:hover:bg-teal-500"
                            >
                                "Login"
                            </button>
                        }
                            .into_any()
                    }
                }}
            </div>

            <Show when=move || show_login.get() && !auth.is_authenticated()>
                <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/50 p-4">
                    <HiveLogin on_close=Callback::new(move |_| set_show_login.set(false)) />
                </div>
            </Show>
        </nav>
    }
}

#[component]
fn UserMenu(user: String) -> impl IntoView {
    let (open, set_open) = signal(false);
    let avatar = avatar_url(&user);
    let alt = format!("{user}'s avatar");

    view! {
        <div class="relative">
            <button
                on:click=move |_| set_open.update(|o| *o = !*o)
                class="flex items-center gap-2 rounded-full focus:outline-none"
            >
                <img src=avatar alt=alt class="w-8 h-8 rounded-full object-cover" />
                <span class="hidden sm:inline text-sm font-medium">{user.clone()}</span>
            </button>
            <Show when=move || open.get()>
                <div
                    class="absolute right-0 mt-2 w-48 py-1 rounded-md shadow-lg bg-white dark:bg-teal-800 border border-gray-200 dark:border-teal-700"
                    on:click=move |_| set_open.set(false)
                >
                    <a href="/dashboard" class="block px-4 py-2 text-sm hover:bg-gray-100 dark:hover:bg-teal-700">
                        "Dashboard"
                    </a>
                    <a href="/settings" class="block px-4 py-2 text-sm hover:bg-gray-100 dark:hover:bg-teal-700">
                        "Channel Settings"
                    </a>
                    <a href="/stream-key" class="block px-4 py-2 text-sm hover:bg-gray-100 dark:hover:bg-teal-700">
                        "Stream Key"
                    </a>
                    <LogoutButton />
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_path_encodes_query() {
        assert_eq!(directory_search_path("  "), "/directory");
        assert_eq!(directory_search_path("art stream"), "/directory?search=art%20stream");
        assert_eq!(directory_search_path(" a&b "), "/directory?search=a%26b");
    }
}
