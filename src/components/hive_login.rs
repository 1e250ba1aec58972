use leptos::{prelude::*, task::spawn_local};
use leptos_icons::Icon;

use crate::auth::context::use_auth;

const KEYCHAIN_DOWNLOADS: [(&str, &str); 3] = [
    (
        "Chrome",
        "https://chrome.google.com/webstore/detail/hive-keychain/jcacnejopjdphbnjgfaaobbfafkihpep",
    ),
    ("Firefox", "https://addons.mozilla.org/en-US/firefox/addon/hive-keychain/"),
    (
        "Edge",
        "https://microsoftedge.microsoft.com/addons/detail/hive-keychain/mnibkjjhbdiijkbeldkkdafdgciimhpd",
    ),
];

/// Username form that signs a login challenge with Hive Keychain.
#[component]
pub fn HiveLogin(#[prop(optional)] on_close: Option<Callback<()>>) -> impl IntoView {
    let auth = use_auth();
    let (username, set_username) = signal(String::new());
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let name = username.get_untracked().trim().to_string();
        if name.is_empty() {
            return;
        }
        set_submitting.set(true);
        auth.clear_error();
        spawn_local(async move {
            let result = auth.login(&name).await;
            set_submitting.set(false);
            match result {
                Ok(()) => {
                    if let Some(close) = on_close {
                        close.run(());
                    }
                }
                Err(e) => log::error!("Login error: {e}"),
            }
        });
    };

    let on_input = move |ev| {
        set_username.set(event_target_value(&ev));
        if auth.error().is_some() {
            auth.clear_error();
        }
    };

    view! {
        <div class="bg-white dark:bg-teal-800 rounded-lg shadow-xl w-full max-w-md">
            <div class="flex items-center justify-between px-6 py-4 border-b border-gray-200 dark:border-teal-700">
                <h2 class="text-lg font-semibold">"Login with Hive Keychain"</h2>
                {on_close
                    .map(|close| {
                        view! {
                            <button
                                class="text-2xl leading-none text-gray-500 hover:text-gray-800 dark:hover:text-white"
                                disabled=move || submitting.get()
                                on:click=move |_| close.run(())
                            >
                                "×"
                            </button>
                        }
                    })}
            </div>

            <div class="px-6 py-4 space-y-4">
                <div class="flex gap-3 items-start text-sm text-gray-600 dark:text-gray-300">
                    <Icon icon=icondata_bs::BsShieldLock width="24" height="24" />
                    <p>
                        "Sign in securely using your Hive account and Keychain browser extension. "
                        "Your private keys never leave your device."
                    </p>
                </div>

                <form on:submit=on_submit class="space-y-3">
                    <label for="hive-username" class="block text-sm font-medium">"Hive Username"</label>
                    <input
                        id="hive-username"
                        type="text"
                        autocomplete="username"
                        placeholder="Enter your Hive username"
                        prop:value=move || username.get()
                        on:input=on_input
                        disabled=move || submitting.get()
                        class="w-full px-3 py-2 rounded border border-gray-300 dark:border-teal-600 bg-gray-50 dark:bg-teal-900 focus:outline-none focus:border-seafoam-500"
                    />

                    {move || {
                        auth.error()
                            .map(|error| {
                                view! {
                                    <div class="px-3 py-2 rounded text-sm bg-salmon-100 dark:bg-salmon-900 text-salmon-700 dark:text-salmon-200">
                                        {error}
                                    </div>
                                }
                            })
                    }}

                    <button
                        type="submit"
                        disabled=move || submitting.get() || username.get().trim().is_empty()
                        class="w-full flex items-center justify-center gap-2 px-4 py-2 rounded bg-seafoam-600 dark:bg-teal-600 text-white hover:bg-seafoam-700 dark:hover:bg-teal-500 disabled:opacity-50 disabled:cursor-not-allowed"
                    >
                        <Icon icon=icondata_tb::TbKeyOutline width="18" height="18" />
                        {move || if submitting.get() { "Authenticating..." } else { "Sign with Keychain" }}
                    </button>
                </form>

                <div class="pt-2 border-t border-gray-200 dark:border-teal-700 text-sm">
                    <h4 class="font-medium">"Don't have Hive Keychain?"</h4>
                    <p class="text-gray-600 dark:text-gray-400">
                        "Install the Hive Keychain browser extension to securely manage your Hive account:"
                    </p>
                    <div class="flex gap-3 mt-2">
                        {KEYCHAIN_DOWNLOADS
                            .iter()
                            .map(|(browser, url)| {
                                view! {
                                    <a
                                        href=*url
                                        target="_blank"
                                        rel="noopener noreferrer"
                                        class="text-seafoam-600 dark:text-mint-300 hover:underline"
                                    >
                                        {*browser}
                                    </a>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            </div>
        </div>
    }
}
