use leptos::{prelude::*, task::spawn_local};
use std::time::Duration;

use crate::auth::auth_components::AuthGate;
use crate::auth::context::use_auth;
use crate::auth::keychain::{self, POSTING};
use crate::components::toast::{Toast, ToastKind, ToastState};
use crate::components::ui::{Button, ButtonVariant};
use crate::interop::copy_to_clipboard;
use crate::services::hive_auth::POSTER_ACCOUNT;
use crate::services::ApiClient;

const SIGN_MESSAGE: &str = "Sign to verify your Hive account ownership for stream key generation";
const KEYCHAIN_MISSING: &str = "Hive Keychain is required but not found. Please install it and refresh the page.";
const INGEST_SERVER: &str = "rtmp://vimm.tv/live";
const KEYCHAIN_ATTEMPTS: u32 = 20;
const KEYCHAIN_POLL_MS: i32 = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PostingAuth {
    Checking,
    Granted,
    Missing,
}

#[component]
pub fn StreamKeyGenerator() -> impl IntoView {
    view! {
        <div class="p-6 max-w-3xl mx-auto space-y-6">
            <h1 class="text-3xl font-bold text-seafoam-600 dark:text-mint-400">"Vimm Stream Key Generator"</h1>
            <AuthGate message="Please log in with your Hive account to generate a stream key.">
                <KeyGenerator />
            </AuthGate>
        </div>
    }
}

#[component]
fn KeyGenerator() -> impl IntoView {
    let auth = use_auth();
    let toast = ToastState::new();
    let (keychain_ready, set_keychain_ready) = signal(false);
    let (stream_key, set_stream_key) = signal(Option::<String>::None);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);
    let (posting_auth, set_posting_auth) = signal(PostingAuth::Checking);

    Effect::new(move |_| {
        spawn_local(async move {
            if keychain::wait_until_installed(KEYCHAIN_ATTEMPTS, KEYCHAIN_POLL_MS).await {
                log::info!("Hive Keychain found");
                keychain::handshake().await;
                set_keychain_ready.set(true);
            } else {
                log::warn!("Hive Keychain not found");
            }
        });
    });

    Effect::new(move |_| {
        let Some(user) = auth.user() else {
            return;
        };
        set_posting_auth.set(PostingAuth::Checking);
        spawn_local(async move {
            let state = match ApiClient::from_config().hive_account(&user).await {
                Ok(account) if account.posting.grants(POSTER_ACCOUNT) => PostingAuth::Granted,
                Ok(_) => PostingAuth::Missing,
                Err(e) => {
                    log::error!("Error checking posting auth: {e}");
                    PostingAuth::Missing
                }
            };
            set_posting_auth.set(state);
        });
    });

    let generate = Callback::new(move |_| {
        if !keychain_ready.get_untracked() {
            set_error.set(Some(KEYCHAIN_MISSING.to_string()));
            return;
        }
        let Some(user) = auth.user_untracked() else {
            set_error.set(Some("User not authenticated".to_string()));
            return;
        };
        let token = auth.bearer();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = async {
                keychain::sign_buffer(&user, SIGN_MESSAGE, POSTING)
                    .await
                    .map_err(|e| e.to_string())?;
                ApiClient::from_config()
                    .request_stream_key(&user, token.as_deref())
                    .await
                    .map_err(|e| format!("Failed to generate stream key: {e}"))
            }
            .await;
            match result {
                Ok(key) => set_stream_key.set(Some(key)),
                Err(e) => {
                    log::error!("Error generating stream key: {e}");
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    });

    let grant = Callback::new(move |_| {
        if !keychain_ready.get_untracked() {
            set_error.set(Some(KEYCHAIN_MISSING.to_string()));
            return;
        }
        let Some(user) = auth.user_untracked() else {
            set_error.set(Some("User not authenticated".to_string()));
            return;
        };
        spawn_local(async move {
            let posting = match ApiClient::from_config().hive_account(&user).await {
                Ok(account) => account.posting,
                Err(e) => {
                    set_error.set(Some(format!("Failed to update posting authority: {e}")));
                    return;
                }
            };
            if posting.grants(POSTER_ACCOUNT) {
                set_error.set(Some("Posting authority already granted".to_string()));
                set_posting_auth.set(PostingAuth::Granted);
                return;
            }
            match keychain::add_account_authority(&user, POSTER_ACCOUNT, POSTING, posting.weight_threshold).await {
                Ok(_) => {
                    set_posting_auth.set(PostingAuth::Granted);
                    set_error.set(None);
                    toast.show(
                        ToastKind::Success,
                        format!("Successfully granted posting authority to @{POSTER_ACCOUNT}"),
                        Duration::from_secs(4),
                    );
                }
                Err(e) => set_error.set(Some(format!("Failed to grant posting authority: {e}"))),
            }
        });
    });

    let copy = Callback::new(move |_| {
        let Some(key) = stream_key.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match copy_to_clipboard(&key).await {
                Ok(()) => toast.show(ToastKind::Success, "Stream key copied to clipboard!", Duration::from_secs(3)),
                Err(e) => {
                    log::warn!("Clipboard write failed: {e}");
                    toast.show(ToastKind::Error, "Could not copy. Select the key and copy it manually.", Duration::from_secs(4));
                }
            }
        });
    });

    let generate_label = move || {
        if loading.get() {
            "Generating..."
        } else if !keychain_ready.get() {
            "Checking Hive Keychain..."
        } else {
            "Generate Stream Key"
        }
    };

    view! {
        <div class="bg-white dark:bg-teal-800 rounded-lg shadow p-6 space-y-6">
            <p>"Logged in as: " <strong>{move || format!("@{}", auth.user().unwrap_or_default())}</strong></p>

            {move || error.get().map(|e| view! {
                <div class="p-3 rounded bg-salmon-100 dark:bg-salmon-900 text-salmon-700 dark:text-salmon-200 text-sm">{e}</div>
            })}

            <Button
                on_click=generate
                disabled=Signal::derive(move || loading.get() || !keychain_ready.get())
            >
                {generate_label}
            </Button>

            {move || stream_key.get().map(|key| view! {
                <section class="space-y-2">
                    <h3 class="text-lg font-semibold">"Your Stream Key"</h3>
                    <div class="flex gap-2">
                        <input
                            type="text"
                            readonly
                            prop:value=key
                            class="flex-1 px-3 py-2 rounded border border-gray-300 dark:border-teal-600 bg-gray-50 dark:bg-teal-900 font-mono text-sm"
                        />
                        <Button variant=ButtonVariant::Secondary on_click=copy>"Copy"</Button>
                    </div>
                    <p class="text-sm text-salmon-600 dark:text-salmon-400">
                        <strong>"Keep this key secure!"</strong>
                        " Don't share it with anyone. Use this key in your streaming software (OBS, etc.) to stream to Vimm."
                    </p>
                </section>
            })}

            <section class="space-y-2">
                <h3 class="text-lg font-semibold">"Posting Authority"</h3>
                <p class="text-sm">
                    "Grant posting authority to "
                    <span class="font-semibold text-seafoam-600 dark:text-mint-400">{format!("@{POSTER_ACCOUNT}")}</span>
                    " to enable automated announcements when you go live."
                </p>
                {move || match posting_auth.get() {
                    PostingAuth::Checking => {
                        view! { <p class="text-sm text-gray-500">"Checking current posting authority..."</p> }.into_any()
                    }
                    PostingAuth::Granted => {
                        view! {
                            <p class="text-sm text-seafoam-600 dark:text-mint-400">
                                {format!("Posting authority already granted to @{POSTER_ACCOUNT}")}
                            </p>
                        }
                            .into_any()
                    }
                    PostingAuth::Missing => {
                        view! {
                            <Button
                                variant=ButtonVariant::Secondary
                                on_click=grant
                                disabled=Signal::derive(move || !keychain_ready.get())
                            >
                                "Grant Posting Authority"
                            </Button>
                        }
                            .into_any()
                    }
                }}
                <p class="text-xs text-gray-500 dark:text-gray-400">
                    "This will add posting authority while preserving your existing authorized accounts."
                </p>
            </section>

            <section class="space-y-2">
                <h3 class="text-lg font-semibold">"How to use your stream key"</h3>
                <ol class="list-decimal list-inside text-sm space-y-1">
                    <li>"Copy your stream key using the button above"</li>
                    <li>"Open your streaming software (OBS Studio, Streamlabs, etc.)"</li>
                    <li>"Go to Settings → Stream"</li>
                    <li>"Set Service to \"Custom...\""</li>
                    <li>"Set Server to: " <code>{INGEST_SERVER}</code></li>
                    <li>"Paste your stream key in the \"Stream Key\" field"</li>
                    <li>"Click OK and start streaming!"</li>
                </ol>
            </section>

            <Toast state=toast />
        </div>
    }
}
