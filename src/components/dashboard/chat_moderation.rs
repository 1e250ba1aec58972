use leptos::{html, prelude::*, task::spawn_local};
use leptos_icons::Icon;
use std::time::Duration;

use crate::auth::context::{use_auth, AuthContext};
use crate::components::toast::{Toast, ToastKind, ToastState};
use crate::config;
use crate::format::{avatar_url, chat_time};
use crate::interop::socket::ChatSocket;
use crate::models::chat::{BannedUser, ChatConfig, ChatEvent, ChatLog, ChatMessage, MODERATION_HISTORY_LIMIT};
use crate::models::dashboard::ModerationToggle;
use crate::services::chat::{MessagePage, DEFAULT_TIMEOUT_SECS};
use crate::services::ApiClient;

const FEEDBACK: Duration = Duration::from_secs(3);
const TOGGLES: [ModerationToggle; 3] = [
    ModerationToggle::SlowMode,
    ModerationToggle::FollowersOnly,
    ModerationToggle::EmoteOnly,
];

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Asks for a timeout length in seconds; `None` when cancelled or not a number.
fn prompt_duration() -> Option<u64> {
    let answer = web_sys::window()?
        .prompt_with_message_and_default("Timeout duration in seconds:", &DEFAULT_TIMEOUT_SECS.to_string())
        .ok()??;
    answer.trim().parse().ok()
}

#[derive(Clone, Copy)]
struct Moderation {
    auth: AuthContext,
    account: StoredValue<String>,
    log: RwSignal<ChatLog>,
    settings: RwSignal<ChatConfig>,
    banned: RwSignal<Vec<BannedUser>>,
    toast: ToastState,
}

impl Moderation {
    fn token(&self) -> Option<String> {
        self.auth.bearer()
    }

    fn delete(&self, token: Option<String>, message_id: String) {
        let this = *self;
        spawn_local(async move {
            let account = this.account.get_value();
            match ApiClient::from_config()
                .delete_chat_message(&account, &message_id, token.as_deref())
                .await
            {
                Ok(_) => this.log.update(|log| {
                    log.remove(&message_id);
                }),
                Err(e) => {
                    log::error!("Failed to delete message: {e}");
                    this.toast.show(ToastKind::Error, "Failed to delete message", FEEDBACK);
                }
            }
        });
    }

    fn ban(&self, token: Option<String>, username: String) {
        if !confirm(&format!("Are you sure you want to ban {username}?")) {
            return;
        }
        let this = *self;
        spawn_local(async move {
            let account = this.account.get_value();
            match ApiClient::from_config()
                .ban_user(&account, &username, None, None, token.as_deref())
                .await
            {
                Ok(_) => {
                    this.banned.update(|list| {
                        if !list.iter().any(|b| b.username == username) {
                            list.push(BannedUser {
                                username: username.clone(),
                                reason: None,
                                expires_at: None,
                            });
                        }
                    });
                    this.toast.show(ToastKind::Success, format!("{username} has been banned"), FEEDBACK);
                }
                Err(e) => {
                    log::error!("Failed to ban user: {e}");
                    this.toast.show(ToastKind::Error, "Failed to ban user", FEEDBACK);
                }
            }
        });
    }

    fn timeout(&self, token: Option<String>, username: String) {
        let Some(duration) = prompt_duration() else {
            return;
        };
        let this = *self;
        spawn_local(async move {
            let account = this.account.get_value();
            match ApiClient::from_config()
                .timeout_user(&account, &username, Some(duration), None, token.as_deref())
                .await
            {
                Ok(_) => this.toast.show(
                    ToastKind::Success,
                    format!("{username} has been timed out for {duration} seconds"),
                    FEEDBACK,
                ),
                Err(e) => {
                    log::error!("Failed to timeout user: {e}");
                    this.toast.show(ToastKind::Error, "Failed to timeout user", FEEDBACK);
                }
            }
        });
    }

    fn unban(&self, token: Option<String>, username: String) {
        let this = *self;
        spawn_local(async move {
            let account = this.account.get_value();
            match ApiClient::from_config()
                .unban_user(&account, &username, token.as_deref())
                .await
            {
                Ok(_) => {
                    this.banned.update(|list| list.retain(|b| b.username != username));
                    this.toast.show(ToastKind::Success, format!("{username} has been unbanned"), FEEDBACK);
                }
                Err(e) => {
                    log::error!("Failed to unban user: {e}");
                    this.toast.show(ToastKind::Error, "Failed to unban user", FEEDBACK);
                }
            }
        });
    }

    fn toggle(&self, token: Option<String>, toggle: ModerationToggle) {
        let this = *self;
        let mut next = self.settings.get_untracked();
        toggle.apply(&mut next);
        spawn_local(async move {
            let account = this.account.get_value();
            match ApiClient::from_config()
                .update_chat_config(&account, &next, token.as_deref())
                .await
            {
                Ok(_) => this.settings.set(next),
                Err(e) => {
                    log::error!("Failed to update setting: {e}");
                    this.toast.show(ToastKind::Error, "Failed to update setting", FEEDBACK);
                }
            }
        });
    }

    fn clear(&self, token: Option<String>) {
        if !confirm("Clear every message in this chat?") {
            return;
        }
        let this = *self;
        spawn_local(async move {
            let account = this.account.get_value();
            match ApiClient::from_config().clear_chat(&account, token.as_deref()).await {
                Ok(_) => {
                    this.log.update(ChatLog::clear);
                    this.toast.show(ToastKind::Success, "Chat cleared", FEEDBACK);
                }
                Err(e) => {
                    log::error!("Failed to clear chat: {e}");
                    this.toast.show(ToastKind::Error, "Failed to clear chat", FEEDBACK);
                }
            }
        });
    }
}

#[component]
pub fn ChatModeration(#[prop(into)] account: String) -> impl IntoView {
    let auth = use_auth();
    let moderation = Moderation {
        auth,
        account: StoredValue::new(account),
        log: RwSignal::new(ChatLog::default()),
        settings: RwSignal::new(ChatConfig::default()),
        banned: RwSignal::new(Vec::new()),
        toast: ToastState::new(),
    };
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (connected, set_connected) = signal(false);
    let (search, set_search) = signal(String::new());
    let (show_panel, set_show_panel) = signal(false);
    let messages_ref = NodeRef::<html::Div>::new();

    Effect::new(move |_| {
        let Some(token) = auth.token() else {
            return;
        };
        let account = moderation.account.get_value();
        spawn_local(async move {
            let client = ApiClient::from_config();
            let history = client
                .chat_messages(&account, MODERATION_HISTORY_LIMIT, MessagePage::default())
                .await;
            let settings = client.moderation_settings(&account, Some(&token)).await;
            let banned = client.banned_users(&account, Some(&token)).await;
            match history {
                Ok(history) => moderation.log.set(ChatLog::new(history)),
                Err(e) => {
                    log::error!("Failed to load chat data: {e}");
                    set_error.set(Some("Failed to load chat data".to_string()));
                }
            }
            moderation.settings.set(settings);
            match banned {
                Ok(banned) => moderation.banned.set(banned),
                Err(e) => log::warn!("Could not load banned users: {e}"),
            }
            set_loading.set(false);
        });
    });

    Effect::new(move |previous: Option<Option<ChatSocket>>| {
        drop(previous);
        let token = auth.token();
        if !ChatSocket::is_available() {
            return None;
        }
        let on_event = move |event: ChatEvent| match event {
            ChatEvent::Connected => set_connected.set(true),
            ChatEvent::Disconnected(_) | ChatEvent::ConnectError(_) => set_connected.set(false),
            ChatEvent::Message(message) => moderation.log.update(|log| {
                log.push(message);
            }),
            ChatEvent::MessageDeleted(id) => moderation.log.update(|log| {
                log.remove(&id);
            }),
            ChatEvent::AuthError(message) | ChatEvent::Error(message) => {
                log::error!("Moderation socket error: {message}");
            }
            ChatEvent::MessageSent => {}
        };
        ChatSocket::connect(
            &config::get().chat_socket_url(),
            &moderation.account.get_value(),
            token,
            on_event,
        )
        .map_err(|e| log::error!("Failed to open moderation socket: {e:?}"))
        .ok()
    });

    Effect::new(move |_| {
        moderation.log.track();
        if let Some(container) = messages_ref.get() {
            container.set_scroll_top(container.scroll_height());
        }
    });

    let filtered = move || moderation.log.with(|log| log.search(&search.get()));

    view! {
        <section class="relative bg-white dark:bg-teal-800 rounded-lg shadow p-4 flex flex-col min-h-[28rem]">
            <div class="flex items-center justify-between mb-3">
                <h2 class="text-lg font-semibold">"Chat Moderation"</h2>
                <span class="inline-flex items-center gap-1 text-xs">
                    <span class=move || {
                        if connected.get() { "w-2 h-2 rounded-full bg-mint-500" } else { "w-2 h-2 rounded-full bg-salmon-500" }
                    }></span>
                    {move || if connected.get() { "Connected" } else { "Disconnected" }}
                </span>
            </div>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="text-gray-500 dark:text-gray-400">"Loading chat..."</p> }
            >
                {move || error.get().map(|e| view! { <p class="mb-2 text-sm text-salmon-600">{e}</p> })}

                <div class="flex flex-wrap gap-2 mb-3">
                    {TOGGLES
                        .into_iter()
                        .map(|toggle| {
                            view! {
                                <button
                                    title=toggle.label()
                                    class=move || {
                                        if moderation.settings.with(|s| toggle.is_on(s)) {
                                            "px-3 py-1 rounded text-sm bg-seafoam-600 text-white"
                                        } else {
                                            "px-3 py-1 rounded text-sm bg-gray-100 dark:bg-teal-700"
                                        }
                                    }
                                    on:click=move |_| moderation.toggle(moderation.token(), toggle)
                                >
                                    {toggle.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                    <button
                        class="px-3 py-1 rounded text-sm bg-gray-100 dark:bg-teal-700"
                        on:click=move |_| set_show_panel.set(true)
                    >
                        {move || format!("Moderators ({})", moderation.settings.with(|s| s.moderators.len()))}
                    </button>
                    <button
                        class="px-3 py-1 rounded text-sm bg-salmon-100 dark:bg-salmon-900 text-salmon-700 dark:text-salmon-200"
                        on:click=move |_| moderation.clear(moderation.token())
                    >
                        "Clear Chat"
                    </button>
                </div>

                <input
                    type="text"
                    placeholder="Search messages or users..."
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                    class="w-full mb-2 px-3 py-1.5 rounded border border-gray-300 dark:border-teal-600 bg-gray-50 dark:bg-teal-900 text-sm"
                />

                <div node_ref=messages_ref class="flex-1 overflow-y-auto space-y-2 max-h-96">
                    <Show
                        when=move || !filtered().is_empty()
                        fallback=move || {
                            view! {
                                <p class="text-center text-sm text-gray-500 dark:text-gray-400 py-6">
                                    {move || {
                                        if search.get().is_empty() { "No messages yet" } else { "No messages match your search" }
                                    }}
                                </p>
                            }
                        }
                    >
                        <For
                            each=filtered
                            key=|message| message.key()
                            children=move |message| view! { <ModeratedMessage message moderation /> }
                        />
                    </Show>
                </div>
            </Show>

            <Show when=move || show_panel.get()>
                <ModeratorsPanel moderation on_close=Callback::new(move |_| set_show_panel.set(false)) />
            </Show>

            <Toast state=moderation.toast />
        </section>
    }
}

#[component]
fn ModeratedMessage(message: ChatMessage, moderation: Moderation) -> impl IntoView {
    let avatar = avatar_url(&message.username);
    let alt = format!("{}'s avatar", message.username);
    let id = StoredValue::new(message.id.clone());
    let username = StoredValue::new(message.username.clone());
    let action = "p-1 rounded hover:bg-gray-200 dark:hover:bg-teal-700";

    view! {
        <div class="p-2 rounded bg-gray-50 dark:bg-teal-900">
            <div class="flex items-center gap-2 text-sm">
                <img src=avatar alt=alt class="w-6 h-6 rounded-full" />
                <span class="font-semibold">{message.username.clone()}</span>
                <span class="text-xs text-gray-400">{chat_time(&message.timestamp)}</span>
                <div class="ml-auto flex gap-1">
                    <button
                        class=action
                        title="Delete Message"
                        on:click=move |_| moderation.delete(moderation.token(), id.get_value())
                    >
                        <Icon icon=icondata_bs::BsTrash width="14" height="14" />
                    </button>
                    <button
                        class=action
                        title="Timeout User"
                        on:click=move |_| moderation.timeout(moderation.token(), username.get_value())
                    >
                        <Icon icon=icondata_bs::BsClock width="14" height="14" />
                    </button>
                    <button
                        class=action
                        title="Ban User"
                        on:click=move |_| moderation.ban(moderation.token(), username.get_value())
                    >
                        <Icon icon=icondata_bs::BsSlashCircle width="14" height="14" />
                    </button>
                </div>
            </div>
            <p class="mt-1 text-sm break-words">{message.text}</p>
        </div>
    }
}

#[component]
fn ModeratorsPanel(moderation: Moderation, on_close: Callback<()>) -> impl IntoView {
    view! {
        <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/50 p-4" on:click=move |_| on_close.run(())>
            <div
                class="w-full max-w-md rounded-lg bg-white dark:bg-teal-800 p-4 space-y-4"
                on:click=|ev| ev.stop_propagation()
            >
                <h3 class="text-lg font-semibold">"Moderation Settings"</h3>
                <div>
                    <h4 class="font-medium mb-1">
                        {move || format!("Moderators ({})", moderation.settings.with(|s| s.moderators.len()))}
                    </h4>
                    {move || {
                        let moderators = moderation.settings.with(|s| s.moderators.clone());
                        if moderators.is_empty() {
                            view! { <p class="text-sm text-gray-500">"No moderators assigned"</p> }.into_any()
                        } else {
                            moderators
                                .into_iter()
                                .map(|m| view! { <div class="text-sm py-0.5">{m}</div> })
                                .collect_view()
                                .into_any()
                        }
                    }}
                </div>
                <div>
                    <h4 class="font-medium mb-1">
                        {move || format!("Banned Users ({})", moderation.banned.with(Vec::len))}
                    </h4>
                    {move || {
                        let banned = moderation.banned.get();
                        if banned.is_empty() {
                            view! { <p class="text-sm text-gray-500">"No banned users"</p> }.into_any()
                        } else {
                            banned
                                .into_iter()
                                .map(|user| {
                                    let name = user.username.clone();
                                    view! {
                                        <div class="flex items-center justify-between text-sm py-0.5">
                                            <span>{user.username}</span>
                                            <button
                                                class="px-2 py-0.5 rounded bg-gray-100 dark:bg-teal-700"
                                                on:click=move |_| moderation.unban(moderation.token(), name.clone())
                                            >
                                                "Unban"
                                            </button>
                                        </div>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }
                    }}
                </div>
                <button
                    class="w-full py-1.5 rounded bg-seafoam-600 dark:bg-teal-600 text-white"
                    on:click=move |_| on_close.run(())
                >
                    "Close"
                </button>
            </div>
        </div>
    }
}
