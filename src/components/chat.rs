use leptos::{html, prelude::*, task::spawn_local};
use leptos_icons::Icon;

use crate::auth::context::use_auth;
use crate::config;
use crate::format::chat_time;
use crate::interop::socket::ChatSocket;
use crate::models::chat::{is_moderator, ChatConfig, ChatEvent, ChatLog, ChatMessage, HISTORY_LIMIT, MAX_MESSAGE_LEN};
use crate::services::chat::MessagePage;
use crate::services::ApiClient;

/// Live chat for one channel: REST history and sends, socket.io for everything that arrives.
#[component]
pub fn Chat(#[prop(into)] account: String) -> impl IntoView {
    let auth = use_auth();
    let account = StoredValue::new(account);

    let chat_log = RwSignal::new(ChatLog::default());
    let chat_config = RwSignal::new(Option::<ChatConfig>::None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (send_error, set_send_error) = signal(Option::<String>::None);
    let (connected, set_connected) = signal(false);
    let (input, set_input) = signal(String::new());
    let (sending, set_sending) = signal(false);
    let messages_ref = NodeRef::<html::Div>::new();

    Effect::new(move |_| {
        let account = account.get_value();
        spawn_local(async move {
            let client = ApiClient::from_config();
            let history = client
                .chat_messages(&account, HISTORY_LIMIT, MessagePage::default())
                .await;
            let config = client.chat_config(&account, None).await;
            match (history, config) {
                (Ok(history), Ok(config)) => {
                    chat_log.set(ChatLog::new(history));
                    chat_config.set(Some(config));
                }
                (Err(e), _) | (_, Err(e)) => {
                    log::error!("Failed to load chat data: {e}");
                    set_error.set(Some("Failed to load chat. Please try again.".to_string()));
                }
            }
            set_loading.set(false);
        });
    });

    // one socket per channel and token; the previous one disconnects when replaced
    Effect::new(move |previous: Option<Option<ChatSocket>>| {
        drop(previous);
        let token = auth.token();
        let account = account.get_value();

        if !ChatSocket::is_available() {
            log::warn!("socket.io client not loaded, live chat disabled");
            return None;
        }

        let on_event = move |event: ChatEvent| match event {
            ChatEvent::Connected => {
                log::info!("Connected to chat server");
                set_connected.set(true);
                set_error.set(None);
            }
            ChatEvent::Disconnected(reason) => {
                log::info!("Disconnected from chat server: {reason}");
                set_connected.set(false);
            }
            ChatEvent::ConnectError(message) => {
                log::error!("Socket connection error: {message}");
                set_connected.set(false);
            }
            ChatEvent::Message(message) => {
                chat_log.update(|log| {
                    if !log.push(message) {
                        log::debug!("Duplicate message detected, skipping");
                    }
                });
            }
            ChatEvent::MessageSent => log::debug!("Message acknowledgment received"),
            ChatEvent::MessageDeleted(id) => {
                chat_log.update(|log| {
                    log.remove(&id);
                });
            }
            ChatEvent::AuthError(message) => {
                log::error!("Chat authentication error: {message}");
                set_error.set(Some(message));
                set_connected.set(false);
            }
            ChatEvent::Error(message) => {
                log::error!("Chat server error: {message}");
                set_error.set(Some(message));
            }
        };

        match ChatSocket::connect(&config::get().chat_socket_url(), &account, token, on_event) {
            Ok(socket) => Some(socket),
            Err(e) => {
                log::error!("Failed to open chat socket: {e:?}");
                None
            }
        }
    });

    Effect::new(move |_| {
        chat_log.track();
        if let Some(container) = messages_ref.get() {
            container.set_scroll_top(container.scroll_height());
        }
    });

    let on_send = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let text = input.get_untracked().trim().to_string();
        let token = auth.bearer();
        if text.is_empty() || token.is_none() || sending.get_untracked() {
            return;
        }
        set_sending.set(true);
        set_send_error.set(None);
        set_input.set(String::new());

        let channel = account.get_value();
        spawn_local(async move {
            match ApiClient::from_config()
                .send_chat_message(&channel, &text, token.as_deref())
                .await
            {
                Ok(Some(message)) => {
                    chat_log.update(|log| {
                        log.push(message);
                    });
                }
                Ok(None) => log::debug!("message sent, waiting for broadcast"),
                Err(e) => {
                    log::error!("Error sending message: {e}");
                    set_send_error.set(Some(e.to_string()));
                    set_input.set(text);
                }
            }
            set_sending.set(false);
        });
    };

    let delete_message = move |message_id: String| {
        let token = auth.bearer();
        let channel = account.get_value();
        spawn_local(async move {
            match ApiClient::from_config()
                .delete_chat_message(&channel, &message_id, token.as_deref())
                .await
            {
                Ok(_) => {
                    chat_log.update(|log| {
                        log.remove(&message_id);
                    });
                }
                Err(e) => {
                    log::error!("Error deleting message: {e}");
                    set_send_error.set(Some(e.to_string()));
                }
            }
        });
    };

    let can_moderate = Memo::new(move |_| {
        let user = auth.user();
        chat_config.with(|config| {
            let fallback = ChatConfig::default();
            is_moderator(user.as_deref(), &account.get_value(), config.as_ref().unwrap_or(&fallback))
        })
    });

    view! {
        <div class="flex flex-col h-full min-h-[24rem] bg-white dark:bg-teal-800 rounded-lg overflow-hidden">
            <div class="px-4 py-2 border-b border-gray-200 dark:border-teal-700 font-semibold">"Stream Chat"</div>
            {move || {
                if loading.get() {
                    return view! {
                        <div class="flex-1 flex items-center justify-center text-gray-500 dark:text-gray-400">
                            "Loading chat..."
                        </div>
                    }
                        .into_any();
                }
                if let Some(e) = error.get() {
                    return view! {
                        <div class="flex-1 flex items-center justify-center p-4 text-salmon-600 dark:text-salmon-400">
                            {e}
                        </div>
                    }
                        .into_any();
                }
                view! {
                    <ChatBanners connected chat_config />
                    <div node_ref=messages_ref class="flex-1 overflow-y-auto px-3 py-2 space-y-1">
                        <Show
                            when=move || !chat_log.with(ChatLog::is_empty)
                            fallback=|| {
                                view! {
                                    <div class="text-center text-sm text-gray-500 dark:text-gray-400 py-8">
                                        "No messages yet. Be the first to chat!"
                                    </div>
                                }
                            }
                        >
                            <For
                                each=move || chat_log.with(|log| log.messages().to_vec())
                                key=|message| message.key()
                                children=move |message| {
                                    view! {
                                        <ChatLine
                                            message
                                            channel=account.get_value()
                                            can_moderate
                                            on_delete=Callback::new(delete_message)
                                        />
                                    }
                                }
                            />
                        </Show>
                    </div>
                }
                    .into_any()
            }}

            <div class="border-t border-gray-200 dark:border-teal-700 p-2">
                {move || {
                    send_error.get()
                        .map(|e| view! { <div class="mb-1 text-xs text-salmon-600 dark:text-salmon-400">{e}</div> })
                }}
                <Show
                    when=move || auth.is_authenticated()
                    fallback=|| {
                        view! {
                            <div class="text-center text-sm py-2">
                                <a href="/login" class="text-seafoam-600 dark:text-mint-300 font-medium hover:underline">
                                    "Log in"
                                </a>
                                " to chat"
                            </div>
                        }
                    }
                >
                    <form on:submit=on_send class="flex gap-2">
                        <input
                            type="text"
                            placeholder="Send a message..."
                            maxlength=MAX_MESSAGE_LEN.to_string()
                            prop:value=move || input.get()
                            on:input=move |ev| set_input.set(event_target_value(&ev))
                            disabled=move || sending.get()
                            class="flex-1 px-3 py-1.5 rounded border border-gray-300 dark:border-teal-600 bg-gray-50 dark:bg-teal-900 text-sm focus:outline-none focus:border-seafoam-500"
                        />
                        <button
                            type="submit"
                            disabled=move || sending.get() || input.get().trim().is_empty()
                            class="inline-flex items-center gap-1 px-3 py-1.5 rounded bg-seafoam-600 dark:bg-teal-600 text-white text-sm disabled:opacity-50"
                        >
                            <Icon icon=icondata_io::IoSend width="14" height="14" />
                            {move || if sending.get() { "Sending..." } else { "Send" }}
                        </button>
                    </form>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn ChatBanners(connected: ReadSignal<bool>, chat_config: RwSignal<Option<ChatConfig>>) -> impl IntoView {
    let banner = "px-3 py-1 text-xs border-b border-gray-200 dark:border-teal-700";

    view! {
        <Show when=move || !connected.get()>
            <div class=format!("{banner} bg-salmon-50 dark:bg-salmon-900 text-salmon-600 dark:text-salmon-300")>
                "Chat server disconnected. Attempting to reconnect..."
            </div>
        </Show>
        {move || {
            chat_config.get()
                .filter(|c| c.slow_mode)
                .map(|c| {
                    view! {
                        <div class=format!("{banner} bg-gray-50 dark:bg-teal-900 text-gray-600 dark:text-gray-300")>
                            {format!("Slow mode: {}s between messages", c.slow_mode_delay)}
                        </div>
                    }
                })
        }}
        <Show when=move || chat_config.with(|c| c.as_ref().is_some_and(|c| c.followers_only))>
            <div class=format!("{banner} bg-gray-50 dark:bg-teal-900 text-gray-600 dark:text-gray-300")>
                "Followers-only mode"
            </div>
        </Show>
    }
}

#[component]
fn ChatLine(
    message: ChatMessage,
    channel: String,
    can_moderate: Memo<bool>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let name_class = if message.username == channel {
        "font-semibold text-salmon-600 dark:text-salmon-400"
    } else if message.is_moderator {
        "font-semibold text-seafoam-600 dark:text-mint-300"
    } else {
        "font-semibold text-teal-700 dark:text-teal-300"
    };
    let id = message.id.clone();

    view! {
        <div class="group flex items-start gap-2 text-sm">
            <div class="flex-1 min-w-0 break-words">
                <span class=name_class>{format!("{}:", message.username)}</span>
                " "
                <span>{message.text}</span>
                <span class="ml-2 text-xs text-gray-400">{chat_time(&message.timestamp)}</span>
            </div>
            <Show when=move || can_moderate.get()>
                {
                    let id = id.clone();
                    view! {
                        <button
                            class="opacity-0 group-hover:opacity-100 text-xs text-salmon-600 hover:text-salmon-700"
                            title="Delete message"
                            on:click=move |_| on_delete.run(id.clone())
                        >
                            "✕"
                        </button>
                    }
                }
            </Show>
        </div>
    }
}
