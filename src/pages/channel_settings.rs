use leptos::{ev::SubmitEvent, prelude::*, task::spawn_local};
use std::time::Duration;

use crate::auth::auth_components::AuthGate;
use crate::auth::context::use_auth;
use crate::components::ui::{Button, ButtonVariant};
use crate::models::channels::{ChannelForm, CATEGORIES, LANGUAGES, MAX_CHANNEL_TITLE_LEN};
use crate::services::ApiClient;

const SUCCESS_DISPLAY: Duration = Duration::from_secs(3);

#[component]
pub fn ChannelSettingsPage() -> impl IntoView {
    view! {
        <div class="p-6 max-w-3xl mx-auto space-y-6">
            <header>
                <h1 class="text-3xl font-bold text-seafoam-600 dark:text-mint-400">"Channel Settings"</h1>
                <p class="text-gray-600 dark:text-gray-300">"Customize your stream channel information"</p>
            </header>
            <AuthGate message="You must be logged in to access channel settings.">
                <ChannelSettingsForm />
            </AuthGate>
        </div>
    }
}

#[component]
fn ChannelSettingsForm() -> impl IntoView {
    let auth = use_auth();
    let form = RwSignal::new(ChannelForm::default());
    let original = RwSignal::new(ChannelForm::default());
    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);
    let (success, set_success) = signal(Option::<String>::None);

    let has_changes = Memo::new(move |_| form.with(|f| original.with(|o| f != o)));

    Effect::new(move |_| {
        let token = auth.token();
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match ApiClient::from_config().my_channel(token.as_deref()).await {
                Ok(channel) => {
                    let fields = channel.form_fields();
                    form.set(fields.clone());
                    original.set(fields);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_loading.set(false);
        });
    });

    let edit = move |update: fn(&mut ChannelForm, String), value: String| {
        form.update(|f| update(f, value));
        set_error.set(None);
        set_success.set(None);
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if !has_changes.get_untracked() {
            set_error.set(Some("No changes to save".to_string()));
            return;
        }
        let settings = form.get_untracked();
        if let Err(message) = settings.validate_form() {
            set_error.set(Some(message));
            return;
        }
        let token = auth.bearer();
        set_saving.set(true);
        set_error.set(None);
        set_success.set(None);
        spawn_local(async move {
            match ApiClient::from_config()
                .update_my_channel(token.as_deref(), &settings)
                .await
            {
                Ok(_) => {
                    original.set(settings);
                    set_success.set(Some("Channel settings updated successfully!".to_string()));
                    set_timeout(move || set_success.set(None), SUCCESS_DISPLAY);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_saving.set(false);
        });
    };

    let on_reset = Callback::new(move |_| {
        form.set(original.get_untracked());
        set_error.set(None);
        set_success.set(None);
    });

    let field = "w-full px-3 py-2 rounded border border-gray-300 dark:border-teal-600 bg-white dark:bg-teal-900";

    view! {
        <Show
            when=move || !loading.get()
            fallback=|| view! { <p class="text-gray-500 dark:text-gray-400">"Loading channel settings..."</p> }
        >
            <form on:submit=on_submit class="bg-white dark:bg-teal-800 rounded-lg shadow p-6 space-y-4">
                <h2 class="text-xl font-semibold">"Channel Information"</h2>
                <p class="text-sm text-gray-500 dark:text-gray-400">
                    "Username: " <strong>{move || auth.user().unwrap_or_default()}</strong>
                </p>

                {move || error.get().map(|e| view! {
                    <div class="p-3 rounded bg-salmon-100 dark:bg-salmon-900 text-salmon-700 dark:text-salmon-200 text-sm">{e}</div>
                })}
                {move || success.get().map(|s| view! {
                    <div class="p-3 rounded bg-seafoam-100 dark:bg-seafoam-800 text-seafoam-700 dark:text-mint-200 text-sm">{s}</div>
                })}

                <label class="block space-y-1">
                    <span class="font-medium">"Stream Title"</span>
                    <input
                        type="text"
                        class=field
                        maxlength=MAX_CHANNEL_TITLE_LEN.to_string()
                        placeholder="Enter your stream title"
                        prop:value=move || form.with(|f| f.title.clone())
                        on:input=move |ev| edit(|f, v| f.title = v, event_target_value(&ev))
                    />
                    <span class="text-xs text-gray-500">
                        {move || format!("{}/{MAX_CHANNEL_TITLE_LEN}", form.with(|f| f.title.chars().count()))}
                    </span>
                </label>

                <label class="block space-y-1">
                    <span class="font-medium">"Description"</span>
                    <textarea
                        rows="4"
                        class=field
                        placeholder="Tell viewers about your stream"
                        prop:value=move || form.with(|f| f.description.clone())
                        on:input=move |ev| edit(|f, v| f.description = v, event_target_value(&ev))
                    ></textarea>
                </label>

                <div class="grid gap-4 md:grid-cols-2">
                    <label class="block space-y-1">
                        <span class="font-medium">"Category"</span>
                        <select
                            class=field
                            prop:value=move || form.with(|f| f.category.clone())
                            on:change=move |ev| edit(|f, v| f.category = v, event_target_value(&ev))
                        >
                            <option value="">"Select category"</option>
                            {CATEGORIES.map(|c| view! { <option value=c>{c}</option> }).collect_view()}
                        </select>
                    </label>
                    <label class="block space-y-1">
                        <span class="font-medium">"Language"</span>
                        <select
                            class=field
                            prop:value=move || form.with(|f| f.language.clone())
                            on:change=move |ev| edit(|f, v| f.language = v, event_target_value(&ev))
                        >
                            <option value="">"Select language"</option>
                            {LANGUAGES
                                .map(|(code, name)| view! { <option value=code>{name}</option> })
                                .collect_view()}
                        </select>
                    </label>
                </div>

                <div class="flex justify-end gap-2">
                    <Button
                        variant=ButtonVariant::Secondary
                        disabled=Signal::derive(move || !has_changes.get() || saving.get())
                        on_click=on_reset
                    >
                        "Reset"
                    </Button>
                    <Button submit=true disabled=Signal::derive(move || !has_changes.get() || saving.get())>
                        {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                    </Button>
                </div>
            </form>
        </Show>
    }
}
