use leptos::prelude::*;

use crate::format::local_datetime;
use crate::models::channels::{ContentRating, LANGUAGES};
use crate::models::dashboard::{SettingsErrors, StreamSettings, MAX_DESCRIPTION_LEN, MAX_STREAM_TITLE_LEN, MAX_TAGS};

#[component]
pub fn StreamSettingsEditor(
    #[prop(into)] initial: Signal<Option<StreamSettings>>,
    on_save: Callback<StreamSettings>,
    #[prop(into)] saving: Signal<bool>,
) -> impl IntoView {
    let settings = RwSignal::new(StreamSettings::default());
    let errors = RwSignal::new(SettingsErrors::default());
    let (tag_input, set_tag_input) = signal(String::new());

    Effect::new(move |_| {
        if let Some(initial) = initial.get() {
            settings.set(initial);
            errors.set(SettingsErrors::default());
        }
    });

    let has_changes = Memo::new(move |_| {
        initial.with(|initial| match initial {
            Some(initial) => settings.with(|s| s.differs_from(initial)),
            None => false,
        })
    });

    let add_tag = move || {
        let raw = tag_input.get_untracked();
        let mut added = false;
        settings.update(|s| added = s.add_tag(&raw));
        if added {
            set_tag_input.set(String::new());
            errors.update(|e| e.tags = None);
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let current = settings.get_untracked();
        let found = current.validate();
        let valid = found.is_empty();
        errors.set(found);
        if valid {
            on_save.run(current);
        }
    };

    let input_class = |error: bool| {
        if error {
            "w-full px-3 py-2 rounded border border-salmon-500 bg-gray-50 dark:bg-teal-900 focus:outline-none"
        } else {
            "w-full px-3 py-2 rounded border border-gray-300 dark:border-teal-600 bg-gray-50 dark:bg-teal-900 focus:outline-none focus:border-seafoam-500"
        }
    };

    let helper = move |error: Option<String>, fallback: String| {
        match error {
            Some(e) => view! { <span class="text-xs text-salmon-600 dark:text-salmon-400">{e}</span> }.into_any(),
            None => view! { <span class="text-xs text-gray-500 dark:text-gray-400">{fallback}</span> }.into_any(),
        }
    };

    view! {
        <section class="bg-white dark:bg-teal-800 rounded-lg shadow p-4">
            <div class="flex items-center justify-between mb-3">
                <h2 class="text-lg font-semibold">"Stream Settings"</h2>
                {move || {
                    initial.with(|i| i.as_ref().and_then(|s| s.last_updated.clone()))
                        .map(|at| {
                            view! {
                                <span class="text-xs text-gray-500 dark:text-gray-400">
                                    {format!("Last updated: {}", local_datetime(&at))}
                                </span>
                            }
                        })
                }}
            </div>

            <form on:submit=on_submit class="space-y-4">
                <div>
                    <label for="stream-title" class="block text-sm font-medium mb-1">
                        "Stream Title " <span class="text-salmon-600">"*"</span>
                    </label>
                    <input
                        id="stream-title"
                        type="text"
                        placeholder="Enter your stream title"
                        maxlength=MAX_STREAM_TITLE_LEN.to_string()
                        class=move || input_class(errors.with(|e| e.title.is_some()))
                        prop:value=move || settings.with(|s| s.title.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            settings.update(|s| s.title = value);
                            errors.update(|e| e.title = None);
                        }
                    />
                    {move || {
                        helper(
                            errors.with(|e| e.title.clone()),
                            format!("{}/{MAX_STREAM_TITLE_LEN} characters", settings.with(|s| s.title.chars().count())),
                        )
                    }}
                </div>

                <div>
                    <label for="stream-description" class="block text-sm font-medium mb-1">"Description"</label>
                    <textarea
                        id="stream-description"
                        rows="4"
                        placeholder="Describe your stream..."
                        maxlength=MAX_DESCRIPTION_LEN.to_string()
                        class=move || input_class(errors.with(|e| e.description.is_some()))
                        prop:value=move || settings.with(|s| s.description.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            settings.update(|s| s.description = value);
                            errors.update(|e| e.description = None);
                        }
                    ></textarea>
                    {move || {
                        helper(
                            errors.with(|e| e.description.clone()),
                            format!("{}/{MAX_DESCRIPTION_LEN} characters", settings.with(|s| s.description.chars().count())),
                        )
                    }}
                </div>

                <div>
                    <label for="stream-tags" class="block text-sm font-medium mb-1">"Tags/Categories"</label>
                    <div class="flex gap-2">
                        <input
                            id="stream-tags"
                            type="text"
                            placeholder="Add tags (press Enter)"
                            class=input_class(false)
                            prop:value=move || tag_input.get()
                            on:input=move |ev| set_tag_input.set(event_target_value(&ev))
                            on:keydown=move |ev| {
                                if ev.key() == "Enter" {
                                    ev.prevent_default();
                                    add_tag();
                                }
                            }
                        />
                        <button
                            type="button"
                            class="px-3 rounded bg-gray-200 dark:bg-teal-700 text-sm disabled:opacity-50"
                            disabled=move || tag_input.get().trim().is_empty() || settings.with(|s| s.tags.len() >= MAX_TAGS)
                            on:click=move |_| add_tag()
                        >
                            "Add Tag"
                        </button>
                    </div>
                    <div class="flex flex-wrap gap-2 mt-2">
                        <For
                            each=move || settings.with(|s| s.tags.clone())
                            key=|tag| tag.clone()
                            children=move |tag| {
                                let label = format!("Remove {tag}");
                                let to_remove = tag.clone();
                                view! {
                                    <span class="inline-flex items-center gap-1 px-2 py-0.5 rounded-full text-xs bg-seafoam-100 dark:bg-teal-700">
                                        {tag}
                                        <button
                                            type="button"
                                            aria-label=label
                                            class="text-salmon-600"
                                            on:click=move |_| settings.update(|s| s.remove_tag(&to_remove))
                                        >
                                            "×"
                                        </button>
                                    </span>
                                }
                            }
                        />
                    </div>
                    {move || {
                        helper(
                            errors.with(|e| e.tags.clone()),
                            format!("{}/{MAX_TAGS} tags", settings.with(|s| s.tags.len())),
                        )
                    }}
                </div>

                <div>
                    <label for="stream-language" class="block text-sm font-medium mb-1">"Language"</label>
                    <select
                        id="stream-language"
                        class=input_class(false)
                        prop:value=move || settings.with(|s| s.language.clone())
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            settings.update(|s| s.language = value);
                        }
                    >
                        <option value="">"Select Language"</option>
                        {LANGUAGES
                            .iter()
                            .map(|(code, name)| view! { <option value=*code>{*name}</option> })
                            .collect_view()}
                    </select>
                </div>

                <fieldset>
                    <legend class="block text-sm font-medium mb-1">"Content Rating"</legend>
                    <div class="space-y-2">
                        {ContentRating::ALL
                            .into_iter()
                            .map(|rating| {
                                view! {
                                    <label class="flex items-start gap-2 cursor-pointer">
                                        <input
                                            type="radio"
                                            name="stream-content-rating"
                                            value=rating.as_str()
                                            prop:checked=move || settings.with(|s| s.content_rating == rating)
                                            on:change=move |_| settings.update(|s| s.content_rating = rating)
                                            class="mt-1"
                                        />
                                        <div>
                                            <div class="text-sm font-medium">{rating.label()}</div>
                                            <div class="text-xs text-gray-500 dark:text-gray-400">{rating.description()}</div>
                                        </div>
                                    </label>
                                }
                            })
                            .collect_view()}
                    </div>
                </fieldset>

                <button
                    type="submit"
                    disabled=move || !has_changes.get() || saving.get()
                    class="px-4 py-2 rounded bg-seafoam-600 dark:bg-teal-600 text-white disabled:opacity-50 disabled:cursor-not-allowed"
                >
                    {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                </button>
            </form>
        </section>
    }
}
