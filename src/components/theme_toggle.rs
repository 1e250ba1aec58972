use leptos::prelude::*;
use leptos_icons::Icon;

use crate::interop::local_storage;

pub const THEME_KEY: &str = "vimm-theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// A saved choice wins over the browser preference.
    pub fn resolve(saved: Option<&str>, prefers_dark: bool) -> Self {
        saved.and_then(Theme::parse).unwrap_or(if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        })
    }
}

fn prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

fn saved_theme() -> Option<String> {
    local_storage()?.get_item(THEME_KEY).ok().flatten()
}

fn save_theme(theme: Theme) {
    if let Some(storage) = local_storage() {
        if storage.set_item(THEME_KEY, theme.as_str()).is_err() {
            log::warn!("Failed to persist theme");
        }
    }
}

fn apply_theme(theme: Theme) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    let classes = root.class_list();
    let _ = match theme {
        Theme::Dark => classes.add_1("dark"),
        Theme::Light => classes.remove_1("dark"),
    };
}

#[component]
pub fn ThemeToggle() -> impl IntoView {
    let theme = RwSignal::new(Theme::default());

    // browser only; the server render always starts light
    Effect::new(move |_| {
        let initial = Theme::resolve(saved_theme().as_deref(), prefers_dark());
        theme.set(initial);
        apply_theme(initial);
    });

    let toggle = move |_| {
        let next = theme.get_untracked().toggled();
        theme.set(next);
        apply_theme(next);
        save_theme(next);
    };

    view! {
        <button
            on:click=toggle
            class="p-2 rounded text-teal-600 dark:text-mint-300 hover:bg-gray-200 dark:hover:bg-teal-700"
            title="Toggle theme"
        >
            {move || match theme.get() {
                Theme::Dark => view! { <Icon icon=icondata_bs::BsSun width="18" height="18" /> }.into_any(),
                Theme::Light => view! { <Icon icon=icondata_bs::BsMoon width="18" height="18" /> }.into_any(),
            }}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_choice_beats_browser_preference() {
        assert_eq!(Theme::resolve(Some("light"), true), Theme::Light);
        assert_eq!(Theme::resolve(Some("dark"), false), Theme::Dark);
    }

    #[test]
    fn unknown_or_missing_value_follows_browser() {
        assert_eq!(Theme::resolve(None, true), Theme::Dark);
        assert_eq!(Theme::resolve(Some("sepia"), false), Theme::Light);
    }

    #[test]
    fn toggling_flips_and_round_trips_through_storage_value() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::parse(Theme::Dark.as_str()), Some(Theme::Dark));
    }
}
