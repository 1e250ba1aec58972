use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
    Ghost,
    Danger,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ButtonVariant {
    fn classes(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => {
                "bg-seafoam-600 dark:bg-teal-600 text-white \
                 hover:bg-seafoam-700 dark:hover:bg-teal-500 \
                 active:bg-seafoam-800 dark:active:bg-teal-400 \
                 border border-seafoam-600 dark:border-teal-600"
            }
            ButtonVariant::Secondary => {
                "bg-gray-300 dark:bg-gray-600 text-gray-900 dark:text-gray-100 \
                 hover:bg-gray-400 dark:hover:bg-gray-500 \
                 border border-gray-400 dark:border-gray-600"
            }
            ButtonVariant::Outline => {
                "bg-transparent border-2 \
                 border-seafoam-600 dark:border-mint-400 \
                 text-seafoam-700 dark:text-mint-300 \
                 hover:bg-seafoam-50 dark:hover:bg-teal-800"
            }
            ButtonVariant::Ghost => {
                "bg-transparent text-gray-600 dark:text-gray-300 \
                 hover:bg-gray-200 dark:hover:bg-teal-800 \
                 hover:text-gray-800 dark:hover:text-white"
            }
            ButtonVariant::Danger => {
                "bg-salmon-500 dark:bg-salmon-600 text-white \
                 hover:bg-salmon-600 dark:hover:bg-salmon-700 \
                 border border-salmon-500 dark:border-salmon-600"
            }
            ButtonVariant::Success => {
                "bg-mint-500 dark:bg-mint-600 text-teal-900 \
                 hover:bg-mint-600 dark:hover:bg-mint-500 \
                 border border-mint-500 dark:border-mint-600"
            }
        }
    }
}

impl ButtonSize {
    fn classes(&self) -> &'static str {
        match self {
            ButtonSize::Small => "px-2 py-1 text-xs",
            ButtonSize::Medium => "px-3 py-2 text-sm",
            ButtonSize::Large => "px-4 py-2 text-base",
        }
    }

    fn padding(&self) -> &'static str {
        match self {
            ButtonSize::Small => "p-1",
            ButtonSize::Medium => "p-2",
            ButtonSize::Large => "p-3",
        }
    }
}

fn button_classes(variant: ButtonVariant, size: &str, disabled: bool, full_width: bool, extra: &str) -> String {
    let variant = if disabled { ButtonVariant::Secondary } else { variant };
    let disabled_classes = if disabled {
        "opacity-50 cursor-not-allowed"
    } else {
        "cursor-pointer"
    };
    let width_classes = if full_width { "w-full" } else { "" };

    format!(
        "inline-flex items-center justify-center font-medium rounded transition-colors duration-150 focus:outline-none {} {} {} {} {}",
        variant.classes(),
        size,
        disabled_classes,
        width_classes,
        extra
    )
}

#[component]
pub fn Button(
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional)] size: ButtonSize,
    #[prop(optional, into)] disabled: Signal<bool>,
    #[prop(optional)] full_width: bool,
    #[prop(optional)] submit: bool,
    #[prop(optional, into)] class: String,
    #[prop(optional)] on_click: Option<Callback<web_sys::MouseEvent>>,
    children: Children,
) -> impl IntoView {
    let class = move || button_classes(variant, size.classes(), disabled.get(), full_width, &class);

    view! {
        <button
            type=if submit { "submit" } else { "button" }
            class=class
            disabled=move || disabled.get()
            on:click=move |ev| {
                if !disabled.get_untracked() {
                    if let Some(handler) = on_click {
                        handler.run(ev);
                    }
                }
            }
        >
            {children()}
        </button>
    }
}

#[component]
pub fn IconButton(
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional)] size: ButtonSize,
    #[prop(optional, into)] disabled: Signal<bool>,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] title: String,
    on_click: Callback<web_sys::MouseEvent>,
    children: Children,
) -> impl IntoView {
    let class = move || {
        button_classes(
            variant,
            &format!("{} aspect-square", size.padding()),
            disabled.get(),
            false,
            &class,
        )
    };

    view! {
        <button
            type="button"
            class=class
            title=title
            disabled=move || disabled.get()
            on:click=move |ev| {
                if !disabled.get_untracked() {
                    on_click.run(ev);
                }
            }
        >
            {children()}
        </button>
    }
}

#[component]
pub fn LinkButton(
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional)] size: ButtonSize,
    #[prop(optional)] full_width: bool,
    #[prop(optional, into)] class: String,
    #[prop(into)] href: String,
    #[prop(optional, into)] target: Option<String>,
    children: Children,
) -> impl IntoView {
    let classes = format!(
        "{} no-underline",
        button_classes(variant, size.classes(), false, full_width, &class)
    );
    let rel = target.as_ref().map(|_| "noopener noreferrer");

    view! {
        <a class=classes href=href target=target rel=rel>
            {children()}
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_buttons_render_as_secondary() {
        let classes = button_classes(ButtonVariant::Danger, "px-2", true, false, "");
        assert!(classes.contains("bg-gray-300"));
        assert!(classes.contains("cursor-not-allowed"));
        assert!(!classes.contains("bg-salmon-500"));
    }

    #[test]
    fn extra_classes_are_appended() {
        let classes = button_classes(ButtonVariant::Primary, "px-2", false, true, "mt-4");
        assert!(classes.contains("w-full"));
        assert!(classes.ends_with("mt-4"));
    }
}
