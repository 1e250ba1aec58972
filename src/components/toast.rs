use leptos::prelude::*;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

impl ToastKind {
    fn classes(&self) -> &'static str {
        match self {
            ToastKind::Info => "bg-gray-100 dark:bg-teal-800 text-teal-500 dark:text-mint-300",
            ToastKind::Success => "bg-seafoam-100 dark:bg-seafoam-800 text-seafoam-700 dark:text-mint-200",
            ToastKind::Error => "bg-salmon-100 dark:bg-salmon-900 text-salmon-700 dark:text-salmon-200",
        }
    }
}

/// A toast's message, visibility and flavour, shared by whoever raises it.
#[derive(Clone, Copy)]
pub struct ToastState {
    pub message: RwSignal<String>,
    pub visible: RwSignal<bool>,
    pub kind: RwSignal<ToastKind>,
}

impl ToastState {
    pub fn new() -> Self {
        Self {
            message: RwSignal::new(String::new()),
            visible: RwSignal::new(false),
            kind: RwSignal::new(ToastKind::Info),
        }
    }

    /// Shows `message` and hides it again after `duration`.
    pub fn show(&self, kind: ToastKind, message: impl Into<String>, duration: Duration) {
        self.kind.set(kind);
        self.message.set(message.into());
        self.visible.set(true);
        let visible = self.visible;
        set_timeout(move || visible.set(false), duration);
    }

    pub fn hide(&self) {
        self.visible.set(false);
    }
}

impl Default for ToastState {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn Toast(state: ToastState) -> impl IntoView {
    let opacity_class = move || {
        if state.visible.get() {
            "opacity-100"
        } else {
            "opacity-0 pointer-events-none"
        }
    };

    view! {
        <div class=move || {
            format!(
                "{} {} fixed bottom-4 right-4 px-4 py-2 rounded shadow-lg transition-opacity duration-300 z-50",
                opacity_class(),
                state.kind.get().classes(),
            )
        }>
            {move || state.message.get()}
            <button
                class="ml-2 text-salmon-600 hover:text-salmon-700 dark:text-salmon-400 dark:hover:text-salmon-300"
                on:click=move |_| state.hide()
            >
                "×"
            </button>
        </div>
    }
}
