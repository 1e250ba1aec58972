use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::auth::context::use_auth;

#[component]
pub fn LogoutButton() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let on_logout = move |_| {
        auth.logout();
        navigate("/", Default::default());
    };

    view! {
        <button
            on:click=on_logout
            class="w-full text-left px-4 py-2 text-sm text-salmon-600 dark:text-salmon-400 hover:bg-gray-100 dark:hover:bg-teal-700"
        >
            "Logout"
        </button>
    }
}

#[component]
pub fn LoginRequired(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="min-h-[50vh] flex items-center justify-center">
            <div class="text-center bg-white dark:bg-teal-800 rounded-lg shadow-md p-8 max-w-md">
                <h2 class="text-2xl font-bold text-gray-800 dark:text-gray-200 mb-4">
                    "Login Required"
                </h2>
                <p class="text-gray-600 dark:text-gray-400 mb-6">{message}</p>
                <a
                    href="/login"
                    class="px-4 py-2 bg-seafoam-600 dark:bg-teal-600 text-white rounded-md hover:bg-seafoam-700 dark:hover:bg-teal-700"
                >
                    "Login with Hive Keychain"
                </a>
            </div>
        </div>
    }
}

/// Renders `children` only for a signed-in viewer.
#[component]
pub fn AuthGate(#[prop(into)] message: String, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let children = StoredValue::new(children);
    let message = StoredValue::new(message);

    move || {
        if auth.is_loading() {
            view! { <div class="p-8 text-center text-gray-500 dark:text-gray-400">"Loading..."</div> }
                .into_any()
        } else if auth.is_authenticated() {
            children.with_value(|c| c()).into_any()
        } else {
            view! { <LoginRequired message=message.get_value() /> }.into_any()
        }
    }
}
