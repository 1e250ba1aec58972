use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::auth::context::use_auth;
use crate::components::hive_login::HiveLogin;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if auth.is_authenticated() {
            navigate("/", Default::default());
        }
    });

    view! {
        <div class="min-h-[60vh] flex items-center justify-center p-4">
            <div class="w-full max-w-md">
                <HiveLogin />
            </div>
        </div>
    }
}
