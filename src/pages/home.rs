use leptos::prelude::*;

use crate::components::main_content::MainContent;

#[component]
pub fn HomePage() -> impl IntoView {
    view! { <MainContent /> }
}
