use leptos::prelude::*;
use leptos_fetch::QueryClient;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    path, StaticSegment,
};

use crate::auth::context::AuthProvider;
use crate::components::footer::Footer;
use crate::components::navbar::Navbar;
use crate::components::sidebar::Sidebar;
use crate::pages::{
    channel_settings::ChannelSettingsPage, dashboard::StreamerDashboard, directory::Directory,
    faq::Faq, following::Following, home::HomePage, login::LoginPage,
    stream_key::StreamKeyGenerator, watch::WatchPage,
};

const HLS_JS: &str = "https://cdn.jsdelivr.net/npm/hls.js@1";
const SOCKET_IO_JS: &str = "https://cdn.socket.io/4.7.5/socket.io.min.js";

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <script src=HLS_JS></script>
                <script src=SOCKET_IO_JS></script>
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    QueryClient::new().provide();

    view! {
        <Stylesheet id="leptos" href="/pkg/vimm.css" />
        <Title text="VIMM" />
        <AuthProvider>
            <Router>
                <div class="min-h-screen flex flex-col bg-gray-100 dark:bg-teal-900 text-gray-800 dark:text-gray-100">
                    <Navbar />
                    <div class="flex flex-1 min-h-0">
                        <Sidebar />
                        <main class="flex-1 min-w-0 overflow-y-auto">
                            <Routes fallback=|| view! { <NotFound /> }>
                                <Route path=StaticSegment("") view=HomePage />
                                <Route path=path!("directory") view=Directory />
                                <Route path=path!("following") view=Following />
                                <Route path=path!("watch") view=WatchPage />
                                <Route path=path!("faq") view=Faq />
                                <Route path=path!("settings") view=ChannelSettingsPage />
                                <Route path=path!("dashboard") view=StreamerDashboard />
                                <Route path=path!("stream-key") view=StreamKeyGenerator />
                                <Route path=path!("login") view=LoginPage />
                            </Routes>
                            <Footer />
                        </main>
                    </div>
                </div>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="p-8 text-center">
            <h1 class="text-2xl font-bold text-seafoam-600 dark:text-mint-400 mb-2">"Page not found"</h1>
            <a href="/" class="text-teal-600 dark:text-mint-300 hover:underline">"Back to home"</a>
        </div>
    }
}
