use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "ssr")] {
        use anyhow::Context;
        use axum::{
            body::Body as AxumBody,
            extract::State,
            http::Request,
            response::IntoResponse,
            routing::get,
            Router,
        };
        use dotenv::dotenv;
        use env_logger::Env;
        use leptos::prelude::*;
        use leptos_axum::{generate_route_list, LeptosRoutes};
        use vimm::app::*;
        use vimm::state::AppState;

        #[tokio::main]
        async fn main() -> anyhow::Result<()> {
            dotenv().ok();
            env_logger::init_from_env(Env::default().default_filter_or("info"));

            let conf = get_configuration(None).context("failed to read leptos configuration")?;
            let addr = conf.leptos_options.site_addr;
            let leptos_options = conf.leptos_options;

            let routes = generate_route_list(App);
            let app_state = AppState::new(leptos_options.clone());

            let backends = vimm::config::get();
            log::info!(
                "core api: {}, chat server: {}, hive node: {}",
                backends.core_server,
                backends.chat_server,
                backends.hive_api
            );

            let app = Router::new()
                .leptos_routes_with_handler(routes, get(|State(app_state): State<AppState>, request: Request<AxumBody>| async move {
                    let options = app_state.leptos_options.clone();
                    let handler = leptos_axum::render_app_to_stream_with_context(
                        move || {
                            provide_context(app_state.clone());
                        },
                        move || shell(options.clone())
                    );
                    handler(request).await.into_response()
                }))
                .fallback(leptos_axum::file_and_error_handler::<AppState, _>(shell))
                .with_state(app_state);

            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;
            log::info!("listening on http://{}", &addr);
            axum::serve(listener, app.into_make_service())
                .await
                .context("server error")?;
            Ok(())
        }
    } else {
        pub fn main() {
            // client-side entry point is `hydrate` in lib.rs
        }
    }
}
