//! Server entry-point – Axum + Leptos SSR.

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use std::path::PathBuf;
    use tower_http::services::ServeDir;

    use thirdeye_console::app::{shell, App, AppState};

    // ── Tracing ──────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "thirdeye_console=info,tower_http=info".into()),
        )
        .init();

    // ── Configuration ────────────────────────────────────────────────────
    let conf = match get_configuration(None) {
        Ok(conf) => conf,
        Err(e) => {
            tracing::error!("Cannot read Leptos configuration: {e}");
            std::process::exit(1);
        }
    };
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let site_root = leptos_options.site_root.clone();

    // Same file (and DB_PATH override) the API server reads.
    let config_path = std::env::var("THIRDEYE_CONFIG")
        .unwrap_or_else(|_| thirdeye_common::config::Config::default_path().to_string());
    let db_path = thirdeye_common::config::load_or_default(&PathBuf::from(&config_path)).db_path;

    // Ensure the database and schema exist so the console works even
    // before the API server has created any tenants.
    if let Err(e) = thirdeye_console::server::db::ensure_schema(&db_path) {
        tracing::error!("Cannot initialise database: {e}");
        std::process::exit(1);
    }
    tracing::info!("Database ready at {}", db_path.display());

    let state = AppState {
        db_path,
        leptos_options: leptos_options.clone(),
    };

    // ── Routes ───────────────────────────────────────────────────────────
    let routes = generate_route_list(App);

    let app = Router::new()
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            {
                let state = state.clone();
                move || {
                    provide_context(state.clone());
                }
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        // Serve static assets (WASM bundle, CSS)
        .nest_service("/pkg", ServeDir::new(format!("{site_root}/pkg")))
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptos_options);

    tracing::info!("Third Eye Console listening on http://{addr}");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Cannot bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        tracing::error!("Server error: {e}");
    }
}

#[cfg(not(feature = "ssr"))]
fn main() {
    // This binary is only built with the `ssr` feature.
    // The WASM entry point is `lib::hydrate()`.
}
