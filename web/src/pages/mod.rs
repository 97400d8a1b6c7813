pub mod cameras;
pub mod dashboard;
pub mod environments;
pub mod not_found;
pub mod settings;
pub mod users;

/// Console application state, expected in Leptos context by every server
/// function.
#[cfg(feature = "ssr")]
pub(crate) fn app_state() -> Result<crate::app::AppState, leptos::prelude::ServerFnError> {
    leptos::prelude::use_context::<crate::app::AppState>()
        .ok_or_else(|| leptos::prelude::ServerFnError::new("Missing AppState"))
}

/// Wrap a database error for transport to the client.
#[cfg(feature = "ssr")]
pub(crate) fn db_error(e: rusqlite::Error) -> leptos::prelude::ServerFnError {
    tracing::error!("DB error: {e}");
    leptos::prelude::ServerFnError::new(format!("DB error: {e}"))
}
