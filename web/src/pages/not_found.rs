use leptos::prelude::*;

/// Router fallback.  Also sets a 404 status on server-rendered responses.
#[component]
pub fn NotFound() -> impl IntoView {
    #[cfg(feature = "ssr")]
    {
        if let Some(resp) = use_context::<leptos_axum::ResponseOptions>() {
            resp.set_status(axum::http::StatusCode::NOT_FOUND);
        }
    }

    view! {
        <div class="not-found-page">
            <h1 class="text-2xl font-semibold mb-4">"Page not found"</h1>
            <a href="/dashboard">"Back to the dashboard"</a>
        </div>
    }
}
