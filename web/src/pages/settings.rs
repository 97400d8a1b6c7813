//! Settings page – read-only view of how the console is deployed.

use leptos::prelude::*;

use crate::model::SettingsInfo;

#[server]
pub async fn get_settings() -> Result<SettingsInfo, ServerFnError> {
    let state = super::app_state()?;
    Ok(SettingsInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        db_path: state.db_path.display().to_string(),
    })
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let settings = Resource::new(|| (), |_| get_settings());

    view! {
        <div class="settings-page">
            <h1 class="text-2xl font-semibold mb-4">"Settings"</h1>

            <Suspense fallback=move || view! { <p class="loading">"Loading…"</p> }>
                {move || settings.get().map(|res| match res {
                    Ok(s) => view! {
                        <dl class="settings-list">
                            <dt>"Version"</dt>
                            <dd>{s.version}</dd>
                            <dt>"Database"</dt>
                            <dd><code>{s.db_path}</code></dd>
                        </dl>
                    }.into_any(),
                    Err(e) => view! {
                        <p class="error">"Error: " {e.to_string()}</p>
                    }.into_any(),
                })}
            </Suspense>
        </div>
    }
}
