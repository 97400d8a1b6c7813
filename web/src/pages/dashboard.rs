//! Dashboard – installation-wide totals.

use leptos::prelude::*;

use crate::components::stat_card::StatCard;
use crate::model::Overview;

// ─── Server functions ────────────────────────────────────────────────────────

#[server]
pub async fn get_overview() -> Result<Overview, ServerFnError> {
    use crate::server::db;
    let state = super::app_state()?;
    db::overview(&state.db_path).map_err(super::db_error)
}

// ─── Page component ──────────────────────────────────────────────────────────

#[component]
pub fn DashboardPage() -> impl IntoView {
    let overview = Resource::new(|| (), |_| get_overview());

    view! {
        <div class="dashboard-page">
            <h1 class="text-2xl font-semibold mb-4">"Dashboard"</h1>

            <Suspense fallback=move || view! { <p class="loading">"Loading…"</p> }>
                {move || overview.get().map(|res| match res {
                    Ok(o) => view! {
                        <div class="stat-grid">
                            <StatCard label="Organizations" value=o.organizations href="/users"/>
                            <StatCard label="Environments" value=o.environments href="/environments"/>
                            <StatCard label="Cameras" value=o.cameras href="/cameras"/>
                            <StatCard label="Enabled cameras" value=o.enabled_cameras href="/cameras"/>
                            <StatCard label="Users" value=o.users href="/users"/>
                        </div>
                    }.into_any(),
                    Err(e) => view! {
                        <p class="error">"Error: " {e.to_string()}</p>
                    }.into_any(),
                })}
            </Suspense>
        </div>
    }
}
