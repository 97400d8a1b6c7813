//! Environments page – every site across all organizations.

use leptos::prelude::*;

use crate::model::EnvironmentRow;

#[server]
pub async fn get_environments() -> Result<Vec<EnvironmentRow>, ServerFnError> {
    use crate::server::db;
    let state = super::app_state()?;
    db::environments(&state.db_path).map_err(super::db_error)
}

#[component]
pub fn EnvironmentsPage() -> impl IntoView {
    let envs = Resource::new(|| (), |_| get_environments());

    view! {
        <div class="environments-page">
            <h1 class="text-2xl font-semibold mb-4">"Environments"</h1>

            <Suspense fallback=move || view! { <p class="loading">"Loading environments…"</p> }>
                {move || envs.get().map(|res| match res {
                    Ok(rows) if rows.is_empty() => view! {
                        <p class="empty">"No environments yet."</p>
                    }.into_any(),
                    Ok(rows) => view! {
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>"Organization"</th>
                                    <th>"Name"</th>
                                    <th>"Region"</th>
                                    <th>"Cameras"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || rows.clone()
                                    key=|e| e.id.clone()
                                    children=move |env: EnvironmentRow| {
                                        view! {
                                            <tr>
                                                <td>{env.org_name}</td>
                                                <td>{env.name}</td>
                                                <td>{env.region.unwrap_or_else(|| "–".into())}</td>
                                                <td>{env.camera_count}</td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    }.into_any(),
                    Err(e) => view! {
                        <p class="error">"Error: " {e.to_string()}</p>
                    }.into_any(),
                })}
            </Suspense>
        </div>
    }
}
