//! Cameras page – all registered streams and whether they are monitored.

use leptos::prelude::*;

use crate::components::status_badge::StatusBadge;
use crate::model::CameraRow;

#[server]
pub async fn get_cameras() -> Result<Vec<CameraRow>, ServerFnError> {
    use crate::server::db;
    let state = super::app_state()?;
    db::cameras(&state.db_path).map_err(super::db_error)
}

#[component]
pub fn CamerasPage() -> impl IntoView {
    let cameras = Resource::new(|| (), |_| get_cameras());

    view! {
        <div class="cameras-page">
            <h1 class="text-2xl font-semibold mb-4">"Cameras"</h1>

            <Suspense fallback=move || view! { <p class="loading">"Loading cameras…"</p> }>
                {move || cameras.get().map(|res| match res {
                    Ok(rows) if rows.is_empty() => view! {
                        <p class="empty">"No cameras registered."</p>
                    }.into_any(),
                    Ok(rows) => view! {
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Environment"</th>
                                    <th>"Organization"</th>
                                    <th>"Stream"</th>
                                    <th>"Status"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {rows.into_iter().map(|cam| view! {
                                    <tr>
                                        <td>{cam.name}</td>
                                        <td>{cam.env_name}</td>
                                        <td>{cam.org_name}</td>
                                        <td><code>{cam.rtsp_url}</code></td>
                                        <td>
                                            <StatusBadge on=cam.enabled on_text="Enabled" off_text="Disabled"/>
                                        </td>
                                    </tr>
                                }).collect_view()}
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
