//! Users & Admins page.

use leptos::prelude::*;

use crate::components::status_badge::StatusBadge;
use crate::model::UserRow;

#[server]
pub async fn get_users() -> Result<Vec<UserRow>, ServerFnError> {
    use crate::server::db;
    let state = super::app_state()?;
    db::users(&state.db_path).map_err(super::db_error)
}

#[component]
pub fn UsersPage() -> impl IntoView {
    let users = Resource::new(|| (), |_| get_users());

    view! {
        <div class="users-page">
            <h1 class="text-2xl font-semibold mb-4">"Users & Admins"</h1>

            <Suspense fallback=move || view! { <p class="loading">"Loading users…"</p> }>
                {move || users.get().map(|res| match res {
                    Ok(rows) => view! { <UsersTable rows/> }.into_any(),
                    Err(e) => view! {
                        <p class="error">"Error: " {e.to_string()}</p>
                    }.into_any(),
                })}
            </Suspense>
        </div>
    }
}

/// User listing, or a hint when no org has been bootstrapped yet.
#[component]
pub fn UsersTable(rows: Vec<UserRow>) -> impl IntoView {
    if rows.is_empty() {
        return view! {
            <p class="empty">"No users yet. Bootstrap an organization through the API."</p>
        }
        .into_any();
    }

    view! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>"Email"</th>
                    <th>"Organization"</th>
                    <th>"Role"</th>
                    <th>"Status"</th>
                    <th>"Created"</th>
                </tr>
            </thead>
            <tbody>
                {rows.into_iter().map(|u| view! {
                    <tr>
                        <td>{u.email}</td>
                        <td>{u.org_name}</td>
                        <td>{u.role}</td>
                        <td>
                            <StatusBadge on=u.is_active on_text="Active" off_text="Disabled"/>
                        </td>
                        <td>{u.created_at}</td>
                    </tr>
                }).collect_view()}
            </tbody>
        </table>
    }
    .into_any()
}
