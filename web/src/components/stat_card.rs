//! Single-number tile used on the dashboard.

use leptos::prelude::*;

#[component]
pub fn StatCard(label: &'static str, value: u64, href: &'static str) -> impl IntoView {
    view! {
        <a href=href class="stat-card block rounded-md border bg-white p-4">
            <div class="text-sm text-gray-500">{label}</div>
            <div class="text-2xl font-semibold">{value}</div>
        </a>
    }
}
