//! On/off pill for boolean columns (camera enabled, user active).

use leptos::prelude::*;

/// Renders `on_text` in green when `on`, otherwise `off_text` in grey.
#[component]
pub fn StatusBadge(on: bool, on_text: &'static str, off_text: &'static str) -> impl IntoView {
    let (class, text) = if on {
        ("badge badge-on", on_text)
    } else {
        ("badge badge-off", off_text)
    };
    view! { <span class=class>{text}</span> }
}
