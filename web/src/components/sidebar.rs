//! Left-hand navigation panel.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::nav::{self, link_class, menu_links, MENU};

/// Site-wide sidebar: title block plus one link per [`MENU`] entry, with
/// every entry whose href prefixes the current path highlighted.
#[component]
pub fn Sidebar() -> impl IntoView {
    let location = use_location();
    let links = move || menu_links(MENU, &location.pathname.get());

    view! {
        <aside class="w-64 border-r bg-white h-screen sticky top-0">
            <div class="p-4">
                <div class="text-xl font-semibold">{nav::TITLE}</div>
                <div class="text-sm text-gray-500">{nav::SUBTITLE}</div>
            </div>

            <nav class="p-2 space-y-1">
                {move || {
                    links()
                        .into_iter()
                        .map(|link| {
                            view! {
                                <A href=link.href attr:class=link_class(link.active)>
                                    {link.label}
                                </A>
                            }
                        })
                        .collect_view()
                }}
            </nav>
        </aside>
    }
}
