//! Root Leptos application component with routing.

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::components::sidebar::Sidebar;
use crate::pages::{
    cameras::CamerasPage,
    dashboard::DashboardPage,
    environments::EnvironmentsPage,
    not_found::NotFound,
    settings::SettingsPage,
    users::UsersPage,
};

/// Server-side application state, provided as Leptos context for server functions.
#[derive(Clone, Debug)]
#[cfg(feature = "ssr")]
pub struct AppState {
    pub db_path: std::path::PathBuf,
    pub leptos_options: LeptosOptions,
}

/// HTML document wrapping `<App/>` for server rendering.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name="description" content="Third Eye camera monitoring admin console"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// The root `<App/>` component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/thirdeye-console.css"/>
        <Title text="Third Eye – Admin Console"/>

        <Router>
            <div class="flex min-h-screen bg-gray-50">
                <Sidebar/>
                <main class="main-content flex-1 p-6">
                    <Routes fallback=|| view! { <NotFound/> }>
                        <Route path=path!("/") view=|| view! { <Redirect path="/dashboard"/> }/>
                        <Route path=path!("/dashboard") view=DashboardPage/>
                        <Route path=path!("/environments") view=EnvironmentsPage/>
                        <Route path=path!("/cameras") view=CamerasPage/>
                        <Route path=path!("/users") view=UsersPage/>
                        <Route path=path!("/settings") view=SettingsPage/>
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
