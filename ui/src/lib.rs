use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;

mod api;
mod components;
pub mod etl;
pub mod types;

use components::etl_tables::EtlTables;
use components::notifications::{Notifier, Toasts};
use components::sql_lab::SqlLab;

#[component]
pub fn App() -> impl IntoView {
    provide_context(Notifier::new());

    view! {
        <Router>
            <div class="flex h-screen bg-gray-100">
                // Sidebar
                <div class="w-64 bg-gray-800 text-white p-4 flex flex-col">
                    <h1 class="text-2xl font-bold mb-8">"ETL Studio"</h1>
                    <nav class="space-y-1 flex-1">
                        <NavLink href="/" label="SQL Lab" />
                        <NavLink href="/etltableview/list/" label="ETL Tables" />
                    </nav>
                </div>

                // Main Content
                <div class="flex-1 overflow-y-auto">
                    <Routes fallback=|| "Not found.">
                        <Route path=path!("/") view=SqlLab/>
                        <Route path=path!("/etltableview/list") view=EtlTables/>
                        <Route path=path!("/etltableview/list/") view=EtlTables/>
                    </Routes>
                </div>
            </div>
            <Toasts />
        </Router>
    }
}

#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <A href=href attr:class="block p-2 hover:bg-gray-700 rounded transition-colors">
            {label}
        </A>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(App);
}
