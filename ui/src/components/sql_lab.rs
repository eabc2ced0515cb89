use leptos::prelude::*;

use crate::api;
use crate::components::etl_modal::EtlModal;
use crate::etl::{rule_from_pattern, SharedNameRule};
use crate::types::{CommonSettings, Query};

/// Query history with a "Create ETL" action per query
#[component]
pub fn SqlLab() -> impl IntoView {
    let queries = LocalResource::new(|| async move { api::list_queries().await });
    let common = LocalResource::new(|| async move { api::get_common().await.ok() });
    let (selected, set_selected) = signal(Option::<Query>::None);
    let dialog = dialog_source(selected.into(), Signal::derive(move || common.get()));

    view! {
        <div class="p-6">
            <h2 class="text-2xl font-bold mb-6">"SQL Lab"</h2>

            <Suspense fallback=move || view! { <div class="text-gray-500">"Loading..."</div> }>
                {move || {
                    queries.get().map(|data| {
                        match data {
                            Ok(list) if !list.is_empty() => view! {
                                <div class="bg-white rounded-lg shadow overflow-hidden">
                                    <table class="min-w-full divide-y divide-gray-200 text-sm">
                                        <thead class="bg-gray-50">
                                            <tr>
                                                <th class="px-4 py-2 text-left font-medium text-gray-500">"Tab"</th>
                                                <th class="px-4 py-2 text-left font-medium text-gray-500">"Database"</th>
                                                <th class="px-4 py-2 text-left font-medium text-gray-500">"SQL"</th>
                                                <th class="px-4 py-2 text-left font-medium text-gray-500">"Columns"</th>
                                                <th class="px-4 py-2"></th>
                                            </tr>
                                        </thead>
                                        <tbody class="divide-y divide-gray-100">
                                            {list.into_iter().map(|query| {
                                                let columns = query.result_columns().map(|c| c.len()).unwrap_or(0);
                                                let tab = query.tab.clone().unwrap_or_else(|| "Untitled Query".to_string());
                                                let db = query.db.clone().unwrap_or_else(|| query.db_id.to_string());
                                                let sql = query.sql.clone();
                                                view! {
                                                    <tr>
                                                        <td class="px-4 py-2 text-gray-800">{tab}</td>
                                                        <td class="px-4 py-2 text-gray-600">{db}</td>
                                                        <td class="px-4 py-2"><code class="font-mono text-xs text-gray-700">{sql}</code></td>
                                                        <td class="px-4 py-2 text-gray-600">{columns}</td>
                                                        <td class="px-4 py-2 text-right">
                                                            <button
                                                                class="text-sm text-blue-600 hover:text-blue-900 disabled:opacity-50"
                                                                disabled=move || common.get().is_none()
                                                                on:click=move |_| set_selected.set(Some(query.clone()))
                                                            >
                                                                "Create ETL"
                                                            </button>
                                                        </td>
                                                    </tr>
                                                }
                                            }).collect::<Vec<_>>()}
                                        </tbody>
                                    </table>
                                </div>
                            }.into_any(),
                            Ok(_) => view! {
                                <div class="text-center py-12 bg-white rounded-lg shadow">
                                    <p class="text-gray-500">"No queries have been run yet"</p>
                                </div>
                            }.into_any(),
                            Err(e) => view! {
                                <div class="text-red-500">{format!("Failed to load queries: {}", e)}</div>
                            }.into_any(),
                        }
                    })
                }}
            </Suspense>

            {move || dialog().map(|(query, settings)| view! {
                <EtlModal
                    query=Some(query)
                    show=true
                    on_hide=Callback::new(move |_| set_selected.set(None))
                    error_message=settings.error_message
                    timeout=settings.timeout
                    name_rule=Some(settings.rule)
                />
            })}
        </div>
    }
}

/// Settings the SQL Lab page injects into the dialog
#[derive(Clone)]
struct DialogSettings {
    timeout: Option<u64>,
    error_message: Option<String>,
    rule: SharedNameRule,
}

impl DialogSettings {
    fn from_common(common: Option<&CommonSettings>) -> Self {
        Self {
            timeout: common.map(|s| s.webserver_timeout),
            error_message: common.map(|s| s.etl_error_message.clone()),
            rule: rule_from_pattern(common.map(|s| s.column_name_pattern.as_str())),
        }
    }
}

/// Query and settings for the open dialog. Only `selected` is tracked, so
/// settings arriving later never remount a dialog the user is editing.
fn dialog_source(
    selected: Signal<Option<Query>>,
    common: Signal<Option<Option<CommonSettings>>>,
) -> impl Fn() -> Option<(Query, DialogSettings)> + Copy + Send + Sync + 'static {
    move || {
        let query = selected.get()?;
        let settings = common.get_untracked().flatten();
        Some((query, DialogSettings::from_common(settings.as_ref())))
    }
}
