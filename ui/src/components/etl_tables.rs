use leptos::prelude::*;

use crate::api;
use crate::types::{ColumnFlag, EtlDatasource};

/// Created ETL data sources
#[component]
pub fn EtlTables() -> impl IntoView {
    let datasources = LocalResource::new(|| async move { api::list_etl_datasources().await });

    view! {
        <div class="p-6">
            <h2 class="text-2xl font-bold mb-6">"ETL Tables"</h2>

            <Suspense fallback=move || view! { <div class="text-gray-500">"Loading..."</div> }>
                {move || {
                    datasources.get().map(|data| {
                        match data {
                            Ok(list) if !list.is_empty() => view! {
                                <div class="space-y-4">
                                    {list.into_iter().rev().map(|ds| {
                                        view! { <EtlCard datasource=ds /> }
                                    }).collect::<Vec<_>>()}
                                </div>
                            }.into_any(),
                            Ok(_) => view! {
                                <div class="text-center py-12 bg-white rounded-lg shadow">
                                    <p class="text-gray-500 mb-4">"No ETL data sources yet"</p>
                                    <a href="/" class="text-blue-500 hover:underline">"Create one from SQL Lab"</a>
                                </div>
                            }.into_any(),
                            Err(e) => view! {
                                <div class="text-red-500">{format!("Failed to load ETL data sources: {}", e)}</div>
                            }.into_any(),
                        }
                    })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn EtlCard(datasource: EtlDatasource) -> impl IntoView {
    let created = datasource.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let column_count = datasource.columns.len();
    let indexes = datasource
        .columns
        .iter()
        .filter(|(_, edit)| edit.flag(ColumnFlag::Index))
        .map(|(name, _)| name.clone())
        .collect::<Vec<_>>();

    view! {
        <div class="bg-white rounded-lg shadow p-4">
            <div class="flex justify-between items-start mb-2">
                <div>
                    <h3 class="font-bold text-lg text-gray-900">{datasource.name.clone()}</h3>
                    <p class="text-gray-500 text-xs">{created}</p>
                </div>
                <div class="flex space-x-2">
                    <span class="px-2 py-1 text-xs rounded bg-blue-100 text-blue-800">
                        {format!("{} columns", column_count)}
                    </span>
                    <span class="px-2 py-1 text-xs rounded bg-gray-100 text-gray-800">
                        {format!("chunk {}", datasource.chunk_size)}
                    </span>
                </div>
            </div>
            <pre class="bg-gray-50 rounded p-2 text-xs font-mono text-gray-700 overflow-x-auto">{datasource.sql.clone()}</pre>
            <div class="mt-2 text-sm text-gray-600">
                {if indexes.is_empty() {
                    "No index columns".to_string()
                } else {
                    format!("Index: {}", indexes.join(", "))
                }}
            </div>
            <table class="mt-3 min-w-full text-sm">
                <tbody class="divide-y divide-gray-100">
                    {datasource.columns.iter().map(|(name, edit)| {
                        let display = edit.display_name(name).to_string();
                        let type_label = edit.effective_type().label();
                        view! {
                            <tr>
                                <td class="py-1 font-mono text-gray-800">{name.clone()}</td>
                                <td class="py-1 text-gray-600">{display}</td>
                                <td class="py-1 text-gray-500">{type_label}</td>
                            </tr>
                        }
                    }).collect::<Vec<_>>()}
                </tbody>
            </table>
        </div>
    }
}
