//! "Create ETL" dialog
//!
//! Renders a query's result columns as an editable table (display name, index
//! and dimension flags, storage type) on top of [`EtlForm`], and submits the
//! draft through the create action.

use leptos::prelude::*;

use crate::api;
use crate::components::notifications::{BrowserEffects, Notifier};
use crate::etl::validator::default_rule;
use crate::etl::{submit, timeout_advice, EtlForm, Hint, SharedNameRule};
use crate::types::{ColumnFlag, ColumnType, Query};

#[component]
pub fn EtlModal(
    /// Query whose result set becomes the data source
    #[prop(default = None)]
    query: Option<Query>,
    /// Whether the dialog is visible
    #[prop(optional, into)]
    show: MaybeProp<bool>,
    /// Called when the dialog is dismissed or the data source was created
    #[prop(optional)]
    on_hide: Option<Callback<()>>,
    /// Shown when the create action fails
    #[prop(default = None)]
    error_message: Option<String>,
    /// Explore view timeout in seconds
    #[prop(default = None)]
    timeout: Option<u64>,
    /// Column name rule of the target backend
    #[prop(default = None)]
    name_rule: Option<SharedNameRule>,
) -> impl IntoView {
    let notifier = use_context::<Notifier>().unwrap_or_default();
    let query = query.unwrap_or_default();
    let advice = timeout_advice(&query, timeout);
    let form = RwSignal::new(EtlForm::new(query, name_rule.unwrap_or_else(default_rule)));

    let has_results = form.with_untracked(|f| f.has_results());
    let column_names = StoredValue::new(form.with_untracked(|f| {
        f.query()
            .result_columns()
            .map(|cols| cols.iter().map(|c| c.name.clone()).collect::<Vec<_>>())
            .unwrap_or_default()
    }));
    let error_message = StoredValue::new(error_message);

    let hide = move || {
        close_dialog(on_hide);
    };

    let on_submit = move |_| {
        let request = form.try_update(|f| f.can_submit().then(|| f.begin_submit()));
        let Some(request) = request.flatten() else {
            return;
        };
        let error_message = error_message.get_value();

        wasm_bindgen_futures::spawn_local(async move {
            let effects = BrowserEffects::new(notifier);
            let outcome = submit(
                request,
                api::create_etl_datasource,
                &effects,
                error_message.as_deref(),
            )
            .await;
            // The host may have unmounted the dialog while the action was in flight
            let mounted = form.try_update(|f| f.finish_submit()).is_some();
            if mounted && outcome.is_created() {
                hide();
            }
        });
    };

    view! {
        <Show when=move || show.get().unwrap_or(false)>
            <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50">
                <div class="bg-white rounded-lg shadow-xl max-w-4xl w-full mx-4 max-h-[90vh] overflow-y-auto">
                    <div class="px-6 py-4 border-b border-gray-200 bg-gray-50 flex justify-between items-center">
                        <h3 class="text-lg font-semibold text-gray-800">"Create ETL"</h3>
                        <button
                            class="text-gray-400 hover:text-gray-600 text-xl"
                            on:click=move |_| hide()
                        >
                            "×"
                        </button>
                    </div>

                    {if has_results {
                        view! {
                            <div class="p-6 space-y-4">
                                {move || form.with(|f| f.hints().to_vec()).into_iter().map(|hint| view! {
                                    <div class="p-3 bg-yellow-50 border border-yellow-200 rounded text-yellow-800 text-sm">
                                        {hint.lead()}
                                        <strong>{Hint::ALIAS_EXAMPLE}</strong>
                                        {Hint::TAIL}
                                    </div>
                                }).collect::<Vec<_>>()}

                                {advice.map(|advice| view! {
                                    <div class="p-3 bg-yellow-50 border border-yellow-200 rounded text-yellow-800 text-sm">
                                        {advice.to_string()}
                                        " If activated you can use the "
                                        <strong>"CREATE TABLE AS"</strong>
                                        " feature to store a summarized data set that you can then explore."
                                    </div>
                                })}

                                <div class="grid grid-cols-2 gap-4">
                                    <div>
                                        <label class="block text-sm font-medium text-gray-700 mb-1">
                                            "ETL Name " <sup class="text-gray-400">"_etl_{name}"</sup>
                                        </label>
                                        <input
                                            type="text"
                                            class="w-full px-3 py-2 border border-gray-300 rounded focus:outline-none focus:ring-2 focus:ring-blue-500 text-sm"
                                            placeholder="_etl_{name}"
                                            prop:value=move || form.with(|f| f.draft().name.clone())
                                            on:input=move |ev| {
                                                let value = event_target_value(&ev);
                                                form.update(|f| f.set_name(value));
                                            }
                                        />
                                    </div>
                                    <div>
                                        <label class="block text-sm font-medium text-gray-700 mb-1">"Chunk Size"</label>
                                        <input
                                            type="text"
                                            class="w-full px-3 py-2 border border-gray-300 rounded focus:outline-none focus:ring-2 focus:ring-blue-500 text-sm"
                                            placeholder="1000"
                                            prop:value=move || form.with(|f| f.draft().chunk_size.clone())
                                            on:input=move |ev| {
                                                let value = event_target_value(&ev);
                                                form.update(|f| f.set_chunk_size(value));
                                            }
                                        />
                                    </div>
                                </div>

                                <hr class="border-gray-200" />

                                <table class="min-w-full divide-y divide-gray-200 text-sm">
                                    <thead class="bg-gray-50">
                                        <tr>
                                            <th class="px-3 py-2 text-left font-medium text-gray-500">"column"</th>
                                            <th class="px-3 py-2 text-left font-medium text-gray-500">"verbose_name"</th>
                                            <th class="px-3 py-2 text-center font-medium text-gray-500">"is_index"</th>
                                            <th class="px-3 py-2 text-center font-medium text-gray-500">"is_dim"</th>
                                            <th class="px-3 py-2 text-left font-medium text-gray-500">"column_type"</th>
                                        </tr>
                                    </thead>
                                    <tbody class="divide-y divide-gray-100">
                                        {column_names.get_value().into_iter().map(|name| view! {
                                            <ColumnRow form=form name=name />
                                        }).collect::<Vec<_>>()}
                                    </tbody>
                                </table>

                                <div class="flex justify-end">
                                    <button
                                        class="px-4 py-2 bg-blue-600 text-white rounded hover:bg-blue-700 disabled:opacity-50"
                                        disabled=move || !form.with(|f| f.can_submit())
                                        on:click=on_submit
                                    >
                                        {move || if form.with(|f| f.is_pending()) { "Creating..." } else { "Create ETL" }}
                                    </button>
                                </div>
                            </div>
                        }.into_any()
                    } else {
                        view! {
                            <div class="p-6 text-gray-600">"No results available for this query"</div>
                        }.into_any()
                    }}
                </div>
            </div>
        </Show>
    }
}

/// Run the host's hide callback; `false` when there is none or it was disposed
fn close_dialog(on_hide: Option<Callback<()>>) -> bool {
    on_hide.and_then(|on_hide| on_hide.try_run(())).is_some()
}

#[component]
fn ColumnRow(form: RwSignal<EtlForm>, name: String) -> impl IntoView {
    let column = StoredValue::new(name.clone());
    let edit = move || {
        column.with_value(|c| form.with(|f| f.column(c).unwrap_or_default()))
    };

    view! {
        <tr>
            <td class="px-3 py-2 font-mono text-gray-800">{name}</td>
            <td class="px-3 py-2">
                <input
                    type="text"
                    class="w-36 px-2 py-1 border border-gray-300 rounded text-sm"
                    prop:value=move || column.with_value(|c| edit().display_name(c).to_string())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        column.with_value(|c| form.update(|f| f.set_column_display_name(c, Some(value))));
                    }
                />
            </td>
            <td class="px-3 py-2 text-center">
                <input
                    type="checkbox"
                    class="rounded border-gray-300"
                    prop:checked=move || edit().flag(ColumnFlag::Index)
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        column.with_value(|c| form.update(|f| f.set_column_flag(c, ColumnFlag::Index, checked)));
                    }
                />
            </td>
            <td class="px-3 py-2 text-center">
                <input
                    type="checkbox"
                    class="rounded border-gray-300"
                    prop:checked=move || edit().flag(ColumnFlag::Dimension)
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        column.with_value(|c| form.update(|f| f.set_column_flag(c, ColumnFlag::Dimension, checked)));
                    }
                />
            </td>
            <td class="px-3 py-2">
                <select
                    class="px-2 py-1 border border-gray-300 rounded text-sm"
                    on:change=move |ev| {
                        let column_type = ColumnType::from_tag(&event_target_value(&ev));
                        column.with_value(|c| form.update(|f| f.set_column_type(c, column_type)));
                    }
                >
                    {ColumnType::ALL.into_iter().map(|t| view! {
                        <option value=t.tag() prop:selected=move || edit().effective_type() == t>
                            {t.label()}
                        </option>
                    }).collect::<Vec<_>>()}
                </select>
            </td>
        </tr>
    }
}
