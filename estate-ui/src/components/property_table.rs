//! Property Table Component
//!
//! The property list with per-row edit and delete actions.

use leptos::*;

use crate::state::Property;

#[component]
pub fn PropertyTable(
    #[prop(into)]
    properties: Signal<Vec<Property>>,
    on_edit: Callback<Property>,
    on_delete: Callback<i64>,
) -> impl IntoView {
    view! {
        <div class="overflow-x-auto">
            <table class="w-full text-left bg-white rounded-xl shadow">
                <thead class="bg-gray-800 text-white">
                    <tr>
                        <th class="px-4 py-3">"Address"</th>
                        <th class="px-4 py-3">"Price"</th>
                        <th class="px-4 py-3">"Size (m²)"</th>
                        <th class="px-4 py-3">"Description"</th>
                        <th class="px-4 py-3">"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        properties.get().into_iter().map(|property| {
                            let id = property.id;
                            let row = property.clone();

                            view! {
                                <tr class="border-t border-gray-200 even:bg-gray-50">
                                    <td class="px-4 py-3">{property.address}</td>
                                    <td class="px-4 py-3">{property.price}</td>
                                    <td class="px-4 py-3">{property.size}</td>
                                    <td class="px-4 py-3">{property.description}</td>
                                    <td class="px-4 py-3 space-x-2">
                                        <button
                                            on:click=move |_| on_edit.call(row.clone())
                                            class="px-3 py-2 bg-yellow-400 hover:bg-yellow-500 rounded-lg text-sm"
                                        >
                                            "Edit"
                                        </button>
                                        <button
                                            on:click=move |_| on_delete.call(id)
                                            class="px-3 py-2 bg-red-600 hover:bg-red-700 text-white rounded-lg text-sm"
                                        >
                                            "Delete"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }).collect_view()
                    }}
                </tbody>
            </table>
        </div>
    }
}
