//! Properties Page
//!
//! Create/edit form above the property list. Needs the session flag;
//! without it the page sends the user to login before fetching anything.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::PropertyTable;
use crate::state::{session, FormError, Property, PropertyForm};

#[component]
pub fn Properties() -> impl IntoView {
    let navigate = use_navigate();

    let properties = create_rw_signal(Vec::<Property>::new());
    let form = create_rw_signal(PropertyForm::default());
    let editing = create_rw_signal(None::<i64>);
    let (form_error, set_form_error) = create_signal(None::<FormError>);

    let refresh = move || {
        spawn_local(async move {
            match api::fetch_properties().await {
                Ok(list) => properties.set(list),
                Err(e) => {
                    web_sys::console::error_1(&format!("Error fetching properties: {}", e).into());
                }
            }
        });
    };

    let reset_form = move || {
        form.set(PropertyForm::default());
        editing.set(None);
    };

    // Guard, then fetch on mount
    let navigate_guard = navigate.clone();
    create_effect(move |_| {
        if session::is_authenticated() {
            refresh();
        } else {
            navigate_guard("/login", Default::default());
        }
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let draft = match form.get_untracked().to_draft() {
            Ok(draft) => draft,
            Err(e) => {
                set_form_error.set(Some(e));
                return;
            }
        };
        set_form_error.set(None);

        let target = editing.get_untracked();
        spawn_local(async move {
            let result = match target {
                Some(id) => api::update_property(id, &draft).await,
                None => api::create_property(&draft).await,
            };

            match result {
                Ok(_) => {
                    refresh();
                    reset_form();
                }
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Error creating or updating property: {}", e).into(),
                    );
                }
            }
        });
    };

    let on_edit = Callback::new(move |property: Property| {
        form.set(PropertyForm::from_property(&property));
        editing.set(Some(property.id));
    });

    let on_delete = Callback::new(move |id: i64| {
        spawn_local(async move {
            match api::delete_property(id).await {
                Ok(()) => {
                    if editing.get_untracked() == Some(id) {
                        reset_form();
                    }
                    refresh();
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Error deleting property: {}", e).into());
                }
            }
        });
    });

    let on_logout = move |_| {
        session::clear();
        navigate("/login", Default::default());
    };

    let is_editing = move || editing.get().is_some();

    view! {
        <div class="space-y-8">
            <div class="flex justify-end">
                <button
                    on:click=on_logout
                    class="px-4 py-2 bg-red-600 hover:bg-red-700 text-white rounded-lg font-medium"
                >
                    "Log Out"
                </button>
            </div>

            <section class="bg-white rounded-xl shadow p-6">
                <h2 class="text-2xl font-bold text-center mb-4">
                    {move || if is_editing() { "Edit Property" } else { "Add New Property" }}
                </h2>

                {move || form_error.get().map(|e| view! {
                    <p class="text-red-600 text-sm mb-4">{e.message()}</p>
                })}

                <form on:submit=on_submit class="space-y-4">
                    <div>
                        <label class="block text-sm text-gray-600 mb-2">"Address"</label>
                        <input
                            type="text"
                            prop:value=move || form.with(|f| f.address.clone())
                            on:input=move |ev| form.update(|f| f.address = event_target_value(&ev))
                            required
                            class="w-full rounded-lg px-4 py-3 border border-gray-300"
                        />
                    </div>

                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <div>
                            <label class="block text-sm text-gray-600 mb-2">"Price"</label>
                            <input
                                type="number"
                                prop:value=move || form.with(|f| f.price.clone())
                                on:input=move |ev| form.update(|f| f.price = event_target_value(&ev))
                                required
                                class="w-full rounded-lg px-4 py-3 border border-gray-300"
                            />
                        </div>
                        <div>
                            <label class="block text-sm text-gray-600 mb-2">"Size (m²)"</label>
                            <input
                                type="number"
                                prop:value=move || form.with(|f| f.size.clone())
                                on:input=move |ev| form.update(|f| f.size = event_target_value(&ev))
                                required
                                class="w-full rounded-lg px-4 py-3 border border-gray-300"
                            />
                        </div>
                    </div>

                    <div>
                        <label class="block text-sm text-gray-600 mb-2">"Description"</label>
                        <textarea
                            prop:value=move || form.with(|f| f.description.clone())
                            on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                            required
                            class="w-full rounded-lg px-4 py-3 border border-gray-300"
                        />
                    </div>

                    <div class="flex space-x-2">
                        <button
                            type="submit"
                            class="flex-1 py-3 bg-blue-600 hover:bg-blue-700 text-white rounded-lg font-medium"
                        >
                            {move || if is_editing() { "Save Changes" } else { "Save Property" }}
                        </button>
                        <Show when=is_editing>
                            <button
                                type="button"
                                on:click=move |_| reset_form()
                                class="px-4 py-3 bg-gray-200 hover:bg-gray-300 rounded-lg"
                            >
                                "Cancel"
                            </button>
                        </Show>
                    </div>
                </form>
            </section>

            <h2 class="text-2xl font-bold text-center">"Property List"</h2>
            <PropertyTable properties=properties on_edit=on_edit on_delete=on_delete />
        </div>
    }
}
