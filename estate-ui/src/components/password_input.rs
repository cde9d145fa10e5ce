//! Password field with a show/hide toggle.

use leptos::*;

#[component]
pub fn PasswordInput(
    #[prop(into)]
    label: String,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    let (visible, set_visible) = create_signal(false);

    view! {
        <div>
            <label class="block text-sm text-gray-600 mb-2">{label}</label>
            <div class="flex">
                <input
                    type=move || if visible.get() { "text" } else { "password" }
                    prop:value=move || value.get()
                    on:input=move |ev| set_value.set(event_target_value(&ev))
                    required
                    class="flex-1 rounded-l-lg px-4 py-3 border border-gray-300
                           focus:border-blue-500 focus:outline-none"
                />
                <button
                    type="button"
                    on:click=move |_| set_visible.update(|v| *v = !*v)
                    class="px-4 py-3 bg-gray-200 hover:bg-gray-300 rounded-r-lg text-sm"
                >
                    {move || if visible.get() { "Hide" } else { "Show" }}
                </button>
            </div>
        </div>
    }
}
