//! Register Page
//!
//! Validates the password locally, then creates the account.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::PasswordInput;
use crate::state::{validate_registration, RegisterFailure};

#[component]
pub fn Register() -> impl IntoView {
    let navigate = use_navigate();

    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (confirm, set_confirm) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<RegisterFailure>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let user = username.get();
        let pass = password.get();

        // No request when the local checks fail
        if let Err(failure) = validate_registration(&user, &pass, &confirm.get()) {
            set_error.set(Some(failure));
            return;
        }

        set_submitting.set(true);

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::register(user.trim(), &pass).await {
                Ok(()) => {
                    set_error.set(None);
                    navigate("/login", Default::default());
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Error registering user: {}", e).into());
                    set_error.set(Some(RegisterFailure::Rejected));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-md mx-auto bg-white rounded-xl shadow p-8 space-y-6">
            <h2 class="text-2xl font-bold text-center">"Register"</h2>

            {move || error.get().map(|failure| view! {
                <p class="text-red-600 text-sm">{failure.message()}</p>
            })}

            <form on:submit=on_submit class="space-y-4">
                <div>
                    <label class="block text-sm text-gray-600 mb-2">"Username"</label>
                    <input
                        type="text"
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                        required
                        class="w-full rounded-lg px-4 py-3 border border-gray-300
                               focus:border-blue-500 focus:outline-none"
                    />
                </div>

                <PasswordInput label="Password" value=password set_value=set_password />
                <PasswordInput label="Confirm Password" value=confirm set_value=set_confirm />

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full py-3 bg-blue-600 hover:bg-blue-700 disabled:bg-gray-400
                           text-white rounded-lg font-medium transition-colors"
                >
                    {move || if submitting.get() { "Registering..." } else { "Register" }}
                </button>
            </form>

            <p class="text-sm text-center text-gray-600">
                "Already have an account? "
                <A href="/login" class="text-blue-600 hover:underline">"Log in"</A>
            </p>
        </div>
    }
}
