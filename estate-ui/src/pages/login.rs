//! Login Page
//!
//! Checks credentials against the API and sets the session flag.

use leptos::*;
use leptos_router::*;

use crate::api::{self, ApiFailure};
use crate::components::PasswordInput;
use crate::state::{session, validate_login, LoginFailure};

#[component]
pub fn Login() -> impl IntoView {
    let navigate = use_navigate();

    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<LoginFailure>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let user = username.get();
        let pass = password.get();

        if let Err(failure) = validate_login(&user, &pass) {
            set_error.set(Some(failure));
            return;
        }

        set_submitting.set(true);

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::login(user.trim(), &pass).await {
                Ok(()) => {
                    session::set_authenticated();
                    set_error.set(None);
                    navigate("/properties", Default::default());
                }
                Err(ApiFailure::Unauthorized) => {
                    set_error.set(Some(LoginFailure::InvalidCredentials));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Error logging in: {}", e).into());
                    set_error.set(Some(LoginFailure::Other));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-md mx-auto bg-white rounded-xl shadow p-8 space-y-6">
            <h2 class="text-2xl font-bold text-center">"Log In"</h2>

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

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full py-3 bg-blue-600 hover:bg-blue-700 disabled:bg-gray-400
                           text-white rounded-lg font-medium transition-colors"
                >
                    {move || if submitting.get() { "Logging in..." } else { "Log In" }}
                </button>
            </form>

            <p class="text-sm text-center text-gray-600">
                "Don't have an account? "
                <A href="/register" class="text-blue-600 hover:underline">"Register here"</A>
            </p>
        </div>
    }
}
