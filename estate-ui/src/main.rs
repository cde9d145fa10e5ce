//! Estate Front-end
//!
//! Property management pages built with Leptos (WASM).
//!
//! # Pages
//!
//! - `/login` - Log in with username and password
//! - `/register` - Create an account
//! - `/properties` - List, add, edit and delete properties (needs login)
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the Estate API over HTTP and keeps the login
//! flag in `sessionStorage`.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
