//! Session Flag
//!
//! The "authenticated" flag in `sessionStorage`. It lives as long as the
//! browser tab and carries no token.

/// Key under which the flag is stored
pub const SESSION_KEY: &str = "authenticated";

fn session_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.session_storage().ok().flatten())
}

pub fn is_authenticated() -> bool {
    session_storage()
        .and_then(|storage| storage.get_item(SESSION_KEY).ok().flatten())
        .is_some()
}

/// Set the flag after a successful login
pub fn set_authenticated() {
    if let Some(storage) = session_storage() {
        if storage.set_item(SESSION_KEY, "true").is_err() {
            web_sys::console::error_1(&"Failed to store session flag".into());
        }
    }
}

/// Remove the flag on logout
pub fn clear() {
    if let Some(storage) = session_storage() {
        if storage.remove_item(SESSION_KEY).is_err() {
            web_sys::console::error_1(&"Failed to clear session flag".into());
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn flag_round_trip() {
        clear();
        assert!(!is_authenticated());

        set_authenticated();
        assert!(is_authenticated());

        clear();
        assert!(!is_authenticated());
    }
}
