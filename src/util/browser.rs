//! Browser navigation shims. No-ops outside a browser environment.

/// Navigate to the root path. Used after logout and when any
/// authenticated request comes back 401.
pub fn redirect_to_root() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/");
        }
    }
}
