//! # newsroom-client
//!
//! Leptos + WASM state layer for the Newsroom article manager. Mediates
//! between UI components and the REST backend for two resources: the
//! authenticated user session and the article collection.
//!
//! This crate contains the configured HTTP client, the session and
//! articles stores, form-error normalization, and localStorage
//! persistence. Pages, components, and routing live in the host
//! application; they invoke store actions and read the resulting
//! reactive state through context.

pub mod config;
pub mod net;
pub mod state;
pub mod util;

/// Install the browser logging backend and panic hook. Host
/// applications call this once from their hydrate entry point, before
/// [`state::provide_stores`].
#[cfg(feature = "hydrate")]
pub fn init_browser_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
}
