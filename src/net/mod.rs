//! HTTP client, wire types, and error normalization.
//!
//! DESIGN
//! ======
//! `ApiClient` is built once with the configured base URL, a transport,
//! and a token source, then shared by both stores via `Rc`. The
//! `Transport` trait is the seam tests use to stand in for the network;
//! browser builds use `GlooTransport`.

pub mod api;
pub mod error;
pub mod types;

#[cfg(test)]
pub mod mock;
