//! Remote client for the note service HTTP API.
//!
//! - **api**: the `NotesApi` trait the protocol adapter depends on
//! - **client**: `NotesClient`, the reqwest-backed implementation
//! - **error**: per-operation `NotesError`
//! - **testing**: in-memory fake (feature `test-utils`)

pub mod api;
pub mod client;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use api::{NotesApi, DEFAULT_SEARCH_LIMIT};
pub use client::NotesClient;
pub use error::NotesError;
