#![forbid(unsafe_code)]
#![deny(
    unused_imports,
    unused_must_use,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! Remote-control HTTP client for an rclone-compatible transfer engine.
//!
//! Layout: `client.rs` (engine implementation and HTTP plumbing), `wire.rs`
//! (request/response payloads), `remote.rs` (connection-string options for
//! remote paths).

pub mod client;
pub mod remote;
mod wire;

pub use client::{RcCredentials, RcEngine};
pub use remote::apply_remote_options;
