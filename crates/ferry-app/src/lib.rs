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

//! Batch orchestration: validation, scheduling, dispatch, polling and reporting.
//!
//! Layout: `orchestrator.rs` (move/delete pipelines), `dispatcher.rs` (job
//! submission), `poller.rs` (status polling and classification), `requests.rs`
//! (requests built from inputs and configured defaults), `probe.rs` (local path
//! existence), `bootstrap.rs` (wiring from configuration), `error.rs`.

/// Wiring from configuration.
pub mod bootstrap;
pub mod dispatcher;
pub mod error;
/// Move and delete pipelines.
pub mod orchestrator;
pub mod poller;
pub mod probe;
pub mod requests;

pub use bootstrap::build_orchestrator;
pub use dispatcher::JobDispatcher;
pub use error::{AppError, AppResult};
pub use orchestrator::{Orchestrator, RunSummary};
pub use poller::{JobStatusPoller, PollPolicy};
pub use probe::LocalPathProbe;
pub use requests::{DeleteInput, MoveInput, build_delete_request, build_move_request};
