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

//! Deferred-execution registry: cron validation and scheduled-task storage.
//!
//! Layout: `cron.rs` (expression validation), `registrar.rs` (request checks
//! and task registration), `store.rs` (file and in-memory stores), `error.rs`.

pub mod cron;
pub mod error;
pub mod registrar;
pub mod store;

pub use cron::validate_cron;
pub use error::{ScheduleError, ScheduleResult};
pub use registrar::ScheduleRegistrar;
pub use store::{FileScheduleStore, MemoryScheduleStore, ScheduleStore};
