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

//! File and environment backed configuration for the orchestrator.
//!
//! Layout: `model.rs` (typed settings), `defaults.rs` (default values),
//! `loader.rs` (file discovery and env overrides), `validate.rs` (checks and
//! option-document parsing), `options.rs` (per-remote option defaults).

pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;
pub mod options;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, LoadedConfig, default_config_path, default_schedule_path};
pub use model::{
    DispatchSettings, EngineSettings, FerryConfig, LogFormatSetting, LoggingSettings,
    PollSettings, RemoteDefaults, ScheduleSettings,
};
pub use options::{OptionSet, resolve_remote_defaults};
pub use validate::parse_option_document;
