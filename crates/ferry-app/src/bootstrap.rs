//! Orchestrator wiring from loaded configuration.

use std::sync::Arc;

use ferry_config::FerryConfig;
use ferry_engine::{RcCredentials, RcEngine};
use ferry_schedule::FileScheduleStore;
use tracing::debug;
use url::Url;

use crate::error::{AppError, AppResult};
use crate::orchestrator::Orchestrator;
use crate::poller::PollPolicy;
use crate::probe::LocalPathProbe;

/// Engine client for the configured rc endpoint.
///
/// # Errors
///
/// Returns [`AppError::EngineUrl`] or [`AppError::Engine`] when the client
/// cannot be constructed.
pub fn build_engine(config: &FerryConfig) -> AppResult<RcEngine> {
    let settings = &config.engine;
    let base_url = Url::parse(&settings.url).map_err(|source| AppError::EngineUrl {
        value: settings.url.clone(),
        source,
    })?;
    let credentials = match (&settings.user, &settings.password) {
        (Some(user), Some(password)) => Some(RcCredentials {
            user: user.clone(),
            password: password.clone(),
        }),
        _ => None,
    };
    RcEngine::connect(base_url, credentials, settings.timeout()).map_err(|source| {
        AppError::Engine {
            operation: "engine.connect",
            source,
        }
    })
}

/// Schedule store at the configured or platform default location.
///
/// # Errors
///
/// Returns [`AppError::Config`] when no schedule location can be determined.
pub fn build_schedule_store(config: &FerryConfig) -> AppResult<FileScheduleStore> {
    let path = config
        .schedule_path()
        .map_err(|source| AppError::Config {
            operation: "config.schedule_path",
            source,
        })?;
    Ok(FileScheduleStore::new(path))
}

/// Orchestrator talking to the configured engine, storing schedules on disk and
/// probing the local filesystem.
///
/// # Errors
///
/// See [`build_engine`] and [`build_schedule_store`].
pub fn build_orchestrator(config: &FerryConfig) -> AppResult<Orchestrator> {
    let engine = build_engine(config)?;
    let store = build_schedule_store(config)?;
    debug!(
        engine = %engine.base_url(),
        schedule = %store.path().display(),
        max_concurrent_jobs = config.dispatch.max_concurrent_jobs,
        "orchestrator configured"
    );
    Ok(Orchestrator::new(
        Arc::new(engine),
        Arc::new(store),
        Arc::new(LocalPathProbe),
        PollPolicy::from(&config.polling),
        config.dispatch.max_concurrent_jobs,
    ))
}
