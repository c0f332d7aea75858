//! Typed settings loaded from the configuration file.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use ferry_core::OptionMap;
use serde::{Deserialize, Serialize};

use crate::defaults;

/// Root configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FerryConfig {
    /// Engine connection.
    pub engine: EngineSettings,
    /// Status polling policy.
    pub polling: PollSettings,
    /// Group dispatch limits.
    pub dispatch: DispatchSettings,
    /// Scheduled-task storage.
    pub schedule: ScheduleSettings,
    /// Logging.
    pub logging: LoggingSettings,
    /// Config options used for a remote that has no config defaults of its own.
    pub config_defaults: OptionMap,
    /// Option defaults keyed by remote name.
    pub remotes: BTreeMap<String, RemoteDefaults>,
}

/// Engine connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Base URL of the rc server.
    pub url: String,
    /// Basic-auth user.
    pub user: Option<String>,
    /// Basic-auth password.
    pub password: Option<String>,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            url: defaults::ENGINE_URL.to_string(),
            user: None,
            password: None,
            timeout_ms: defaults::ENGINE_TIMEOUT_MS,
        }
    }
}

impl EngineSettings {
    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Status polling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollSettings {
    /// Delay before the first status query, in milliseconds.
    pub settle_ms: u64,
    /// First backoff interval, in milliseconds.
    pub initial_backoff_ms: u64,
    /// Backoff ceiling, in milliseconds.
    pub max_backoff_ms: u64,
    /// Per-job deadline, in milliseconds.
    pub job_timeout_ms: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            settle_ms: defaults::SETTLE_MS,
            initial_backoff_ms: defaults::INITIAL_BACKOFF_MS,
            max_backoff_ms: defaults::MAX_BACKOFF_MS,
            job_timeout_ms: defaults::JOB_TIMEOUT_MS,
        }
    }
}

impl PollSettings {
    /// Settle delay.
    #[must_use]
    pub const fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// First backoff interval.
    #[must_use]
    pub const fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    /// Backoff ceiling.
    #[must_use]
    pub const fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }

    /// Per-job deadline.
    #[must_use]
    pub const fn job_timeout(&self) -> Duration {
        Duration::from_millis(self.job_timeout_ms)
    }
}

/// Group dispatch limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchSettings {
    /// Groups in flight at once; 1 processes groups strictly in order.
    pub max_concurrent_jobs: usize,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: defaults::MAX_CONCURRENT_JOBS,
        }
    }
}

/// Scheduled-task storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleSettings {
    /// Schedule file; the platform data directory is used when absent.
    pub path: Option<PathBuf>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormatSetting {
    /// Structured JSON lines.
    Json,
    /// Human-readable output.
    Pretty,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level or filter directive.
    pub level: String,
    /// Output format; inferred from the build profile when absent.
    pub format: Option<LogFormatSetting>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            format: None,
        }
    }
}

/// Option defaults applied when a path on this remote is involved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RemoteDefaults {
    /// Move options.
    pub move_defaults: Option<OptionMap>,
    /// Filter options.
    pub filter_defaults: Option<OptionMap>,
    /// Config options.
    pub config_defaults: Option<OptionMap>,
}
