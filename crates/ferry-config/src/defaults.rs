//! Default values for configuration fields.

/// Engine rc endpoint.
pub const ENGINE_URL: &str = "http://localhost:5572";
/// HTTP request timeout for engine calls, in milliseconds.
pub const ENGINE_TIMEOUT_MS: u64 = 10_000;
/// Delay between submission and the first status query, in milliseconds.
pub const SETTLE_MS: u64 = 500;
/// First backoff interval between status queries, in milliseconds.
pub const INITIAL_BACKOFF_MS: u64 = 250;
/// Backoff ceiling between status queries, in milliseconds.
pub const MAX_BACKOFF_MS: u64 = 2_000;
/// Per-job deadline for reaching a terminal status, in milliseconds.
pub const JOB_TIMEOUT_MS: u64 = 60_000;
/// Groups dispatched and polled at the same time; groups run one after another
/// unless raised.
pub const MAX_CONCURRENT_JOBS: usize = 1;
/// Default log level directive.
pub const LOG_LEVEL: &str = "info";

/// Environment variable naming the configuration file.
pub const ENV_CONFIG_PATH: &str = "FERRY_CONFIG";
/// Environment variable overriding the engine URL.
pub const ENV_ENGINE_URL: &str = "FERRY_ENGINE_URL";
/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "FERRY_LOG_LEVEL";

/// File name used inside the platform configuration directory.
pub const CONFIG_FILE_NAME: &str = "config.json";
/// File name used inside the platform data directory.
pub const SCHEDULE_FILE_NAME: &str = "schedule.json";
