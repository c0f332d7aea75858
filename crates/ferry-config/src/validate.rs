//! Validation of loaded settings and parsing of option documents.

use ferry_core::OptionMap;
use serde_json::Value;
use url::Url;

use crate::error::{ConfigError, ConfigResult};
use crate::model::FerryConfig;

impl FerryConfig {
    /// Reject settings the orchestrator cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] naming the first offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = Url::parse(&self.engine.url).map_err(|_| {
            ConfigError::invalid_field(
                "engine",
                "url",
                Some(self.engine.url.clone()),
                "must be an absolute URL",
            )
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid_field(
                "engine",
                "url",
                Some(self.engine.url.clone()),
                "scheme must be http or https",
            ));
        }
        if self.engine.user.is_some() != self.engine.password.is_some() {
            return Err(ConfigError::invalid_field(
                "engine",
                "user",
                None,
                "user and password must be set together",
            ));
        }
        if self.engine.timeout_ms == 0 {
            return Err(ConfigError::invalid_field(
                "engine",
                "timeout_ms",
                Some("0".into()),
                "must be greater than zero",
            ));
        }

        let polling = &self.polling;
        for (field, value) in [
            ("initial_backoff_ms", polling.initial_backoff_ms),
            ("max_backoff_ms", polling.max_backoff_ms),
            ("job_timeout_ms", polling.job_timeout_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::invalid_field(
                    "polling",
                    field,
                    Some("0".into()),
                    "must be greater than zero",
                ));
            }
        }
        if polling.initial_backoff_ms > polling.max_backoff_ms {
            return Err(ConfigError::invalid_field(
                "polling",
                "initial_backoff_ms",
                Some(polling.initial_backoff_ms.to_string()),
                "must not exceed max_backoff_ms",
            ));
        }

        if self.dispatch.max_concurrent_jobs == 0 {
            return Err(ConfigError::invalid_field(
                "dispatch",
                "max_concurrent_jobs",
                Some("0".into()),
                "must be at least 1",
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::invalid_field(
                "logging",
                "level",
                None,
                "must not be empty",
            ));
        }
        Ok(())
    }
}

/// Parse a JSON object document into an option map.
///
/// Blank input yields an empty map.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidOptions`] when the text is not a JSON object.
pub fn parse_option_document(field: &'static str, text: &str) -> ConfigResult<OptionMap> {
    if text.trim().is_empty() {
        return Ok(OptionMap::new());
    }
    let value: Value = serde_json::from_str(text).map_err(|err| ConfigError::InvalidOptions {
        field,
        reason: err.to_string(),
    })?;
    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(ConfigError::InvalidOptions {
            field,
            reason: format!("expected a JSON object, found {}", json_kind(&other)),
        }),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
