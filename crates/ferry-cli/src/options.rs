//! Option documents supplied as inline JSON or `@path` references.

use std::fs;

use anyhow::anyhow;
use ferry_config::parse_option_document;
use ferry_core::OptionMap;

use crate::context::{CliError, CliResult};

/// Parse an optional option document. `None` leaves the section to the
/// configured defaults; a value starting with `@` is read from that file.
pub(crate) fn read_option_document(
    field: &'static str,
    raw: Option<&str>,
) -> CliResult<Option<OptionMap>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let text = match raw.strip_prefix('@') {
        Some(path) => fs::read_to_string(path).map_err(|err| {
            CliError::failure(anyhow!("failed to read {field} options from '{path}': {err}"))
        })?,
        None => raw.to_string(),
    };
    parse_option_document(field, &text)
        .map(Some)
        .map_err(CliError::from)
}
