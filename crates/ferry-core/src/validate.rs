//! Fail-fast request checks run before any job is planned or scheduled.

use crate::error::{ValidationError, ValidationResult};
use crate::model::{DeleteRequest, INCLUDE_FROM_KEY, INCLUDE_RULE_KEY, TransferRequest};
use crate::path::{comparison_key, is_remote};
use crate::service::PathProbe;

/// Validate a move request.
///
/// Order: missing paths, local sources, local destination, destination reuse,
/// then include rules combined with several sources.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub async fn validate_move(
    request: &TransferRequest,
    probe: &dyn PathProbe,
) -> ValidationResult<()> {
    if request.sources.is_empty() || request.destination.trim().is_empty() {
        return Err(ValidationError::MissingPaths);
    }

    for source in &request.sources {
        if !local_path_exists(probe, source).await? {
            return Err(ValidationError::SourceNotFound {
                path: source.clone(),
            });
        }
    }

    if !local_path_exists(probe, &request.destination).await? {
        return Err(ValidationError::DestinationNotFound {
            path: request.destination.clone(),
        });
    }

    let destination = comparison_key(&request.destination);
    if let Some(source) = request
        .sources
        .iter()
        .find(|source| comparison_key(source) == destination)
    {
        return Err(ValidationError::DestinationIsSource {
            path: source.clone(),
        });
    }

    let has_include_rules = request.filter.contains_key(INCLUDE_RULE_KEY)
        || request.filter.contains_key(INCLUDE_FROM_KEY);
    if request.sources.len() > 1 && has_include_rules {
        return Err(ValidationError::IncludeRulesWithMultipleSources);
    }

    Ok(())
}

/// Validate a delete request.
///
/// # Errors
///
/// Returns [`ValidationError::MissingSource`] or [`ValidationError::SourceNotFound`].
pub async fn validate_delete(
    request: &DeleteRequest,
    probe: &dyn PathProbe,
) -> ValidationResult<()> {
    if request.fs.trim().is_empty() {
        return Err(ValidationError::MissingSource);
    }
    if !local_path_exists(probe, &request.fs).await? {
        return Err(ValidationError::SourceNotFound {
            path: request.fs.clone(),
        });
    }
    Ok(())
}

/// Remote paths are assumed to exist; local ones are probed.
async fn local_path_exists(probe: &dyn PathProbe, path: &str) -> ValidationResult<bool> {
    if is_remote(path) {
        return Ok(true);
    }
    probe
        .exists(path)
        .await
        .map_err(|err| ValidationError::PathProbe {
            path: path.to_string(),
            message: err.to_string(),
        })
}
