//! Request builders for tests.

use ferry_core::{DeleteRequest, TransferRequest};

/// Owned source list from string literals.
#[must_use]
pub fn sources(paths: &[&str]) -> Vec<String> {
    paths.iter().map(ToString::to_string).collect()
}

/// Move request with default flags and empty option maps.
#[must_use]
pub fn move_request(paths: &[&str], destination: &str) -> TransferRequest {
    TransferRequest::new(sources(paths), destination)
}

/// Move request carrying a cron expression.
#[must_use]
pub fn scheduled_move(paths: &[&str], destination: &str, cron: &str) -> TransferRequest {
    TransferRequest {
        cron: Some(cron.to_string()),
        ..move_request(paths, destination)
    }
}

/// Delete request for one path.
#[must_use]
pub fn delete_request(fs: &str) -> DeleteRequest {
    DeleteRequest {
        fs: fs.to_string(),
        ..DeleteRequest::default()
    }
}
