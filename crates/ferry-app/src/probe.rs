//! Local filesystem existence checks.

use async_trait::async_trait;
use ferry_core::PathProbe;

/// [`PathProbe`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalPathProbe;

#[async_trait]
impl PathProbe for LocalPathProbe {
    async fn exists(&self, path: &str) -> std::io::Result<bool> {
        tokio::fs::try_exists(path).await
    }
}
