//! Requests assembled from caller inputs and configured option defaults.

use ferry_config::{FerryConfig, resolve_remote_defaults};
use ferry_core::{DeleteRequest, OptionMap, TransferRequest};

/// Caller-supplied move parameters. `None` option sections fall back to the
/// configured defaults for the remotes involved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveInput {
    /// Source paths.
    pub sources: Vec<String>,
    /// Destination path.
    pub destination: String,
    /// Recreate empty source directories.
    pub create_empty_src_dirs: bool,
    /// Remove emptied destination directories.
    pub delete_empty_dst_dirs: bool,
    /// Move options, merged over config options.
    pub move_options: Option<OptionMap>,
    /// Filter options.
    pub filter: Option<OptionMap>,
    /// Config options.
    pub config: Option<OptionMap>,
    /// Backend options for remote paths.
    pub remote_options: OptionMap,
    /// Cron expression.
    pub cron: Option<String>,
}

/// Caller-supplied delete parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteInput {
    /// Path whose contents are deleted.
    pub fs: String,
    /// Remove emptied directories.
    pub rm_dirs: bool,
    /// Filter options.
    pub filter: Option<OptionMap>,
    /// Config options.
    pub config: Option<OptionMap>,
    /// Cron expression.
    pub cron: Option<String>,
}

/// Build a move request, resolving defaults from the first source's remote and
/// the destination's remote.
#[must_use]
pub fn build_move_request(config: &FerryConfig, input: MoveInput) -> TransferRequest {
    let options = resolve_remote_defaults(
        config,
        input.sources.first().map(String::as_str),
        Some(input.destination.as_str()),
    )
    .with_explicit(input.move_options, input.filter, input.config);

    TransferRequest {
        config: options.merged_config(),
        filter: options.filter,
        sources: input.sources,
        destination: input.destination,
        create_empty_src_dirs: input.create_empty_src_dirs,
        delete_empty_dst_dirs: input.delete_empty_dst_dirs,
        remote_options: input.remote_options,
        cron: input.cron,
    }
}

/// Build a delete request, resolving defaults from the source's remote.
#[must_use]
pub fn build_delete_request(config: &FerryConfig, input: DeleteInput) -> DeleteRequest {
    let options = resolve_remote_defaults(config, Some(input.fs.as_str()), None).with_explicit(
        None,
        input.filter,
        input.config,
    );
    DeleteRequest {
        fs: input.fs,
        rm_dirs: input.rm_dirs,
        filter: options.filter,
        config: options.config,
        cron: input.cron,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferry_config::RemoteDefaults;
    use serde_json::json;

    fn config() -> FerryConfig {
        let mut config = FerryConfig::default();
        config.remotes.insert(
            "gdrive".into(),
            RemoteDefaults {
                move_defaults: Some(OptionMap::from([("Transfers".to_string(), json!(2))])),
                filter_defaults: Some(OptionMap::from([("MaxAge".to_string(), json!("1d"))])),
                config_defaults: Some(OptionMap::from([("Transfers".to_string(), json!(8))])),
            },
        );
        config
    }

    #[test]
    fn move_request_merges_move_options_over_config() {
        let request = build_move_request(
            &config(),
            MoveInput {
                sources: vec!["gdrive:photos/".into()],
                destination: "/backup".into(),
                ..MoveInput::default()
            },
        );
        assert_eq!(request.config["Transfers"], json!(2));
        assert_eq!(request.filter["MaxAge"], json!("1d"));
    }

    #[test]
    fn explicit_filter_replaces_defaults() {
        let request = build_move_request(
            &config(),
            MoveInput {
                sources: vec!["gdrive:photos/".into()],
                destination: "/backup".into(),
                filter: Some(OptionMap::new()),
                ..MoveInput::default()
            },
        );
        assert!(request.filter.is_empty());
    }

    #[test]
    fn delete_request_uses_source_remote_defaults() {
        let request = build_delete_request(
            &config(),
            DeleteInput {
                fs: "gdrive:tmp".into(),
                rm_dirs: true,
                ..DeleteInput::default()
            },
        );
        assert_eq!(request.config["Transfers"], json!(8));
        assert_eq!(request.filter["MaxAge"], json!("1d"));
        assert!(request.rm_dirs);
    }
}
