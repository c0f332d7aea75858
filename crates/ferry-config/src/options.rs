//! Per-remote option defaults and their combination with explicit options.

use ferry_core::OptionMap;
use ferry_core::path::remote_name;

use crate::model::FerryConfig;

/// Move, filter and config options for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSet {
    /// Move-specific options.
    pub move_options: OptionMap,
    /// Filter options.
    pub filter: OptionMap,
    /// Config options.
    pub config: OptionMap,
}

impl OptionSet {
    /// Replace each section that was supplied explicitly.
    #[must_use]
    pub fn with_explicit(
        mut self,
        move_options: Option<OptionMap>,
        filter: Option<OptionMap>,
        config: Option<OptionMap>,
    ) -> Self {
        if let Some(move_options) = move_options {
            self.move_options = move_options;
        }
        if let Some(filter) = filter {
            self.filter = filter;
        }
        if let Some(config) = config {
            self.config = config;
        }
        self
    }

    /// Config options with move options layered on top.
    #[must_use]
    pub fn merged_config(&self) -> OptionMap {
        let mut merged = self.config.clone();
        merged.extend(
            self.move_options
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        merged
    }
}

/// Merge defaults for the source's remote, then the destination's remote.
///
/// Local paths contribute nothing. A remote without config defaults of its own
/// contributes the global config defaults instead.
#[must_use]
pub fn resolve_remote_defaults(
    config: &FerryConfig,
    source: Option<&str>,
    destination: Option<&str>,
) -> OptionSet {
    [source, destination]
        .into_iter()
        .flatten()
        .filter_map(remote_name)
        .fold(OptionSet::default(), |mut set, remote| {
            let defaults = config.remotes.get(remote).cloned().unwrap_or_default();
            if let Some(move_defaults) = defaults.move_defaults {
                set.move_options.extend(move_defaults);
            }
            if let Some(filter_defaults) = defaults.filter_defaults {
                set.filter.extend(filter_defaults);
            }
            let config_defaults = defaults
                .config_defaults
                .unwrap_or_else(|| config.config_defaults.clone());
            set.config.extend(config_defaults);
            set
        })
}
