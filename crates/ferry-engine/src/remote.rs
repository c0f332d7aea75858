//! Backend options expressed as connection-string parameters on remote paths.

use ferry_core::OptionMap;
use ferry_core::path::remote_name;
use serde_json::Value;

/// Rewrite `name:path` as `name,key=value,...:path`.
///
/// Local paths and empty option maps pass through unchanged.
#[must_use]
pub fn apply_remote_options(path: &str, options: &OptionMap) -> String {
    if options.is_empty() {
        return path.to_string();
    }
    let Some(name) = remote_name(path) else {
        return path.to_string();
    };
    let rest = &path[name.len()..];
    let params = options
        .iter()
        .map(|(key, value)| format!("{key}={}", param_value(value)))
        .collect::<Vec<_>>()
        .join(",");
    format!("{name},{params}{rest}")
}

fn param_value(value: &Value) -> String {
    let raw = match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    };
    if raw.contains([',', ':', '"']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(pairs: &[(&str, Value)]) -> OptionMap {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn remote_paths_gain_parameters() {
        let opts = options(&[("chunk_size", json!("64M")), ("shared_with_me", json!(true))]);
        assert_eq!(
            apply_remote_options("gdrive:photos/2024", &opts),
            "gdrive,chunk_size=64M,shared_with_me=true:photos/2024"
        );
    }

    #[test]
    fn local_paths_and_empty_options_are_untouched() {
        let opts = options(&[("chunk_size", json!("64M"))]);
        assert_eq!(apply_remote_options("/srv/data", &opts), "/srv/data");
        assert_eq!(
            apply_remote_options("gdrive:photos", &OptionMap::new()),
            "gdrive:photos"
        );
    }

    #[test]
    fn values_with_separators_are_quoted() {
        let opts = options(&[("endpoint", json!("http://minio:9000"))]);
        assert_eq!(
            apply_remote_options("s3:bucket", &opts),
            "s3,endpoint=\"http://minio:9000\":bucket"
        );
    }

    #[test]
    fn existing_parameters_are_extended() {
        let opts = options(&[("b", json!(2))]);
        assert_eq!(apply_remote_options("s3,a=1:bucket", &opts), "s3,a=1,b=2:bucket");
    }
}
