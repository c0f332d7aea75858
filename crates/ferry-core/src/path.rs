//! Syntactic path helpers shared by planning and validation.
//!
//! Paths are treated as strings using `/` as the separator; nothing here touches
//! the filesystem. Remote paths follow the `name:path` form, where `name` has at
//! least two characters so drive letters stay local.

/// Whether a source path names a directory (trailing separator).
#[must_use]
pub fn is_dir_like(path: &str) -> bool {
    path.ends_with('/')
}

/// Remote name of a `name:path` style path.
#[must_use]
pub fn remote_name(path: &str) -> Option<&str> {
    let (name, _) = path.split_once(':')?;
    let valid = name.chars().count() >= 2 && !name.contains(['/', '\\']);
    valid.then_some(name)
}

/// Whether a path addresses a configured remote rather than the local filesystem.
#[must_use]
pub fn is_remote(path: &str) -> bool {
    remote_name(path).is_some()
}

/// Split a file path into its syntactic parent and base name.
///
/// A root-level file keeps `/` as its parent; a bare remote file keeps the
/// `name:` prefix; a bare relative name has an empty parent.
#[must_use]
pub fn split_parent(path: &str) -> (&str, &str) {
    if let Some((parent, name)) = path.rsplit_once('/') {
        if parent.is_empty() {
            return ("/", name);
        }
        return (parent, name);
    }
    if let Some(remote) = remote_name(path) {
        let split = remote.len() + 1;
        return (&path[..split], &path[split..]);
    }
    ("", path)
}

/// Last non-empty segment of a path, ignoring a trailing separator and any remote prefix.
#[must_use]
pub fn base_name(path: &str) -> &str {
    let local = remote_name(path).map_or(path, |remote| &path[remote.len() + 1..]);
    local
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}

/// Append one segment to a destination without doubling separators.
#[must_use]
pub fn join_segment(destination: &str, segment: &str) -> String {
    if destination.is_empty() {
        return segment.to_string();
    }
    if destination.ends_with('/') || destination.ends_with(':') {
        format!("{destination}{segment}")
    } else {
        format!("{destination}/{segment}")
    }
}

/// Normalised comparison key: trailing separators removed, root kept.
#[must_use]
pub fn comparison_key(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') {
        "/"
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_detection_ignores_drive_letters_and_local_paths() {
        assert_eq!(remote_name("gdrive:photos/2024"), Some("gdrive"));
        assert_eq!(remote_name("s3:"), Some("s3"));
        assert_eq!(remote_name("C:/Users"), None);
        assert_eq!(remote_name("/tmp/a:b"), None);
        assert!(!is_remote("relative/file.txt"));
    }

    #[test]
    fn split_parent_handles_root_remote_and_bare_names() {
        assert_eq!(split_parent("a/b/x.txt"), ("a/b", "x.txt"));
        assert_eq!(split_parent("/x.txt"), ("/", "x.txt"));
        assert_eq!(split_parent("remote:x.txt"), ("remote:", "x.txt"));
        assert_eq!(split_parent("x.txt"), ("", "x.txt"));
    }

    #[test]
    fn base_name_strips_trailing_separator_and_remote() {
        assert_eq!(base_name("b/"), "b");
        assert_eq!(base_name("/srv/data/photos/"), "photos");
        assert_eq!(base_name("remote:archive/"), "archive");
    }

    #[test]
    fn join_segment_avoids_double_separators() {
        assert_eq!(join_segment("d", "b"), "d/b");
        assert_eq!(join_segment("d/", "b"), "d/b");
        assert_eq!(join_segment("remote:", "b"), "remote:b");
    }

    #[test]
    fn comparison_key_keeps_root() {
        assert_eq!(comparison_key("/data/"), "/data");
        assert_eq!(comparison_key("/"), "/");
    }
}
