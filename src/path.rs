//! Path joining for the two path spaces the engine tracks.
//!
//! Display paths are what the user sees and are joined textually. Query paths are what the
//! remote filesystem receives and are always lexically cleaned absolute paths.

/// Append `name` to a display path.
///
/// `""` and `"."` carry no prefix, so the name is returned as-is. A trailing `/` is not doubled.
pub fn join_display(parent: &str, name: &str) -> String {
    if parent.is_empty() || parent == "." {
        name.to_string()
    } else if parent.ends_with('/') {
        format!("{parent}{name}")
    } else {
        format!("{parent}/{name}")
    }
}

/// Append `name` to a query path and clean the result, resolving `.` and `..`.
pub fn join_query(parent: &str, name: &str) -> String {
    clean(&format!("{parent}/{name}"))
}

/// Lexically clean a slash-separated path.
///
/// Collapses repeated separators, drops `.` segments and resolves `..` against the preceding
/// segment. `..` never climbs above the root of an absolute path.
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last().copied() {
                Some(last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Whether a path segment contains glob metacharacters.
pub fn has_glob(segment: &str) -> bool {
    segment.contains(['*', '?', '[', '{'])
}
