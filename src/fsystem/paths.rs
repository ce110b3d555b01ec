// Path helpers for the virtual file system. Every path handed out by these
// functions is absolute, uses '/' as the only separator and never carries a
// trailing separator (except the root itself).

pub(crate) const ROOT: &str = "/";

/// Split a path into its non-empty segments.
pub(crate) fn split(path: &str) -> Vec<&str> {
    path.split('/').filter(|part| !part.is_empty()).collect()
}

/// Resolve `path` against `cwd`, collapsing `.`, `..` and repeated separators.
/// `..` at the root stays at the root.
pub(crate) fn normalize(path: &str, cwd: &str) -> String {
    let mut parts: Vec<&str> = if path.starts_with('/') {
        Vec::new()
    } else {
        split(cwd)
    };
    for part in split(path) {
        match part {
            "." => (),
            ".." => {
                parts.pop();
            }
            _ => parts.push(part),
        }
    }
    join(&parts)
}

pub(crate) fn join(parts: &[&str]) -> String {
    format!("/{}", parts.join("/"))
}

/// Drop the last segment of an absolute path.
pub(crate) fn parent(path: &str) -> String {
    let parts = split(path);
    match parts.split_last() {
        Some((_, rest)) => join(rest),
        None => ROOT.to_string(),
    }
}

pub(crate) fn basename(path: &str) -> &str {
    path.rsplit('/')
        .find(|part| !part.is_empty())
        .unwrap_or(ROOT)
}

/// The archive stores members without a leading separator.
pub(crate) fn member_key(path: &str, cwd: &str) -> String {
    normalize(path, cwd).trim_start_matches('/').to_string()
}

/// Leading dots mark hidden names, not extensions.
pub(crate) fn has_extension(name: &str) -> bool {
    name.trim_start_matches('.').contains('.')
}
