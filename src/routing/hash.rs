//! Hash fragment to route path.

/// Path used for an empty hash.
pub const ROOT_PATH: &str = "/";

/// Strip a leading `#`; an empty remainder is the root path.
pub fn path_from_hash(hash: &str) -> &str {
    let path = hash.strip_prefix('#').unwrap_or(hash);
    if path.is_empty() {
        ROOT_PATH
    } else {
        path
    }
}
