//! Reference paths - `/authors/OL1A`, `/works/OL1W`
//!
//! Dump records identify themselves and each other by reference path. The
//! stored id is the path with its type prefix removed.

/// Prefix of author reference paths
pub const AUTHORS_PREFIX: &str = "/authors/";

/// Prefix of work reference paths
pub const WORKS_PREFIX: &str = "/works/";

/// Strip `prefix` from a reference path if present.
///
/// Keys without the prefix are returned unchanged.
pub fn strip_reference<'a>(key: &'a str, prefix: &str) -> &'a str {
    key.strip_prefix(prefix).unwrap_or(key)
}

/// Author id from an author reference path
pub fn author_id(key: &str) -> String {
    strip_reference(key, AUTHORS_PREFIX).to_string()
}

/// Work id from a work reference path
pub fn work_id(key: &str) -> String {
    strip_reference(key, WORKS_PREFIX).to_string()
}
