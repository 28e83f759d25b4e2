//! Maps request paths to files confined to the web root.
//!
//! Traversal attempts, undecodable paths and plain missing files all come
//! back as `None`; callers answer each of them with the same 404.

use path_clean::PathClean;
use std::path::{Component, Path, PathBuf};

/// Document served for paths ending in `/`.
pub const INDEX_DOCUMENT: &str = "index.html";

/// A request path resolved inside the web root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Absolute file path, guaranteed to be under the root
    pub file: PathBuf,
    /// Decoded, normalized request path (with the index document appended);
    /// its extension selects the MIME type
    pub resource: String,
}

/// Resolve a raw (percent-encoded) request path against `root`.
///
/// `root` must be absolute; `ServerConfig::validate` canonicalizes it.
pub fn resolve(root: &Path, request_path: &str) -> Option<ResolvedPath> {
    let decoded = urlencoding::decode(request_path).ok()?;
    if decoded.contains('\0') || decoded.contains('\\') {
        return None;
    }

    let mut requested = decoded.into_owned();
    if requested.ends_with('/') {
        requested.push_str(INDEX_DOCUMENT);
    }

    // Cleaned as a relative path so that `..` escaping the root survives
    // normalization instead of being clamped at `/`.
    let normalized = Path::new(requested.trim_start_matches('/')).clean();
    if normalized
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return None;
    }

    let file = root.join(&normalized);
    if normalized == Path::new(".") || !file.starts_with(root) {
        return None;
    }

    Some(ResolvedPath {
        file,
        resource: format!("/{}", normalized.to_string_lossy()),
    })
}
