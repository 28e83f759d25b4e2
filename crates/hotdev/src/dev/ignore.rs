use path_clean::PathClean;
use std::path::{Component, Path, PathBuf};

/// Prefixes that are always ignored: version control and dependency caches.
pub const DEFAULT_IGNORES: &[&str] = &[".git", "node_modules"];

/// Ordered directory prefixes excluded from change notifications.
///
/// A change is ignored when the parent directory of the changed file, relative
/// to the web root, starts with one of the prefixes. Matching is per path
/// component, so `.git` does not swallow `.github`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreList {
    prefixes: Vec<PathBuf>,
}

impl IgnoreList {
    /// Build the list from the defaults followed by `extra` prefixes.
    ///
    /// Extra prefixes are normalized; empty ones (which would match every
    /// file) are dropped.
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut prefixes: Vec<PathBuf> = Vec::new();
        let candidates = DEFAULT_IGNORES
            .iter()
            .map(|s| PathBuf::from(s))
            .chain(extra.into_iter().map(|s| PathBuf::from(s.as_ref().trim())));

        for candidate in candidates {
            let cleaned = candidate.clean();
            let is_empty = cleaned
                .components()
                .all(|c| matches!(c, Component::CurDir | Component::RootDir));
            if !is_empty && !prefixes.contains(&cleaned) {
                prefixes.push(cleaned);
            }
        }

        Self { prefixes }
    }

    /// Check whether a change to `relative_file` should be ignored.
    pub fn is_ignored(&self, relative_file: &Path) -> bool {
        let parent = relative_file.parent().unwrap_or(Path::new(""));
        self.prefixes.iter().any(|prefix| parent.starts_with(prefix))
    }

    /// Prefixes in match order.
    pub fn prefixes(&self) -> &[PathBuf] {
        &self.prefixes
    }
}

impl Default for IgnoreList {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}
