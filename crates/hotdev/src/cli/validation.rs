use std::path::{Component, Path};

/// Parse and validate an `--ignore` prefix.
///
/// The prefix must be a non-empty relative path without `..` segments, since
/// it is matched against paths relative to the web root.
///
/// Valid: `dist`, `assets/cache`, `./tmp`
/// Invalid: ``, `/tmp`, `../other`
pub fn parse_ignore_prefix(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("Ignore prefix cannot be empty".to_string());
    }

    let path = Path::new(trimmed);
    if path.is_absolute() || trimmed.starts_with('/') {
        return Err(format!(
            "Ignore prefix must be relative to the served directory: '{}'",
            s
        ));
    }

    if path.components().any(|c| c == Component::ParentDir) {
        return Err(format!("Ignore prefix cannot contain '..': '{}'", s));
    }

    if path.components().all(|c| c == Component::CurDir) {
        return Err(format!("Ignore prefix would ignore everything: '{}'", s));
    }

    Ok(trimmed.to_string())
}
