use std::fs;

use crate::config::Settings;
use crate::error::Result;

/// Builds the documentation generator command line.
///
/// The generator reads every compiled module under the build directory
/// except the CommonJS copy, pulls metadata from the manifest and writes a
/// markdown document to the configured docs path, the same file the flow
/// patches and commits afterwards.
pub fn generate_command(settings: &Settings) -> String {
    let dist = settings.dist_path.trim_end_matches('/');
    format!(
        "{} '{}/**/*.js' --output {} --ignore '{}/cjs/**/*.js' --package {} --layout markdown",
        settings.commands.docs_generator,
        dist,
        settings.docs_path,
        dist,
        settings.manifest_path
    )
}

/// Replaces every literal occurrence of `current` with `new`.
///
/// Returns the patched text and the number of replacements made. An empty
/// `current` token matches nothing.
pub fn replace_version(doc: &str, current: &str, new: &str) -> (String, usize) {
    if current.is_empty() {
        return (doc.to_string(), 0);
    }
    let count = doc.matches(current).count();
    (doc.replace(current, new), count)
}

/// Rewrites the version token in the document at `path` in place.
///
/// Returns the number of replacements made.
pub fn patch_version(path: &str, current: &str, new: &str) -> Result<usize> {
    let doc = fs::read_to_string(path)?;
    let (patched, count) = replace_version(&doc, current, new);
    fs::write(path, patched)?;
    log::debug!("replaced {} occurrence(s) of {} in {}", count, current, path);
    Ok(count)
}
