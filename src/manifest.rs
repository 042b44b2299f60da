use std::fs;

use serde::Deserialize;

use crate::error::{ReleaseError, Result};

/// The slice of `package.json` the flows care about.
#[derive(Debug, Deserialize, Default)]
struct PackageManifest {
    #[serde(default)]
    version: Option<serde_json::Value>,
}

/// Reads the current version from a JSON manifest.
///
/// # Returns
/// * `Ok(Some(version))` - The manifest has a string `version` field
/// * `Ok(None)` - Valid JSON without a usable `version` (including `null`)
/// * `Err` - `ManifestRead` if the file cannot be read, `ManifestParse` if it
///   is not JSON
pub fn read_version(path: &str) -> Result<Option<String>> {
    let contents = fs::read_to_string(path).map_err(|source| ReleaseError::ManifestRead {
        path: path.to_string(),
        source,
    })?;
    parse_version(path, &contents)
}

fn parse_version(path: &str, contents: &str) -> Result<Option<String>> {
    let manifest: Option<PackageManifest> =
        serde_json::from_str(contents).map_err(|source| ReleaseError::ManifestParse {
            path: path.to_string(),
            source,
        })?;

    Ok(manifest
        .and_then(|m| m.version)
        .and_then(|v| v.as_str().map(str::to_string)))
}
