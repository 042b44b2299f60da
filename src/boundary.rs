use std::fmt;

/// Warnings raised at the edges of a release: odd manifest or version input
/// that should be reported to the user but never stops the flow.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Manifest parsed but carries no string `version` field
    MissingManifestVersion { manifest: String },
    /// Requested version is the one already in the manifest
    VersionUnchanged { version: String },
    /// Requested version is not semver; the publisher may still accept it
    NonSemverVersion { version: String },
    /// Current version token does not appear in the generated document
    VersionNotInDocs { version: String, docs: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::MissingManifestVersion { manifest } => {
                write!(f, "No version field found in {}", manifest)
            }
            BoundaryWarning::VersionUnchanged { version } => {
                write!(f, "New version '{}' matches the current version", version)
            }
            BoundaryWarning::NonSemverVersion { version } => {
                write!(f, "Version '{}' is not a semantic version", version)
            }
            BoundaryWarning::VersionNotInDocs { version, docs } => {
                write!(f, "Version '{}' does not appear in {}", version, docs)
            }
        }
    }
}

/// Checks a resolved version against the current one.
///
/// Versions are opaque to the flow, so these checks only produce warnings.
pub fn check_new_version(current: &str, new: &str) -> Vec<BoundaryWarning> {
    let mut warnings = Vec::new();
    if new == current {
        warnings.push(BoundaryWarning::VersionUnchanged {
            version: new.to_string(),
        });
    }
    if semver::Version::parse(new).is_err() {
        warnings.push(BoundaryWarning::NonSemverVersion {
            version: new.to_string(),
        });
    }
    warnings
}
