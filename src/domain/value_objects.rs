//! Domain value objects representing immutable concepts

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The manifest dialects a scan can be run against.
///
/// The dialect is a closed set: it selects which extractor implementation
/// reads the manifest and which sections the scan will report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManifestDialect {
    /// Android Gradle build file, one dependency declaration per line.
    Gradle,
    /// Flutter/Dart `pubspec.yaml` package manifest.
    Pubspec,
}

impl ManifestDialect {
    /// Get the canonical name for this dialect
    pub fn canonical_name(&self) -> &'static str {
        match self {
            ManifestDialect::Gradle => "gradle",
            ManifestDialect::Pubspec => "pubspec",
        }
    }
}

impl fmt::Display for ManifestDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}

impl FromStr for ManifestDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gradle" | "android" => Ok(ManifestDialect::Gradle),
            "pubspec" | "flutter" | "dart" => Ok(ManifestDialect::Pubspec),
            _ => Err(format!("Unknown manifest dialect: {}", s)),
        }
    }
}

/// The dependency sections a manifest can declare.
///
/// Gradle manifests yield a single runtime section; pubspec manifests
/// declare runtime and development dependencies independently, and the two
/// are scanned and reported separately rather than merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencySection {
    Runtime,
    Development,
}

impl DependencySection {
    /// Human-readable section header used by the text report
    pub fn label(&self) -> &'static str {
        match self {
            DependencySection::Runtime => "Dependencies",
            DependencySection::Development => "Dev dependencies",
        }
    }
}

impl fmt::Display for DependencySection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_parsing() {
        assert_eq!(
            ManifestDialect::from_str("gradle").unwrap(),
            ManifestDialect::Gradle
        );
        assert_eq!(
            ManifestDialect::from_str("android").unwrap(),
            ManifestDialect::Gradle
        );
        assert_eq!(
            ManifestDialect::from_str("flutter").unwrap(),
            ManifestDialect::Pubspec
        );
        assert_eq!(
            ManifestDialect::from_str("Pubspec").unwrap(),
            ManifestDialect::Pubspec
        );

        assert!(ManifestDialect::from_str("maven").is_err());
    }

    #[test]
    fn test_dialect_display() {
        assert_eq!(ManifestDialect::Gradle.to_string(), "gradle");
        assert_eq!(ManifestDialect::Pubspec.to_string(), "pubspec");
    }

    #[test]
    fn test_section_labels() {
        assert_eq!(DependencySection::Runtime.label(), "Dependencies");
        assert_eq!(DependencySection::Development.label(), "Dev dependencies");
    }
}
