//! Flutter pubspec.yaml dependency extractor

use regex::Regex;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use super::traits::ManifestExtractor;
use crate::application::errors::ParseError;
use crate::domain::{DependencySection, DependencySet, ManifestDialect};

/// The two dependency sections of a pubspec document
#[derive(Debug, Deserialize)]
struct PubspecDocument {
    #[serde(default)]
    dependencies: Option<Mapping>,
    #[serde(default)]
    dev_dependencies: Option<Mapping>,
}

/// Extractor for Flutter/Dart `pubspec.yaml` manifests.
///
/// The `dependencies` and `dev_dependencies` sections are extracted
/// independently and reported as separate sections. Version expressions are
/// normalized to bare `MAJOR.MINOR.PATCH` strings where possible; entries
/// whose version cannot be resolved are dropped from the set.
pub struct PubspecExtractor;

impl Default for PubspecExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PubspecExtractor {
    pub fn new() -> Self {
        Self
    }

    fn convert_versions(&self, section: &Mapping) -> DependencySet {
        let mut deps = DependencySet::new();
        for (key, value) in section {
            let Some(name) = key.as_str() else { continue };
            if let Some(version) = resolve_version(value) {
                deps.insert(name.to_string(), version);
            }
        }
        deps
    }
}

impl ManifestExtractor for PubspecExtractor {
    fn dialect(&self) -> ManifestDialect {
        ManifestDialect::Pubspec
    }

    fn extract(
        &self,
        content: &str,
    ) -> Result<Vec<(DependencySection, DependencySet)>, ParseError> {
        let document: PubspecDocument = serde_yaml::from_str(content)?;

        Ok(vec![
            (
                DependencySection::Runtime,
                self.convert_versions(&document.dependencies.unwrap_or_default()),
            ),
            (
                DependencySection::Development,
                self.convert_versions(&document.dev_dependencies.unwrap_or_default()),
            ),
        ])
    }
}

/// Resolve a pubspec version expression to a queryable version string.
///
/// Plain strings are normalized directly. A mapping with exactly one entry
/// (an operator-to-version relationship such as `hosted: 2.0.0`) is unwrapped
/// and its lone value normalized; any other mapping is ambiguous and resolves
/// to nothing, dropping the dependency.
fn resolve_version(value: &Value) -> Option<String> {
    let version = match value {
        Value::String(raw) => normalize_version(raw),
        Value::Mapping(mapping) if mapping.len() == 1 => {
            let inner = mapping.iter().next().map(|(_, v)| v)?;
            match inner {
                Value::String(raw) => normalize_version(raw),
                _ => return None,
            }
        }
        _ => return None,
    };

    if version.is_empty() {
        return None;
    }
    Some(version)
}

/// Canonicalize a raw version expression into a bare semantic version.
///
/// Strips a leading run of range operators (`^`, `>`, `=`, `~`) and returns
/// the longest leading `MAJOR.MINOR.PATCH` substring. An expression with no
/// such substring is returned as-is after stripping; downstream queries it
/// as a literal version.
pub fn normalize_version(raw: &str) -> String {
    let stripped = raw.trim_start_matches(['^', '>', '=', '~']);
    let release = Regex::new(r"^(\d+\.\d+\.\d+)").unwrap();
    match release.find(stripped) {
        Some(m) => m.as_str().to_string(),
        None => stripped.to_string(),
    }
}
