//! Gradle build file dependency extractor

use regex::Regex;

use super::traits::ManifestExtractor;
use crate::application::errors::ParseError;
use crate::domain::{DependencySection, DependencySet, ManifestDialect};

/// Extractor for Android Gradle build files.
///
/// Scans the manifest line by line for declarations of the shape
/// `implementation 'group:artifact:version'`, optionally wrapped in
/// `platform(...)`. Only `implementation`, `testImplementation`, and
/// `androidTestImplementation` declarations are recognized; other
/// configurations and non-matching lines are ignored.
pub struct GradleExtractor {
    declaration: Regex,
}

impl Default for GradleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl GradleExtractor {
    pub fn new() -> Self {
        let declaration = Regex::new(
            r#"(?:implementation|testImplementation|androidTestImplementation)\s+(?:platform\()?['"]([^:]+):([^:]+):([^'"]+)['"]\)?"#,
        )
        .unwrap();
        Self { declaration }
    }

    fn extract_dependencies(&self, content: &str) -> DependencySet {
        let mut deps = DependencySet::new();
        for line in content.lines() {
            if let Some(captures) = self.declaration.captures(line) {
                let group = &captures[1];
                let artifact = &captures[2];
                let version = &captures[3];
                deps.insert(format!("{}:{}", group, artifact), version.to_string());
            }
        }
        deps
    }
}

impl ManifestExtractor for GradleExtractor {
    fn dialect(&self) -> ManifestDialect {
        ManifestDialect::Gradle
    }

    fn extract(
        &self,
        content: &str,
    ) -> Result<Vec<(DependencySection, DependencySet)>, ParseError> {
        Ok(vec![(
            DependencySection::Runtime,
            self.extract_dependencies(content),
        )])
    }
}
