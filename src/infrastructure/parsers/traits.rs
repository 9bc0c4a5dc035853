//! Traits for manifest dependency extractors

use crate::application::errors::ParseError;
use crate::domain::{DependencySection, DependencySet, ManifestDialect};

/// Trait for extracting declared dependencies from a manifest.
///
/// An extractor turns raw manifest content into one dependency set per
/// manifest section. Sections are kept separate because they are scanned and
/// reported independently downstream.
pub trait ManifestExtractor: Send + Sync {
    /// The dialect this extractor handles
    fn dialect(&self) -> ManifestDialect;

    /// Extract the declared dependencies, one set per section.
    ///
    /// A manifest that cannot be parsed fails the whole extraction; there is
    /// no partial result.
    fn extract(
        &self,
        content: &str,
    ) -> Result<Vec<(DependencySection, DependencySet)>, ParseError>;
}

/// Create the extractor for the given manifest dialect
pub fn extractor_for(dialect: ManifestDialect) -> Box<dyn ManifestExtractor> {
    match dialect {
        ManifestDialect::Gradle => Box::new(super::gradle::GradleExtractor::new()),
        ManifestDialect::Pubspec => Box::new(super::pubspec::PubspecExtractor::new()),
    }
}
