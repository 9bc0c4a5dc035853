//! Domain entities representing core scan concepts

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, hash_map};
use std::time::Duration;

use super::errors::QueryError;
use super::value_objects::DependencySection;

/// The set of dependencies declared by one manifest section.
///
/// Keys are unique by construction; inserting the same key twice keeps the
/// later version (last declaration wins). No iteration order is guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySet(HashMap<String, String>);

impl DependencySet {
    /// Create an empty dependency set
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Insert a dependency, replacing any earlier declaration of the same key
    pub fn insert(&mut self, key: String, version: String) {
        self.0.insert(key, version);
    }

    /// Look up the declared version for a dependency key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, version)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl IntoIterator for DependencySet {
    type Item = (String, String);
    type IntoIter = hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, String)> for DependencySet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One known vulnerability affecting a dependency, as reported by the
/// vulnerability database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    /// Advisory identifiers (CVE/GHSA/...) in the order the database lists them
    pub aliases: Vec<String>,
    pub summary: String,
    pub affected_ranges: Vec<AffectedRange>,
}

impl Vulnerability {
    /// The identifier shown in verbose reports, when the database provides one
    pub fn primary_alias(&self) -> Option<&str> {
        self.aliases.first().map(String::as_str)
    }
}

/// A vulnerable version range, described as an ordered list of events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedRange {
    pub events: Vec<RangeEvent>,
}

/// One event on an affected range timeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeEvent {
    pub introduced: Option<String>,
    pub fixed: Option<String>,
}

/// The outcome of the single query attempt made for one dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyResult {
    pub name: String,
    pub version: String,
    pub vulnerabilities: Vec<Vulnerability>,
    pub error: Option<QueryError>,
}

impl DependencyResult {
    /// Result of a query that completed, with whatever the database reported
    pub fn completed(name: String, version: String, vulnerabilities: Vec<Vulnerability>) -> Self {
        Self {
            name,
            version,
            vulnerabilities,
            error: None,
        }
    }

    /// Result of a query that failed before a verdict could be obtained
    pub fn failed(name: String, version: String, error: QueryError) -> Self {
        Self {
            name,
            version,
            vulnerabilities: Vec::new(),
            error: Some(error),
        }
    }

    /// A dependency is clean only when its query succeeded and came back empty
    pub fn is_clean(&self) -> bool {
        self.error.is_none() && self.vulnerabilities.is_empty()
    }
}

/// The aggregate result of scanning one dependency set.
///
/// Built once, after every concurrent query has completed; `overall_clean`
/// is computed at construction and the report is immutable thereafter.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub results: Vec<DependencyResult>,
    pub overall_clean: bool,
    pub duration: Duration,
}

impl ScanReport {
    pub fn new(results: Vec<DependencyResult>, duration: Duration) -> Self {
        let overall_clean = results.iter().all(DependencyResult::is_clean);
        Self {
            results,
            overall_clean,
            duration,
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of dependencies with at least one reported vulnerability
    pub fn vulnerable_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| !r.vulnerabilities.is_empty())
            .count()
    }

    /// Number of dependencies whose query failed
    pub fn errored_count(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_some()).count()
    }
}

/// The scan report for one manifest section
#[derive(Debug, Clone)]
pub struct SectionReport {
    pub section: DependencySection,
    pub report: ScanReport,
}

/// The complete result of scanning one project manifest.
///
/// Gradle manifests produce a single runtime section; pubspec manifests
/// produce a runtime and a development section, each with its own report.
#[derive(Debug, Clone)]
pub struct ProjectScanResult {
    pub sections: Vec<SectionReport>,
}

impl ProjectScanResult {
    pub fn new(sections: Vec<SectionReport>) -> Self {
        Self { sections }
    }

    /// True iff every section's report is clean
    pub fn is_clean(&self) -> bool {
        self.sections.iter().all(|s| s.report.overall_clean)
    }

    /// Total number of dependencies scanned across all sections
    pub fn dependency_count(&self) -> usize {
        self.sections.iter().map(|s| s.report.len()).sum()
    }
}
