//! Application services orchestrating the scan pipeline

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use super::errors::ScanError;
use crate::domain::{
    DependencyResult, DependencySet, ManifestDialect, ProjectScanResult, ScanReport,
    SectionReport,
};
use crate::infrastructure::api_clients::VulnerabilityApiClient;
use crate::infrastructure::parsers::extractor_for;

/// Service for running dependency vulnerability scans
#[async_trait]
pub trait ScanService: Send + Sync {
    /// Read a manifest from disk and scan it. A missing or unreadable
    /// manifest aborts the scan before any query is issued.
    async fn scan_file(
        &self,
        path: &Path,
        dialect: ManifestDialect,
    ) -> Result<ProjectScanResult, ScanError>;

    /// Extract dependencies from manifest content and scan each section
    async fn scan_content(
        &self,
        content: &str,
        dialect: ManifestDialect,
    ) -> Result<ProjectScanResult, ScanError>;

    /// Query every dependency in the set concurrently and aggregate the
    /// results into one report
    async fn scan_dependencies(&self, deps: DependencySet) -> ScanReport;
}

/// Implementation of the scan service.
///
/// Fans out one query task per dependency, bounded by a semaphore, and joins
/// them all before the report is assembled. Each task owns its result until
/// it is handed back through the join; nothing else is shared between tasks,
/// so one failed query can never disturb its siblings.
pub struct ScanServiceImpl {
    client: Arc<dyn VulnerabilityApiClient>,
    max_concurrent_queries: usize,
}

impl ScanServiceImpl {
    /// Create a new scan service with the default concurrency limit
    pub fn new(client: Arc<dyn VulnerabilityApiClient>) -> Self {
        Self {
            client,
            max_concurrent_queries: 8,
        }
    }

    /// Create a new scan service with a custom concurrency limit
    pub fn with_concurrency(
        client: Arc<dyn VulnerabilityApiClient>,
        max_concurrent_queries: usize,
    ) -> Self {
        Self {
            client,
            max_concurrent_queries: max_concurrent_queries.max(1),
        }
    }
}

#[async_trait]
impl ScanService for ScanServiceImpl {
    async fn scan_file(
        &self,
        path: &Path,
        dialect: ManifestDialect,
    ) -> Result<ProjectScanResult, ScanError> {
        debug!(path = %path.display(), %dialect, "reading manifest");
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ScanError::ManifestIo {
                    path: path.to_path_buf(),
                    source,
                })?;

        self.scan_content(&content, dialect).await
    }

    async fn scan_content(
        &self,
        content: &str,
        dialect: ManifestDialect,
    ) -> Result<ProjectScanResult, ScanError> {
        let extractor = extractor_for(dialect);
        let sections = extractor.extract(content)?;

        let mut reports = Vec::with_capacity(sections.len());
        for (section, deps) in sections {
            info!(%section, dependencies = deps.len(), "scanning section");
            let report = self.scan_dependencies(deps).await;
            reports.push(SectionReport { section, report });
        }

        Ok(ProjectScanResult::new(reports))
    }

    async fn scan_dependencies(&self, deps: DependencySet) -> ScanReport {
        let started = Instant::now();
        let expected = deps.len();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_queries));
        let mut join_set: JoinSet<DependencyResult> = JoinSet::new();

        for (name, version) in deps {
            let client = self.client.clone();
            let semaphore = semaphore.clone();
            join_set.spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore");
                match client.query_vulnerabilities(&name, &version).await {
                    Ok(vulnerabilities) => {
                        debug!(%name, %version, found = vulnerabilities.len(), "query completed");
                        DependencyResult::completed(name, version, vulnerabilities)
                    }
                    Err(query_error) => {
                        warn!(%name, %version, error = %query_error, "query failed");
                        DependencyResult::failed(name, version, query_error)
                    }
                }
            });
        }

        let mut results = Vec::with_capacity(expected);
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(join_error) => error!(error = %join_error, "scan task failed"),
            }
        }

        let report = ScanReport::new(results, started.elapsed());
        info!(
            dependencies = report.len(),
            vulnerable = report.vulnerable_count(),
            errored = report.errored_count(),
            duration_ms = report.duration.as_millis() as u64,
            "section scan complete"
        );
        report
    }
}

/// Behavior switches for the text report
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Include each advisory's identifier and summary
    pub verbose: bool,
    /// Include introduced/fixed versions from each affected range
    pub fix: bool,
}

/// Renders a scan result as a human-readable text report.
///
/// Pure string construction; writing the report anywhere is the caller's
/// responsibility.
pub struct ReportRenderer;

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, result: &ProjectScanResult, options: &ReportOptions) -> String {
        let mut out = String::new();
        let labeled = result.sections.len() > 1;

        for (index, section_report) in result.sections.iter().enumerate() {
            if labeled {
                if index > 0 {
                    out.push('\n');
                }
                out.push_str(section_report.section.label());
                out.push_str(":\n");
            }
            for dependency in &section_report.report.results {
                self.render_dependency(&mut out, dependency, options);
            }
        }

        out
    }

    fn render_dependency(
        &self,
        out: &mut String,
        result: &DependencyResult,
        options: &ReportOptions,
    ) {
        if let Some(query_error) = &result.error {
            out.push_str(&format!(
                "error: {}:{}: {}\n",
                result.name, result.version, query_error
            ));
            return;
        }

        if result.vulnerabilities.is_empty() {
            out.push_str(&format!(
                "ok: {}:{} has no known vulnerabilities\n",
                result.name, result.version
            ));
            return;
        }

        out.push_str(&format!(
            "vulnerable: {}:{} ({} advisories)\n",
            result.name,
            result.version,
            result.vulnerabilities.len()
        ));

        for vulnerability in &result.vulnerabilities {
            if options.verbose {
                out.push_str(&format!(
                    "  {}: {}\n",
                    vulnerability.primary_alias().unwrap_or("unidentified"),
                    vulnerability.summary
                ));
            }
            if options.fix {
                for range in &vulnerability.affected_ranges {
                    for event in &range.events {
                        if let Some(introduced) = &event.introduced {
                            out.push_str(&format!("    introduced in {}\n", introduced));
                        }
                        if let Some(fixed) = &event.fixed {
                            out.push_str(&format!("    fixed in {}\n", fixed));
                        }
                    }
                }
            }
        }
    }
}
