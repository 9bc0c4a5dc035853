//! depscan - command-line entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use depscan::application::{ReportOptions, ReportRenderer, ScanService, ScanServiceImpl};
use depscan::domain::ManifestDialect;
use depscan::infrastructure::api_clients::OsvClient;
use depscan::{Config, init_tracing};

/// Scan project dependencies for known vulnerabilities
#[derive(Parser)]
#[command(name = "depscan", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the project manifest and fail on any vulnerable dependency
    Scan {
        /// Scan a Flutter pubspec.yaml instead of an Android Gradle manifest
        #[arg(long)]
        flutter: bool,

        /// Print each advisory's identifier and summary
        #[arg(long)]
        verbose: bool,

        /// Print the introduced and fixed versions for each advisory
        #[arg(long)]
        fix: bool,

        /// Path to the manifest, overriding the dialect's configured default
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|error| {
        eprintln!("Failed to load configuration, using defaults: {error}");
        Config::default()
    });

    if let Err(error) = init_tracing(&config.logging) {
        eprintln!("Failed to initialize logging: {error}");
    }

    match cli.command {
        Commands::Scan {
            flutter,
            verbose,
            fix,
            manifest,
        } => run_scan(&config, flutter, verbose, fix, manifest).await,
    }
}

async fn run_scan(
    config: &Config,
    flutter: bool,
    verbose: bool,
    fix: bool,
    manifest: Option<PathBuf>,
) -> ExitCode {
    let dialect = if flutter {
        ManifestDialect::Pubspec
    } else {
        ManifestDialect::Gradle
    };
    let manifest_path = manifest.unwrap_or_else(|| match dialect {
        ManifestDialect::Gradle => config.scan.gradle_manifest.clone(),
        ManifestDialect::Pubspec => config.scan.pubspec_manifest.clone(),
    });

    let client = Arc::new(OsvClient::from_config(&config.api.osv));
    let service = ScanServiceImpl::with_concurrency(client, config.scan.max_concurrent_queries);

    let result = match service.scan_file(&manifest_path, dialect).await {
        Ok(result) => result,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    let report = ReportRenderer::new().render(&result, &ReportOptions { verbose, fix });

    if result.is_clean() {
        print!("{report}");
        println!("All dependencies are clean.");
        ExitCode::SUCCESS
    } else {
        eprint!("{report}");
        ExitCode::FAILURE
    }
}
