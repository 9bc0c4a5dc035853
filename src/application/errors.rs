//! Application layer error types

use std::path::PathBuf;
use thiserror::Error;

/// Fatal scan errors.
///
/// These abort the whole scan before any vulnerability query is issued;
/// per-dependency query failures are not errors at this level, they are
/// recorded on the individual dependency results instead.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to read manifest {}: {source}", path.display())]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest: {0}")]
    Parse(#[from] ParseError),
}

/// Manifest parsing errors
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_io_error_names_the_path() {
        let error = ScanError::ManifestIo {
            path: PathBuf::from("app/build.gradle"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let message = error.to_string();
        assert!(message.contains("app/build.gradle"));
        assert!(message.contains("no such file"));
    }

    #[test]
    fn test_parse_error_wraps_yaml_failures() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("foo: [unclosed").unwrap_err();
        let error = ScanError::from(ParseError::from(yaml_error));
        assert!(error.to_string().starts_with("failed to parse manifest"));
    }
}
