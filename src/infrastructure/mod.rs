//! Infrastructure Layer - External concerns and implementations
//!
//! This module handles the outside world: manifest parsing and the
//! vulnerability database API.

pub mod api_clients;
pub mod parsers;

pub use api_clients::OsvClient;
pub use api_clients::traits::VulnerabilityApiClient;
pub use parsers::traits::{ManifestExtractor, extractor_for};
