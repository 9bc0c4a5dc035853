//! Manifest dependency extractors for the supported dialects

pub mod gradle;
pub mod pubspec;
pub mod traits;

pub use gradle::*;
pub use pubspec::*;
pub use traits::*;
