//! Mobile packaging pipeline for web app bundles
//!
//! This library orchestrates the packaging of a compiled web bundle into a
//! native Android or iOS application via an external native-bridge CLI:
//! - Bundling: invokes the configured front-end bundler
//! - Bridge preparation: rewrites the bridge config and runs the bridge CLI
//! - Native build: Gradle (Android) or xcodebuild (iOS), artifact relocation
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;

// Re-export commonly used types
pub use error::{CliError, PackagerError, Result};
