//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// Mobile packaging pipeline for web app bundles
#[derive(Parser, Debug)]
#[command(
    name = "bridgepack",
    version,
    about = "Packages a web app bundle for Android/iOS via a native-bridge CLI",
    long_about = "Builds the front-end bundle, prepares the native-bridge project and packages it with the platform SDK (Gradle / xcodebuild).

Usage:
  bridgepack android
  bridgepack ios --debug
  bridgepack android --skip-pkg
  bridgepack ios --ide
  bridgepack android -- -PabiFilters=arm64-v8a

A failed native build is not fatal: the prepared project can still be built from the IDE (--ide)."
)]
pub struct Args {
    /// Target platform: android or ios
    #[arg(value_name = "PLATFORM")]
    pub platform: String,

    /// Build in debug mode (default is release)
    #[arg(long)]
    pub debug: bool,

    /// Skip the native package build after bridge preparation
    #[arg(long = "skip-pkg")]
    pub skip_pkg: bool,

    /// Open the platform IDE on the prepared project instead of building
    #[arg(long)]
    pub ide: bool,

    /// With --skip-pkg, leave the bridge config prepared for inspection
    #[arg(long = "keep-prepared")]
    pub keep_prepared: bool,

    /// Output directory for packaged artifacts
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Project directory (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Extra arguments forwarded verbatim to the native build tool
    #[arg(last = true, value_name = "NATIVE_ARGS")]
    pub forward: Vec<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        let valid_platforms = ["android", "ios"];
        if !valid_platforms.contains(&self.platform.as_str()) {
            return Err(format!(
                "Invalid platform: {}. Valid platforms: {}",
                self.platform,
                valid_platforms.join(", ")
            ));
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for formatted terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(_args: &Args) -> Self {
        let output = super::OutputManager::new(
            true, // Always verbose
        );

        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        self.output.success(message)
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        self.output.warn(message)
    }

    /// Print a progress message
    pub fn progress(&self, message: &str) {
        self.output.progress(message)
    }

    /// Print a section header
    pub fn section(&self, title: &str) {
        self.output.section(title)
    }
}
