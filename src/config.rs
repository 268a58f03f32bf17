//! Project configuration (`bridgepack.toml`).
//!
//! Every section is optional; a missing file yields the defaults, which
//! match a conventional npm + `native/` project layout.

use crate::pipeline::TargetPlatform;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level project configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Front-end bundler invocation.
    pub bundler: BundlerSection,
    /// Native-bridge tool and project layout.
    pub bridge: BridgeSection,
    /// Dev server injected into debug builds.
    pub dev_server: DevServerSection,
}

/// `[bundler]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BundlerSection {
    /// Command to run.
    pub command: String,
    /// Arguments for the command.
    pub args: Vec<String>,
}

impl Default for BundlerSection {
    fn default() -> Self {
        Self {
            command: "npm".to_string(),
            args: vec!["run".to_string(), "build".to_string()],
        }
    }
}

/// `[bridge]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BridgeSection {
    /// Bridge CLI binary name, resolved through PATH.
    pub bin: String,
    /// Bridge project directory, relative to the project root.
    pub dir: PathBuf,
    /// Bridge config file name inside the bridge directory.
    pub config_file: String,
    /// Bridge CLI preparation arguments for Android.
    pub android_prepare_args: Vec<String>,
    /// Bridge CLI preparation arguments for iOS.
    pub ios_prepare_args: Vec<String>,
}

impl BridgeSection {
    /// Preparation arguments for the given target.
    pub fn prepare_args_for(&self, target: TargetPlatform) -> Vec<String> {
        match target {
            TargetPlatform::Android => self.android_prepare_args.clone(),
            TargetPlatform::Ios => self.ios_prepare_args.clone(),
        }
    }
}

impl Default for BridgeSection {
    fn default() -> Self {
        Self {
            bin: "bridge".to_string(),
            dir: PathBuf::from("native"),
            config_file: "bridge.config.json".to_string(),
            android_prepare_args: vec!["sync".to_string(), "android".to_string()],
            ios_prepare_args: vec!["sync".to_string(), "ios".to_string()],
        }
    }
}

/// `[dev_server]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DevServerSection {
    /// URL the debug app loads from instead of the packaged assets.
    pub url: Option<String>,
}

impl ProjectConfig {
    /// Configuration file name looked up in the project directory.
    pub const FILE_NAME: &'static str = "bridgepack.toml";

    /// Loads the configuration from `project_dir`, falling back to the
    /// defaults when the file does not exist.
    pub fn load(project_dir: &Path) -> crate::error::Result<Self> {
        let path = project_dir.join(Self::FILE_NAME);
        if !path.is_file() {
            log::debug!("no {} found, using defaults", Self::FILE_NAME);
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&raw)?)
    }
}
