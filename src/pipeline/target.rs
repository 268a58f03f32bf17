//! Target platform identifiers.

use std::fmt;
use std::str::FromStr;

/// Platforms the pipeline can package for.
///
/// This is a closed set: every stage of the pipeline (bridge preparation
/// args, native build tool, artifact layout) is defined per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPlatform {
    /// Android, built with Gradle
    Android,
    /// iOS, built with the Xcode toolchain
    Ios,
}

impl TargetPlatform {
    /// Stable lowercase name, used for CLI parsing, bridge CLI arguments
    /// and the per-platform output subdirectory.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetPlatform::Android => "android",
            TargetPlatform::Ios => "ios",
        }
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetPlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "android" => Ok(TargetPlatform::Android),
            "ios" => Ok(TargetPlatform::Ios),
            other => Err(format!(
                "Invalid platform: {}. Valid platforms: android, ios",
                other
            )),
        }
    }
}
