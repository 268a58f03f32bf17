//! Sequential multi-stage packaging pipeline.
//!
//! This module provides the [`Pipeline`] orchestrator that coordinates a
//! front-end bundle build, native-bridge preparation and the
//! platform-native package build.
//!
//! # Overview
//!
//! The pipeline:
//! 1. Builds the web bundle from a [`BuildContext`]
//! 2. Prepares the bridge config and runs the bridge CLI
//! 3. Builds the native package (Gradle / xcodebuild) and relocates the
//!    artifact, unless packaging was skipped or handed off to the IDE
//! 4. Guarantees the bridge config is reset exactly once on every exit
//!    path, including an external shutdown signal
//!
//! # Module Organization
//!
//! - [`orchestrator`](self::Pipeline) - stage ordering and failure discrimination
//! - [`bridge`] - bridge CLI runner and bridge config file
//! - [`platform`] - per-platform native builders
//! - [`stage`](self::StageResult) - stage results and collaborator traits

mod bundler;
pub mod bridge;
mod context;
mod error;
mod guard;
mod ide;
mod orchestrator;
pub mod platform;
mod stage;
mod target;
pub mod utils;

pub use bundler::{BundlerConfig, ProcessBundler};
pub use context::{BuildContext, ContextBuilder};
pub use error::{Context, Error, ErrorExt, Result};
pub use guard::ConfigGuard;
pub use ide::DesktopIde;
pub use orchestrator::{Outcome, Pipeline};
pub use stage::{
    BridgeCli, BridgeConfig, Bundler, CtrlC, IdeOpener, NativeBuilder, ShutdownSignal, StageResult,
};
pub use target::TargetPlatform;
