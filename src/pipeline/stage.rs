//! Stage results and collaborator traits.
//!
//! The pipeline owns ordering and failure discrimination; everything that
//! touches the outside world (bundler, bridge CLI, native SDK build, IDE,
//! shutdown signal) sits behind one of these traits so it can be swapped
//! out in tests.

use super::error::Result;
use super::{BuildContext, TargetPlatform};
use async_trait::async_trait;
use std::path::PathBuf;

/// Outcome of one external-tool stage.
///
/// Stages resolve a `StageResult` for expected native-tool failure (a
/// non-zero exit); `Err` is reserved for unexpected conditions such as a
/// binary that cannot be spawned.
#[derive(Debug, Clone)]
pub struct StageResult {
    /// Process exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
    /// Optional diagnostic text attached by the stage.
    pub diagnostic: Option<String>,
}

impl StageResult {
    /// A successful stage.
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            diagnostic: None,
        }
    }

    /// Builds a result from a child process exit status.
    pub fn from_status(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
            diagnostic: None,
        }
    }

    /// Attaches diagnostic text.
    pub fn with_diagnostic(mut self, diagnostic: impl Into<String>) -> Self {
        self.diagnostic = Some(diagnostic.into());
        self
    }

    /// True when the stage exited with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Compiles the front-end source into a static asset tree.
#[async_trait]
pub trait Bundler: Send + Sync {
    /// Runs the bundler for the given context; returns the produced asset
    /// directory. Any internal bundler failure is fatal.
    async fn build(&self, ctx: &BuildContext, label: &str) -> Result<PathBuf>;
}

/// The bridge configuration file, the one piece of native state the
/// pipeline mutates directly.
///
/// The file is only ever in one of two states: prepared for build, or
/// reset to its source-controlled default. `reset` restores the original
/// contents at most once per `prepare`.
pub trait BridgeConfig: Send + Sync {
    /// Rewrites the config for the build (web dir, dev-server/SSL settings).
    fn prepare(&self, ctx: &BuildContext) -> Result<()>;

    /// Overwrites the injected dev settings with production-safe defaults.
    /// Called only once bridge preparation has succeeded.
    fn finalize_for_build(&self, target: TargetPlatform) -> Result<()>;

    /// Restores the source-controlled contents. Idempotent; a no-op when
    /// nothing was prepared.
    fn reset(&self) -> Result<()>;
}

/// Runs the external native-bridge CLI that embeds the bundle into the
/// native project.
#[async_trait]
pub trait BridgeCli: Send + Sync {
    /// Invokes the bridge CLI with the platform preparation arguments.
    async fn prepare(&self, ctx: &BuildContext) -> Result<StageResult>;
}

/// Builds the native package with the platform SDK's own build tool.
#[async_trait]
pub trait NativeBuilder: Send + Sync {
    /// Platform-specific patch applied before any bridge state is touched.
    fn pre_fix(&self, ctx: &BuildContext) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Removes stale output from a previous build.
    async fn clean_stale(&self, ctx: &BuildContext) -> Result<()>;

    /// Invokes the SDK build tool. Non-zero exit is an expected failure.
    async fn build(&self, ctx: &BuildContext) -> Result<StageResult>;

    /// Moves the produced artifact into the packaged output directory,
    /// replacing any prior output. Only called after a successful build.
    async fn relocate(&self, ctx: &BuildContext) -> Result<PathBuf>;
}

/// Opens the platform IDE on the prepared native project.
#[async_trait]
pub trait IdeOpener: Send + Sync {
    async fn open(&self, ctx: &BuildContext) -> Result<()>;
}

/// Resolves when the host process is asked to terminate.
#[async_trait]
pub trait ShutdownSignal: Send + Sync {
    async fn wait(&self);
}

/// Ctrl-C based [`ShutdownSignal`].
pub struct CtrlC;

#[async_trait]
impl ShutdownSignal for CtrlC {
    async fn wait(&self) {
        if tokio::signal::ctrl_c().await.is_err() {
            // No signal handler could be installed; never resolve rather
            // than fabricating a shutdown.
            std::future::pending::<()>().await;
        }
    }
}
