//! Pipeline orchestration.
//!
//! One invocation progresses through `bundling -> bridge preparation ->
//! {skip | IDE handoff | native build}` strictly in order; each external
//! tool is awaited before the next stage starts. The bridge config reset
//! is armed (via [`ConfigGuard`]) before the first mutation of bridge
//! state and runs exactly once on every exit path, including an external
//! shutdown signal racing the stages.

use super::error::{Error, Result};
use super::guard::ConfigGuard;
use super::stage::{Bundler, BridgeCli, BridgeConfig, IdeOpener, NativeBuilder, ShutdownSignal};
use super::BuildContext;
use std::path::PathBuf;
use std::sync::Arc;

/// Terminal states of one pipeline invocation.
///
/// Fatal failures are `Err` values from [`Pipeline::run`]; everything
/// here is a non-fatal way for the pipeline to end.
#[derive(Debug)]
pub enum Outcome {
    /// Native build succeeded and the artifact sits in the packaged
    /// output directory.
    Packaged {
        /// Where the artifact was relocated to
        artifact_dir: PathBuf,
    },

    /// Native build failed. Recoverable: the prepared project can still
    /// be built from the IDE, so this is a warning, not an error.
    PackageFailed,

    /// Bridge preparation succeeded and packaging was skipped on request.
    SkippedPackaging {
        /// True when the bridge config was deliberately left prepared
        config_kept: bool,
    },

    /// The platform IDE was opened on the prepared project; the
    /// pipeline's job ends at "native project prepared".
    IdeOpened,

    /// A shutdown signal arrived mid-run; bridge state has been restored.
    Interrupted,
}

/// Sequential packaging pipeline.
///
/// Owns stage ordering, the cleanup guarantee and the translation of
/// child-process exit codes into fatal vs. recoverable outcomes. All
/// external work happens behind collaborator traits.
///
/// # Examples
///
/// ```no_run
/// use bridgepack::pipeline::{ContextBuilder, Pipeline, TargetPlatform};
///
/// # async fn example() -> bridgepack::pipeline::Result<()> {
/// let ctx = ContextBuilder::new()
///     .target(TargetPlatform::Android)
///     .project_dir("/work/app")
///     .build()?;
///
/// let outcome = Pipeline::for_context(&ctx).run(&ctx).await?;
/// # Ok(())
/// # }
/// ```
pub struct Pipeline {
    bundler: Box<dyn Bundler>,
    config: Arc<dyn BridgeConfig>,
    bridge: Box<dyn BridgeCli>,
    native: Box<dyn NativeBuilder>,
    ide: Box<dyn IdeOpener>,
    shutdown: Box<dyn ShutdownSignal>,
}

impl Pipeline {
    /// Assembles a pipeline from explicit collaborators.
    pub fn new(
        bundler: Box<dyn Bundler>,
        config: Arc<dyn BridgeConfig>,
        bridge: Box<dyn BridgeCli>,
        native: Box<dyn NativeBuilder>,
        ide: Box<dyn IdeOpener>,
        shutdown: Box<dyn ShutdownSignal>,
    ) -> Self {
        Self {
            bundler,
            config,
            bridge,
            native,
            ide,
            shutdown,
        }
    }

    /// Assembles the production pipeline for a context: process-spawning
    /// collaborators, the JSON bridge config file, ctrl-c shutdown.
    pub fn for_context(ctx: &BuildContext) -> Self {
        Self::new(
            Box::new(super::bundler::ProcessBundler),
            Arc::new(super::bridge::BridgeConfigFile::new(
                ctx.bridge_config_path().to_path_buf(),
            )),
            Box::new(super::bridge::BridgeCliRunner::new(ctx.bridge_bin())),
            super::platform::native_builder_for(ctx.target()),
            Box::new(super::ide::DesktopIde),
            Box::new(super::stage::CtrlC),
        )
    }

    /// Runs the pipeline to one of its terminal states.
    ///
    /// The staged work races the shutdown signal: when the signal wins,
    /// the staged future is dropped, which releases the config guard and
    /// restores bridge state before `Interrupted` is returned.
    ///
    /// # Errors
    ///
    /// Fatal conditions only: bundler failure, bridge CLI failure (after
    /// the config reset), or unexpected I/O and spawn errors. A failed
    /// native build is *not* an error; see [`Outcome::PackageFailed`].
    pub async fn run(&self, ctx: &BuildContext) -> Result<Outcome> {
        tokio::select! {
            res = self.run_stages(ctx) => res,
            _ = self.shutdown.wait() => {
                log::warn!("shutdown requested, aborting {} packaging", ctx.target());
                Ok(Outcome::Interrupted)
            }
        }
    }

    async fn run_stages(&self, ctx: &BuildContext) -> Result<Outcome> {
        let bundle_dir = self.bundler.build(ctx, "Mobile UI").await?;
        log::info!("Web bundle ready at {}", bundle_dir.display());

        self.native.pre_fix(ctx)?;

        // Arm the reset before the first mutation of bridge state, so an
        // interrupt between prepare() and completion cannot leak a
        // half-prepared config.
        let guard = ConfigGuard::new(Arc::clone(&self.config));
        self.config.prepare(ctx)?;

        let prep = self.bridge.prepare(ctx).await?;
        if !prep.success() {
            // Restore bridge state first, then surface the fatal error.
            drop(guard);
            return Err(Error::BridgeCli { code: prep.code });
        }

        self.config.finalize_for_build(ctx.target())?;

        if ctx.skip_pkg() {
            if ctx.keep_prepared() {
                guard.keep();
                log::info!("Bridge config left prepared for inspection");
                return Ok(Outcome::SkippedPackaging { config_kept: true });
            }
            return Ok(Outcome::SkippedPackaging { config_kept: false });
        }

        if ctx.open_ide() {
            self.ide.open(ctx).await?;
            return Ok(Outcome::IdeOpened);
        }

        self.native.clean_stale(ctx).await?;
        let built = self.native.build(ctx).await?;
        if !built.success() {
            if let Some(diagnostic) = &built.diagnostic {
                log::warn!("{}", diagnostic);
            }
            log::warn!("Native build failed; as an alternative, pass --ide and build from the IDE");
            return Ok(Outcome::PackageFailed);
        }

        let artifact_dir = self.native.relocate(ctx).await?;
        log::info!("Package ready at {}", artifact_dir.display());
        Ok(Outcome::Packaged { artifact_dir })
    }
}
