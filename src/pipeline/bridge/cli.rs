//! Bridge CLI invocation.

use crate::pipeline::BuildContext;
use crate::pipeline::error::{Error, Result};
use crate::pipeline::stage::{BridgeCli, StageResult};
use async_trait::async_trait;

/// Spawns the external bridge CLI inside the bridge project directory.
///
/// A non-zero exit is resolved as a failed [`StageResult`]; the pipeline
/// decides what to do with it. Only a binary that cannot be found or
/// spawned produces an error.
pub struct BridgeCliRunner {
    bin: String,
}

impl BridgeCliRunner {
    /// Creates a runner for the given binary name, resolved through PATH.
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

#[async_trait]
impl BridgeCli for BridgeCliRunner {
    async fn prepare(&self, ctx: &BuildContext) -> Result<StageResult> {
        let bin = which::which(&self.bin).map_err(|_| {
            Error::Generic(format!(
                "bridge CLI `{}` not found in PATH; install it or set [bridge].bin in bridgepack.toml",
                self.bin
            ))
        })?;

        let args = ctx.bridge_prepare_args();
        log::info!("Preparing native project: {} {}", self.bin, args.join(" "));

        let status = tokio::process::Command::new(&bin)
            .args(args)
            .current_dir(ctx.bridge_dir())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| Error::CommandFailed {
                command: self.bin.clone(),
                source: e,
            })?;

        Ok(StageResult::from_status(status))
    }
}
