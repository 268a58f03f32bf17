//! iOS native build via the Xcode toolchain.

use crate::pipeline::BuildContext;
use crate::pipeline::error::{Error, Result};
use crate::pipeline::stage::{NativeBuilder, StageResult};
use crate::pipeline::utils;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// xcodebuild-based [`NativeBuilder`].
///
/// The derived data path points straight at the packaged output
/// directory, so a successful build needs no separate copy step; a failed
/// one removes the partial output.
pub struct IosBuilder;

#[async_trait]
impl NativeBuilder for IosBuilder {
    async fn clean_stale(&self, ctx: &BuildContext) -> Result<()> {
        utils::remove_dir_all(&ctx.packaged_dir()).await
    }

    async fn build(&self, ctx: &BuildContext) -> Result<StageResult> {
        let dest = ctx.packaged_dir();
        let args = xcodebuild_args(ctx.debug(), &dest, ctx.pass_through());

        log::info!("Building iOS app...");

        let status = tokio::process::Command::new("xcrun")
            .args(&args)
            .current_dir(ctx.bridge_dir().join("ios/App"))
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| Error::CommandFailed {
                command: "xcrun".to_string(),
                source: e,
            })?;

        if !status.success() {
            // Drop the partial derived data so no artifact is left behind.
            utils::remove_dir_all(&dest).await?;
            return Ok(StageResult::from_status(status).with_diagnostic("xcodebuild command failed!"));
        }

        Ok(StageResult::ok())
    }

    async fn relocate(&self, ctx: &BuildContext) -> Result<PathBuf> {
        // xcodebuild already wrote into the packaged directory.
        Ok(ctx.packaged_dir())
    }
}

/// Argument list for `xcrun`.
fn xcodebuild_args(debug: bool, derived_data: &Path, pass_through: &[String]) -> Vec<String> {
    let configuration = if debug { "debug" } else { "release" };

    let mut args: Vec<String> = [
        "xcodebuild",
        "-workspace",
        "App.xcworkspace",
        "-scheme",
        "App",
        "-configuration",
        configuration,
        "-derivedDataPath",
    ]
    .into_iter()
    .map(str::to_string)
    .collect();

    args.push(derived_data.display().to_string());
    args.extend(pass_through.iter().cloned());
    args
}
