//! IDE handoff: opens the prepared native project in the platform IDE.

use super::error::{Error, Result};
use super::stage::IdeOpener;
use super::{BuildContext, TargetPlatform};
use crate::bail;
use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::Path;

/// Opens Android Studio or the Xcode workspace for the prepared project.
pub struct DesktopIde;

#[async_trait]
impl IdeOpener for DesktopIde {
    async fn open(&self, ctx: &BuildContext) -> Result<()> {
        match ctx.target() {
            TargetPlatform::Android => {
                open_android_studio(&ctx.bridge_dir().join("android")).await
            }
            TargetPlatform::Ios => {
                open_xcode(&ctx.bridge_dir().join("ios/App/App.xcworkspace")).await
            }
        }
    }
}

async fn open_android_studio(project: &Path) -> Result<()> {
    log::info!("Opening Android Studio on {}", project.display());

    if cfg!(target_os = "macos") {
        return launch_detached("open", ["-a".as_ref(), "Android Studio".as_ref(), project.as_os_str()]);
    }

    for candidate in ["studio", "studio.sh"] {
        if let Ok(bin) = which::which(candidate) {
            return launch_detached(bin, [project.as_os_str()]);
        }
    }

    bail!("Android Studio launcher not found in PATH (tried `studio` and `studio.sh`)")
}

async fn open_xcode(workspace: &Path) -> Result<()> {
    if !cfg!(target_os = "macos") {
        bail!("opening the Xcode workspace requires macOS");
    }

    log::info!("Opening Xcode workspace {}", workspace.display());
    launch_detached("open", [workspace.as_os_str()])
}

/// Spawns the IDE launcher without waiting for it; the IDE outlives the
/// pipeline.
fn launch_detached<C, I, A>(command: C, args: I) -> Result<()>
where
    C: AsRef<OsStr>,
    I: IntoIterator<Item = A>,
    A: AsRef<OsStr>,
{
    let command = command.as_ref().to_os_string();
    tokio::process::Command::new(&command)
        .args(args)
        .spawn()
        .map_err(|e| Error::CommandFailed {
            command: command.to_string_lossy().into_owned(),
            source: e,
        })?;
    Ok(())
}
