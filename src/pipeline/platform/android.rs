//! Android native build via Gradle.

use crate::pipeline::BuildContext;
use crate::pipeline::error::{Error, ErrorExt, Result};
use crate::pipeline::stage::{NativeBuilder, StageResult};
use crate::pipeline::utils;
use async_trait::async_trait;
use std::path::PathBuf;

const MANIFEST_REL_PATH: &str = "android/app/src/main/AndroidManifest.xml";
const OUTPUTS_REL_PATH: &str = "android/app/build/outputs";

/// Gradle-based [`NativeBuilder`].
pub struct AndroidBuilder;

impl AndroidBuilder {
    fn outputs_dir(ctx: &BuildContext) -> PathBuf {
        ctx.bridge_dir().join(OUTPUTS_REL_PATH)
    }
}

#[async_trait]
impl NativeBuilder for AndroidBuilder {
    fn pre_fix(&self, ctx: &BuildContext) -> Result<()> {
        fix_cleartext(ctx)
    }

    async fn clean_stale(&self, ctx: &BuildContext) -> Result<()> {
        utils::remove_dir_all(&Self::outputs_dir(ctx)).await
    }

    async fn build(&self, ctx: &BuildContext) -> Result<StageResult> {
        let (wrapper, args) = gradle_invocation(ctx.debug(), ctx.pass_through());

        log::info!("Building Android app...");

        let status = tokio::process::Command::new(&wrapper)
            .args(&args)
            .current_dir(ctx.bridge_dir().join("android"))
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| Error::CommandFailed {
                command: wrapper.clone(),
                source: e,
            })?;

        if !status.success() {
            return Ok(StageResult::from_status(status).with_diagnostic("Gradle build failed!"));
        }

        Ok(StageResult::ok())
    }

    async fn relocate(&self, ctx: &BuildContext) -> Result<PathBuf> {
        let dest = ctx.packaged_dir();
        utils::remove_dir_all(&dest).await?;
        utils::copy_dir(&Self::outputs_dir(ctx), &dest).await?;
        Ok(dest)
    }
}

/// Gradle wrapper name and argument list for the build.
fn gradle_invocation(debug: bool, pass_through: &[String]) -> (String, Vec<String>) {
    let wrapper = if cfg!(windows) {
        "gradlew.bat".to_string()
    } else {
        "./gradlew".to_string()
    };

    let task = if debug { "assembleDebug" } else { "assembleRelease" };
    let mut args = vec![task.to_string()];
    args.extend(pass_through.iter().cloned());

    (wrapper, args)
}

/// Allows cleartext traffic in the Android manifest so a debug build can
/// talk to a plain-http dev server.
///
/// A no-op when the manifest already carries the attribute or the android
/// project has not been generated yet.
fn fix_cleartext(ctx: &BuildContext) -> Result<()> {
    let manifest_path = ctx.bridge_dir().join(MANIFEST_REL_PATH);
    if !manifest_path.is_file() {
        log::debug!("no Android manifest at {}, skipping cleartext fix", manifest_path.display());
        return Ok(());
    }

    let manifest = std::fs::read_to_string(&manifest_path)
        .fs_context("reading Android manifest", &manifest_path)?;

    if let Some(patched) = patch_cleartext(&manifest) {
        std::fs::write(&manifest_path, patched)
            .fs_context("writing Android manifest", &manifest_path)?;
        log::info!("Enabled cleartext traffic in the Android manifest");
    }

    Ok(())
}

/// Returns the patched manifest, or `None` when no change is needed.
fn patch_cleartext(manifest: &str) -> Option<String> {
    if manifest.contains("android:usesCleartextTraffic") {
        return None;
    }

    let idx = manifest.find("<application")?;
    let insert_at = idx + "<application".len();

    let mut patched = String::with_capacity(manifest.len() + 48);
    patched.push_str(&manifest[..insert_at]);
    patched.push_str(" android:usesCleartextTraffic=\"true\"");
    patched.push_str(&manifest[insert_at..]);
    Some(patched)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android">
    <application
        android:label="@string/app_name">
    </application>
</manifest>
"#;

    #[test]
    fn debug_builds_use_assemble_debug() {
        let (_, args) = gradle_invocation(true, &[]);
        assert_eq!(args, ["assembleDebug"]);
    }

    #[test]
    fn release_builds_forward_pass_through_args() {
        let extra = vec!["-PabiFilters=arm64-v8a".to_string()];
        let (_, args) = gradle_invocation(false, &extra);
        assert_eq!(args, ["assembleRelease", "-PabiFilters=arm64-v8a"]);
    }

    #[cfg(unix)]
    #[test]
    fn gradle_wrapper_is_platform_specific() {
        let (wrapper, _) = gradle_invocation(true, &[]);
        assert_eq!(wrapper, "./gradlew");
    }

    #[test]
    fn cleartext_patch_inserts_attribute_once() {
        let patched = patch_cleartext(MANIFEST).unwrap();
        assert!(patched.contains("<application android:usesCleartextTraffic=\"true\""));
        // re-running the patch is a no-op
        assert!(patch_cleartext(&patched).is_none());
    }

    #[test]
    fn cleartext_patch_skips_manifest_without_application_tag() {
        assert!(patch_cleartext("<manifest></manifest>").is_none());
    }
}
