//! Front-end bundler invocation.

use super::BuildContext;
use super::error::{Error, Result};
use super::stage::Bundler;
use async_trait::async_trait;
use std::path::PathBuf;

/// Resolved bundler invocation: the user-configured command merged with
/// mode-specific defaults.
#[derive(Debug, Clone)]
pub struct BundlerConfig {
    /// Command to run, e.g. `npm`.
    pub command: String,
    /// Arguments, e.g. `run build`.
    pub args: Vec<String>,
    /// Directory the bundler writes the asset tree to.
    pub dist_dir: PathBuf,
    /// Environment injected for the build mode.
    pub envs: Vec<(String, String)>,
}

impl BundlerConfig {
    /// Merges the context's bundler settings with debug/release defaults.
    pub fn resolve(ctx: &BuildContext) -> Self {
        let mode = if ctx.debug() { "development" } else { "production" };
        Self {
            command: ctx.bundler_command().to_string(),
            args: ctx.bundler_args().to_vec(),
            dist_dir: ctx.dist_dir().to_path_buf(),
            envs: vec![("NODE_ENV".to_string(), mode.to_string())],
        }
    }
}

/// [`Bundler`] implementation that spawns the configured bundler command
/// in the project directory.
pub struct ProcessBundler;

#[async_trait]
impl Bundler for ProcessBundler {
    async fn build(&self, ctx: &BuildContext, label: &str) -> Result<PathBuf> {
        let cfg = BundlerConfig::resolve(ctx);
        log::info!("Building {} with `{} {}`", label, cfg.command, cfg.args.join(" "));

        let status = tokio::process::Command::new(&cfg.command)
            .args(&cfg.args)
            .envs(cfg.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(ctx.project_dir())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| Error::CommandFailed {
                command: cfg.command.clone(),
                source: e,
            })?;

        if !status.success() {
            return Err(Error::Bundle(format!(
                "`{}` exited with {:?}",
                cfg.command,
                status.code()
            )));
        }

        if !cfg.dist_dir.is_dir() {
            return Err(Error::Bundle(format!(
                "bundler produced no output at {}",
                cfg.dist_dir.display()
            )));
        }

        Ok(cfg.dist_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{ContextBuilder, TargetPlatform};

    fn ctx(debug: bool) -> BuildContext {
        ContextBuilder::new()
            .target(TargetPlatform::Android)
            .project_dir("/work/app")
            .debug(debug)
            .build()
            .unwrap()
    }

    #[test]
    fn debug_resolves_to_development_mode() {
        let cfg = BundlerConfig::resolve(&ctx(true));
        assert!(cfg.envs.contains(&("NODE_ENV".to_string(), "development".to_string())));
    }

    #[test]
    fn release_resolves_to_production_mode() {
        let cfg = BundlerConfig::resolve(&ctx(false));
        assert!(cfg.envs.contains(&("NODE_ENV".to_string(), "production".to_string())));
    }

    #[test]
    fn default_command_is_npm_run_build() {
        let cfg = BundlerConfig::resolve(&ctx(false));
        assert_eq!(cfg.command, "npm");
        assert_eq!(cfg.args, ["run", "build"]);
    }
}
