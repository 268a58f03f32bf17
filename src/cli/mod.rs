//! Command line interface for the packaging pipeline.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::config::ProjectConfig;
use crate::error::{CliError, Result};
use crate::pipeline::{BuildContext, ContextBuilder, Outcome, Pipeline, TargetPlatform};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let target: TargetPlatform = args
        .platform
        .parse()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let runtime = RuntimeConfig::from(&args);

    let project_dir = match &args.project {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let config = ProjectConfig::load(&project_dir)?;
    let ctx = build_context(&args, target, project_dir, &config)?;

    runtime.section(&format!(
        "Packaging for {} ({})",
        target,
        if ctx.debug() { "debug" } else { "release" }
    ));

    let pipeline = Pipeline::for_context(&ctx);
    let outcome = pipeline.run(&ctx).await?;

    Ok(report(&runtime, outcome))
}

/// Merges CLI arguments with the project configuration.
fn build_context(
    args: &Args,
    target: TargetPlatform,
    project_dir: std::path::PathBuf,
    config: &ProjectConfig,
) -> crate::pipeline::Result<BuildContext> {
    let mut builder = ContextBuilder::new()
        .target(target)
        .project_dir(&project_dir)
        .debug(args.debug)
        .skip_pkg(args.skip_pkg)
        .open_ide(args.ide)
        .keep_prepared(args.keep_prepared)
        .pass_through(args.forward.clone())
        .bundler_command(config.bundler.command.clone())
        .bundler_args(config.bundler.args.clone())
        .bridge_bin(config.bridge.bin.clone())
        .bridge_dir(project_dir.join(&config.bridge.dir))
        .bridge_config_name(config.bridge.config_file.clone())
        .bridge_prepare_args(config.bridge.prepare_args_for(target));

    if let Some(url) = &config.dev_server.url {
        builder = builder.dev_server_url(url.clone());
    }
    if let Some(output) = &args.output {
        builder = builder.output_dir(output);
    }

    builder.build()
}

/// Maps the pipeline outcome to user feedback and an exit code.
fn report(runtime: &RuntimeConfig, outcome: Outcome) -> i32 {
    match outcome {
        Outcome::Packaged { artifact_dir } => {
            runtime.success(&format!("Package ready at {}", artifact_dir.display()));
            0
        }
        Outcome::PackageFailed => {
            runtime.warn("Native build failed!");
            runtime.warn("As an alternative, you can pass --ide and build from the IDE.");
            // The pipeline itself completed; the native toolchain is the
            // caller's to fix.
            0
        }
        Outcome::SkippedPackaging { config_kept } => {
            runtime.success("Native project prepared; packaging skipped on request.");
            if config_kept {
                runtime.warn(
                    "Bridge config left prepared (--keep-prepared); restore it from version control when done.",
                );
            }
            0
        }
        Outcome::IdeOpened => {
            runtime.success("IDE opened on the prepared native project.");
            0
        }
        Outcome::Interrupted => {
            runtime.warn("Interrupted; bridge config has been restored.");
            130
        }
    }
}
