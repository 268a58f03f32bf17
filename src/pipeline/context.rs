//! Build context: the immutable configuration one pipeline invocation runs with.

use super::TargetPlatform;
use super::error::Context;
use std::path::{Path, PathBuf};

/// Immutable configuration resolved before the pipeline starts.
///
/// Constructed via [`ContextBuilder`]; the CLI layer fills it from parsed
/// arguments merged with the project's `bridgepack.toml`.
///
/// # Examples
///
/// ```no_run
/// use bridgepack::pipeline::{ContextBuilder, TargetPlatform};
///
/// # fn example() -> bridgepack::pipeline::Result<()> {
/// let ctx = ContextBuilder::new()
///     .target(TargetPlatform::Android)
///     .project_dir("/work/app")
///     .debug(true)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct BuildContext {
    /// Platform being packaged for.
    target: TargetPlatform,

    /// Debug (true) or release (false) build.
    debug: bool,

    /// Application project root.
    project_dir: PathBuf,

    /// Native-bridge project directory.
    bridge_dir: PathBuf,

    /// Root output directory; packaged artifacts land in a per-platform
    /// subdirectory below it.
    output_dir: PathBuf,

    /// Directory the bundler writes the static asset tree to.
    dist_dir: PathBuf,

    /// Bundler invocation.
    bundler_command: String,
    bundler_args: Vec<String>,

    /// Bridge CLI binary name, resolved through PATH.
    bridge_bin: String,

    /// Bridge config file inside the bridge directory.
    bridge_config_path: PathBuf,

    /// Arguments the bridge CLI is invoked with for preparation.
    bridge_prepare_args: Vec<String>,

    /// Dev server URL injected into the bridge config for debug builds.
    dev_server_url: Option<String>,

    /// Arguments forwarded verbatim to the native build tool.
    pass_through: Vec<String>,

    /// Stop after bridge preparation instead of building the package.
    skip_pkg: bool,

    /// Open the platform IDE on the prepared project instead of building.
    open_ide: bool,

    /// With `skip_pkg`, leave the bridge config prepared for inspection.
    keep_prepared: bool,
}

impl BuildContext {
    /// Returns the target platform.
    pub fn target(&self) -> TargetPlatform {
        self.target
    }

    /// Returns true for debug builds.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Returns the application project root.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Returns the native-bridge project directory.
    pub fn bridge_dir(&self) -> &Path {
        &self.bridge_dir
    }

    /// Returns the root output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the bundler output directory.
    pub fn dist_dir(&self) -> &Path {
        &self.dist_dir
    }

    /// Returns the directory the packaged artifact is relocated to.
    pub fn packaged_dir(&self) -> PathBuf {
        self.output_dir.join(self.target.as_str())
    }

    /// Returns the bundler command.
    pub fn bundler_command(&self) -> &str {
        &self.bundler_command
    }

    /// Returns the bundler arguments.
    pub fn bundler_args(&self) -> &[String] {
        &self.bundler_args
    }

    /// Returns the bridge CLI binary name.
    pub fn bridge_bin(&self) -> &str {
        &self.bridge_bin
    }

    /// Returns the path of the bridge config file.
    pub fn bridge_config_path(&self) -> &Path {
        &self.bridge_config_path
    }

    /// Returns the bridge CLI preparation arguments.
    pub fn bridge_prepare_args(&self) -> &[String] {
        &self.bridge_prepare_args
    }

    /// Returns the dev server URL, if configured.
    pub fn dev_server_url(&self) -> Option<&str> {
        self.dev_server_url.as_deref()
    }

    /// Returns the arguments forwarded to the native build tool.
    pub fn pass_through(&self) -> &[String] {
        &self.pass_through
    }

    /// Returns true when packaging is skipped after bridge preparation.
    pub fn skip_pkg(&self) -> bool {
        self.skip_pkg
    }

    /// Returns true when the IDE should be opened instead of building.
    pub fn open_ide(&self) -> bool {
        self.open_ide
    }

    /// Returns true when a skipped run leaves the bridge config prepared.
    pub fn keep_prepared(&self) -> bool {
        self.keep_prepared
    }
}

/// Builder for constructing [`BuildContext`].
///
/// `target` and `project_dir` are required; everything else has defaults
/// derived from the project directory.
#[derive(Default)]
pub struct ContextBuilder {
    target: Option<TargetPlatform>,
    debug: bool,
    project_dir: Option<PathBuf>,
    bridge_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    dist_dir: Option<PathBuf>,
    bundler_command: Option<String>,
    bundler_args: Option<Vec<String>>,
    bridge_bin: Option<String>,
    bridge_config_name: Option<String>,
    bridge_prepare_args: Option<Vec<String>>,
    dev_server_url: Option<String>,
    pass_through: Vec<String>,
    skip_pkg: bool,
    open_ide: bool,
    keep_prepared: bool,
}

impl ContextBuilder {
    /// Creates a new context builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the target platform. Required.
    pub fn target(mut self, target: TargetPlatform) -> Self {
        self.target = Some(target);
        self
    }

    /// Selects a debug (true) or release (false) build. Default: release.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sets the application project root. Required.
    pub fn project_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the native-bridge project directory.
    ///
    /// Default: `<project_dir>/native`
    pub fn bridge_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.bridge_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the root output directory.
    ///
    /// Default: `<project_dir>/dist`
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the bundler output directory.
    ///
    /// Default: `<output_dir>/www`
    pub fn dist_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dist_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the bundler command. Default: `npm`
    pub fn bundler_command(mut self, command: impl Into<String>) -> Self {
        self.bundler_command = Some(command.into());
        self
    }

    /// Sets the bundler arguments. Default: `run build`
    pub fn bundler_args(mut self, args: Vec<String>) -> Self {
        self.bundler_args = Some(args);
        self
    }

    /// Sets the bridge CLI binary name. Default: `bridge`
    pub fn bridge_bin(mut self, bin: impl Into<String>) -> Self {
        self.bridge_bin = Some(bin.into());
        self
    }

    /// Sets the bridge config file name inside the bridge directory.
    ///
    /// Default: `bridge.config.json`
    pub fn bridge_config_name(mut self, name: impl Into<String>) -> Self {
        self.bridge_config_name = Some(name.into());
        self
    }

    /// Sets the bridge CLI preparation arguments.
    ///
    /// Default: `sync <platform>`
    pub fn bridge_prepare_args(mut self, args: Vec<String>) -> Self {
        self.bridge_prepare_args = Some(args);
        self
    }

    /// Sets the dev server URL injected into debug builds.
    pub fn dev_server_url(mut self, url: impl Into<String>) -> Self {
        self.dev_server_url = Some(url.into());
        self
    }

    /// Sets the arguments forwarded verbatim to the native build tool.
    pub fn pass_through(mut self, args: Vec<String>) -> Self {
        self.pass_through = args;
        self
    }

    /// Skip the native package build after bridge preparation.
    pub fn skip_pkg(mut self, skip: bool) -> Self {
        self.skip_pkg = skip;
        self
    }

    /// Open the platform IDE on the prepared project instead of building.
    pub fn open_ide(mut self, open: bool) -> Self {
        self.open_ide = open;
        self
    }

    /// With `skip_pkg`, leave the bridge config prepared for inspection.
    pub fn keep_prepared(mut self, keep: bool) -> Self {
        self.keep_prepared = keep;
        self
    }

    /// Builds the context.
    ///
    /// # Errors
    ///
    /// Returns an error if `target` or `project_dir` is missing.
    pub fn build(self) -> super::Result<BuildContext> {
        let target = self.target.context("target is required")?;
        let project_dir = self.project_dir.context("project_dir is required")?;

        let bridge_dir = self
            .bridge_dir
            .unwrap_or_else(|| project_dir.join("native"));
        let output_dir = self.output_dir.unwrap_or_else(|| project_dir.join("dist"));
        let dist_dir = self.dist_dir.unwrap_or_else(|| output_dir.join("www"));
        let bridge_config_path = bridge_dir.join(
            self.bridge_config_name
                .as_deref()
                .unwrap_or("bridge.config.json"),
        );
        let bridge_prepare_args = self.bridge_prepare_args.unwrap_or_else(|| {
            vec!["sync".to_string(), target.as_str().to_string()]
        });

        Ok(BuildContext {
            target,
            debug: self.debug,
            project_dir,
            bridge_dir,
            output_dir,
            dist_dir,
            bundler_command: self.bundler_command.unwrap_or_else(|| "npm".to_string()),
            bundler_args: self
                .bundler_args
                .unwrap_or_else(|| vec!["run".to_string(), "build".to_string()]),
            bridge_bin: self.bridge_bin.unwrap_or_else(|| "bridge".to_string()),
            bridge_config_path,
            bridge_prepare_args,
            dev_server_url: self.dev_server_url,
            pass_through: self.pass_through,
            skip_pkg: self.skip_pkg,
            open_ide: self.open_ide,
            keep_prepared: self.keep_prepared,
        })
    }
}
