//! The bridge configuration file.
//!
//! `prepare` injects the web dir and, for debug builds, dev-server/SSL
//! overrides; `finalize_for_build` rewrites those overrides with
//! production-safe defaults once bridge preparation has succeeded;
//! `reset` restores the source-controlled contents exactly once.

use crate::pipeline::error::{Context, ErrorExt, Result};
use crate::pipeline::stage::BridgeConfig;
use crate::pipeline::{BuildContext, TargetPlatform};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::path::PathBuf;

/// JSON bridge config file with saved-original restore semantics.
pub struct BridgeConfigFile {
    path: PathBuf,
    // Raw contents as read before the first mutation. Taken (not cloned)
    // by reset, which makes the restore at-most-once.
    saved: Mutex<Option<String>>,
}

impl BridgeConfigFile {
    /// Wraps the config file at `path`. Nothing is read until `prepare`.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            saved: Mutex::new(None),
        }
    }

    fn read(&self) -> Result<(String, Value)> {
        let raw = std::fs::read_to_string(&self.path)
            .fs_context("reading bridge config", &self.path)?;
        let doc: Value = serde_json::from_str(&raw)?;
        Ok((raw, doc))
    }

    fn write(&self, doc: &Value) -> Result<()> {
        let mut rendered = serde_json::to_string_pretty(doc)?;
        rendered.push('\n');
        std::fs::write(&self.path, rendered).fs_context("writing bridge config", &self.path)
    }
}

impl BridgeConfig for BridgeConfigFile {
    fn prepare(&self, ctx: &BuildContext) -> Result<()> {
        let (raw, mut doc) = self.read()?;
        let root = doc
            .as_object_mut()
            .context("bridge config root is not a JSON object")?;

        root.insert("webDir".to_string(), json!(ctx.dist_dir().display().to_string()));

        let server = root
            .entry("server")
            .or_insert_with(|| json!({}))
            .as_object_mut()
            .context("bridge config `server` is not a JSON object")?;

        if ctx.debug() {
            if let Some(url) = ctx.dev_server_url() {
                server.insert("url".to_string(), json!(url));
            }
            if ctx.target() == TargetPlatform::Android {
                server.insert("cleartext".to_string(), json!(true));
            }
        }

        // Save before the write so a failed write still restores.
        *self.saved.lock() = Some(raw);
        self.write(&doc)?;
        log::debug!("bridge config prepared at {}", self.path.display());
        Ok(())
    }

    fn finalize_for_build(&self, target: TargetPlatform) -> Result<()> {
        let (_, mut doc) = self.read()?;
        let root = doc
            .as_object_mut()
            .context("bridge config root is not a JSON object")?;

        let server = root
            .entry("server")
            .or_insert_with(|| json!({}))
            .as_object_mut()
            .context("bridge config `server` is not a JSON object")?;

        server.remove("url");
        server.insert("cleartext".to_string(), json!(false));
        if target == TargetPlatform::Android {
            server.insert("androidScheme".to_string(), json!("https"));
        }

        self.write(&doc)?;
        log::debug!("bridge config finalized for {} build", target);
        Ok(())
    }

    fn reset(&self) -> Result<()> {
        if let Some(original) = self.saved.lock().take() {
            std::fs::write(&self.path, original)
                .fs_context("restoring bridge config", &self.path)?;
            log::debug!("bridge config restored at {}", self.path.display());
        }
        Ok(())
    }
}
