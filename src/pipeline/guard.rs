//! RAII guard for the prepared bridge config.

use super::stage::BridgeConfig;
use std::sync::Arc;

/// Scoped ownership of the "bridge config is prepared" state.
///
/// Created before the config is first mutated; on drop it resets the
/// config to its source-controlled contents. Because every exit path out
/// of the staged pipeline (normal return, propagated error, cancellation
/// of the staged future on shutdown) drops the guard, the reset runs on
/// all of them, and [`BridgeConfig::reset`] itself is at-most-once.
pub struct ConfigGuard {
    config: Arc<dyn BridgeConfig>,
    armed: bool,
}

impl ConfigGuard {
    /// Arms a guard over the given config.
    pub fn new(config: Arc<dyn BridgeConfig>) -> Self {
        Self {
            config,
            armed: true,
        }
    }

    /// Disarms the guard, leaving the config in its prepared state.
    ///
    /// Used by the skip-packaging path when the caller asked to inspect
    /// the prepared native project.
    pub fn keep(mut self) {
        self.armed = false;
    }
}

impl Drop for ConfigGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(e) = self.config.reset() {
            log::warn!("failed to restore bridge config: {}", e);
        }
    }
}
