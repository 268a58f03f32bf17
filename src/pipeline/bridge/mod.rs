//! Native-bridge collaborators: the bridge CLI runner and the bridge
//! config file it operates on.

mod cli;
mod config_file;

pub use cli::BridgeCliRunner;
pub use config_file::BridgeConfigFile;
