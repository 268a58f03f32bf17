//! bridgepack - Mobile packaging pipeline for web app bundles.
//!
//! This binary compiles a front-end bundle and packages it for Android/iOS
//! through a third-party native-bridge CLI, with proper cleanup of the
//! bridge configuration on every exit path.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match bridgepack::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
