//! Version command implementation

use crate::config::{WORKSPACE_CONFIG_FILE, loader};
use crate::error::Result;

/// Run version command
pub fn run() -> Result<()> {
    println!("launchkit {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Minimum Rust version: {}", minimum_rust_version());
    println!("  Profile: {}", build_profile());
    println!();
    println!("Configuration:");
    println!("  Workspace file: {}", WORKSPACE_CONFIG_FILE);
    match loader::user_config_path() {
        Some(path) => println!("  User file: {}", path.display()),
        None => println!("  User file: (no config directory on this platform)"),
    }

    Ok(())
}

fn minimum_rust_version() -> &'static str {
    env!("CARGO_PKG_RUST_VERSION")
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
