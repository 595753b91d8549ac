//! Version command - show version information.

use anyhow::Result;
use vlqmap_executor::wasm::ABI_VERSION;

/// Version information.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the version command.
pub fn run() -> Result<()> {
    println!("vlqmap - Source-map mappings decoder");
    println!();
    println!("Version:     {}", VERSION);
    println!("Module ABI:  {}", ABI_VERSION);
    println!(
        "Platform:    {} / {}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    println!();
    println!("Components:");
    println!("  vlqmap-core      VLQ codec, segment state machine, delegates");
    println!("  vlqmap-executor  Decoder backends, benchmark harness");
    println!("  vlqmap-cli       Command-line interface");

    Ok(())
}
