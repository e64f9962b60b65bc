//! Example: reading the manifest embedded in the running executable
//!
//! Run with: `cargo run --example read_self -- [HOST_FILE]`
//!
//! Without an argument the example inspects its own binary, which normally
//! carries no trailer and reports why.

use std::io::Read;

use trailzip_core::ArchiveFs;
use trailzip_core::BootstrapManifest;
use trailzip_core::open_archive_fs;
use trailzip_core::read_manifest;
use trailzip_core::trailer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = match std::env::args_os().nth(1) {
        Some(arg) => arg.into(),
        None => std::env::current_exe()?,
    };

    // Example 1: footer layout without opening the archive
    println!("Example 1: Inspect trailer");
    match trailer::inspect(&path) {
        Ok(report) => {
            println!("  Host bytes:    {}", report.host_len());
            println!("  Archive bytes: {}", report.region.len);
            println!("  Digest match:  {}", report.digest_matches());
        }
        Err(e) => {
            println!("  No usable trailer: {e}");
            return Ok(());
        }
    }

    // Example 2: typed manifest decode
    println!("\nExample 2: Read manifest");
    match read_manifest::<BootstrapManifest, _>(&path) {
        Ok(manifest) => {
            println!("  Version:   {}", manifest.semver);
            println!("  Addresses: {}", manifest.addresses.join(", "));
        }
        Err(e) => println!("  {e}"),
    }

    // Example 3: browse the embedded filesystem
    println!("\nExample 3: List entries");
    let mut fs = open_archive_fs(&path)?;
    let names: Vec<String> = fs.entries().iter().map(|e| e.name.clone()).collect();
    for name in &names {
        let mut data = Vec::new();
        fs.open(name)?.read_to_end(&mut data)?;
        println!("  {name} ({} bytes)", data.len());
    }
    fs.close();

    Ok(())
}
