//! Compress command implementation.

use oxilzw::{ArtifactPaths, LzwConfig, compress};
use std::fs;
use std::path::Path;

pub fn cmd_compress(
    input: &Path,
    output_dir: &Path,
    config: LzwConfig,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let artifact = compress(&data, config)?;

    fs::create_dir_all(output_dir)?;
    let paths = ArtifactPaths::in_dir(output_dir);
    artifact.save(&paths)?;

    println!(
        "Compressed {} -> {} ({} -> {} bytes)",
        input.display(),
        paths.blob.display(),
        data.len(),
        artifact.encoded_size()
    );
    if verbose {
        println!("  Dictionary: {}", paths.header.display());
        println!("  Seed symbols: {}", artifact.seed.len());
        println!("  Code width: {} bits", artifact.width());
        println!("  Bit length: {}", artifact.bit_len());
    }

    Ok(())
}
