//! Decompress command implementation.

use oxilzw::{Artifact, ArtifactPaths, LzwConfig, decompress};
use std::fs;
use std::path::Path;

pub fn cmd_decompress(
    input_dir: &Path,
    output: &Path,
    config: LzwConfig,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let paths = ArtifactPaths::in_dir(input_dir);
    let artifact = Artifact::load(&paths)?;
    let data = decompress(&artifact, config)?;

    fs::write(output, &data)?;

    println!(
        "Decompressed {} -> {} ({} bytes)",
        paths.blob.display(),
        output.display(),
        data.len()
    );
    if verbose {
        println!("  Codes: {}", artifact.bits.code_count());
        println!("  Code width: {} bits", artifact.width());
    }

    Ok(())
}
