//! Bench command implementation.
//!
//! Runs the full persist-and-restore round trip for every file under each
//! dictionary cap and reports how much space the artifact saves.

use crate::utils::{cap_label, compression_percent, create_progress_bar, megabytes};
use oxilzw::{Artifact, ArtifactPaths, LzwConfig, build_dictionary, decode, encode};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Caps exercised for every file.
pub const BENCH_CONFIGS: [LzwConfig; 3] = [LzwConfig::UNBOUNDED, LzwConfig::LARGE, LzwConfig::SMALL];

/// Result of one file/cap run.
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    /// Input file.
    pub file: PathBuf,
    /// Dictionary cap, `None` when unbounded.
    pub max_dict_size: Option<usize>,
    /// Input size in bytes.
    pub original_bytes: u64,
    /// Blob size in bytes.
    pub encoded_bytes: u64,
    /// Input size in MB.
    pub original_mb: f64,
    /// Blob size in MB.
    pub encoded_mb: f64,
    /// Space saved in percent.
    pub compression: f64,
    /// Code width in bits.
    pub code_width: u8,
    /// Number of seed symbols.
    pub seed_len: usize,
}

impl BenchReport {
    fn print(&self) {
        println!("------------------------------------");
        println!(
            "FILE: {} | MAX_DICT_SIZE: {}",
            self.file.display(),
            cap_label(self.max_dict_size)
        );
        println!("Original {} size: {} MB", self.file.display(), self.original_mb);
        println!("Encoded {} size: {} MB", self.file.display(), self.encoded_mb);
        println!("Compression: {}%", self.compression);
        println!("------------------------------------");
    }
}

pub fn cmd_bench(
    files: &[PathBuf],
    work_dir: &Path,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    for file in files {
        if !file.is_file() {
            return Err(format!(
                "File \"{}\" not found! LZW compression impossible!",
                file.display()
            )
            .into());
        }
    }

    fs::create_dir_all(work_dir)?;
    let paths = ArtifactPaths::in_dir(work_dir);

    let pb = create_progress_bar((files.len() * BENCH_CONFIGS.len()) as u64, !json);
    let mut reports = Vec::with_capacity(files.len() * BENCH_CONFIGS.len());

    for file in files {
        for config in BENCH_CONFIGS {
            pb.set_message(format!("{} ({})", file.display(), cap_label(config.max_dict_size)));
            let report = run_with(file, config, &paths)?;
            pb.inc(1);

            if !json {
                pb.suspend(|| report.print());
            }
            reports.push(report);
        }
    }
    pb.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}

/// One build -> encode -> pack -> save -> load -> unpack -> decode cycle.
pub fn run_with(
    file: &Path,
    config: LzwConfig,
    paths: &ArtifactPaths,
) -> Result<BenchReport, Box<dyn std::error::Error>> {
    let data = fs::read(file)?;

    let seed = build_dictionary(&data)?;
    let stream = encode(&data, &seed, config)?;
    let artifact = Artifact::new(seed, stream.pack()?);
    artifact.save(paths)?;

    let loaded = Artifact::load(paths)?;
    if loaded != artifact {
        return Err(format!(
            "artifact for \"{}\" changed between save and load",
            file.display()
        )
        .into());
    }

    let decoded = decode(&loaded.codes()?, &loaded.seed, config)?;
    if decoded != data {
        return Err(format!(
            "LZW compression failed for file \"{}\" with max dictionary size: {}",
            file.display(),
            cap_label(config.max_dict_size)
        )
        .into());
    }

    let original_bytes = fs::metadata(file)?.len();
    let encoded_bytes = fs::metadata(&paths.blob)?.len();
    debug!(
        file = %file.display(),
        codes = stream.codes.len(),
        max_code = stream.max_code,
        "round trip verified"
    );
    info!(
        file = %file.display(),
        cap = %cap_label(config.max_dict_size),
        original_bytes,
        encoded_bytes,
        "bench run finished"
    );

    Ok(BenchReport {
        file: file.to_path_buf(),
        max_dict_size: config.max_dict_size,
        original_bytes,
        encoded_bytes,
        original_mb: megabytes(original_bytes),
        encoded_mb: megabytes(encoded_bytes),
        compression: compression_percent(original_bytes, encoded_bytes),
        code_width: loaded.width(),
        seed_len: loaded.seed.len(),
    })
}
