//! OxiLZW CLI - seeded LZW compression
//!
//! Compresses files into a dictionary header plus a packed code blob,
//! restores them, and benchmarks the round trip under several dictionary caps.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{cmd_bench, cmd_compress, cmd_decompress};
use oxilzw::LzwConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxilzw")]
#[command(author, version, about = "Seeded LZW compression - Pure Rust")]
#[command(long_about = "
OxiLZW compresses a file with LZW, seeding the dictionary with the bytes
that occur in the file. The result is an artifact of two files:
code.txt (bit length, code width, seed dictionary) and data.bin
(packed codes).

Set OXILZW_LOG (e.g. OXILZW_LOG=debug) to control log output.

Examples:
  oxilzw compress book.txt -o out
  oxilzw compress lena.bmp -o out --max-dict-size 4096
  oxilzw decompress restored.txt -i out
  oxilzw bench lena.bmp norm_wiki_sample.txt wiki_sample.txt
  oxilzw bench wiki_sample.txt --json
")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into an artifact
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Directory receiving code.txt and data.bin
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Maximum dictionary size (unbounded if omitted)
        #[arg(short, long)]
        max_dict_size: Option<usize>,
    },

    /// Restore a file from an artifact
    #[command(alias = "d")]
    Decompress {
        /// File to write
        output: PathBuf,

        /// Directory holding code.txt and data.bin
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// Maximum dictionary size used when compressing
        ///
        /// Must match the value given to compress; a smaller cap makes the
        /// codes undecodable. Omit it for artifacts compressed without a cap.
        #[arg(short, long)]
        max_dict_size: Option<usize>,
    },

    /// Round-trip files under several dictionary caps and report savings
    #[command(alias = "b")]
    Bench {
        /// Files to benchmark
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory for the intermediate artifact
        #[arg(short, long, default_value = ".")]
        work_dir: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            max_dict_size,
        } => cmd_compress(&input, &output, LzwConfig::new(max_dict_size), cli.verbose),
        Commands::Decompress {
            output,
            input,
            max_dict_size,
        } => cmd_decompress(&input, &output, LzwConfig::new(max_dict_size), cli.verbose),
        Commands::Bench {
            files,
            work_dir,
            json,
        } => cmd_bench(&files, &work_dir, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
