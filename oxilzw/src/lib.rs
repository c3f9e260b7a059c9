//! # OxiLZW: Seeded LZW Compression
//!
//! This crate provides LZW (Lempel-Ziv-Welch) compression whose initial
//! dictionary is built from the input itself instead of the fixed 256-entry
//! byte table of TIFF/GIF LZW.
//!
//! ## Pipeline
//!
//! ```text
//! input ──► build_dictionary ──► encode ──► pack ──► Artifact::save
//!                                                          │
//! output ◄── decode ◄── unpack ◄──────────────── Artifact::load
//! ```
//!
//! - **Seed dictionary**: one code per distinct byte, in first-occurrence
//!   order starting at 0
//! - **Adaptive growth**: one new entry per emitted code, optionally capped
//!   by [`LzwConfig::max_dict_size`]; a capped dictionary is frozen, never reset
//! - **Fixed-width codes**: every code is packed MSB-first with the smallest
//!   width `W` such that `2^W > max code`
//! - **Artifact**: a text header (bit length, width, seed table) plus a raw
//!   blob of packed codes
//!
//! ## Example
//!
//! ```rust
//! use oxilzw::{LzwConfig, compress, decompress};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! let artifact = compress(original, LzwConfig::UNBOUNDED).unwrap();
//! let decompressed = decompress(&artifact, LzwConfig::UNBOUNDED).unwrap();
//!
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Step by step
//!
//! ```rust
//! use oxilzw::{LzwConfig, build_dictionary, decode, encode, pack, unpack};
//!
//! let input = b"ABABABA";
//! let seed = build_dictionary(input).unwrap();
//! assert_eq!(seed.code(b'A'), Some(0));
//! assert_eq!(seed.code(b'B'), Some(1));
//!
//! let stream = encode(input, &seed, LzwConfig::UNBOUNDED).unwrap();
//! assert_eq!(stream.codes, vec![0, 1, 2, 4]);
//!
//! let packed = pack(&stream.codes, stream.max_code).unwrap();
//! assert_eq!(packed.width, 3);
//! assert_eq!(packed.bit_len, 12);
//!
//! let codes = unpack(&packed.bytes, packed.bit_len, packed.width).unwrap();
//! let output = decode(&codes, &seed, LzwConfig::UNBOUNDED).unwrap();
//! assert_eq!(output, input);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod artifact;
mod bitpack;
mod config;
mod decoder;
mod dictionary;
mod encoder;
mod error;
mod seed;

pub use artifact::{
    Artifact, ArtifactHeader, ArtifactPaths, BLOB_FILE_NAME, HEADER_FILE_NAME,
};
pub use bitpack::{
    MAX_CODE_WIDTH, MsbBitReader, MsbBitWriter, PackedBits, code_width, pack, pack_with_width,
    unpack,
};
pub use config::LzwConfig;
pub use decoder::LzwDecoder;
pub use encoder::{EncodedStream, LzwEncoder};
pub use error::{LzwError, Result};
pub use seed::SeedDictionary;

/// Build the seed dictionary for `input`.
///
/// Fails with `EmptyInput` if `input` is empty.
pub fn build_dictionary(input: &[u8]) -> Result<SeedDictionary> {
    SeedDictionary::build(input)
}

/// Encode `input` starting from `seed`.
///
/// # Example
///
/// ```rust
/// use oxilzw::{LzwConfig, build_dictionary, encode};
///
/// let input = b"AAAA";
/// let seed = build_dictionary(input).unwrap();
/// let stream = encode(input, &seed, LzwConfig::UNBOUNDED).unwrap();
/// assert_eq!(stream.codes, vec![0, 1, 0]);
/// ```
pub fn encode(input: &[u8], seed: &SeedDictionary, config: LzwConfig) -> Result<EncodedStream> {
    LzwEncoder::new(seed, config).encode(input)
}

/// Decode `codes` starting from `seed`.
///
/// `config` must carry the same dictionary cap the stream was encoded with.
pub fn decode(codes: &[u32], seed: &SeedDictionary, config: LzwConfig) -> Result<Vec<u8>> {
    LzwDecoder::new(seed, config).decode(codes)
}

/// Run the whole compression pipeline and return the artifact.
///
/// # Example
///
/// ```rust
/// use oxilzw::{LzwConfig, compress};
///
/// let data = b"TOBEORNOTTOBEORTOBEORNOT";
/// let artifact = compress(data, LzwConfig::SMALL).unwrap();
/// assert!(artifact.encoded_size() < data.len());
/// ```
pub fn compress(input: &[u8], config: LzwConfig) -> Result<Artifact> {
    let seed = build_dictionary(input)?;
    let bits = encode(input, &seed, config)?.pack()?;
    Ok(Artifact::new(seed, bits))
}

/// Reconstruct the original input from an artifact.
pub fn decompress(artifact: &Artifact, config: LzwConfig) -> Result<Vec<u8>> {
    let codes = artifact.codes()?;
    decode(&codes, &artifact.seed, config)
}
