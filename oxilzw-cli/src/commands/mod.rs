//! Command implementations for OxiLZW CLI.

pub mod bench;
pub mod compress;
pub mod decompress;

pub use bench::cmd_bench;
pub use compress::cmd_compress;
pub use decompress::cmd_decompress;
