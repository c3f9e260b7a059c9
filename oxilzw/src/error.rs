//! LZW-specific error types.

use thiserror::Error;

/// LZW compression/decompression errors.
#[derive(Debug, Error)]
pub enum LzwError {
    /// The input holds no symbols, so there is nothing to seed or encode.
    #[error("Empty input: no symbols to seed the dictionary")]
    EmptyInput,

    /// A code resolves neither to a dictionary entry nor to the pending
    /// reference (the code about to be assigned).
    #[error("Dictionary desync: code {code} at position {position} (next code {next_code})")]
    DictionaryDesync {
        /// The offending code.
        code: u32,
        /// Code the decoder would assign next.
        next_code: u32,
        /// Index of the code in the code stream.
        position: usize,
    },

    /// Persisted artifact is missing a section or is internally inconsistent.
    #[error("Malformed artifact: {message}")]
    MalformedArtifact {
        /// Description of the inconsistency.
        message: String,
    },

    /// Input symbol that the seed dictionary does not cover.
    #[error("Symbol {0:#04x} is not in the seed dictionary")]
    UnknownSymbol(u8),

    /// Invalid code width specified.
    #[error("Invalid code width: {0} (must be 1-32)")]
    InvalidCodeWidth(u8),

    /// A code does not fit in the requested width.
    #[error("Code {code} does not fit in {width} bits")]
    CodeOverflow {
        /// The code that overflowed.
        code: u32,
        /// Width it was packed with.
        width: u8,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LzwError {
    /// Create a `MalformedArtifact` error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedArtifact {
            message: message.into(),
        }
    }
}

/// Result type for LZW operations.
pub type Result<T> = std::result::Result<T, LzwError>;
