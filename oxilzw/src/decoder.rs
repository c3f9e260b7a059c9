//! LZW decoder (decompression).
//!
//! The decoder rebuilds the encoder's dictionary one step behind it: the
//! entry the encoder adds while emitting code `i` is only known to the
//! decoder once code `i + 1` arrives. When code `i + 1` is that very entry
//! (the `cScSc` pattern), it is synthesized as `prev + first(prev)`.

use crate::config::LzwConfig;
use crate::dictionary::LzwDictionary;
use crate::error::{LzwError, Result};
use crate::seed::SeedDictionary;
use tracing::debug;

/// LZW decoder for decompression.
#[derive(Debug, Clone)]
pub struct LzwDecoder {
    /// Seed copied into every pass.
    seed: SeedDictionary,
    /// Configuration; must match the encoder's.
    config: LzwConfig,
}

impl LzwDecoder {
    /// Create a decoder over `seed`.
    pub fn new(seed: &SeedDictionary, config: LzwConfig) -> Self {
        Self {
            seed: seed.clone(),
            config,
        }
    }

    /// Decode a code stream back into the original bytes.
    ///
    /// Fails with `DictionaryDesync` on a code that is neither assigned nor
    /// the next code to be assigned, and with `EmptyInput` on an empty
    /// stream.
    pub fn decode(&self, codes: &[u32]) -> Result<Vec<u8>> {
        self.decode_with_dictionary(codes).map(|(output, _)| output)
    }

    /// Decode and hand back the final working dictionary.
    pub(crate) fn decode_with_dictionary(&self, codes: &[u32]) -> Result<(Vec<u8>, LzwDictionary)> {
        let mut dict = LzwDictionary::new(&self.seed, self.config);
        let mut output = Vec::with_capacity(codes.len() * 2);

        let (&first, rest) = codes.split_first().ok_or(LzwError::EmptyInput)?;
        if !dict.write_sequence(first, &mut output) {
            return Err(desync(&dict, first, 0));
        }

        let mut prev = first;
        for (offset, &code) in rest.iter().enumerate() {
            let first_symbol = if dict.contains(code) {
                dict.first_symbol(code)
            } else if code == dict.next_code() && !dict.is_full() {
                // Pending reference: the entry being defined right now.
                dict.first_symbol(prev)
            } else {
                None
            };
            let Some(first_symbol) = first_symbol else {
                return Err(desync(&dict, code, offset + 1));
            };

            dict.add_entry_decode(prev, first_symbol);

            if !dict.write_sequence(code, &mut output) {
                return Err(desync(&dict, code, offset + 1));
            }
            prev = code;
        }

        debug!(
            codes = codes.len(),
            output_len = output.len(),
            dict_len = dict.len(),
            grown = dict.grown(),
            "lzw decode finished"
        );

        Ok((output, dict))
    }
}

fn desync(dict: &LzwDictionary, code: u32, position: usize) -> LzwError {
    LzwError::DictionaryDesync {
        code,
        next_code: dict.next_code(),
        position,
    }
}
