//! Seed dictionary: the initial single-symbol code table.
//!
//! Codes are assigned to the distinct bytes of the input in order of first
//! appearance, starting at 0. Both the encoder and the decoder start from
//! the same seed and grow private copies of it.

use crate::error::{LzwError, Result};

/// Single-symbol code assignment shared by encoder and decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDictionary {
    /// Symbols indexed by code.
    symbols: Vec<u8>,
    /// Reverse lookup: symbol -> code.
    codes: [Option<u32>; 256],
}

impl SeedDictionary {
    /// Build the seed dictionary from the input.
    ///
    /// Returns `LzwError::EmptyInput` when `input` is empty.
    pub fn build(input: &[u8]) -> Result<Self> {
        if input.is_empty() {
            return Err(LzwError::EmptyInput);
        }

        let mut seed = Self {
            symbols: Vec::new(),
            codes: [None; 256],
        };

        for &symbol in input {
            if seed.codes[symbol as usize].is_none() {
                seed.codes[symbol as usize] = Some(seed.symbols.len() as u32);
                seed.symbols.push(symbol);
            }
            // Every byte value already seen; nothing more to learn.
            if seed.symbols.len() == 256 {
                break;
            }
        }

        Ok(seed)
    }

    /// Rebuild a seed dictionary from persisted `(symbol, code)` pairs.
    ///
    /// Pairs may come in any order, but the codes must be exactly
    /// `0..pairs.len()` and every symbol must appear once.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u32)>,
    {
        let mut slots: Vec<Option<u8>> = Vec::new();
        let mut codes = [None; 256];

        for (symbol, code) in pairs {
            if codes[symbol as usize].is_some() {
                return Err(LzwError::malformed(format!(
                    "symbol {symbol} appears twice in the dictionary"
                )));
            }
            let index = code as usize;
            if index >= 256 {
                return Err(LzwError::malformed(format!(
                    "seed code {code} out of range for a byte alphabet"
                )));
            }
            if index >= slots.len() {
                slots.resize(index + 1, None);
            }
            if slots[index].is_some() {
                return Err(LzwError::malformed(format!(
                    "code {code} assigned to more than one symbol"
                )));
            }
            slots[index] = Some(symbol);
            codes[symbol as usize] = Some(code);
        }

        if slots.is_empty() {
            return Err(LzwError::malformed("dictionary table is empty"));
        }

        let symbols = slots
            .into_iter()
            .enumerate()
            .map(|(code, slot)| {
                slot.ok_or_else(|| {
                    LzwError::malformed(format!("seed codes are not dense: code {code} missing"))
                })
            })
            .collect::<Result<Vec<u8>>>()?;

        Ok(Self { symbols, codes })
    }

    /// Number of seed entries.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the seed holds no entries. Never true for a built seed.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Code assigned to `symbol`, if it occurred in the input.
    pub fn code(&self, symbol: u8) -> Option<u32> {
        self.codes[symbol as usize]
    }

    /// Symbol behind a seed `code`.
    pub fn symbol(&self, code: u32) -> Option<u8> {
        self.symbols.get(code as usize).copied()
    }

    /// Iterate `(symbol, code)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.symbols
            .iter()
            .enumerate()
            .map(|(code, &symbol)| (symbol, code as u32))
    }
}
