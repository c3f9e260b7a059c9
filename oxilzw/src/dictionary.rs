//! LZW dictionary (code table) management.
//!
//! Every entry is stored as `(prefix code, last symbol)`, so a sequence of
//! any length costs one table slot and lookups hash a fixed-size key rather
//! than the growing byte string.

use crate::config::LzwConfig;
use crate::seed::SeedDictionary;
use std::collections::HashMap;

/// One interned sequence.
#[derive(Debug, Clone, Copy)]
struct Entry {
    /// Code of the sequence minus its last symbol; `None` for seed entries.
    prefix: Option<u32>,
    /// Last symbol of the sequence.
    symbol: u8,
    /// First symbol of the sequence.
    first: u8,
    /// Length of the sequence in symbols.
    len: usize,
}

/// Working dictionary for one encode or decode pass.
///
/// Starts as a private copy of the seed and grows by one entry per step
/// until the configured cap is reached.
#[derive(Debug)]
pub struct LzwDictionary {
    /// Code table: code -> entry.
    table: Vec<Entry>,
    /// Reverse lookup: (prefix code, symbol) -> code (for encoding only).
    reverse: HashMap<(u32, u8), u32>,
    /// Seed lookup: symbol -> code.
    seed: SeedDictionary,
    /// Configuration.
    config: LzwConfig,
}

impl LzwDictionary {
    /// Create a working dictionary seeded with single-symbol codes.
    pub fn new(seed: &SeedDictionary, config: LzwConfig) -> Self {
        let table = seed
            .iter()
            .map(|(symbol, _)| Entry {
                prefix: None,
                symbol,
                first: symbol,
                len: 1,
            })
            .collect();

        Self {
            table,
            reverse: HashMap::new(),
            seed: seed.clone(),
            config,
        }
    }

    /// Code of a single symbol.
    pub fn seed_code(&self, symbol: u8) -> Option<u32> {
        self.seed.code(symbol)
    }

    /// Find the code for `prefix` extended by `symbol` (for encoding).
    pub fn find_code(&self, prefix: u32, symbol: u8) -> Option<u32> {
        self.reverse.get(&(prefix, symbol)).copied()
    }

    /// Add `prefix + symbol` to the dictionary (for encoding).
    ///
    /// Returns the assigned code, or `None` if the dictionary is capped.
    pub fn add_entry(&mut self, prefix: u32, symbol: u8) -> Option<u32> {
        let code = self.add_entry_decode(prefix, symbol)?;
        self.reverse.insert((prefix, symbol), code);
        Some(code)
    }

    /// Add `prefix + symbol` to the dictionary (for decoding).
    ///
    /// Similar to `add_entry` but doesn't update the reverse map.
    pub fn add_entry_decode(&mut self, prefix: u32, symbol: u8) -> Option<u32> {
        if self.is_full() {
            return None;
        }
        let parent = *self.table.get(prefix as usize)?;

        let code = self.next_code();
        self.table.push(Entry {
            prefix: Some(prefix),
            symbol,
            first: parent.first,
            len: parent.len + 1,
        });

        Some(code)
    }

    /// Whether `code` is assigned.
    #[inline]
    pub fn contains(&self, code: u32) -> bool {
        (code as usize) < self.table.len()
    }

    /// First symbol of the sequence behind `code`.
    #[inline]
    pub fn first_symbol(&self, code: u32) -> Option<u8> {
        self.table.get(code as usize).map(|entry| entry.first)
    }

    /// Append the sequence behind `code` to `out`.
    ///
    /// Returns `false` (leaving `out` untouched) for an unknown code.
    pub fn write_sequence(&self, code: u32, out: &mut Vec<u8>) -> bool {
        let Some(entry) = self.table.get(code as usize) else {
            return false;
        };

        let start = out.len();
        out.resize(start + entry.len, 0);

        // Walk the prefix chain back to front.
        let mut cursor = Some(code);
        let mut pos = out.len();
        while let Some(current) = cursor {
            let entry = self.table[current as usize];
            pos -= 1;
            out[pos] = entry.symbol;
            cursor = entry.prefix;
        }
        debug_assert_eq!(pos, start);

        true
    }

    /// The sequence behind `code`.
    #[cfg(test)]
    pub fn sequence(&self, code: u32) -> Option<Vec<u8>> {
        let mut out = Vec::new();
        self.write_sequence(code, &mut out).then_some(out)
    }

    /// Check if the dictionary has reached its cap.
    #[inline]
    pub fn is_full(&self) -> bool {
        !self.config.allows_growth(self.table.len())
    }

    /// Get the next code that will be assigned.
    #[inline]
    pub fn next_code(&self) -> u32 {
        self.table.len() as u32
    }

    /// Number of entries, seed included.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Number of entries added on top of the seed.
    pub fn grown(&self) -> usize {
        self.table.len() - self.seed.len()
    }
}
