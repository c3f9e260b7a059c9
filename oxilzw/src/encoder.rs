//! LZW encoder (compression).

use crate::bitpack::{PackedBits, code_width, pack};
use crate::config::LzwConfig;
use crate::dictionary::LzwDictionary;
use crate::error::{LzwError, Result};
use crate::seed::SeedDictionary;
use tracing::debug;

/// Output of one encoding pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedStream {
    /// Emitted codes, in order.
    pub codes: Vec<u32>,
    /// Largest emitted code; sizes the packed width.
    pub max_code: u32,
    /// Length in symbols of the longest emitted match.
    pub longest_match: usize,
}

impl EncodedStream {
    /// Code width needed to pack this stream.
    pub fn width(&self) -> u8 {
        code_width(self.max_code)
    }

    /// Pack the codes at their minimal width.
    pub fn pack(&self) -> Result<PackedBits> {
        pack(&self.codes, self.max_code)
    }
}

/// State of the matching loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchState {
    /// The current match was just restarted at a single symbol.
    Flushed { code: u32 },
    /// The current match has been extended to `len` symbols.
    Matching { code: u32, len: usize },
}

impl MatchState {
    /// Code of the current match.
    #[inline]
    fn code(self) -> u32 {
        match self {
            Self::Flushed { code } | Self::Matching { code, .. } => code,
        }
    }

    /// Length of the current match in symbols.
    #[inline]
    fn len(self) -> usize {
        match self {
            Self::Flushed { .. } => 1,
            Self::Matching { len, .. } => len,
        }
    }

    /// Extend the match to the entry `code`.
    #[inline]
    fn extend(self, code: u32) -> Self {
        Self::Matching {
            code,
            len: self.len() + 1,
        }
    }
}

/// LZW encoder for compression.
#[derive(Debug, Clone)]
pub struct LzwEncoder {
    /// Seed copied into every pass.
    seed: SeedDictionary,
    /// Configuration.
    config: LzwConfig,
}

impl LzwEncoder {
    /// Create an encoder over `seed`.
    pub fn new(seed: &SeedDictionary, config: LzwConfig) -> Self {
        Self {
            seed: seed.clone(),
            config,
        }
    }

    /// Encode data with LZW compression.
    ///
    /// # Algorithm
    ///
    /// 1. Start a fresh working dictionary from the seed
    /// 2. Start the current match at the first symbol
    /// 3. Extend the match while `match + symbol` is in the dictionary
    /// 4. Otherwise output the match's code, add `match + symbol` (unless
    ///    the dictionary is capped) and restart the match at `symbol`
    /// 5. Output the code of the final match
    ///
    /// Every symbol of `input` must be covered by the seed.
    pub fn encode(&self, input: &[u8]) -> Result<EncodedStream> {
        self.encode_with_dictionary(input).map(|(stream, _)| stream)
    }

    /// Encode and hand back the final working dictionary.
    pub(crate) fn encode_with_dictionary(
        &self,
        input: &[u8],
    ) -> Result<(EncodedStream, LzwDictionary)> {
        let mut dict = LzwDictionary::new(&self.seed, self.config);

        let (&first, rest) = input.split_first().ok_or(LzwError::EmptyInput)?;
        let mut state = MatchState::Flushed {
            code: dict.seed_code(first).ok_or(LzwError::UnknownSymbol(first))?,
        };

        let mut codes = Vec::new();
        let mut max_code = 0;
        let mut longest_match = 1;

        for &symbol in rest {
            state = match dict.find_code(state.code(), symbol) {
                Some(code) => state.extend(code),
                None => {
                    let code = state.code();
                    codes.push(code);
                    max_code = max_code.max(code);
                    if let MatchState::Matching { len, .. } = state {
                        longest_match = longest_match.max(len);
                    }

                    // No-op once the dictionary is capped.
                    dict.add_entry(code, symbol);

                    MatchState::Flushed {
                        code: dict
                            .seed_code(symbol)
                            .ok_or(LzwError::UnknownSymbol(symbol))?,
                    }
                }
            };
        }

        let code = state.code();
        codes.push(code);
        max_code = max_code.max(code);
        longest_match = longest_match.max(state.len());

        debug!(
            input_len = input.len(),
            codes = codes.len(),
            max_code,
            longest_match,
            dict_len = dict.len(),
            grown = dict.grown(),
            "lzw encode finished"
        );

        Ok((
            EncodedStream {
                codes,
                max_code,
                longest_match,
            },
            dict,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(input: &[u8], config: LzwConfig) -> EncodedStream {
        let seed = SeedDictionary::build(input).unwrap();
        LzwEncoder::new(&seed, config).encode(input).unwrap()
    }

    #[test]
    fn test_encode_abababa() {
        let stream = encode(b"ABABABA", LzwConfig::UNBOUNDED);
        assert_eq!(stream.codes, vec![0, 1, 2, 4]);
        assert_eq!(stream.max_code, 4);
        assert_eq!(stream.width(), 3);
        // Final code 4 is "ABA".
        assert_eq!(stream.longest_match, 3);
    }

    #[test]
    fn test_encode_single_byte() {
        let stream = encode(b"A", LzwConfig::UNBOUNDED);
        assert_eq!(stream.codes, vec![0]);
        assert_eq!(stream.max_code, 0);
        assert_eq!(stream.width(), 1);
    }

    #[test]
    fn test_encode_repeating() {
        // A | AA | A  ->  0, 1 (=AA), 0
        let stream = encode(b"AAAA", LzwConfig::UNBOUNDED);
        assert_eq!(stream.codes, vec![0, 1, 0]);
    }

    #[test]
    fn test_encode_tobeornot() {
        let original = b"TOBEORNOTTOBEORTOBEORNOT";
        let stream = encode(original, LzwConfig::UNBOUNDED);
        // Repetition must be folded into longer codes.
        assert!(stream.codes.len() < original.len());
    }

    #[test]
    fn test_cap_of_one_emits_seed_codes() {
        let original = b"ABBAAB";
        let stream = encode(original, LzwConfig::with_max_dict_size(1));
        assert_eq!(stream.codes, vec![0, 1, 1, 0, 0, 1]);
        assert_eq!(stream.max_code, 1);
        assert_eq!(stream.longest_match, 1);
    }

    #[test]
    fn test_cap_freezes_matching() {
        // Cap 3 admits only "AB"; later "AB" pairs still match it.
        let stream = encode(b"ABABAB", LzwConfig::with_max_dict_size(3));
        assert_eq!(stream.codes, vec![0, 1, 2, 2]);
    }

    #[test]
    fn test_match_state_transitions() {
        let flushed = MatchState::Flushed { code: 0 };
        assert_eq!(flushed.len(), 1);

        let matching = flushed.extend(2);
        assert_eq!(matching, MatchState::Matching { code: 2, len: 2 });
        assert_eq!(matching.extend(4), MatchState::Matching { code: 4, len: 3 });
        assert_eq!(matching.code(), 2);
    }

    #[test]
    fn test_longest_match_tracks_runs() {
        // A | AA | AAA | AAAA
        let stream = encode(&[b'A'; 10], LzwConfig::UNBOUNDED);
        assert_eq!(stream.codes, vec![0, 1, 2, 3]);
        assert_eq!(stream.longest_match, 4);
    }

    #[test]
    fn test_dictionary_growth_count() {
        let seed = SeedDictionary::build(b"ABABABA").unwrap();
        let encoder = LzwEncoder::new(&seed, LzwConfig::UNBOUNDED);
        let (stream, dict) = encoder.encode_with_dictionary(b"ABABABA").unwrap();
        // One entry per emitted code except the last.
        assert_eq!(dict.grown(), stream.codes.len() - 1);
        assert_eq!(dict.sequence(4).unwrap(), b"ABA");
    }

    #[test]
    fn test_encode_empty() {
        let seed = SeedDictionary::build(b"A").unwrap();
        let err = LzwEncoder::new(&seed, LzwConfig::UNBOUNDED)
            .encode(b"")
            .unwrap_err();
        assert!(matches!(err, LzwError::EmptyInput));
    }

    #[test]
    fn test_encode_foreign_symbol() {
        let seed = SeedDictionary::build(b"AB").unwrap();
        let err = LzwEncoder::new(&seed, LzwConfig::UNBOUNDED)
            .encode(b"ABC")
            .unwrap_err();
        assert!(matches!(err, LzwError::UnknownSymbol(b'C')));
    }

    #[test]
    fn test_deterministic() {
        let original = b"The quick brown fox jumps over the lazy dog. ".repeat(20);
        let a = encode(&original, LzwConfig::SMALL);
        let b = encode(&original, LzwConfig::SMALL);
        assert_eq!(a, b);
    }
}
