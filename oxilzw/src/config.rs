//! LZW configuration (dictionary size cap).

/// LZW configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LzwConfig {
    /// Maximum number of dictionary entries, seed entries included.
    ///
    /// `None` lets the dictionary grow without bound. Once the cap is
    /// reached the dictionary is frozen: no eviction, no reset.
    pub max_dict_size: Option<usize>,
}

impl LzwConfig {
    /// Unbounded dictionary growth.
    pub const UNBOUNDED: Self = Self {
        max_dict_size: None,
    };

    /// Dictionary capped at 2^18 entries.
    pub const LARGE: Self = Self {
        max_dict_size: Some(1 << 18),
    };

    /// Dictionary capped at 2^12 entries.
    pub const SMALL: Self = Self {
        max_dict_size: Some(1 << 12),
    };

    /// Create a configuration with the given cap.
    pub fn new(max_dict_size: Option<usize>) -> Self {
        Self { max_dict_size }
    }

    /// Create a configuration capped at `max_dict_size` entries.
    pub fn with_max_dict_size(max_dict_size: usize) -> Self {
        Self {
            max_dict_size: Some(max_dict_size),
        }
    }

    /// Whether a dictionary holding `len` entries may take another one.
    #[inline]
    pub fn allows_growth(&self, len: usize) -> bool {
        self.max_dict_size.is_none_or(|max| len < max)
    }
}
