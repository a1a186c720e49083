//! Seeds and the rolling hash that folds seed words into stream state.
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Deterministic input that fully determines a generation run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Seed {
    /// A word, folded with [`fold_word`].
    Text(String),
    /// A raw stream state, used as-is.
    Integer(u32),
}

impl Seed {
    /// The initial stream state derived from this seed.
    pub fn state(&self) -> u32 {
        match self {
            Seed::Text(word) => fold_word(word),
            Seed::Integer(value) => *value,
        }
    }
}

impl From<&str> for Seed {
    fn from(value: &str) -> Self {
        Seed::Text(value.to_owned())
    }
}

impl From<String> for Seed {
    fn from(value: String) -> Self {
        Seed::Text(value)
    }
}

impl From<&String> for Seed {
    fn from(value: &String) -> Self {
        Seed::Text(value.clone())
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Seed::Integer(value)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Text(word) => write!(f, "{word:?}"),
            Seed::Integer(value) => write!(f, "{value}"),
        }
    }
}

/// Fold a word into a stream state.
///
/// `h = h * 31 + unit` over the UTF-16 code units of `word`, wrapping as a signed 32-bit
/// integer, then the unsigned absolute value. The empty word folds to 0.
pub fn fold_word(word: &str) -> u32 {
    word.encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_mul(31).wrapping_add(i32::from(unit))
        })
        .unsigned_abs()
}
