//! Color palettes supplied by the caller.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::stream::NumberStream;

/// Opaque color value, typically a hex string such as `#FF3B30`. Compared by exact equality.
pub type ColorToken = String;

/// Default palette offered before the user picks one.
pub const RAINBOW: [&str; 5] = ["#FF3B30", "#FF9500", "#FFCC02", "#34C759", "#007AFF"];

/// Colors offered while painting.
pub const PAINT_COLORS: [&str; 10] = [
    "#FF3B30", "#FF9500", "#FFCC02", "#34C759", "#007AFF", "#5856D6", "#AF52DE", "#FF2D92",
    "#00C7BE", "#30D158",
];

/// A non-empty ordered sequence of colors.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<ColorToken>", into = "Vec<ColorToken>"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<ColorToken>,
}

impl Palette {
    /// Create a palette; fails with [`Error::EmptyPalette`] when `colors` is empty.
    pub fn new<I, C>(colors: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<ColorToken>,
    {
        let colors: Vec<ColorToken> = colors.into_iter().map(Into::into).collect();
        if colors.is_empty() {
            return Err(Error::EmptyPalette);
        }
        Ok(Self { colors })
    }

    pub fn rainbow() -> Self {
        Self {
            colors: RAINBOW.iter().map(|c| (*c).to_owned()).collect(),
        }
    }

    pub fn paint_colors() -> Self {
        Self {
            colors: PAINT_COLORS.iter().map(|c| (*c).to_owned()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn first(&self) -> &ColorToken {
        &self.colors[0]
    }

    /// Color at `index % len`.
    pub fn cyclic(&self, index: usize) -> &ColorToken {
        &self.colors[index % self.colors.len()]
    }

    /// Uniformly sampled color; consumes one stream value.
    pub fn sample<S: NumberStream + ?Sized>(&self, stream: &mut S) -> &ColorToken {
        let idx = (stream.next_f64() * self.colors.len() as f64).floor() as usize;
        &self.colors[idx.min(self.colors.len() - 1)]
    }

    pub fn contains(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorToken> {
        self.colors.iter()
    }

    pub fn as_slice(&self) -> &[ColorToken] {
        &self.colors
    }
}

impl TryFrom<Vec<ColorToken>> for Palette {
    type Error = Error;

    fn try_from(value: Vec<ColorToken>) -> Result<Self> {
        Palette::new(value)
    }
}

impl From<Palette> for Vec<ColorToken> {
    fn from(value: Palette) -> Self {
        value.colors
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a ColorToken;
    type IntoIter = std::slice::Iter<'a, ColorToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}
