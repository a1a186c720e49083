//! Grading a user coloring against the ground truth.
//!
//! A path counts as a match only when the user painted it with exactly the ground-truth
//! color token. Unpainted and wrongly painted paths both count as misses; the
//! [`ScoreBreakdown`] keeps them apart for callers that want to report the difference.
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::layout::{ColorAssignment, PathId};
use crate::palette::ColorToken;

/// Partial mapping from path id to the color a user painted it. Absent ids are unpainted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserColoring {
    painted: HashMap<PathId, ColorToken>,
}

impl UserColoring {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint `id`, returning the color it had before.
    pub fn paint(&mut self, id: PathId, color: impl Into<ColorToken>) -> Option<ColorToken> {
        self.painted.insert(id, color.into())
    }

    /// Remove the paint from `id`, returning the removed color.
    pub fn erase(&mut self, id: &PathId) -> Option<ColorToken> {
        self.painted.remove(id)
    }

    pub fn get(&self, id: &PathId) -> Option<&ColorToken> {
        self.painted.get(id)
    }

    pub fn len(&self) -> usize {
        self.painted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.painted.is_empty()
    }

    pub fn clear(&mut self) {
        self.painted.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathId, &ColorToken)> {
        self.painted.iter()
    }

    /// Build from string-keyed entries, as received from a painting client.
    pub fn from_wire<I, K, C>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, C)>,
        K: AsRef<str>,
        C: Into<ColorToken>,
    {
        let mut coloring = Self::new();
        for (id, color) in entries {
            coloring.paint(id.as_ref().parse()?, color);
        }
        Ok(coloring)
    }
}

impl FromIterator<(PathId, ColorToken)> for UserColoring {
    fn from_iter<T: IntoIterator<Item = (PathId, ColorToken)>>(iter: T) -> Self {
        Self {
            painted: iter.into_iter().collect(),
        }
    }
}

impl From<&ColorAssignment> for UserColoring {
    fn from(value: &ColorAssignment) -> Self {
        value.iter().map(|(id, c)| (*id, c.clone())).collect()
    }
}

/// Per-category counts behind a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBreakdown {
    /// Painted with the ground-truth color.
    pub matched: usize,
    /// Painted with another color.
    pub wrong: usize,
    /// Not painted.
    pub unpainted: usize,
    /// Number of ground-truth paths.
    pub total: usize,
}

impl ScoreBreakdown {
    /// Compare `user` against `ground_truth`. Entries of `user` for unknown ids are ignored.
    pub fn compute(ground_truth: &ColorAssignment, user: &UserColoring) -> Self {
        let mut breakdown = Self {
            total: ground_truth.len(),
            ..Self::default()
        };
        for (id, expected) in ground_truth {
            match user.get(id) {
                Some(color) if color == expected => breakdown.matched += 1,
                Some(_) => breakdown.wrong += 1,
                None => breakdown.unpainted += 1,
            }
        }
        breakdown
    }

    /// Percentage of matched paths, rounded half up; `None` for an empty path set.
    pub fn percent(&self) -> Option<u8> {
        if self.total == 0 {
            return None;
        }
        let ratio = self.matched as f64 / self.total as f64;
        Some((ratio * 100.0).round() as u8)
    }
}

/// Score `user` against `ground_truth` as a percentage in `0..=100`.
///
/// # Panics
///
/// Panics when `ground_truth` is empty; a generated mandala always has paths, so an empty
/// ground truth is a caller bug. Use [`try_score`] to get an error instead.
pub fn score(ground_truth: &ColorAssignment, user: &UserColoring) -> u8 {
    assert!(!ground_truth.is_empty(), "cannot score an empty path set");
    try_score(ground_truth, user).unwrap_or_default()
}

/// Like [`score`], but fails with [`Error::EmptyPathSet`] instead of panicking.
pub fn try_score(ground_truth: &ColorAssignment, user: &UserColoring) -> Result<u8> {
    ScoreBreakdown::compute(ground_truth, user)
        .percent()
        .ok_or(Error::EmptyPathSet)
}
