//! Mandala layout engine: symmetric wedges replicated by rotation about the canvas center.
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::geometry::{PathGeometry, Rotation};
use crate::palette::ColorToken;

pub mod generator;
pub mod wedge;

/// Prefix of the textual form of a [`PathId`].
pub const PATH_ID_PREFIX: &str = "path";

/// Identifies one path instance: which layer, which base shape in the wedge, which rotated
/// repetition. Stable across runs with the same seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathId {
    pub layer: u32,
    pub shape: u32,
    pub repetition: u32,
}

impl PathId {
    pub fn new(layer: u32, shape: u32, repetition: u32) -> Self {
        Self {
            layer,
            shape,
            repetition,
        }
    }

    /// Id of the same base shape at a different repetition.
    pub fn with_repetition(self, repetition: u32) -> Self {
        Self { repetition, ..self }
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{PATH_ID_PREFIX}-{}-{}-{}",
            self.layer, self.shape, self.repetition
        )
    }
}

impl FromStr for PathId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidPathId { id: s.to_owned() };
        let mut parts = s.split('-');
        if parts.next() != Some(PATH_ID_PREFIX) {
            return Err(invalid());
        }
        let mut field = || -> Result<u32> {
            parts
                .next()
                .and_then(|p| p.parse::<u32>().ok())
                .ok_or_else(invalid)
        };
        let layer = field()?;
        let shape = field()?;
        let repetition = field()?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self::new(layer, shape, repetition))
    }
}

/// Ground-truth colors keyed by path id. Built once per generation and never mutated.
pub type ColorAssignment = BTreeMap<PathId, ColorToken>;

/// One closed shape instance. Repetitions of a base shape share one geometry allocation and
/// differ only by `rotation`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathRecord {
    pub id: PathId,
    pub geometry: Arc<PathGeometry>,
    pub rotation: Rotation,
}

impl PathRecord {
    pub fn rotation_degrees(&self) -> f64 {
        self.rotation.degrees
    }

    /// Rotated, flattened outline for renderers that do not speak SVG.
    pub fn outline(&self, curve_segments: usize) -> Vec<mint::Point2<f64>> {
        self.geometry
            .flatten(curve_segments)
            .into_iter()
            .map(|p| self.rotation.apply(p).into())
            .collect()
    }

    /// True when both records are repetitions of the same base shape.
    pub fn shares_geometry_with(&self, other: &PathRecord) -> bool {
        Arc::ptr_eq(&self.geometry, &other.geometry)
    }
}
