#![forbid(unsafe_code)]
//! mandala: Deterministic, radially symmetric mandalas from a seed word and a palette.
//!
//! Modules:
//! - stream: seed folding and the reference linear congruential number stream
//! - geometry: canvas constants, closed quadratic paths, rotations about the center
//! - palette: non-empty color palettes
//! - layout: the wedge-and-rotate layout engine producing path records and ground-truth colors
//! - score: comparing a user coloring with the ground truth
//! - session: explicit painting session state
//! - events: observing generation runs
//! - wire: request/response shapes for a transport layer
//!
//! Identical seeds and palettes always produce identical mandalas.
pub mod error;
pub mod events;
pub mod geometry;
pub mod layout;
pub mod palette;
pub mod score;
pub mod session;
pub mod stream;
pub mod wire;

/// Convenient re-exports for common types. Import with `use mandala::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::events::{
        EventSink, FnSink, MandalaEvent, MandalaEventKind, MultiSink, VecSink,
    };
    pub use crate::geometry::{
        PathCommand, PathGeometry, Rotation, BOUNDING_RADIUS, CANVAS_CENTER, CANVAS_SIZE,
    };
    pub use crate::layout::generator::{
        generate, generate_with_palette, LayerInfo, LayoutConfig, Mandala, MandalaGenerator,
    };
    pub use crate::layout::{ColorAssignment, PathId, PathRecord};
    pub use crate::palette::{ColorToken, Palette};
    pub use crate::score::{score, try_score, ScoreBreakdown, UserColoring};
    pub use crate::session::{PaintSession, Tool};
    pub use crate::stream::{LcgStream, NumberStream, RandStream, Seed};
    pub use crate::wire::{
        handle_generation_request, GenerationRequest, GenerationResponse, WirePath,
    };
}
