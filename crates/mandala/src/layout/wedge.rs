//! Base shapes of one angular wedge.
//!
//! A wedge spans `[0, angle]` measured from the positive x axis around the canvas center.
//! Each layer contributes two shapes to it: a petal that leaves and returns to the center,
//! and a band bounded by an inner and an outer curved edge. Both edges bulge along the
//! bisecting angle through one quadratic control point each.
use std::f64::consts::PI;

use glam::DVec2;

use crate::geometry::{PathGeometry, CANVAS_CENTER};
use crate::layout::generator::LayoutConfig;
use crate::stream::NumberStream;

/// Number of base shapes each layer places in a wedge.
pub const SHAPES_PER_WEDGE: u32 = 2;

/// Index of the petal within a wedge.
pub const PETAL: u32 = 0;
/// Index of the band within a wedge.
pub const BAND: u32 = 1;

/// Base shapes for one layer of a wedge, before replication.
#[derive(Debug, Clone, PartialEq)]
pub struct WedgeShapes {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub petal: PathGeometry,
    pub band: PathGeometry,
}

impl WedgeShapes {
    /// Shapes in slot order ([`PETAL`], [`BAND`]).
    pub fn into_shapes(self) -> [PathGeometry; SHAPES_PER_WEDGE as usize] {
        [self.petal, self.band]
    }
}

/// Wedge angle in radians for `num_slices` slices.
pub fn wedge_angle(num_slices: u32) -> f64 {
    let degrees = 360.0 / f64::from(num_slices);
    degrees * PI / 180.0
}

/// Inner radius of `layer_index`; strictly increasing with the layer.
pub fn inner_radius(config: &LayoutConfig, layer_index: u32) -> f64 {
    config.inner_radius_base + f64::from(layer_index) * config.layer_spacing
}

/// Build the wedge shapes for one layer.
///
/// Consumes exactly five stream values, in order: the outer radius margin, then the x and
/// y offsets of the inner control point, then the x and y offsets of the outer control
/// point.
pub fn build_wedge<S: NumberStream + ?Sized>(
    config: &LayoutConfig,
    layer_index: u32,
    angle: f64,
    stream: &mut S,
) -> WedgeShapes {
    let inner = inner_radius(config, layer_index);
    let outer = inner + config.band_margin + stream.next_f64() * config.band_jitter;

    let edge = DVec2::new(angle.cos(), angle.sin());
    let bisector = DVec2::new((angle / 2.0).cos(), (angle / 2.0).sin());

    let inner_start = CANVAS_CENTER + DVec2::new(inner, 0.0);
    let inner_end = CANVAS_CENTER + edge * inner;
    let outer_start = CANVAS_CENTER + DVec2::new(outer, 0.0);
    let outer_end = CANVAS_CENTER + edge * outer;

    let inner_control = CANVAS_CENTER
        + bisector
            * DVec2::new(
                inner + stream.next_f64() * config.control_jitter,
                inner + stream.next_f64() * config.control_jitter,
            );
    let outer_control = CANVAS_CENTER
        + bisector
            * DVec2::new(
                outer - stream.next_f64() * config.control_jitter,
                outer - stream.next_f64() * config.control_jitter,
            );

    let petal = PathGeometry::starting_at(CANVAS_CENTER)
        .line_to(inner_start)
        .quad_to(inner_control, inner_end)
        .close();

    let band = PathGeometry::starting_at(inner_start)
        .line_to(outer_start)
        .quad_to(outer_control, outer_end)
        .line_to(inner_end)
        .quad_to(inner_control, inner_start)
        .close();

    WedgeShapes {
        inner_radius: inner,
        outer_radius: outer,
        petal,
        band,
    }
}
