//! Canvas constants, closed path geometry and rotation transforms.
//!
//! All geometry lives on a fixed square canvas so every generated mandala can be overlaid
//! on any other. A [`PathGeometry`] is built once per base shape and shared by all of its
//! rotated repetitions; the repetitions differ only by their [`Rotation`].
use std::fmt::Write as _;

use glam::DVec2;

/// Side length of the square canvas in canvas units.
pub const CANVAS_SIZE: f64 = 300.0;

/// Center of the canvas; every rotation pivots here.
pub const CANVAS_CENTER: DVec2 = DVec2::new(CANVAS_SIZE / 2.0, CANVAS_SIZE / 2.0);

/// No generated point lies farther than this from [`CANVAS_CENTER`].
///
/// Deliberately larger than half the canvas: outer bands of the last layer may reach past
/// the canvas edge and are clipped by the renderer.
pub const BOUNDING_RADIUS: f64 = 180.0;

/// One drawing instruction of a closed path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(DVec2),
    LineTo(DVec2),
    /// Quadratic Bezier from the current point through `control` to `to`.
    QuadTo { control: DVec2, to: DVec2 },
    /// Straight segment back to the last `MoveTo`.
    Close,
}

/// An immutable closed curve in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PathGeometry {
    commands: Vec<PathCommand>,
}

impl PathGeometry {
    /// Start a path at `start`.
    pub fn starting_at(start: DVec2) -> PathBuilder {
        PathBuilder {
            commands: vec![PathCommand::MoveTo(start)],
        }
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// The point the path starts (and closes) at.
    pub fn start(&self) -> DVec2 {
        match self.commands.first() {
            Some(PathCommand::MoveTo(p)) => *p,
            _ => CANVAS_CENTER,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// Flatten into a polyline whose first and last points coincide.
    ///
    /// Each quadratic segment is split into `curve_segments` straight pieces.
    pub fn flatten(&self, curve_segments: usize) -> Vec<DVec2> {
        let steps = curve_segments.max(1);
        let mut out = Vec::with_capacity(self.commands.len() * steps + 1);
        let mut start = self.start();
        let mut current = start;
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => {
                    start = p;
                    current = p;
                    out.push(p);
                }
                PathCommand::LineTo(p) => {
                    current = p;
                    out.push(p);
                }
                PathCommand::QuadTo { control, to } => {
                    for i in 1..=steps {
                        let t = i as f64 / steps as f64;
                        out.push(quad_point(current, control, to, t));
                    }
                    current = to;
                }
                PathCommand::Close => {
                    if current != start {
                        out.push(start);
                    }
                    current = start;
                }
            }
        }
        out
    }

    /// Largest distance from `center` to any point or control point.
    ///
    /// Quadratic Beziers stay inside the hull of their control points, so this bounds the
    /// whole curve.
    pub fn max_radius(&self, center: DVec2) -> f64 {
        self.commands
            .iter()
            .flat_map(|c| match *c {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => [Some(p), None],
                PathCommand::QuadTo { control, to } => [Some(control), Some(to)],
                PathCommand::Close => [None, None],
            })
            .flatten()
            .map(|p| p.distance(center))
            .fold(0.0, f64::max)
    }

    /// SVG path data, e.g. `M 150,150 L 190,150 Q 193.1,171.7 170,184.6 Z`.
    pub fn svg_path_data(&self) -> String {
        let mut out = String::new();
        for command in &self.commands {
            if !out.is_empty() {
                out.push(' ');
            }
            match *command {
                PathCommand::MoveTo(p) => {
                    let _ = write!(out, "M {}", svg_point(p));
                }
                PathCommand::LineTo(p) => {
                    let _ = write!(out, "L {}", svg_point(p));
                }
                PathCommand::QuadTo { control, to } => {
                    let _ = write!(out, "Q {} {}", svg_point(control), svg_point(to));
                }
                PathCommand::Close => out.push('Z'),
            }
        }
        out
    }
}

/// Incremental builder returned by [`PathGeometry::starting_at`].
#[derive(Debug, Clone)]
pub struct PathBuilder {
    commands: Vec<PathCommand>,
}

impl PathBuilder {
    pub fn line_to(mut self, to: DVec2) -> Self {
        self.commands.push(PathCommand::LineTo(to));
        self
    }

    pub fn quad_to(mut self, control: DVec2, to: DVec2) -> Self {
        self.commands.push(PathCommand::QuadTo { control, to });
        self
    }

    /// Close the path. Geometry is only obtainable closed.
    pub fn close(mut self) -> PathGeometry {
        self.commands.push(PathCommand::Close);
        PathGeometry {
            commands: self.commands,
        }
    }
}

/// Rotation about [`CANVAS_CENTER`], applied at render time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub degrees: f64,
}

impl Rotation {
    pub const IDENTITY: Rotation = Rotation { degrees: 0.0 };

    pub fn from_degrees(degrees: f64) -> Self {
        Self { degrees }
    }

    /// Rotate `point` about the canvas center (clockwise on screen, y pointing down).
    pub fn apply(&self, point: DVec2) -> DVec2 {
        let rotation = DVec2::from_angle(self.degrees * std::f64::consts::PI / 180.0);
        CANVAS_CENTER + rotation.rotate(point - CANVAS_CENTER)
    }

    /// SVG transform attribute, e.g. `rotate(72, 150, 150)`.
    pub fn svg_transform(&self) -> String {
        format!(
            "rotate({}, {}, {})",
            svg_number(self.degrees),
            svg_number(CANVAS_CENTER.x),
            svg_number(CANVAS_CENTER.y)
        )
    }
}

/// Evaluate a quadratic Bezier at `t`.
#[inline]
pub fn quad_point(from: DVec2, control: DVec2, to: DVec2, t: f64) -> DVec2 {
    let u = 1.0 - t;
    from * (u * u) + control * (2.0 * u * t) + to * (t * t)
}

/// Shortest round-trip decimal form; integral values carry no fraction.
pub(crate) fn svg_number(value: f64) -> String {
    if value == 0.0 {
        // Avoid "-0".
        return "0".to_owned();
    }
    format!("{value}")
}

fn svg_point(p: DVec2) -> String {
    format!("{},{}", svg_number(p.x), svg_number(p.y))
}
