use std::fmt::Write as _;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use glam::DVec2;
use image::{Rgb, RgbImage};
use mandala::prelude::*;
use tracing::info;

/// Initialise a tracing subscriber for the example binaries.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .try_init();
}

/// Page color behind the mandala.
pub const DEFAULT_BACKGROUND: [u8; 3] = [254, 254, 254];

/// How each path is filled when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    /// Fill every path with its ground-truth color.
    GroundTruth,
    /// Fill painted paths with the user's color and leave the rest blank with an outline.
    Painted,
}

/// Output configuration shared by the SVG and PNG renderers.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: u32,
    pub background: [u8; 3],
    pub blank_fill: [u8; 3],
    pub outline: [u8; 3],
    pub curve_segments: usize,
}

impl RenderConfig {
    pub fn new(image_size: u32) -> Self {
        Self {
            image_size,
            background: DEFAULT_BACKGROUND,
            blank_fill: [255, 255, 255],
            outline: [51, 51, 51],
            curve_segments: 24,
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_curve_segments(mut self, curve_segments: usize) -> Self {
        self.curve_segments = curve_segments;
        self
    }
}

/// Parse `#RRGGBB` or `#RGB`.
pub fn parse_hex_color(token: &str) -> Result<[u8; 3]> {
    let hex = token
        .strip_prefix('#')
        .ok_or_else(|| anyhow!("color '{token}' does not start with '#'"))?;
    if !hex.is_ascii() {
        return Err(anyhow!("color '{token}' is not #RGB or #RRGGBB"));
    }
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_owned(),
        _ => return Err(anyhow!("color '{token}' is not #RGB or #RRGGBB")),
    };
    let channel = |i: usize| {
        u8::from_str_radix(&expanded[i..i + 2], 16)
            .with_context(|| format!("color '{token}' has invalid hex digits"))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

fn fill_for<'a>(
    mandala: &'a Mandala,
    coloring: &'a UserColoring,
    mode: FillMode,
    id: &PathId,
) -> Option<&'a ColorToken> {
    match mode {
        FillMode::GroundTruth => mandala.color_of(id),
        FillMode::Painted => coloring.get(id),
    }
}

/// Render an SVG document of `mandala`, one `<path>` per record, outer layers first.
pub fn render_mandala_svg(mandala: &Mandala, coloring: &UserColoring, mode: FillMode) -> String {
    let mut svg = format!(
        r#"<svg width="100%" height="100%" viewBox="0 0 {size} {size}" xmlns="http://www.w3.org/2000/svg">"#,
        size = CANVAS_SIZE
    );
    let [r, g, b] = DEFAULT_BACKGROUND;
    let _ = write!(
        svg,
        r#"<rect width="100%" height="100%" fill="rgb({r},{g},{b})"/>"#
    );
    for path in mandala.paths_in_paint_order() {
        let wire = WirePath::from(path);
        match fill_for(mandala, coloring, mode, &path.id) {
            Some(color) => {
                let _ = write!(
                    svg,
                    r#"<path id="{}" d="{}" transform="{}" fill="{}" stroke="none" opacity="0.9"/>"#,
                    wire.id, wire.d, wire.transform, color
                );
            }
            None => {
                let _ = write!(
                    svg,
                    r##"<path id="{}" d="{}" transform="{}" fill="white" stroke="#333" stroke-width="0.5"/>"##,
                    wire.id, wire.d, wire.transform
                );
            }
        }
    }
    svg.push_str("</svg>");
    svg
}

/// Rasterize `mandala` to a PNG at `out_path`.
pub fn render_mandala_to_png(
    mandala: &Mandala,
    coloring: &UserColoring,
    mode: FillMode,
    config: &RenderConfig,
    out_path: impl AsRef<Path>,
) -> Result<()> {
    let size = config.image_size.max(1);
    let scale = f64::from(size) / CANVAS_SIZE;
    let mut img = RgbImage::from_pixel(size, size, Rgb(config.background));

    for path in mandala.paths_in_paint_order() {
        let polygon: Vec<DVec2> = path
            .outline(config.curve_segments)
            .into_iter()
            .map(|p| DVec2::from(p) * scale)
            .collect();
        let fill = match fill_for(mandala, coloring, mode, &path.id) {
            Some(token) => parse_hex_color(token)?,
            None => config.blank_fill,
        };
        fill_polygon(&mut img, &polygon, fill);
        if mode == FillMode::Painted && coloring.get(&path.id).is_none() {
            stroke_polygon(&mut img, &polygon, config.outline);
        }
    }

    let out_path = out_path.as_ref();
    img.save(out_path)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    info!("Wrote {}.", out_path.display());
    Ok(())
}

/// Even-odd scanline fill sampled at pixel centers.
fn fill_polygon(img: &mut RgbImage, polygon: &[DVec2], color: [u8; 3]) {
    if polygon.len() < 3 {
        return;
    }
    let (w, h) = img.dimensions();
    let min_y = polygon.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = polygon.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    let y_start = min_y.floor().max(0.0) as u32;
    let y_end = (max_y.ceil().max(0.0) as u32).min(h);

    let mut crossings: Vec<f64> = Vec::new();
    for y in y_start..y_end {
        let sy = f64::from(y) + 0.5;
        crossings.clear();
        for edge in polygon.windows(2) {
            let (a, b) = (edge[0], edge[1]);
            if (a.y <= sy && b.y > sy) || (b.y <= sy && a.y > sy) {
                let t = (sy - a.y) / (b.y - a.y);
                crossings.push(a.x + t * (b.x - a.x));
            }
        }
        crossings.sort_by(f64::total_cmp);
        for span in crossings.chunks_exact(2) {
            let x0 = (span[0] - 0.5).ceil().max(0.0) as u32;
            let x1 = ((span[1] - 0.5).floor() + 1.0).max(0.0) as u32;
            for x in x0..x1.min(w) {
                img.put_pixel(x, y, Rgb(color));
            }
        }
    }
}

fn stroke_polygon(img: &mut RgbImage, polygon: &[DVec2], color: [u8; 3]) {
    let (w, h) = img.dimensions();
    for edge in polygon.windows(2) {
        let (a, b) = (edge[0], edge[1]);
        let steps = (a.distance(b).ceil() as usize).max(1);
        for i in 0..=steps {
            let p = a.lerp(b, i as f64 / steps as f64);
            if p.x >= 0.0 && p.y >= 0.0 && (p.x as u32) < w && (p.y as u32) < h {
                img.put_pixel(p.x as u32, p.y as u32, Rgb(color));
            }
        }
    }
}
