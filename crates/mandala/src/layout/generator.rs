//! High-level generator turning a seed and a palette into a [`Mandala`].
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::events::{EventSink, MandalaEvent, MandalaEventKind};
use crate::geometry::{Rotation, BOUNDING_RADIUS, CANVAS_CENTER};
use crate::layout::wedge::{self, SHAPES_PER_WEDGE};
use crate::layout::{ColorAssignment, PathId, PathRecord};
use crate::palette::{ColorToken, Palette};
use crate::stream::{range_draw, LcgStream, NumberStream, Seed};

/// Tunable layout parameters. [`Default`] is the reference parameter set.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Smallest symmetry order.
    pub min_slices: u32,
    /// Number of possible symmetry orders starting at `min_slices`.
    pub slice_span: u32,
    /// Smallest layer count.
    pub min_layers: u32,
    /// Number of possible layer counts starting at `min_layers`.
    pub layer_span: u32,
    /// Inner radius of layer 0.
    pub inner_radius_base: f64,
    /// Inner radius increase per layer.
    pub layer_spacing: f64,
    /// Fixed part of the band width.
    pub band_margin: f64,
    /// Random part of the band width, scaled by one stream value.
    pub band_jitter: f64,
    /// Maximum radial offset of each control point coordinate.
    pub control_jitter: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_slices: 6,
            slice_span: 5,
            min_layers: 2,
            layer_span: 2,
            inner_radius_base: 40.0,
            layer_spacing: 40.0,
            band_margin: 30.0,
            band_jitter: 20.0,
            control_jitter: 10.0,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the symmetry order range `min..min + span`.
    pub fn with_slices(mut self, min: u32, span: u32) -> Self {
        self.min_slices = min;
        self.slice_span = span;
        self
    }

    /// Sets the layer count range `min..min + span`.
    pub fn with_layers(mut self, min: u32, span: u32) -> Self {
        self.min_layers = min;
        self.layer_span = span;
        self
    }

    /// Sets the inner radius of layer 0 and the spacing between layers.
    pub fn with_radii(mut self, inner_radius_base: f64, layer_spacing: f64) -> Self {
        self.inner_radius_base = inner_radius_base;
        self.layer_spacing = layer_spacing;
        self
    }

    /// Sets the band width as a fixed margin plus a random jitter.
    pub fn with_band(mut self, margin: f64, jitter: f64) -> Self {
        self.band_margin = margin;
        self.band_jitter = jitter;
        self
    }

    /// Sets the control point jitter.
    pub fn with_control_jitter(mut self, control_jitter: f64) -> Self {
        self.control_jitter = control_jitter;
        self
    }

    pub fn max_slices(&self) -> u32 {
        self.min_slices + self.slice_span.saturating_sub(1)
    }

    pub fn max_layers(&self) -> u32 {
        self.min_layers + self.layer_span.saturating_sub(1)
    }

    /// Worst-case distance of any generated point or control point from the center.
    pub fn max_extent(&self) -> f64 {
        let last_inner = wedge::inner_radius(self, self.max_layers().saturating_sub(1));
        let outer = last_inner + self.band_margin + self.band_jitter;
        // A control point scales cos/sin of the bisector by two radii; its distance never
        // exceeds the larger one.
        let inner_control = last_inner + self.control_jitter;
        outer.max(inner_control)
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.min_slices < 3 {
            return Err(Error::InvalidConfig("min_slices must be >= 3".into()));
        }
        if self.slice_span == 0 {
            return Err(Error::InvalidConfig("slice_span must be > 0".into()));
        }
        if self.min_layers == 0 {
            return Err(Error::InvalidConfig("min_layers must be > 0".into()));
        }
        if self.layer_span == 0 {
            return Err(Error::InvalidConfig("layer_span must be > 0".into()));
        }
        if !(self.inner_radius_base > 0.0) {
            return Err(Error::InvalidConfig("inner_radius_base must be > 0".into()));
        }
        if !(self.layer_spacing > 0.0) {
            return Err(Error::InvalidConfig("layer_spacing must be > 0".into()));
        }
        if !(self.band_jitter >= 0.0) || !(self.control_jitter >= 0.0) {
            return Err(Error::InvalidConfig("jitter must be >= 0".into()));
        }
        if !(self.band_margin > self.control_jitter) {
            return Err(Error::InvalidConfig(
                "band_margin must exceed control_jitter".into(),
            ));
        }
        if self.max_extent() > BOUNDING_RADIUS {
            return Err(Error::InvalidConfig(format!(
                "layout may reach radius {:.1}, beyond the bounding radius {BOUNDING_RADIUS}",
                self.max_extent()
            )));
        }
        Ok(())
    }
}

/// Radii drawn for one layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerInfo {
    pub index: u32,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

/// A generated mandala: path records plus their ground-truth colors.
///
/// Immutable after generation; it is the reference a user coloring is scored against.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct Mandala {
    /// Initial stream state, when generated from a [`Seed`].
    pub seed_state: Option<u32>,
    /// Rotational symmetry order.
    pub num_slices: u32,
    /// Number of concentric layers.
    pub num_layers: u32,
    /// Per-layer radii, in layer order.
    pub layers: Vec<LayerInfo>,
    /// Records ordered by layer, then shape, then repetition.
    pub paths: Vec<PathRecord>,
    /// Ground truth, total over `paths`.
    pub colors: ColorAssignment,
}

impl Mandala {
    /// Rotation step between repetitions, in degrees.
    pub fn slice_angle(&self) -> f64 {
        360.0 / f64::from(self.num_slices)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn path(&self, id: PathId) -> Option<&PathRecord> {
        self.paths.iter().find(|p| p.id == id)
    }

    pub fn color_of(&self, id: &PathId) -> Option<&ColorToken> {
        self.colors.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = PathId> + '_ {
        self.paths.iter().map(|p| p.id)
    }

    /// Records ordered outermost layer first so that each layer's petals, which start at the
    /// center, are drawn beneath the layers inside them.
    pub fn paths_in_paint_order(&self) -> impl Iterator<Item = &PathRecord> + '_ {
        let mut ordered: Vec<&PathRecord> = self.paths.iter().collect();
        ordered.sort_by(|a, b| b.id.layer.cmp(&a.id.layer));
        ordered.into_iter()
    }

    /// Number of distinct base geometries (layers times shapes per wedge).
    pub fn base_shape_count(&self) -> usize {
        self.paths
            .iter()
            .filter(|p| p.id.repetition == 0)
            .count()
    }
}

/// Lays out mandalas with a fixed [`LayoutConfig`]. Stateless between calls: every call
/// owns a fresh stream.
#[derive(Debug, Clone, Default)]
pub struct MandalaGenerator {
    config: LayoutConfig,
}

impl MandalaGenerator {
    pub fn try_new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn new(config: LayoutConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid layout configuration");
        Self { config }
    }

    /// Layout parameters applied to every run.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Generate the mandala for `seed`.
    pub fn generate(&self, seed: impl Into<Seed>, palette: &Palette) -> Mandala {
        self.generate_with_events(seed, palette, &mut ())
    }

    pub fn generate_with_events(
        &self,
        seed: impl Into<Seed>,
        palette: &Palette,
        sink: &mut dyn EventSink,
    ) -> Mandala {
        let mut stream = LcgStream::new(seed);
        let seed_state = Some(stream.state());
        self.generate_seeded(&mut stream, seed_state, palette, sink)
    }

    /// Generate from an arbitrary stream. Values are drawn in a fixed order: symmetry
    /// order, layer count, then five values per layer.
    pub fn generate_from_stream<S: NumberStream + ?Sized>(
        &self,
        stream: &mut S,
        palette: &Palette,
        sink: &mut dyn EventSink,
    ) -> Mandala {
        self.generate_seeded(stream, None, palette, sink)
    }

    fn generate_seeded<S: NumberStream + ?Sized>(
        &self,
        stream: &mut S,
        seed_state: Option<u32>,
        palette: &Palette,
        sink: &mut dyn EventSink,
    ) -> Mandala {
        let config = &self.config;
        let num_slices = range_draw(stream, config.min_slices, config.slice_span);
        let num_layers = range_draw(stream, config.min_layers, config.layer_span);
        let slice_angle = 360.0 / f64::from(num_slices);
        let angle = wedge::wedge_angle(num_slices);

        info!(
            "Generating mandala: {} slices, {} layers, {} colors.",
            num_slices,
            num_layers,
            palette.len()
        );
        if sink.wants(MandalaEventKind::GenerationStarted) {
            sink.send(MandalaEvent::GenerationStarted {
                seed_state,
                num_slices,
                num_layers,
                palette_len: palette.len(),
            });
        }
        if palette.len() == 1 {
            warn!("Palette has a single color; every shape shares it.");
            if sink.wants(MandalaEventKind::Warning) {
                sink.send(MandalaEvent::Warning {
                    context: "palette".into(),
                    message: "Palette has a single color; every shape shares it".into(),
                });
            }
        }

        let path_capacity = num_layers as usize * SHAPES_PER_WEDGE as usize * num_slices as usize;
        let mut paths = Vec::with_capacity(path_capacity);
        let mut colors = ColorAssignment::new();
        let mut layers = Vec::with_capacity(num_layers as usize);

        for layer in 0..num_layers {
            let inner_radius = wedge::inner_radius(config, layer);
            if sink.wants(MandalaEventKind::LayerStarted) {
                sink.send(MandalaEvent::LayerStarted {
                    index: layer,
                    inner_radius,
                });
            }

            let shapes = wedge::build_wedge(config, layer, angle, stream);
            let outer_radius = shapes.outer_radius;
            let before = paths.len();

            for (shape, geometry) in (0u32..).zip(shapes.into_shapes()) {
                let color = palette.cyclic((layer + shape) as usize);
                let geometry = Arc::new(geometry);
                let base_id = PathId::new(layer, shape, 0);

                for repetition in 0..num_slices {
                    let id = base_id.with_repetition(repetition);
                    paths.push(PathRecord {
                        id,
                        geometry: Arc::clone(&geometry),
                        rotation: Rotation::from_degrees(f64::from(repetition) * slice_angle),
                    });
                    colors.insert(id, color.clone());
                }

                if sink.wants(MandalaEventKind::ShapeReplicated) {
                    sink.send(MandalaEvent::ShapeReplicated {
                        base_id,
                        color: color.clone(),
                        repetitions: num_slices,
                        max_radius: geometry.max_radius(CANVAS_CENTER),
                    });
                }
            }

            debug!(
                "Layer {}: radii {:.2}..{:.2}, {} paths.",
                layer,
                inner_radius,
                outer_radius,
                paths.len() - before
            );
            if sink.wants(MandalaEventKind::LayerFinished) {
                sink.send(MandalaEvent::LayerFinished {
                    index: layer,
                    inner_radius,
                    outer_radius,
                    path_count: paths.len() - before,
                });
            }
            layers.push(LayerInfo {
                index: layer,
                inner_radius,
                outer_radius,
            });
        }

        if sink.wants(MandalaEventKind::GenerationFinished) {
            sink.send(MandalaEvent::GenerationFinished {
                path_count: paths.len(),
            });
        }

        Mandala {
            seed_state,
            num_slices,
            num_layers,
            layers,
            paths,
            colors,
        }
    }
}

/// Generate with the reference parameters; fails with [`Error::EmptyPalette`] when
/// `colors` is empty.
pub fn generate<I, C>(seed: impl Into<Seed>, colors: I) -> Result<Mandala>
where
    I: IntoIterator<Item = C>,
    C: Into<ColorToken>,
{
    let palette = Palette::new(colors)?;
    Ok(generate_with_palette(seed, &palette))
}

/// Generate with the reference parameters and an already validated palette.
pub fn generate_with_palette(seed: impl Into<Seed>, palette: &Palette) -> Mandala {
    MandalaGenerator::default().generate(seed, palette)
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::events::VecSink;
    use crate::stream::RandStream;

    fn rgb() -> Palette {
        Palette::new(["#FF0000", "#00FF00", "#0000FF"]).unwrap()
    }

    #[test]
    fn default_config_is_valid() {
        LayoutConfig::default().validate().unwrap();
        assert_eq!(LayoutConfig::default().max_slices(), 10);
        assert_eq!(LayoutConfig::default().max_layers(), 3);
        assert!(LayoutConfig::default().max_extent() <= BOUNDING_RADIUS);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let cases = [
            LayoutConfig::default().with_slices(2, 4),
            LayoutConfig::default().with_slices(6, 0),
            LayoutConfig::default().with_layers(0, 2),
            LayoutConfig::default().with_layers(2, 0),
            LayoutConfig::default().with_radii(0.0, 40.0),
            LayoutConfig::default().with_radii(40.0, -1.0),
            LayoutConfig::default().with_band(5.0, 20.0),
            LayoutConfig::default().with_control_jitter(f64::NAN),
            LayoutConfig::default().with_layers(2, 6),
        ];
        for config in cases {
            let err = MandalaGenerator::try_new(config.clone()).unwrap_err();
            assert!(
                matches!(err, Error::InvalidConfig(_)),
                "expected InvalidConfig for {config:?}"
            );
        }
    }

    #[test]
    fn empty_palette_is_a_configuration_error() {
        let err = generate("luna", Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, Error::EmptyPalette));
    }

    #[test]
    fn luna_matches_reference_layout() {
        let mandala = generate("luna", ["#FF0000", "#00FF00", "#0000FF"]).unwrap();
        assert_eq!(mandala.seed_state, Some(3_333_372));
        assert_eq!(mandala.num_slices, 6);
        assert_eq!(mandala.num_layers, 3);
        assert_eq!(mandala.len(), 36);

        let last = mandala.paths.last().unwrap();
        assert_eq!(last.id.to_string(), "path-2-1-5");
        assert_eq!(last.rotation.svg_transform(), "rotate(300, 150, 150)");
        assert!(last
            .geometry
            .svg_path_data()
            .starts_with("M 270,150 L 310.23467789869756,150 Q "));
        assert_eq!(mandala.colors[&last.id], "#FF0000");

        let first = &mandala.paths[0];
        assert_eq!(first.id.to_string(), "path-0-0-0");
        assert!(first
            .geometry
            .svg_path_data()
            .starts_with("M 150,150 L 190,150 Q "));
    }

    #[test]
    fn reference_counts_for_other_words() {
        for (word, slices, layers) in [("abc", 8, 3), ("mandala", 10, 3), ("Vicente", 10, 3)] {
            let mandala = generate_with_palette(word, &rgb());
            assert_eq!(mandala.num_slices, slices, "slices for {word}");
            assert_eq!(mandala.num_layers, layers, "layers for {word}");
            assert_eq!(mandala.len(), (slices * layers * 2) as usize);
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let generator = MandalaGenerator::default();
        for word in ["luna", "abc", "", "Ωmega", "a much longer seed word"] {
            let a = generator.generate(word, &rgb());
            let b = generator.generate(word, &rgb());
            assert_eq!(a, b, "mismatch for {word:?}");
        }
    }

    #[test]
    fn integer_seeds_match_folded_words() {
        let by_word = generate_with_palette("luna", &rgb());
        let by_state = generate_with_palette(3_333_372u32, &rgb());
        assert_eq!(by_word.paths, by_state.paths);
        assert_eq!(by_word.colors, by_state.colors);
    }

    #[test]
    fn colors_are_total_over_paths() {
        let mandala = generate_with_palette("mandala", &Palette::rainbow());
        assert_eq!(mandala.colors.len(), mandala.paths.len());
        for path in &mandala.paths {
            assert!(mandala.color_of(&path.id).is_some(), "{} uncolored", path.id);
        }
        let unique: HashSet<PathId> = mandala.ids().collect();
        assert_eq!(unique.len(), mandala.len());
    }

    #[test]
    fn color_policy_alternates_by_layer_and_shape() {
        let palette = rgb();
        let mandala = generate_with_palette("abc", &palette);
        for path in &mandala.paths {
            let expected = palette.cyclic((path.id.layer + path.id.shape) as usize);
            assert_eq!(&mandala.colors[&path.id], expected);
        }
    }

    #[test]
    fn repetitions_share_geometry_and_cover_the_circle() {
        let mut rng = StdRng::seed_from_u64(2025);
        let generator = MandalaGenerator::default();
        for _ in 0..50 {
            let mut stream = RandStream::new(StdRng::seed_from_u64(rand::RngCore::next_u64(
                &mut rng,
            )));
            let mandala = generator.generate_from_stream(&mut stream, &rgb(), &mut ());
            assert!((6..=10).contains(&mandala.num_slices));
            assert!((2..=3).contains(&mandala.num_layers));

            let mut groups: HashMap<(u32, u32), Vec<&PathRecord>> = HashMap::new();
            for path in &mandala.paths {
                groups
                    .entry((path.id.layer, path.id.shape))
                    .or_default()
                    .push(path);
            }
            assert_eq!(groups.len(), mandala.base_shape_count());
            for records in groups.values() {
                assert_eq!(records.len(), mandala.num_slices as usize);
                let base = records[0];
                let mut steps: Vec<u32> = Vec::new();
                for record in records {
                    assert!(record.shares_geometry_with(base));
                    assert_eq!(record.geometry, base.geometry);
                    let step = record.rotation_degrees() / mandala.slice_angle();
                    assert!((step - step.round()).abs() < 1e-9);
                    steps.push(step.round() as u32);
                }
                steps.sort_unstable();
                let expected: Vec<u32> = (0..mandala.num_slices).collect();
                assert_eq!(steps, expected);
            }
        }
    }

    #[test]
    fn shapes_stay_closed_and_bounded() {
        for word in ["luna", "abc", "mandala", "Vicente", "zz", "Ω"] {
            let mandala = generate_with_palette(word, &rgb());
            for path in &mandala.paths {
                assert!(path.geometry.is_closed());
                let outline = path.outline(12);
                assert_eq!(outline.first(), outline.last());
                for p in outline {
                    let d = glam::DVec2::from(p).distance(CANVAS_CENTER);
                    assert!(d <= BOUNDING_RADIUS, "{} reaches {d}", path.id);
                }
            }
        }
    }

    #[test]
    fn layers_separate_monotonically() {
        let mandala = generate_with_palette("mandala", &rgb());
        for pair in mandala.layers.windows(2) {
            assert!(pair[1].inner_radius > pair[0].inner_radius);
            assert!(pair[1].outer_radius > pair[0].outer_radius);
        }
        for layer in &mandala.layers {
            assert!(layer.outer_radius > layer.inner_radius);
        }
    }

    #[test]
    fn events_trace_the_run() {
        let generator = MandalaGenerator::default();
        let mut sink = VecSink::new();
        let mandala = generator.generate_with_events("luna", &rgb(), &mut sink);
        let events = sink.into_inner();

        assert!(matches!(
            events.first(),
            Some(MandalaEvent::GenerationStarted {
                seed_state: Some(3_333_372),
                num_slices: 6,
                num_layers: 3,
                palette_len: 3,
                ..
            })
        ));
        assert_eq!(
            events.last(),
            Some(&MandalaEvent::GenerationFinished { path_count: 36 })
        );
        let finished: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                MandalaEvent::LayerFinished {
                    index, path_count, ..
                } => {
                    assert_eq!(*path_count, 12);
                    Some(*index)
                }
                _ => None,
            })
            .collect();
        assert_eq!(finished, vec![0, 1, 2]);
        let replicated = events
            .iter()
            .filter(|e| matches!(e, MandalaEvent::ShapeReplicated { .. }))
            .count();
        assert_eq!(replicated, mandala.base_shape_count());
    }

    #[test]
    fn unseeded_streams_report_no_seed_state() {
        let generator = MandalaGenerator::default();
        let mut sink = VecSink::only([MandalaEventKind::GenerationStarted]);
        let mut stream = RandStream::new(StdRng::seed_from_u64(5));
        let mandala = generator.generate_from_stream(&mut stream, &rgb(), &mut sink);
        assert_eq!(mandala.seed_state, None);
        assert!(matches!(
            sink.as_slice(),
            [MandalaEvent::GenerationStarted {
                seed_state: None,
                ..
            }]
        ));
    }

    #[test]
    fn generator_exposes_its_validated_config() {
        let config = LayoutConfig::default().with_slices(8, 1);
        let generator = MandalaGenerator::try_new(config.clone()).unwrap();
        assert_eq!(generator.config(), &config);
        assert_eq!(generator.generate("luna", &rgb()).num_slices, 8);

        let invalid = LayoutConfig::default().with_slices(0, 1);
        assert!(matches!(
            MandalaGenerator::try_new(invalid),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn single_color_palette_warns() {
        let palette = Palette::new(["#000000"]).unwrap();
        let mut sink = VecSink::only([MandalaEventKind::Warning]);
        let mandala =
            MandalaGenerator::default().generate_with_events("luna", &palette, &mut sink);
        assert_eq!(sink.len(), 1);
        assert!(mandala.colors.values().all(|c| c == "#000000"));
    }

    #[test]
    fn paint_order_puts_outer_layers_first() {
        let mandala = generate_with_palette("abc", &rgb());
        let layers: Vec<u32> = mandala.paths_in_paint_order().map(|p| p.id.layer).collect();
        assert_eq!(layers.len(), mandala.len());
        assert!(layers.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn independent_runs_in_parallel_agree() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| generate_with_palette("luna", &rgb())))
            .collect();
        let results: Vec<Mandala> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for r in &results[1..] {
            assert_eq!(r, &results[0]);
        }
    }
}
