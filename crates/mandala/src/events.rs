//! Event types and sinks for observing generation runs.
//!
//! This module defines [`MandalaEvent`] and a set of sinks and adapters to emit,
//! collect, or forward events while a [`crate::layout::generator::MandalaGenerator`]
//! lays out a mandala.
use crate::layout::PathId;
use crate::palette::ColorToken;

/// Describes events emitted while generating a mandala.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum MandalaEvent {
    /// Emitted once the symmetry order and layer count are drawn.
    GenerationStarted {
        /// Initial stream state, when the run was seeded.
        seed_state: Option<u32>,
        /// Rotational symmetry order.
        num_slices: u32,
        /// Number of concentric layers.
        num_layers: u32,
        /// Number of colors available.
        palette_len: usize,
    },

    /// Emitted when the whole mandala is laid out.
    GenerationFinished {
        /// Total number of path records.
        path_count: usize,
    },

    /// Emitted when a layer starts.
    LayerStarted {
        /// Index of the layer, counted outward from the center.
        index: u32,
        /// Inner radius of the layer.
        inner_radius: f64,
    },

    /// Emitted when one base shape has been replicated around the circle.
    ShapeReplicated {
        /// Id of the unrotated repetition.
        base_id: PathId,
        /// Ground-truth color shared by every repetition.
        color: ColorToken,
        /// Number of rotated copies emitted.
        repetitions: u32,
        /// Farthest extent of the shape from the canvas center.
        max_radius: f64,
    },

    /// Emitted when a layer finishes.
    LayerFinished {
        /// Index of the layer.
        index: u32,
        /// Inner radius of the layer.
        inner_radius: f64,
        /// Outer radius drawn for the layer's band.
        outer_radius: f64,
        /// Number of path records emitted for the layer.
        path_count: usize,
    },

    /// Non-fatal warning generated during layout.
    Warning {
        /// Context string (e.g. layer index).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`MandalaEvent`], used by sinks to opt out of events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MandalaEventKind {
    GenerationStarted,
    GenerationFinished,
    LayerStarted,
    ShapeReplicated,
    LayerFinished,
    Warning,
}

impl MandalaEvent {
    pub fn kind(&self) -> MandalaEventKind {
        match self {
            MandalaEvent::GenerationStarted { .. } => MandalaEventKind::GenerationStarted,
            MandalaEvent::GenerationFinished { .. } => MandalaEventKind::GenerationFinished,
            MandalaEvent::LayerStarted { .. } => MandalaEventKind::LayerStarted,
            MandalaEvent::ShapeReplicated { .. } => MandalaEventKind::ShapeReplicated,
            MandalaEvent::LayerFinished { .. } => MandalaEventKind::LayerFinished,
            MandalaEvent::Warning { .. } => MandalaEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`MandalaEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: MandalaEvent);

    /// Whether events of `kind` should be built and sent at all.
    #[inline]
    fn wants(&mut self, _kind: MandalaEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = MandalaEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: MandalaEvent) {}

    #[inline]
    fn wants(&mut self, _kind: MandalaEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(MandalaEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(MandalaEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(MandalaEvent),
{
    #[inline]
    fn send(&mut self, event: MandalaEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`, optionally restricted to some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<MandalaEvent>,
    only: Option<Vec<MandalaEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            only: None,
        }
    }

    /// Collect only events whose kind is listed.
    pub fn only(kinds: impl IntoIterator<Item = MandalaEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<MandalaEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[MandalaEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: MandalaEvent) {
        self.events.push(event);
    }

    fn wants(&mut self, kind: MandalaEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: MandalaEvent) {
        let kind = event.kind();
        let mut targets: Vec<usize> = Vec::with_capacity(self.sinks.len());
        for (i, sink) in self.sinks.iter_mut().enumerate() {
            if sink.wants(kind) {
                targets.push(i);
            }
        }
        let Some((&last, rest)) = targets.split_last() else {
            return;
        };
        for &i in rest {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last].send(event);
    }

    fn wants(&mut self, kind: MandalaEventKind) -> bool {
        self.sinks.iter_mut().any(|s| s.wants(kind))
    }
}
