//! Painting session state.
//!
//! A [`PaintSession`] is the explicit context a painting front end carries between user
//! actions: the selected color, the active [`Tool`], and the [`UserColoring`] built so far.
//! Each session is independent; starting over means calling [`PaintSession::reset`] or
//! creating a new one.
use tracing::debug;

use crate::error::{Error, Result};
use crate::layout::generator::Mandala;
use crate::layout::PathId;
use crate::palette::{ColorToken, Palette};
use crate::score::{try_score, ScoreBreakdown, UserColoring};

/// What applying the current tool to a path does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Paint the path with the selected color.
    #[default]
    Fill,
    /// Remove any paint from the path.
    Erase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintSession {
    selected_color: ColorToken,
    tool: Tool,
    coloring: UserColoring,
}

impl PaintSession {
    /// Start a session with the first color of `palette` selected and the fill tool active.
    pub fn new(palette: &Palette) -> Self {
        Self::with_color(palette.first().clone())
    }

    pub fn with_color(color: impl Into<ColorToken>) -> Self {
        Self {
            selected_color: color.into(),
            tool: Tool::default(),
            coloring: UserColoring::new(),
        }
    }

    pub fn select_color(&mut self, color: impl Into<ColorToken>) {
        self.selected_color = color.into();
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn selected_color(&self) -> &ColorToken {
        &self.selected_color
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn coloring(&self) -> &UserColoring {
        &self.coloring
    }

    /// Apply the active tool to `id`. Returns true if the coloring changed.
    pub fn apply(&mut self, id: PathId) -> bool {
        match self.tool {
            Tool::Fill => {
                let previous = self.coloring.paint(id, self.selected_color.clone());
                previous.as_ref() != Some(&self.selected_color)
            }
            Tool::Erase => self.coloring.erase(&id).is_some(),
        }
    }

    /// Apply the active tool to `id` after checking it belongs to `mandala`.
    pub fn apply_checked(&mut self, mandala: &Mandala, id: PathId) -> Result<bool> {
        if mandala.color_of(&id).is_none() {
            return Err(Error::InvalidPathId { id: id.to_string() });
        }
        Ok(self.apply(id))
    }

    /// Drop all paint, keeping the selected color and tool.
    pub fn reset(&mut self) {
        debug!("Resetting paint session ({} painted paths).", self.coloring.len());
        self.coloring.clear();
    }

    pub fn breakdown(&self, mandala: &Mandala) -> ScoreBreakdown {
        ScoreBreakdown::compute(&mandala.colors, &self.coloring)
    }

    /// Score the coloring against `mandala`'s ground truth.
    pub fn score(&self, mandala: &Mandala) -> Result<u8> {
        try_score(&mandala.colors, &self.coloring)
    }
}
