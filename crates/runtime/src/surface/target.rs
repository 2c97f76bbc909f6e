//! Rendering target abstraction implemented by hosts.
//!
//! The board surface never paints pixels or glyphs itself. It pushes cell view
//! states and animation frames into a [`RenderTarget`], which the host backs
//! with a terminal, a window, or nothing at all (see
//! [`HeadlessTarget`](super::HeadlessTarget)).
use async_trait::async_trait;
use strum::{AsRefStr, Display};

use game_core::{CellIndex, Theme, TileKind};

use super::cell::{CellView, ColorTag};

/// Position in the target's own coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Pointer shape requested by the interaction layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Cursor {
    #[default]
    Auto,
    Pointer,
    Crosshair,
    NotAllowed,
}

/// Severity of a user-facing message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Error,
}

/// Board description handed to the target when the surface renders.
#[derive(Clone, Debug)]
pub struct BoardLayout {
    pub size: usize,
    pub theme: Theme,
    pub tiles: Vec<TileKind>,
}

impl BoardLayout {
    pub fn cells(&self) -> usize {
        self.tiles.len()
    }
}

/// Concrete rendering backend.
#[async_trait]
pub trait RenderTarget: Send {
    /// Builds the visual grid for `layout`. Called once per render.
    fn mount(&mut self, layout: &BoardLayout);

    /// Switches the board theme after mounting.
    fn set_theme(&mut self, theme: Theme);

    /// Repaints one cell from its current view state.
    fn paint_cell(&mut self, index: CellIndex, view: &CellView);

    /// Centre of a rendered cell in target coordinates.
    fn cell_center(&self, index: CellIndex) -> Point;

    fn set_cursor(&mut self, cursor: Cursor);

    /// Draws the projectile at `at`, replacing any previous frame.
    fn place_projectile(&mut self, at: Point, color: ColorTag);

    fn clear_projectile(&mut self);

    /// Resolves when the damage number on `index` has finished animating.
    async fn damage_finished(&mut self, index: CellIndex, amount: u8);

    /// Shows a blocking user-facing message.
    fn show_message(&mut self, level: MessageLevel, text: &str);
}
