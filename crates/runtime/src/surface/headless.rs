//! Render target that draws nothing and records what it was asked to do.
//!
//! Used by automated sides running without a display and by tests that need
//! to observe the surface's output.
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use game_core::{CellIndex, Theme};

use super::cell::{CellView, ColorTag};
use super::target::{BoardLayout, Cursor, MessageLevel, Point, RenderTarget};

/// Pixel size of a notional cell, used to compute cell centres.
pub const HEADLESS_CELL_SIZE: f32 = 32.0;

/// Everything a [`HeadlessTarget`] has been asked to render.
#[derive(Clone, Debug, Default)]
pub struct HeadlessLog {
    pub mounts: usize,
    pub size: usize,
    pub theme: Option<Theme>,
    pub paints: usize,
    pub cursor: Cursor,
    pub projectile_frames: Vec<(Point, ColorTag)>,
    pub projectile_visible: bool,
    pub damage: Vec<(CellIndex, u8)>,
    pub messages: Vec<(MessageLevel, String)>,
}

/// Render target without output. Clones share the same log.
#[derive(Clone, Debug, Default)]
pub struct HeadlessTarget {
    log: Arc<Mutex<HeadlessLog>>,
}

impl HeadlessTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded calls.
    pub fn log(&self) -> HeadlessLog {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, HeadlessLog> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RenderTarget for HeadlessTarget {
    fn mount(&mut self, layout: &BoardLayout) {
        let mut log = self.lock();
        log.mounts += 1;
        log.size = layout.size;
        log.theme = Some(layout.theme);
    }

    fn set_theme(&mut self, theme: Theme) {
        self.lock().theme = Some(theme);
    }

    fn paint_cell(&mut self, _index: CellIndex, _view: &CellView) {
        self.lock().paints += 1;
    }

    fn cell_center(&self, index: CellIndex) -> Point {
        let size = self.lock().size.max(1);
        let (row, col) = (index.0 / size, index.0 % size);
        Point::new(
            (col as f32 + 0.5) * HEADLESS_CELL_SIZE,
            (row as f32 + 0.5) * HEADLESS_CELL_SIZE,
        )
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.lock().cursor = cursor;
    }

    fn place_projectile(&mut self, at: Point, color: ColorTag) {
        let mut log = self.lock();
        log.projectile_frames.push((at, color));
        log.projectile_visible = true;
    }

    fn clear_projectile(&mut self) {
        self.lock().projectile_visible = false;
    }

    async fn damage_finished(&mut self, index: CellIndex, amount: u8) {
        self.lock().damage.push((index, amount));
        tokio::task::yield_now().await;
    }

    fn show_message(&mut self, level: MessageLevel, text: &str) {
        self.lock().messages.push((level, text.to_string()));
    }
}
