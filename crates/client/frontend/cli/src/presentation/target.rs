//! [`RenderTarget`] backed by a ratatui terminal.
//!
//! Cell repaints only update the [`BoardFrame`] model; the host flushes once
//! per batch of input. Animation frames and messages draw immediately so they
//! are visible while the surface is awaiting them.
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use game_core::{CellIndex, Theme};
use ratatui::{Terminal, backend::Backend};
use runtime::{BoardLayout, CellView, ColorTag, Cursor, MessageLevel, Point, RenderTarget};

use super::board::BoardFrame;
use super::ui;

struct Screen<B: Backend> {
    terminal: Terminal<B>,
    frame: BoardFrame,
}

impl<B: Backend> Screen<B> {
    fn draw(&mut self) {
        let Self { terminal, frame } = self;
        if let Err(err) = terminal.draw(|f| ui::render(f, frame)) {
            tracing::warn!(%err, "terminal draw failed");
        }
    }
}

/// Terminal render target. Clones share the same screen, so the host can keep
/// one to flush while the surface owns another.
pub struct TerminalTarget<B: Backend> {
    screen: Arc<Mutex<Screen<B>>>,
    damage_display: Duration,
}

impl<B: Backend> Clone for TerminalTarget<B> {
    fn clone(&self) -> Self {
        Self {
            screen: Arc::clone(&self.screen),
            damage_display: self.damage_display,
        }
    }
}

impl<B: Backend> TerminalTarget<B> {
    pub fn new(terminal: Terminal<B>, damage_display: Duration) -> Self {
        Self {
            screen: Arc::new(Mutex::new(Screen {
                terminal,
                frame: BoardFrame::default(),
            })),
            damage_display,
        }
    }

    /// Draws the current model.
    pub fn flush(&self) {
        self.lock().draw();
    }

    /// Snapshot of the screen model.
    pub fn frame(&self) -> BoardFrame {
        self.lock().frame.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Screen<B>> {
        self.screen.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, apply: impl FnOnce(&mut BoardFrame)) {
        apply(&mut self.lock().frame);
    }

    fn update_and_draw(&self, apply: impl FnOnce(&mut BoardFrame)) {
        let mut screen = self.lock();
        apply(&mut screen.frame);
        screen.draw();
    }
}

#[async_trait]
impl<B> RenderTarget for TerminalTarget<B>
where
    B: Backend + Send + 'static,
{
    fn mount(&mut self, layout: &BoardLayout) {
        tracing::debug!(size = layout.size, theme = %layout.theme, "mounting board");
        self.update(|frame| frame.mount(layout));
    }

    fn set_theme(&mut self, theme: Theme) {
        self.update(|frame| frame.set_theme(theme));
    }

    fn paint_cell(&mut self, index: CellIndex, view: &CellView) {
        self.update(|frame| frame.paint(index, view));
    }

    fn cell_center(&self, index: CellIndex) -> Point {
        self.lock().frame.cell_center(index)
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.update(|frame| frame.set_cursor(cursor));
    }

    fn place_projectile(&mut self, at: Point, color: ColorTag) {
        self.update_and_draw(|frame| frame.place_projectile(at, color));
    }

    fn clear_projectile(&mut self) {
        self.update_and_draw(BoardFrame::clear_projectile);
    }

    async fn damage_finished(&mut self, index: CellIndex, amount: u8) {
        tracing::trace!(%index, amount, "showing damage");
        self.flush();
        tokio::time::sleep(self.damage_display).await;
    }

    fn show_message(&mut self, level: MessageLevel, text: &str) {
        match level {
            MessageLevel::Info => tracing::info!(message = text, "user message"),
            MessageLevel::Error => tracing::warn!(message = text, "user error"),
        }
        self.update_and_draw(|frame| frame.set_message(level, text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::tile_kind;
    use ratatui::backend::TestBackend;

    fn target() -> TerminalTarget<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        let mut target = TerminalTarget::new(terminal, Duration::from_millis(600));
        target.mount(&BoardLayout {
            size: 4,
            theme: Theme::Arctic,
            tiles: (0..16).map(|i| tile_kind(CellIndex(i), 4)).collect(),
        });
        target
    }

    fn symbol_at(target: &TerminalTarget<TestBackend>, x: u16, y: u16) -> String {
        let screen = target.lock();
        screen.terminal.backend().buffer()[(x, y)].symbol().to_string()
    }

    #[test]
    fn clones_share_the_screen_model() {
        let mut surface_side = target();
        let host_side = surface_side.clone();

        surface_side.set_cursor(Cursor::Crosshair);
        assert_eq!(host_side.frame().cursor(), Cursor::Crosshair);
        assert_eq!(host_side.frame().theme(), Theme::Arctic);
        assert_eq!(surface_side.cell_center(CellIndex(5)), Point::new(10.5, 4.5));
    }

    #[test]
    fn projectile_frames_are_drawn_immediately() {
        let mut target = target();
        let at = target.cell_center(CellIndex(0));
        target.place_projectile(at, ColorTag::Violet);

        // One column and one row of border precede the board.
        assert_eq!(symbol_at(&target, 4, 2), "*");

        target.clear_projectile();
        assert_ne!(symbol_at(&target, 4, 2), "*");
        assert!(target.frame().projectile().is_none());
    }

    #[test]
    fn messages_are_kept_on_the_model() {
        let mut target = target();
        target.show_message(MessageLevel::Error, "No saved game in slot quicksave");
        assert_eq!(
            target.frame().message(),
            Some((MessageLevel::Error, "No saved game in slot quicksave"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn damage_resolves_after_display_time() {
        let mut target = target();
        let started = tokio::time::Instant::now();
        target.damage_finished(CellIndex(3), 7).await;
        assert!(started.elapsed() >= Duration::from_millis(600));
    }
}
