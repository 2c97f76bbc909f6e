//! Board presentation surface.
//!
//! [`BoardSurface`] owns the view state of every cell and broadcasts raw
//! interaction events. It knows nothing about game rules: the interaction
//! controller decides what to select, highlight, or animate, and the surface
//! forwards the resulting view states to a host-provided [`RenderTarget`].
//!
//! Every operation other than [`BoardSurface::bind`] and listener
//! registration fails with [`RuntimeError::NotBound`] until the surface has
//! been bound and rendered.
mod animation;
mod cell;
mod headless;
mod listeners;
mod target;

use std::collections::BTreeSet;

use tokio::time::{self, Duration, MissedTickBehavior};

use game_core::{Board, CellIndex, PositionedCharacter, Theme};

use crate::api::{Result, RuntimeError};

pub use animation::{AnimationCanceller, AnimationOutcome, ProjectilePath, ProjectileSettings};
pub use cell::{CellContent, CellFlags, CellView, ColorTag, Transient};
pub use headless::{HEADLESS_CELL_SIZE, HeadlessLog, HeadlessTarget};
pub use listeners::Listeners;
pub use target::{BoardLayout, Cursor, MessageLevel, Point, RenderTarget};

use listeners::SurfaceChannels;

const MIN_STEP_PERIOD: Duration = Duration::from_millis(1);

/// View state of the board plus its event channels.
pub struct BoardSurface {
    board: Board,
    target: Option<Box<dyn RenderTarget>>,
    rendered: bool,
    theme: Theme,
    cells: Vec<CellView>,
    channels: SurfaceChannels,
    projectile: ProjectileSettings,
    canceller: AnimationCanceller,
}

impl BoardSurface {
    /// Creates an unbound surface for a board of side `size`.
    pub fn new(size: usize) -> Result<Self> {
        Ok(Self {
            board: Board::new(size)?,
            target: None,
            rendered: false,
            theme: Theme::default(),
            cells: Vec::new(),
            channels: SurfaceChannels::default(),
            projectile: ProjectileSettings::default(),
            canceller: AnimationCanceller::new(),
        })
    }

    #[must_use]
    pub fn with_projectile_settings(mut self, settings: ProjectileSettings) -> Self {
        self.projectile = settings;
        self
    }

    /// Attaches the surface to a render target. Rebinding discards the
    /// previous view state; `render` must be called again.
    pub fn bind(&mut self, target: impl RenderTarget + 'static) {
        self.target = Some(Box::new(target));
        self.rendered = false;
        self.cells.clear();
    }

    /// Replaces the board with one of side `size`. The surface must be
    /// rendered again; listeners and the binding are kept.
    pub fn resize(&mut self, size: usize) -> Result<()> {
        self.board = Board::new(size)?;
        self.rendered = false;
        self.cells.clear();
        Ok(())
    }

    /// Builds the `N²` cell views and mounts them on the target.
    pub fn render(&mut self, theme: Theme) -> Result<()> {
        let target = self.target.as_mut().ok_or(RuntimeError::NotBound)?;
        if self.rendered {
            return Err(RuntimeError::AlreadyRendered);
        }

        self.theme = theme;
        self.cells = self
            .board
            .tiles()
            .map(|(_, tile)| CellView::new(tile))
            .collect();

        let layout = BoardLayout {
            size: self.board.size(),
            theme,
            tiles: self.cells.iter().map(|cell| cell.tile).collect(),
        };
        target.mount(&layout);
        for (i, view) in self.cells.iter().enumerate() {
            target.paint_cell(CellIndex(i), view);
        }
        self.rendered = true;

        tracing::debug!(size = self.board.size(), %theme, "board surface rendered");
        Ok(())
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Handle that cancels in-flight animations at their next step.
    pub fn canceller(&self) -> AnimationCanceller {
        self.canceller.clone()
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.target.is_some() && self.rendered {
            Ok(())
        } else {
            Err(RuntimeError::NotBound)
        }
    }

    fn check_index(&self, index: CellIndex) -> Result<()> {
        self.ensure_ready()?;
        if self.board.contains(index) {
            Ok(())
        } else {
            Err(RuntimeError::CellOutOfBounds {
                index,
                cells: self.board.len(),
            })
        }
    }

    fn paint(&mut self, index: CellIndex) {
        if let Some(target) = self.target.as_mut() {
            target.paint_cell(index, &self.cells[index.0]);
        }
    }

    fn paint_all(&mut self) {
        if let Some(target) = self.target.as_mut() {
            for (i, view) in self.cells.iter().enumerate() {
                target.paint_cell(CellIndex(i), view);
            }
        }
    }

    /// View state of one cell.
    pub fn cell(&self, index: CellIndex) -> Result<&CellView> {
        self.check_index(index)?;
        Ok(&self.cells[index.0])
    }

    /// View states of every cell; empty until rendered.
    pub fn cells(&self) -> &[CellView] {
        &self.cells
    }

    /// Cells whose `highlighted` flag is set.
    pub fn highlighted(&self) -> BTreeSet<CellIndex> {
        self.indices_where(CellView::is_highlighted)
    }

    /// Cells whose `selected` flag is set.
    pub fn selected(&self) -> BTreeSet<CellIndex> {
        self.indices_where(CellView::is_selected)
    }

    fn indices_where(&self, predicate: impl Fn(&CellView) -> bool) -> BTreeSet<CellIndex> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| predicate(cell))
            .map(|(i, _)| CellIndex(i))
            .collect()
    }

    // ===== content =====

    /// Clears every cell's content and repaints one glyph per character.
    ///
    /// A full repaint: the same input always yields the same content state.
    pub fn redraw_positions(&mut self, positions: &[PositionedCharacter]) -> Result<()> {
        self.ensure_ready()?;
        for positioned in positions {
            self.check_index(positioned.position)?;
        }

        for cell in &mut self.cells {
            cell.content = None;
        }
        for positioned in positions {
            self.cells[positioned.position.0].content = Some(CellContent::from(positioned));
        }
        self.paint_all();

        tracing::trace!(characters = positions.len(), "positions redrawn");
        Ok(())
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.ensure_ready()?;
        self.theme = theme;
        if let Some(target) = self.target.as_mut() {
            target.set_theme(theme);
        }
        self.paint_all();
        Ok(())
    }

    // ===== selection, hover, highlight =====

    /// Selects `index` in the `color` channel.
    ///
    /// Whatever cell held `color` before is deselected, and any other colour
    /// on `index` is replaced.
    pub fn select(&mut self, index: CellIndex, color: ColorTag) -> Result<()> {
        self.check_index(index)?;

        let previous: Vec<CellIndex> = self
            .indices_where(|cell| cell.selection == Some(color))
            .into_iter()
            .filter(|i| *i != index)
            .collect();
        for i in previous {
            self.cells[i.0].deselect();
            self.paint(i);
        }

        let cell = &mut self.cells[index.0];
        cell.deselect();
        cell.select(color);
        self.paint(index);
        Ok(())
    }

    pub fn deselect(&mut self, index: CellIndex) -> Result<()> {
        self.check_index(index)?;
        self.cells[index.0].deselect();
        self.paint(index);
        Ok(())
    }

    /// Deselects every cell in every colour channel.
    pub fn deselect_all(&mut self) -> Result<()> {
        self.ensure_ready()?;
        for i in self.selected() {
            self.cells[i.0].deselect();
            self.paint(i);
        }
        Ok(())
    }

    pub fn enter(&mut self, index: CellIndex) -> Result<()> {
        self.check_index(index)?;
        self.cells[index.0].flags.insert(CellFlags::ENTERED);
        self.paint(index);
        Ok(())
    }

    pub fn leave(&mut self, index: CellIndex) -> Result<()> {
        self.check_index(index)?;
        self.cells[index.0].flags.remove(CellFlags::ENTERED);
        self.paint(index);
        Ok(())
    }

    /// Adds `indices` to the highlighted set. Validates every index before
    /// touching any cell.
    pub fn highlight<I>(&mut self, indices: I) -> Result<()>
    where
        I: IntoIterator<Item = CellIndex>,
    {
        let indices: Vec<CellIndex> = indices.into_iter().collect();
        for index in &indices {
            self.check_index(*index)?;
        }
        self.ensure_ready()?;

        for index in indices {
            self.cells[index.0].flags.insert(CellFlags::HIGHLIGHTED);
            self.paint(index);
        }
        Ok(())
    }

    /// Clears the highlighted flag on every cell.
    pub fn dehighlight(&mut self) -> Result<()> {
        self.ensure_ready()?;
        for i in self.highlighted() {
            self.cells[i.0].flags.remove(CellFlags::HIGHLIGHTED);
            self.paint(i);
        }
        Ok(())
    }

    pub fn set_tooltip(&mut self, index: CellIndex, message: impl Into<String>) -> Result<()> {
        self.check_index(index)?;
        self.cells[index.0].tooltip = Some(message.into());
        self.paint(index);
        Ok(())
    }

    pub fn clear_tooltip(&mut self, index: CellIndex) -> Result<()> {
        self.check_index(index)?;
        self.cells[index.0].tooltip = None;
        self.paint(index);
        Ok(())
    }

    pub fn set_cursor(&mut self, cursor: Cursor) -> Result<()> {
        self.ensure_ready()?;
        if let Some(target) = self.target.as_mut() {
            target.set_cursor(cursor);
        }
        Ok(())
    }

    /// Shows a blocking user-facing message through the target.
    pub fn show_message(&mut self, level: MessageLevel, text: &str) -> Result<()> {
        self.ensure_ready()?;
        if let Some(target) = self.target.as_mut() {
            target.show_message(level, text);
        }
        Ok(())
    }

    // ===== animations =====

    /// Shows a damage number on `index` until the target reports the
    /// animation finished, then removes it.
    ///
    /// Concurrent calls on the same index must be serialized by the caller.
    pub async fn animate_damage(&mut self, index: CellIndex, amount: u8) -> Result<()> {
        self.check_index(index)?;
        let mut cancelled = self.canceller.subscribe();
        let element = Transient::Damage { amount };

        let target = self.target.as_mut().ok_or(RuntimeError::NotBound)?;
        self.cells[index.0].transients.push(element);
        target.paint_cell(index, &self.cells[index.0]);

        tokio::select! {
            biased;
            Ok(()) = cancelled.changed() => {
                tracing::debug!(%index, "damage animation cancelled");
            }
            _ = target.damage_finished(index, amount) => {}
        }

        self.cells[index.0].remove_transient(element);
        target.paint_cell(index, &self.cells[index.0]);
        Ok(())
    }

    /// Moves a projectile from the centre of `from` to the centre of `to` in
    /// fixed steps, then removes it.
    ///
    /// Resolves once, after at least one step unless cancelled first.
    pub async fn animate_projectile(
        &mut self,
        from: CellIndex,
        to: CellIndex,
        color: ColorTag,
    ) -> Result<AnimationOutcome> {
        self.check_index(from)?;
        self.check_index(to)?;
        let mut cancelled = self.canceller.subscribe();
        let element = Transient::Projectile { color };

        let target = self.target.as_mut().ok_or(RuntimeError::NotBound)?;
        let path = ProjectilePath::new(
            target.cell_center(from),
            target.cell_center(to),
            self.projectile.steps,
        );
        self.cells[from.0].transients.push(element);
        target.paint_cell(from, &self.cells[from.0]);

        let mut ticker = time::interval(self.projectile.step_period.max(MIN_STEP_PERIOD));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut steps = 0;
        let mut interrupted = false;
        for frame in path {
            tokio::select! {
                biased;
                Ok(()) = cancelled.changed() => {
                    interrupted = true;
                    break;
                }
                _ = ticker.tick() => {}
            }
            target.place_projectile(frame, color);
            steps += 1;
        }

        target.clear_projectile();
        self.cells[from.0].remove_transient(element);
        target.paint_cell(from, &self.cells[from.0]);

        let outcome = if interrupted {
            AnimationOutcome::Cancelled { steps }
        } else {
            AnimationOutcome::Completed { steps }
        };
        tracing::trace!(%from, %to, ?outcome, "projectile finished");
        Ok(outcome)
    }

    // ===== event channels =====

    pub fn on_cell_enter(&mut self, callback: impl FnMut(CellIndex) + Send + 'static) {
        self.channels.cell_enter.register(callback);
    }

    pub fn on_cell_leave(&mut self, callback: impl FnMut(CellIndex) + Send + 'static) {
        self.channels.cell_leave.register(callback);
    }

    pub fn on_cell_click(&mut self, callback: impl FnMut(CellIndex) + Send + 'static) {
        self.channels.cell_click.register(callback);
    }

    pub fn on_new_game(&mut self, mut callback: impl FnMut() + Send + 'static) {
        self.channels.new_game.register(move |()| callback());
    }

    pub fn on_save_game(&mut self, mut callback: impl FnMut() + Send + 'static) {
        self.channels.save_game.register(move |()| callback());
    }

    pub fn on_load_game(&mut self, mut callback: impl FnMut() + Send + 'static) {
        self.channels.load_game.register(move |()| callback());
    }

    /// Raw pointer-enter from the host.
    pub fn emit_cell_enter(&mut self, index: CellIndex) -> Result<()> {
        self.check_index(index)?;
        self.channels.cell_enter.notify(index);
        Ok(())
    }

    /// Raw pointer-leave from the host.
    pub fn emit_cell_leave(&mut self, index: CellIndex) -> Result<()> {
        self.check_index(index)?;
        self.channels.cell_leave.notify(index);
        Ok(())
    }

    /// Raw click from the host.
    pub fn emit_cell_click(&mut self, index: CellIndex) -> Result<()> {
        self.check_index(index)?;
        self.channels.cell_click.notify(index);
        Ok(())
    }

    pub fn emit_new_game(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.channels.new_game.notify(());
        Ok(())
    }

    pub fn emit_save_game(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.channels.save_game.notify(());
        Ok(())
    }

    pub fn emit_load_game(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.channels.load_game.notify(());
        Ok(())
    }
}
