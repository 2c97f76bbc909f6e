//! Screen model of the board and its ratatui widget.
//!
//! [`BoardFrame`] mirrors what the surface has pushed into the terminal
//! target: one [`CellView`] per cell, the pointer shape, the projectile frame
//! and the last message. Cells are laid out on a character grid
//! [`CELL_WIDTH`] x [`CELL_HEIGHT`]; the same grid defines the coordinate
//! space reported by [`BoardFrame::cell_center`].
use game_core::{CellIndex, Theme};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::Widget,
};
use runtime::{BoardLayout, CellView, ColorTag, Cursor, MessageLevel, Point, Transient};

use super::theme::{RatatuiTheme, kind_glyph};

pub const CELL_WIDTH: u16 = 7;
pub const CELL_HEIGHT: u16 = 3;

const HEALTH_BAR_WIDTH: usize = CELL_WIDTH as usize - 2;
const HIGHLIGHT_MARK: &str = "+";
const PROJECTILE_GLYPH: &str = "*";

#[derive(Clone, Debug, Default)]
pub struct BoardFrame {
    size: usize,
    theme: Theme,
    cells: Vec<CellView>,
    cursor: Cursor,
    projectile: Option<(Point, ColorTag)>,
    message: Option<(MessageLevel, String)>,
}

impl BoardFrame {
    /// Rebuilds the grid for a freshly rendered board.
    pub fn mount(&mut self, layout: &BoardLayout) {
        self.size = layout.size;
        self.theme = layout.theme;
        self.cells = layout.tiles.iter().copied().map(CellView::new).collect();
        self.cursor = Cursor::Auto;
        self.projectile = None;
    }

    pub fn is_mounted(&self) -> bool {
        !self.cells.is_empty()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn cell(&self, index: CellIndex) -> Option<&CellView> {
        self.cells.get(index.0)
    }

    pub fn paint(&mut self, index: CellIndex, view: &CellView) {
        match self.cells.get_mut(index.0) {
            Some(slot) => *slot = view.clone(),
            None => tracing::warn!(%index, "paint outside the mounted board"),
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    pub fn projectile(&self) -> Option<(Point, ColorTag)> {
        self.projectile
    }

    pub fn place_projectile(&mut self, at: Point, color: ColorTag) {
        self.projectile = Some((at, color));
    }

    pub fn clear_projectile(&mut self) {
        self.projectile = None;
    }

    pub fn message(&self) -> Option<(MessageLevel, &str)> {
        self.message
            .as_ref()
            .map(|(level, text)| (*level, text.as_str()))
    }

    pub fn set_message(&mut self, level: MessageLevel, text: &str) {
        self.message = Some((level, text.to_string()));
    }

    /// Centre of `index` in character units from the board's top-left corner.
    pub fn cell_center(&self, index: CellIndex) -> Point {
        let size = self.size.max(1);
        let (row, col) = (index.0 / size, index.0 % size);
        Point::new(
            col as f32 * f32::from(CELL_WIDTH) + f32::from(CELL_WIDTH) / 2.0,
            row as f32 * f32::from(CELL_HEIGHT) + f32::from(CELL_HEIGHT) / 2.0,
        )
    }

    pub fn width(&self) -> u16 {
        grid_extent(self.size, CELL_WIDTH)
    }

    pub fn height(&self) -> u16 {
        grid_extent(self.size, CELL_HEIGHT)
    }

    /// Tooltip of the hovered cell, if it carries one.
    pub fn tooltip(&self) -> Option<&str> {
        self.cells
            .iter()
            .find(|cell| cell.is_entered())
            .and_then(|cell| cell.tooltip.as_deref())
    }

    /// Short description of the current pointer shape.
    pub fn cursor_hint(&self) -> &'static str {
        match self.cursor {
            Cursor::Auto => "",
            Cursor::Pointer => "select",
            Cursor::Crosshair => "attack",
            Cursor::NotAllowed => "out of reach",
        }
    }

    fn render_cell(&self, theme: &RatatuiTheme, index: usize, area: Rect, buf: &mut Buffer) {
        let Some(view) = self.cells.get(index) else {
            return;
        };
        let (row, col) = (index / self.size, index % self.size);
        let cell_area = Rect::new(
            area.x.saturating_add(col as u16 * CELL_WIDTH),
            area.y.saturating_add(row as u16 * CELL_HEIGHT),
            CELL_WIDTH,
            CELL_HEIGHT,
        )
        .intersection(area);
        if cell_area.is_empty() {
            return;
        }

        let base = theme.cell_style(view);
        buf.set_style(cell_area, base);

        let (x, y) = (cell_area.x, cell_area.y);
        let right = x + cell_area.width.saturating_sub(1);
        if view.is_highlighted() {
            buf.set_string(x, y, HIGHLIGHT_MARK, base);
            buf.set_string(right, y, HIGHLIGHT_MARK, base);
        }

        for transient in &view.transients {
            if let Transient::Damage { amount } = transient {
                buf.set_string(x + 2, y, format!("-{amount}"), base.patch(theme.damage_style()));
            }
        }

        if let Some(content) = &view.content {
            let glyph_x = x + (CELL_WIDTH - 2) / 2;
            buf.set_string(
                glyph_x,
                y + 1,
                kind_glyph(content.kind),
                base.patch(theme.character_style(content)),
            );
            if cell_area.height == CELL_HEIGHT {
                buf.set_string(
                    x + 1,
                    y + 2,
                    health_bar(content.health_bar_percent()),
                    base.patch(theme.health_style(content.health_level)),
                );
            }
        }
    }
}

impl Widget for &BoardFrame {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.is_mounted() {
            return;
        }
        let theme = RatatuiTheme::new(self.theme);
        for index in 0..self.cells.len() {
            self.render_cell(&theme, index, area, buf);
        }

        if let Some((at, color)) = self.projectile {
            let x = area.x.saturating_add(at.x.max(0.0) as u16);
            let y = area.y.saturating_add(at.y.max(0.0) as u16);
            if x < area.right() && y < area.bottom() {
                let style = buf[(x, y)].style().patch(theme.projectile_style(color));
                buf.set_string(x, y, PROJECTILE_GLYPH, style);
            }
        }
    }
}

fn grid_extent(cells: usize, per_cell: u16) -> u16 {
    u16::try_from(cells)
        .unwrap_or(u16::MAX)
        .saturating_mul(per_cell)
}

/// Health bar filled in proportion to `percent`, rounded up.
pub fn health_bar(percent: u8) -> String {
    let filled = (usize::from(percent.min(100)) * HEALTH_BAR_WIDTH).div_ceil(100);
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(HEALTH_BAR_WIDTH - filled));
    bar
}
