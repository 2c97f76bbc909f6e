//! Ratatui styling for board cells, characters and messages.
use game_core::{CharacterKind, HealthLevel, Side, Theme, TileKind};
use ratatui::style::{Color, Modifier, Style};
use runtime::{CellContent, CellView, ColorTag, MessageLevel};

/// Terminal colour scheme for one board theme.
#[derive(Clone, Copy, Debug)]
pub struct RatatuiTheme {
    theme: Theme,
}

impl RatatuiTheme {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Background for an unselected tile. Border tiles are drawn darker.
    pub fn tile_background(&self, tile: TileKind) -> Color {
        let (edge, inner) = match self.theme {
            Theme::Prairie => (Color::Rgb(70, 110, 40), Color::Rgb(96, 142, 58)),
            Theme::Desert => (Color::Rgb(168, 128, 64), Color::Rgb(204, 168, 96)),
            Theme::Arctic => (Color::Rgb(120, 150, 170), Color::Rgb(176, 200, 214)),
            Theme::Mountain => (Color::Rgb(84, 84, 92), Color::Rgb(122, 118, 112)),
        };
        match tile {
            TileKind::Center => inner,
            _ => edge,
        }
    }

    /// Base style of a cell: selection colour overrides the tile, hover
    /// reverses it and highlighted cells are underlined.
    pub fn cell_style(&self, view: &CellView) -> Style {
        let background = view
            .selection
            .map(selection_color)
            .unwrap_or_else(|| self.tile_background(view.tile));

        let mut style = Style::default().bg(background).fg(Color::Black);
        if view.is_highlighted() {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        if view.is_entered() {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }

    pub fn character_style(&self, content: &CellContent) -> Style {
        Style::default()
            .fg(side_color(content.side))
            .add_modifier(Modifier::BOLD)
    }

    pub fn health_style(&self, level: HealthLevel) -> Style {
        let color = match level {
            HealthLevel::High => Color::Green,
            HealthLevel::Normal => Color::Yellow,
            HealthLevel::Critical => Color::Red,
        };
        Style::default().fg(color)
    }

    pub fn damage_style(&self) -> Style {
        Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD)
    }

    pub fn projectile_style(&self, color: ColorTag) -> Style {
        Style::default()
            .fg(selection_color(color))
            .add_modifier(Modifier::BOLD)
    }

    pub fn message_style(&self, level: MessageLevel) -> Style {
        match level {
            MessageLevel::Info => Style::default().fg(Color::White),
            MessageLevel::Error => Style::default().fg(Color::LightRed),
        }
    }
}

pub fn selection_color(tag: ColorTag) -> Color {
    match tag {
        ColorTag::Yellow => Color::Yellow,
        ColorTag::Green => Color::LightGreen,
        ColorTag::Red => Color::LightRed,
        ColorTag::Blue => Color::LightBlue,
        ColorTag::Violet => Color::Magenta,
    }
}

pub fn side_color(side: Side) -> Color {
    match side {
        Side::Player => Color::Blue,
        Side::Enemy => Color::Red,
    }
}

/// Two-letter glyph for a character kind.
pub fn kind_glyph(kind: CharacterKind) -> &'static str {
    match kind {
        CharacterKind::Swordsman => "Sw",
        CharacterKind::Bowman => "Bw",
        CharacterKind::Magician => "Mg",
        CharacterKind::Vampire => "Vp",
        CharacterKind::Undead => "Ud",
        CharacterKind::Daemon => "Dm",
    }
}
