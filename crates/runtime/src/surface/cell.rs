//! Per-cell view state owned by the board surface.
use bitflags::bitflags;
use strum::{AsRefStr, Display};

use game_core::{CharacterKind, HealthLevel, PositionedCharacter, Side, TileKind};

bitflags! {
    /// Transient visual flags. Carry no rule weight.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CellFlags: u8 {
        const SELECTED = 1 << 0;
        const ENTERED = 1 << 1;
        const HIGHLIGHTED = 1 << 2;
    }
}

/// Colour tag shared by selection channels and projectiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ColorTag {
    Yellow,
    Green,
    Red,
    Blue,
    Violet,
}

impl ColorTag {
    /// Projectile colour for shots fired by `side`.
    pub const fn projectile_for(side: Side) -> Self {
        match side {
            Side::Player => ColorTag::Blue,
            Side::Enemy => ColorTag::Violet,
        }
    }
}

/// Character glyph painted into a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellContent {
    pub kind: CharacterKind,
    pub side: Side,
    pub health: u8,
    pub health_level: HealthLevel,
}

impl CellContent {
    /// Width of the health indicator as a percentage of the cell.
    #[inline]
    pub fn health_bar_percent(&self) -> u8 {
        self.health
    }
}

impl From<&PositionedCharacter> for CellContent {
    fn from(positioned: &PositionedCharacter) -> Self {
        let character = positioned.character;
        Self {
            kind: character.kind,
            side: character.side,
            health: character.health.value(),
            health_level: character.health.level(),
        }
    }
}

/// Short-lived element attached to a cell while an animation runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transient {
    Damage { amount: u8 },
    Projectile { color: ColorTag },
}

/// Everything a render target needs to paint one cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellView {
    pub tile: TileKind,
    pub flags: CellFlags,
    pub selection: Option<ColorTag>,
    pub tooltip: Option<String>,
    pub content: Option<CellContent>,
    pub transients: Vec<Transient>,
}

impl CellView {
    pub fn new(tile: TileKind) -> Self {
        Self {
            tile,
            flags: CellFlags::empty(),
            selection: None,
            tooltip: None,
            content: None,
            transients: Vec::new(),
        }
    }

    #[inline]
    pub fn is_selected(&self) -> bool {
        self.flags.contains(CellFlags::SELECTED)
    }

    #[inline]
    pub fn is_entered(&self) -> bool {
        self.flags.contains(CellFlags::ENTERED)
    }

    #[inline]
    pub fn is_highlighted(&self) -> bool {
        self.flags.contains(CellFlags::HIGHLIGHTED)
    }

    pub(crate) fn select(&mut self, color: ColorTag) {
        self.flags.insert(CellFlags::SELECTED);
        self.selection = Some(color);
    }

    pub(crate) fn deselect(&mut self) {
        self.flags.remove(CellFlags::SELECTED);
        self.selection = None;
    }

    pub(crate) fn remove_transient(&mut self, transient: Transient) {
        if let Some(slot) = self.transients.iter().position(|t| *t == transient) {
            self.transients.remove(slot);
        }
    }
}
