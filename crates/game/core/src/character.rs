//! Characters, their sides, and the per-kind combat profile.

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::board::CellIndex;
use crate::error::{GameError, Result};

/// Owning player of a character.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr, EnumIter, EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Static numbers attached to a character kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KindProfile {
    pub attack: u8,
    pub defence: u8,
    pub move_range: usize,
    pub attack_range: usize,
}

/// Species/role tag of a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum CharacterKind {
    Swordsman,
    Bowman,
    Magician,
    Vampire,
    Undead,
    Daemon,
}

impl CharacterKind {
    pub const fn profile(self) -> KindProfile {
        let (attack, defence, move_range, attack_range) = match self {
            CharacterKind::Swordsman => (40, 10, 4, 1),
            CharacterKind::Bowman => (25, 25, 2, 2),
            CharacterKind::Magician => (10, 40, 1, 4),
            CharacterKind::Vampire => (25, 25, 2, 2),
            CharacterKind::Undead => (40, 10, 4, 1),
            CharacterKind::Daemon => (10, 10, 1, 4),
        };
        KindProfile {
            attack,
            defence,
            move_range,
            attack_range,
        }
    }

    /// Side whose roster this kind is drawn from.
    pub const fn roster(self) -> Side {
        match self {
            CharacterKind::Swordsman | CharacterKind::Bowman | CharacterKind::Magician => {
                Side::Player
            }
            CharacterKind::Vampire | CharacterKind::Undead | CharacterKind::Daemon => Side::Enemy,
        }
    }

    /// All kinds available to `side`.
    pub fn roster_of(side: Side) -> impl Iterator<Item = CharacterKind> {
        CharacterKind::iter().filter(move |kind| kind.roster() == side)
    }
}

/// Health points in `0..=100`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Health(u8);

impl Health {
    pub const MAX: Self = Self(100);
    pub const ZERO: Self = Self(0);

    pub fn new(value: u8) -> Result<Self> {
        if value > Self::MAX.0 {
            return Err(GameError::InvalidHealth { value });
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_dead(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn saturating_sub(self, amount: u8) -> Self {
        Self(self.0.saturating_sub(amount))
    }

    pub const fn level(self) -> HealthLevel {
        HealthLevel::from_health(self)
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::MAX
    }
}

impl TryFrom<u8> for Health {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Health> for u8 {
    fn from(health: Health) -> Self {
        health.0
    }
}

/// Coarse display band for a health value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum HealthLevel {
    Critical,
    Normal,
    High,
}

impl HealthLevel {
    pub const fn from_health(health: Health) -> Self {
        match health.0 {
            0..15 => HealthLevel::Critical,
            15..50 => HealthLevel::Normal,
            _ => HealthLevel::High,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub kind: CharacterKind,
    pub side: Side,
    pub health: Health,
    pub level: u8,
}

impl Character {
    /// Fresh level-1 character at full health on its roster side.
    pub fn new(kind: CharacterKind) -> Self {
        Self {
            kind,
            side: kind.roster(),
            health: Health::MAX,
            level: 1,
        }
    }

    #[must_use]
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    #[must_use]
    pub fn with_health(mut self, health: Health) -> Self {
        self.health = health;
        self
    }

    #[inline]
    pub fn attack(&self) -> u8 {
        self.kind.profile().attack
    }

    #[inline]
    pub fn defence(&self) -> u8 {
        self.kind.profile().defence
    }
}

/// A character together with the cell it stands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionedCharacter {
    pub character: Character,
    pub position: CellIndex,
}

impl PositionedCharacter {
    pub const fn new(character: Character, position: CellIndex) -> Self {
        Self {
            character,
            position,
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.character.side
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_rejects_values_above_hundred() {
        assert!(Health::new(100).is_ok());
        assert_eq!(
            Health::new(101),
            Err(GameError::InvalidHealth { value: 101 })
        );
    }

    #[test]
    fn health_levels_band_at_fifteen_and_fifty() {
        let level = |v| Health::new(v).unwrap().level();
        assert_eq!(level(0), HealthLevel::Critical);
        assert_eq!(level(14), HealthLevel::Critical);
        assert_eq!(level(15), HealthLevel::Normal);
        assert_eq!(level(49), HealthLevel::Normal);
        assert_eq!(level(50), HealthLevel::High);
        assert_eq!(level(100), HealthLevel::High);
    }

    #[test]
    fn damage_saturates_at_zero() {
        let health = Health::new(10).unwrap().saturating_sub(25);
        assert!(health.is_dead());
    }

    #[test]
    fn rosters_are_split_by_side() {
        let player: Vec<_> = CharacterKind::roster_of(Side::Player).collect();
        let enemy: Vec<_> = CharacterKind::roster_of(Side::Enemy).collect();
        assert_eq!(
            player,
            vec![
                CharacterKind::Swordsman,
                CharacterKind::Bowman,
                CharacterKind::Magician
            ]
        );
        assert_eq!(
            enemy,
            vec![
                CharacterKind::Vampire,
                CharacterKind::Undead,
                CharacterKind::Daemon
            ]
        );
        assert_eq!(Character::new(CharacterKind::Daemon).side, Side::Enemy);
    }
}
