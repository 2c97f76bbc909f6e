//! Square board geometry.
//!
//! A board of side length `N` holds `N²` cells addressed by a flat
//! [`CellIndex`] in row-major order. Every cell carries a fixed [`TileKind`]
//! assigned when the board is built.

use std::fmt;

use strum::{AsRefStr, Display, EnumIter};

use crate::error::{GameError, Result};

/// Flat, row-major index of a board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CellIndex(pub usize);

impl CellIndex {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for CellIndex {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Geometric classification of a cell, used for tile artwork only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case")]
pub enum TileKind {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

/// Classifies `index` on a board of side `size`.
///
/// Corners win over edges; an index outside the board is classified as if the
/// board extended downwards, callers are expected to bounds-check first.
pub fn tile_kind(index: CellIndex, size: usize) -> TileKind {
    let last = size.saturating_sub(1);
    let row = index.0 / size.max(1);
    let col = index.0 % size.max(1);

    match (row, col) {
        (0, 0) => TileKind::TopLeft,
        (0, c) if c == last => TileKind::TopRight,
        (r, 0) if r == last => TileKind::BottomLeft,
        (r, c) if r == last && c == last => TileKind::BottomRight,
        (0, _) => TileKind::Top,
        (r, _) if r == last => TileKind::Bottom,
        (_, 0) => TileKind::Left,
        (_, c) if c == last => TileKind::Right,
        _ => TileKind::Center,
    }
}

/// Chessboard distance between two cells of a board with side `size`.
pub fn chebyshev_distance(a: CellIndex, b: CellIndex, size: usize) -> usize {
    let (ar, ac) = (a.0 / size, a.0 % size);
    let (br, bc) = (b.0 / size, b.0 % size);
    ar.abs_diff(br).max(ac.abs_diff(bc))
}

/// Fixed-size square board.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "BoardData"))]
pub struct Board {
    size: usize,
    tiles: Vec<TileKind>,
}

/// Serialized form of a [`Board`], checked against a freshly built board.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct BoardData {
    size: usize,
    tiles: Vec<TileKind>,
}

#[cfg(feature = "serde")]
impl TryFrom<BoardData> for Board {
    type Error = GameError;

    fn try_from(data: BoardData) -> Result<Self> {
        let board = Board::new(data.size)?;
        if board.tiles != data.tiles {
            return Err(GameError::TileMismatch { size: data.size });
        }
        Ok(board)
    }
}

impl Board {
    pub const MIN_SIZE: usize = 2;

    /// Builds a board of side `size`, classifying every cell once.
    pub fn new(size: usize) -> Result<Self> {
        if size < Self::MIN_SIZE {
            return Err(GameError::InvalidBoardSize { size });
        }

        let tiles = (0..size * size)
            .map(|i| tile_kind(CellIndex(i), size))
            .collect();

        Ok(Self { size, tiles })
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (`size²`).
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    pub fn contains(&self, index: CellIndex) -> bool {
        index.0 < self.tiles.len()
    }

    /// Returns `index` unchanged if it addresses a cell on this board.
    pub fn check(&self, index: CellIndex) -> Result<CellIndex> {
        if self.contains(index) {
            Ok(index)
        } else {
            Err(GameError::OutOfBounds {
                index,
                cells: self.len(),
            })
        }
    }

    pub fn tile(&self, index: CellIndex) -> Option<TileKind> {
        self.tiles.get(index.0).copied()
    }

    pub fn tiles(&self) -> impl Iterator<Item = (CellIndex, TileKind)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, tile)| (CellIndex(i), *tile))
    }

    /// `(row, column)` of a cell.
    pub fn coords(&self, index: CellIndex) -> (usize, usize) {
        (index.0 / self.size, index.0 % self.size)
    }

    /// Cell at `(row, column)`, or `None` off the board.
    pub fn index_of(&self, row: isize, col: isize) -> Option<CellIndex> {
        let size = self.size as isize;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(CellIndex((row * size + col) as usize))
        } else {
            None
        }
    }

    pub fn distance(&self, a: CellIndex, b: CellIndex) -> usize {
        chebyshev_distance(a, b, self.size)
    }
}
