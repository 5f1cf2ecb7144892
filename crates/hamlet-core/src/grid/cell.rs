//! Grid cell types

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::DEFAULT_COLOR;

/// Tile symbol stored in a cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Tile {
    /// Unoccupied
    #[default]
    Blank = 0,
    Road = 1,
    /// Building wall
    Building = 2,
    /// Building floor, door opening or setback ring
    Reserved = 3,
    Grass = 4,
    /// Fallback fill after a failed generation attempt
    Error = 5,
}

impl Tile {
    /// Whether the cell is free for new structures
    pub const fn is_blank(&self) -> bool {
        matches!(self, Tile::Blank)
    }

    /// Get the display character for this tile
    pub const fn symbol(&self) -> char {
        match self {
            Tile::Blank => ' ',
            Tile::Road => '+',
            Tile::Building => '#',
            Tile::Reserved => '.',
            Tile::Grass => ',',
            Tile::Error => '!',
        }
    }
}

/// Integer grid coordinate
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The point itself followed by its four axis neighbours
    pub const fn with_orthogonal_neighbours(self) -> [Point; 5] {
        [
            self,
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(0, 1),
        ]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.x, self.y)
    }
}

/// A single grid cell
///
/// The position is fixed at creation; tile and color change as generation
/// passes paint over the grid. Two cells are the same cell iff their
/// positions match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pos: Point,
    tile: Tile,
    color: u8,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            pos: Point::new(x, y),
            tile: Tile::Blank,
            color: DEFAULT_COLOR,
        }
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn x(&self) -> i32 {
        self.pos.x
    }

    pub fn y(&self) -> i32 {
        self.pos.y
    }

    pub fn tile(&self) -> Tile {
        self.tile
    }

    pub fn color(&self) -> u8 {
        self.color
    }

    pub fn is_blank(&self) -> bool {
        self.tile.is_blank()
    }

    pub fn set_tile(&mut self, tile: Tile, color: u8) {
        self.tile = tile;
        self.color = color;
    }

    /// Reset to a fresh blank cell
    pub fn reset(&mut self) {
        self.set_tile(Tile::Blank, DEFAULT_COLOR);
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for Cell {}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.pos, self.tile.symbol())
    }
}
