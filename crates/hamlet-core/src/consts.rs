//! Layout constants
//!
//! Grid dimensions match a 128x64 console surface; colors index into
//! a 16-entry palette owned by whoever renders the grid.

/// Default grid dimensions
pub const DEFAULT_WIDTH: usize = 128;
pub const DEFAULT_HEIGHT: usize = 64;

/// Number of palette entries a color index may address
pub const PALETTE_SIZE: u8 = 16;

/// Color a freshly created cell carries
pub const DEFAULT_COLOR: u8 = 6;

/// Building walls draw a color in `1..BUILDING_COLOR_END`
pub const BUILDING_COLOR_START: i32 = 1;
pub const BUILDING_COLOR_END: i32 = 16;
