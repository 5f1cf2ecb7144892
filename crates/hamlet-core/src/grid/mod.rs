//! Tile grid
//!
//! Owns the dense array of cells for one generation attempt. Lookups outside
//! the grid return `None`; writes go through in-bounds points only.

mod cell;

pub use cell::{Cell, Point, Tile};

use crate::error::{GenError, GenResult};

/// Dense width × height array of cells, stored row-major
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell blank
    pub fn new(width: usize, height: usize) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(x as i32, y as i32));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.width as i32 / 2, self.height as i32 / 2)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn contains(&self, p: Point) -> bool {
        self.in_bounds(p.x, p.y)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    /// The cell at `(x, y)`, or `None` outside the grid
    pub fn cell_at(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn cell_at_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    pub fn get(&self, p: Point) -> Option<&Cell> {
        self.cell_at(p.x, p.y)
    }

    pub fn tile_at(&self, p: Point) -> Option<Tile> {
        self.get(p).map(Cell::tile)
    }

    /// True if `p` is on the grid and holds `tile`
    pub fn is_tile(&self, p: Point, tile: Tile) -> bool {
        self.tile_at(p) == Some(tile)
    }

    /// Pass `p` through if it is on the grid
    pub fn check(&self, p: Point) -> GenResult<Point> {
        if self.contains(p) {
            Ok(p)
        } else {
            Err(GenError::OutOfBounds {
                x: p.x,
                y: p.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Set one cell; points off the grid are ignored
    pub fn set(&mut self, p: Point, tile: Tile, color: u8) {
        if let Some(cell) = self.cell_at_mut(p.x, p.y) {
            cell.set_tile(tile, color);
        }
    }

    /// Set every listed cell
    pub fn paint(&mut self, points: &[Point], tile: Tile, color: u8) {
        for &p in points {
            self.set(p, tile, color);
        }
    }

    /// Set only the listed cells that are still blank
    pub fn paint_blank(&mut self, points: &[Point], tile: Tile, color: u8) {
        for &p in points {
            if let Some(cell) = self.cell_at_mut(p.x, p.y)
                && cell.is_blank()
            {
                cell.set_tile(tile, color);
            }
        }
    }

    /// Reset the listed cells to blank
    pub fn erase(&mut self, points: &[Point]) {
        for &p in points {
            if let Some(cell) = self.cell_at_mut(p.x, p.y) {
                cell.reset();
            }
        }
    }

    /// Reset every cell to blank
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
        }
    }

    /// Set every still-blank cell to `tile`
    pub fn fill(&mut self, tile: Tile, color: u8) {
        for cell in self.cells.iter_mut().filter(|c| c.is_blank()) {
            cell.set_tile(tile, color);
        }
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// `(x, y, symbol, color)` for every cell, row-major
    pub fn glyphs(&self) -> impl Iterator<Item = (i32, i32, char, u8)> + '_ {
        self.cells
            .iter()
            .map(|c| (c.x(), c.y(), c.tile().symbol(), c.color()))
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.cells.iter().filter(|c| c.tile() == tile).count()
    }

    /// One line of symbols per row
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width.max(1)) {
            out.extend(row.iter().map(|c| c.tile().symbol()));
            out.push('\n');
        }
        out
    }
}
