//! Geometry showcase
//!
//! Draws the primitives straight onto a grid: a starburst of rays, random
//! lines and random discs. Handy for eyeballing rasterization; not part of
//! town generation.

use crate::consts::PALETTE_SIZE;
use crate::error::GenResult;
use crate::geometry::{circle, clamp_to_grid, line, project, random_cell};
use crate::grid::{Grid, Point, Tile};
use crate::rng::TownRng;

/// Rays of length `radius` from `center`, evenly spaced around the circle
pub fn starburst(
    grid: &mut Grid,
    center: Point,
    radius: i32,
    rays: u32,
    color: u8,
) -> GenResult<()> {
    for i in 0..rays {
        let angle = i as f32 * 360.0 / rays as f32;
        let target = clamp_to_grid(grid, project(center, radius, angle));
        let ray = line(grid, center, target)?;
        grid.paint(&ray, Tile::Road, color);
    }
    Ok(())
}

/// `count` lines between random cells
pub fn random_lines(grid: &mut Grid, rng: &mut TownRng, count: usize, color: u8) -> GenResult<()> {
    for _ in 0..count {
        let a = random_cell(grid, rng);
        let b = random_cell(grid, rng);
        let segment = line(grid, a, b)?;
        grid.paint(&segment, Tile::Building, color);
    }
    Ok(())
}

/// `count` discs of radius 5..10 in random colors
pub fn random_circles(grid: &mut Grid, rng: &mut TownRng, count: usize) {
    for _ in 0..count {
        let color = rng.next_int(0, PALETTE_SIZE as i32) as u8;
        let center = random_cell(grid, rng);
        let radius = rng.next_int(5, 10);
        let disc = circle(grid, center, radius);
        grid.paint(&disc, Tile::Grass, color);
    }
}

/// The full showcase on a blank grid
pub fn draw_sketch(grid: &mut Grid, rng: &mut TownRng) -> GenResult<()> {
    grid.clear();
    random_circles(grid, rng, 3);
    random_lines(grid, rng, 10, 12)?;
    let center = grid.center();
    starburst(grid, center, 20, 36, 7)
}
