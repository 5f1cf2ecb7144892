//! Town generation
//!
//! Runs the passes in a fixed order over one grid and one random stream:
//! streets, buildings, finishing, ground cover. The same seed and grid size
//! always give the same tiles and colors.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::building::{Building, finish_buildings, place_buildings};
use crate::config::TownConfig;
use crate::error::GenResult;
use crate::grid::{Grid, Tile};
use crate::rng::TownRng;
use crate::street::{Street, generate_streets};

/// Counters from the last [`Town::create_town`] run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TownStats {
    pub streets: usize,
    pub branch_calls: usize,
    pub deepest_branch: u32,
    pub buildings_placed: usize,
    pub standing: usize,
    pub disconnected: usize,
    pub doorless: usize,
    pub grass: usize,
}

/// One generation attempt: a grid plus the streets and buildings on it
#[derive(Debug, Clone)]
pub struct Town {
    config: TownConfig,
    grid: Grid,
    rng: TownRng,
    streets: Vec<Street>,
    buildings: Vec<Building>,
    stats: TownStats,
}

impl Town {
    /// A blank town; call [`Town::create_town`] to fill it
    pub fn new(config: TownConfig, seed: u64) -> Self {
        Self {
            grid: Grid::new(config.width, config.height),
            rng: TownRng::new(seed),
            config,
            streets: Vec::new(),
            buildings: Vec::new(),
            stats: TownStats::default(),
        }
    }

    /// Generate the whole layout
    ///
    /// Starts from a blank grid and a fresh stream for the town's seed, so
    /// calling it twice gives the same result. On error the grid holds
    /// whatever was painted before the failure.
    pub fn create_town(&mut self) -> GenResult<()> {
        self.reset();

        let (streets, street_stats) =
            generate_streets(&mut self.grid, &self.config.streets, &mut self.rng)?;
        self.streets = streets;
        self.stats.streets = self.streets.len();
        self.stats.branch_calls = street_stats.branch_calls;
        self.stats.deepest_branch = street_stats.deepest;

        self.buildings = place_buildings(
            &mut self.grid,
            &self.streets,
            &self.config.buildings,
            &mut self.rng,
        );
        self.stats.buildings_placed = self.buildings.len();

        let finish = finish_buildings(&mut self.grid, &mut self.buildings, &mut self.rng);
        self.stats.standing = finish.standing;
        self.stats.disconnected = finish.disconnected;
        self.stats.doorless = finish.doorless;

        self.stats.grass = self.scatter_grass();
        debug!("scattered {} grass cells", self.stats.grass);

        info!(
            "town {}: {} streets, {} buildings standing of {} placed",
            self.seed(),
            self.stats.streets,
            self.stats.standing,
            self.stats.buildings_placed
        );
        Ok(())
    }

    fn scatter_grass(&mut self) -> usize {
        let chance = self.config.grass_chance;
        let color = self.config.grass_color;
        let mut count = 0;
        for cell in self.grid.cells_mut() {
            if cell.is_blank() && self.rng.chance(chance) {
                cell.set_tile(Tile::Grass, color);
                count += 1;
            }
        }
        count
    }

    fn reset(&mut self) {
        self.grid.clear();
        self.rng = TownRng::new(self.rng.seed());
        self.streets.clear();
        self.buildings.clear();
        self.stats = TownStats::default();
    }

    /// Reset every cell to blank
    pub fn clear(&mut self) {
        self.grid.clear();
    }

    /// Set every still-blank cell to `tile`
    pub fn fill(&mut self, tile: Tile, color: u8) {
        self.grid.fill(tile, color);
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn config(&self) -> &TownConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn streets(&self) -> &[Street] {
        &self.streets
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn stats(&self) -> TownStats {
        self.stats
    }

    /// `(x, y, symbol, color)` for every cell, row-major
    pub fn glyphs(&self) -> impl Iterator<Item = (i32, i32, char, u8)> + '_ {
        self.grid.glyphs()
    }
}
