//! Street network generation
//!
//! Lays a main street through the grid centre, then grows side streets off
//! it. Each side street may spawn perpendicular branches of its own, with
//! shrinking length, until the momentum floor, the nesting cap or the street
//! cap stops the recursion.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::StreetConfig;
use crate::error::GenResult;
use crate::geometry::{clamp_to_grid, clamped_diameter_line, diameter_line, line, project};
use crate::grid::{Grid, Point, Tile};
use crate::rng::TownRng;

/// A road segment in walk order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Street {
    /// Cells from the branch point outwards
    pub cells: Vec<Point>,
    /// Palette index the road was painted with
    pub color: u8,
    /// Nesting level; the main street is 0
    pub depth: u32,
}

impl Street {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn start(&self) -> Option<Point> {
        self.cells.first().copied()
    }
}

/// Counters from one street generation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetStats {
    /// Side streets attempted, including ones cut by the street cap
    pub branch_calls: usize,
    /// Deepest nesting level reached
    pub deepest: u32,
}

/// Lay the street network onto `grid`
///
/// Returns the streets in creation order, main street first.
pub fn generate_streets(
    grid: &mut Grid,
    config: &StreetConfig,
    rng: &mut TownRng,
) -> GenResult<(Vec<Street>, StreetStats)> {
    let mut network = StreetNetwork {
        grid,
        config,
        rng,
        streets: Vec::new(),
        stats: StreetStats::default(),
    };
    network.main_street()?;

    debug!(
        "laid {} streets ({} branch calls, depth {})",
        network.streets.len(),
        network.stats.branch_calls,
        network.stats.deepest
    );
    Ok((network.streets, network.stats))
}

struct StreetNetwork<'a> {
    grid: &'a mut Grid,
    config: &'a StreetConfig,
    rng: &'a mut TownRng,
    streets: Vec<Street>,
    stats: StreetStats,
}

impl StreetNetwork<'_> {
    fn main_street(&mut self) -> GenResult<()> {
        let (min_len, max_len) = self.config.main_length;
        let (min_angle, max_angle) = self.config.main_angle;
        let length = self.rng.next_int(min_len, max_len.saturating_add(1));
        let angle = self.rng.next_int(min_angle, max_angle.saturating_add(1)) as f32;

        let center = self.grid.center();
        let cells = if self.config.clamp_projections {
            clamped_diameter_line(self.grid, center, length, angle)?
        } else {
            diameter_line(self.grid, center, length, angle)?
        };
        let color = self.config.road_color;
        self.lay(cells.clone(), color, 0);

        let mut i = 0;
        while i < cells.len() {
            if self.rng.chance(self.config.main_branch_chance) {
                let (lo, hi) = self.config.branch_length;
                let length = self.rng.next_int(lo, hi.saturating_add(1)) as f32;
                let momentum = self.config.initial_momentum;
                self.make_street(cells[i], length, true, momentum, color, 1)?;
                i = i.saturating_add(self.config.branch_spacing);
            }
            i += 1;
        }
        Ok(())
    }

    /// Draw one side street from `origin` and recurse into its branches
    ///
    /// `vertical` is the orientation of the new street; its branches take
    /// the other one.
    fn make_street(
        &mut self,
        origin: Point,
        length: f32,
        vertical: bool,
        momentum: f32,
        color: u8,
        depth: u32,
    ) -> GenResult<()> {
        self.stats.branch_calls += 1;
        if self.streets.len() >= self.config.max_streets {
            return Ok(());
        }
        self.stats.deepest = self.stats.deepest.max(depth);

        let flip = self.rng.next_int(0, 2) == 1;
        let mut angle: f32 = match (vertical, flip) {
            (true, false) => 90.0,
            (true, true) => 270.0,
            (false, false) => 0.0,
            (false, true) => 180.0,
        };
        if self.rng.chance(self.config.jitter_chance) {
            let jitter = self.config.jitter_degrees;
            angle += self.rng.next_int(-jitter, jitter.saturating_add(1)) as f32;
        }

        let target = project(origin, length as i32, angle);
        let target = if self.config.clamp_projections {
            clamp_to_grid(self.grid, target)
        } else {
            self.grid.check(target)?
        };
        let cells = line(self.grid, origin, target)?;
        self.lay(cells.clone(), color, depth);

        // momentum never shrinks here; the shrinking length is what makes
        // deeper streets short and sparse
        let momentum = momentum * (self.rng.next_float() + 1.0);
        let length = length * self.rng.next_float() + 1.0;

        if momentum <= self.config.momentum_floor || depth >= self.config.max_depth {
            return Ok(());
        }

        let mut i = (length / 3.0).ceil() as usize;
        while i < cells.len() {
            if self.rng.chance(self.config.branch_chance) {
                self.make_street(cells[i], length, !vertical, momentum, color, depth + 1)?;
                i = i.saturating_add(self.config.branch_spacing);
            }
            i += 1;
        }
        Ok(())
    }

    fn lay(&mut self, cells: Vec<Point>, color: u8, depth: u32) {
        self.grid.paint(&cells, Tile::Road, color);
        self.streets.push(Street {
            cells,
            color,
            depth,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenError;

    fn run(
        width: usize,
        height: usize,
        config: &StreetConfig,
        seed: u64,
    ) -> (Grid, Vec<Street>, StreetStats) {
        let mut grid = Grid::new(width, height);
        let mut rng = TownRng::new(seed);
        let (streets, stats) = generate_streets(&mut grid, config, &mut rng).unwrap();
        (grid, streets, stats)
    }

    #[test]
    fn test_main_street_through_center() {
        let config = StreetConfig::default();
        let (grid, streets, _) = run(128, 64, &config, 42);
        let main = &streets[0];
        assert_eq!(main.depth, 0);
        assert!(main.len() >= 29);
        assert!(main.cells.iter().any(|p| (p.x - 64).abs() <= 1 && (p.y - 32).abs() <= 2));
        assert!(main.cells.iter().all(|p| grid.is_tile(*p, Tile::Road)));
    }

    #[test]
    fn test_every_street_is_painted() {
        let config = StreetConfig::default();
        let (grid, streets, _) = run(128, 64, &config, 7);
        for street in &streets {
            assert!(!street.is_empty());
            for p in &street.cells {
                assert!(grid.contains(*p));
                assert!(grid.is_tile(*p, Tile::Road));
            }
        }
    }

    #[test]
    fn test_side_streets_start_on_parent() {
        let config = StreetConfig::default();
        let (_, streets, _) = run(128, 64, &config, 3);
        for street in streets.iter().skip(1) {
            let start = street.start().unwrap();
            let on_earlier = streets
                .iter()
                .take_while(|s| !std::ptr::eq(*s, street))
                .any(|s| s.cells.contains(&start));
            assert!(on_earlier, "street starting at {start} has no parent");
        }
    }

    #[test]
    fn test_unjittered_side_streets_are_axis_aligned() {
        let config = StreetConfig {
            jitter_chance: 0.0,
            ..StreetConfig::default()
        };
        let (_, streets, _) = run(128, 64, &config, 11);
        for street in streets.iter().skip(1) {
            let xs_equal = street.cells.iter().all(|p| p.x == street.cells[0].x);
            let ys_equal = street.cells.iter().all(|p| p.y == street.cells[0].y);
            assert!(xs_equal || ys_equal);
        }
    }

    #[test]
    fn test_depth_cap_bounds_recursion() {
        let config = StreetConfig {
            main_branch_chance: 1.0,
            branch_chance: 1.0,
            branch_spacing: 0,
            max_depth: 3,
            ..StreetConfig::default()
        };
        let (_, streets, stats) = run(128, 64, &config, 5);
        assert!(stats.deepest <= 3);
        assert!(streets.iter().all(|s| s.depth <= 3));
    }

    #[test]
    fn test_street_cap_bounds_calls() {
        let config = StreetConfig {
            main_branch_chance: 1.0,
            branch_chance: 1.0,
            branch_spacing: 0,
            max_depth: 50,
            max_streets: 40,
            ..StreetConfig::default()
        };
        let (_, streets, _) = run(128, 64, &config, 9);
        assert!(streets.len() <= 40);
    }

    #[test]
    fn test_momentum_floor_stops_branching() {
        let config = StreetConfig {
            main_branch_chance: 1.0,
            branch_chance: 1.0,
            initial_momentum: 0.0,
            ..StreetConfig::default()
        };
        let (_, streets, stats) = run(128, 64, &config, 1);
        assert!(streets.iter().all(|s| s.depth <= 1));
        assert_eq!(stats.deepest, 1);
    }

    #[test]
    fn test_terminates_within_call_budget() {
        let config = StreetConfig::default();
        for seed in 0..20 {
            let (_, _, stats) = run(128, 64, &config, seed);
            assert!(stats.branch_calls < 10_000, "seed {seed} took {} calls", stats.branch_calls);
        }
    }

    #[test]
    fn test_clamped_small_grid() {
        let config = StreetConfig::default();
        let (grid, streets, _) = run(10, 10, &config, 42);
        assert!(!streets.is_empty());
        assert!(grid.count(Tile::Road) >= 10);
    }

    #[test]
    fn test_unclamped_small_grid_fails() {
        let config = StreetConfig {
            clamp_projections: false,
            ..StreetConfig::default()
        };
        let mut grid = Grid::new(10, 10);
        let mut rng = TownRng::new(42);
        let err = generate_streets(&mut grid, &config, &mut rng).unwrap_err();
        assert!(matches!(err, GenError::OutOfBounds { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_deterministic() {
        let config = StreetConfig::default();
        let (a, sa, _) = run(128, 64, &config, 1234);
        let (b, sb, _) = run(128, 64, &config, 1234);
        assert_eq!(sa, sb);
        assert_eq!(a.to_ascii(), b.to_ascii());
    }
}
