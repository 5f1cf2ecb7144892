//! Building placement
//!
//! Walks every street looking for empty rectangles next to it, paints the
//! best fit as a building and rings it with a reserved setback. A second
//! pass removes buildings that ended up away from any road, hollows the
//! rest into floors and cuts one door facing the street.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::BuildingConfig;
use crate::consts::{BUILDING_COLOR_END, BUILDING_COLOR_START, DEFAULT_COLOR};
use crate::geometry::{Bounds, bounding_box, border, extent, grow, hollow, neighbours, rectangle};
use crate::grid::{Cell, Grid, Point, Tile};
use crate::rng::TownRng;
use crate::street::Street;

/// What became of a placed building
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingState {
    /// Placed, not yet finished
    #[default]
    Placed,
    /// Walls, floor and a door
    Standing,
    /// No road within one cell; erased
    Disconnected,
    /// No wall cell faced the road; erased
    Doorless,
}

/// A rectangular structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    /// Footprint as placed, a filled rectangle
    pub cells: Vec<Point>,
    pub color: u8,
    /// Street cell the building was placed from
    #[serde(default)]
    pub origin: Option<Point>,
    pub door: Option<Point>,
    pub state: BuildingState,
}

impl Building {
    pub fn new(cells: Vec<Point>, color: u8) -> Self {
        Self {
            cells,
            color,
            origin: None,
            door: None,
            state: BuildingState::Placed,
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        bounding_box(&self.cells)
    }

    pub fn walls(&self) -> Vec<Point> {
        border(&self.cells)
    }

    pub fn floor(&self) -> Vec<Point> {
        hollow(&self.cells)
    }

    pub fn is_standing(&self) -> bool {
        self.state == BuildingState::Standing
    }
}

/// Counters from the finishing pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishStats {
    pub standing: usize,
    pub disconnected: usize,
    pub doorless: usize,
}

/// Place buildings along every street
///
/// Each street cell but the last is tried in turn. The cell and its four
/// axis neighbours are offered as rectangle anchors; the first anchor with
/// any free footprint wins.
pub fn place_buildings(
    grid: &mut Grid,
    streets: &[Street],
    config: &BuildingConfig,
    rng: &mut TownRng,
) -> Vec<Building> {
    let mut buildings = Vec::new();

    for street in streets {
        let mut i = 0;
        while i + 1 < street.cells.len() {
            let found = street.cells[i]
                .with_orthogonal_neighbours()
                .into_iter()
                .filter(|anchor| grid.contains(*anchor))
                .find_map(|anchor| find_footprint(grid, anchor, config, rng));

            let Some(footprint) = found else {
                i += 1;
                continue;
            };

            let color = rng.next_int(BUILDING_COLOR_START, BUILDING_COLOR_END) as u8;
            grid.paint(&footprint, Tile::Building, color);

            let (lo, hi) = config.setback;
            let setback = rng.next_int(lo, hi.saturating_add(1));
            let ring = grow(grid, &footprint, setback);
            grid.paint_blank(&ring, Tile::Reserved, DEFAULT_COLOR);

            let origin = street.cells[i];
            let (w, h) = extent(&footprint);
            let skip = w.max(h) + rng.next_int(0, config.skip_jitter.saturating_add(1));
            i += skip.max(1) as usize;

            buildings.push(Building {
                origin: Some(origin),
                ..Building::new(footprint, color)
            });
        }
    }

    debug!("placed {} buildings", buildings.len());
    buildings
}

/// Best free rectangle anchored at `anchor`
///
/// Scans every width and height in `-max..max`. A fitting candidate is
/// taken at once with `quick_accept_chance`; otherwise the largest wins,
/// and a candidate filling the whole maximum ends the scan.
pub fn find_footprint(
    grid: &Grid,
    anchor: Point,
    config: &BuildingConfig,
    rng: &mut TownRng,
) -> Option<Vec<Point>> {
    let capacity = (config.max_width as usize).saturating_mul(config.max_height as usize);
    let mut best: Option<Vec<Point>> = None;

    for w in -config.max_width..config.max_width {
        // clipping only shrinks a rectangle, so these can never fit
        if w.abs() < config.min_width {
            continue;
        }
        for h in -config.max_height..config.max_height {
            if h.abs() < config.min_height {
                continue;
            }

            let rect = rectangle(grid, anchor, w, h);
            let (ew, eh) = extent(&rect);
            if ew < config.min_width || eh < config.min_height {
                continue;
            }
            if !rect.iter().all(|p| grid.get(*p).is_some_and(Cell::is_blank)) {
                continue;
            }

            if rng.chance(config.quick_accept_chance) {
                return Some(rect);
            }
            if best.as_ref().is_none_or(|b| b.len() < rect.len()) {
                let full = rect.len() >= capacity;
                best = Some(rect);
                if full {
                    return best;
                }
            }
        }
    }

    best
}

/// Cull, hollow and open every placed building
pub fn finish_buildings(
    grid: &mut Grid,
    buildings: &mut [Building],
    rng: &mut TownRng,
) -> FinishStats {
    let mut stats = FinishStats::default();

    for building in buildings.iter_mut() {
        let around = grow(grid, &building.cells, 1);
        if !around.iter().any(|p| grid.is_tile(*p, Tile::Road)) {
            grid.erase(&building.cells);
            building.state = BuildingState::Disconnected;
            stats.disconnected += 1;
            continue;
        }

        grid.paint(&building.floor(), Tile::Reserved, building.color);

        let candidates = door_candidates(grid, building);
        match rng.choose(&candidates) {
            Some(&door) => {
                grid.set(door, Tile::Reserved, building.color);
                building.door = Some(door);
                building.state = BuildingState::Standing;
                stats.standing += 1;
            }
            None => {
                grid.erase(&building.cells);
                building.state = BuildingState::Doorless;
                stats.doorless += 1;
            }
        }
    }

    debug!(
        "finished buildings: {} standing, {} disconnected, {} doorless",
        stats.standing, stats.disconnected, stats.doorless
    );
    stats
}

/// Wall cells, corners excluded, touching more than one road cell
pub fn door_candidates(grid: &Grid, building: &Building) -> Vec<Point> {
    let Some(bounds) = building.bounds() else {
        return Vec::new();
    };
    let corners = bounds.corners();

    building
        .walls()
        .into_iter()
        .filter(|p| !corners.contains(p))
        .filter(|p| {
            neighbours(grid, *p)
                .iter()
                .filter(|q| grid.is_tile(**q, Tile::Road))
                .count()
                > 1
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BuildingConfig {
        BuildingConfig {
            quick_accept_chance: 0.0,
            ..BuildingConfig::default()
        }
    }

    fn street(grid: &mut Grid, cells: Vec<Point>) -> Street {
        grid.paint(&cells, Tile::Road, 7);
        Street {
            cells,
            color: 7,
            depth: 0,
        }
    }

    fn horizontal(y: i32, x0: i32, x1: i32) -> Vec<Point> {
        (x0..=x1).map(|x| Point::new(x, y)).collect()
    }

    #[test]
    fn test_find_footprint_prefers_full_size() {
        let grid = Grid::new(30, 30);
        let mut rng = TownRng::new(1);
        let rect = find_footprint(&grid, Point::new(15, 15), &config(), &mut rng).unwrap();
        assert_eq!(rect.len(), 49);
        assert_eq!(extent(&rect), (7, 7));
    }

    #[test]
    fn test_find_footprint_respects_occupied() {
        let mut grid = Grid::new(30, 30);
        grid.set(Point::new(15, 15), Tile::Road, 7);
        let mut rng = TownRng::new(1);
        let rect = find_footprint(&grid, Point::new(15, 16), &config(), &mut rng).unwrap();
        assert!(rect.iter().all(|p| *p != Point::new(15, 15)));
    }

    #[test]
    fn test_find_footprint_too_tight() {
        let grid = Grid::new(2, 2);
        let mut rng = TownRng::new(1);
        assert!(find_footprint(&grid, Point::new(0, 0), &config(), &mut rng).is_none());
    }

    #[test]
    fn test_find_footprint_minimum_size() {
        let grid = Grid::new(40, 40);
        let mut rng = TownRng::new(8);
        let always = BuildingConfig {
            quick_accept_chance: 1.0,
            ..BuildingConfig::default()
        };
        let rect = find_footprint(&grid, Point::new(20, 20), &always, &mut rng).unwrap();
        let (w, h) = extent(&rect);
        assert!(w >= 3 && h >= 3);
    }

    #[test]
    fn test_buildings_never_overlap() {
        let mut grid = Grid::new(60, 30);
        let streets = vec![street(&mut grid, horizontal(15, 2, 57))];
        let mut rng = TownRng::new(4);
        let buildings = place_buildings(&mut grid, &streets, &config(), &mut rng);
        assert!(!buildings.is_empty());
        for (i, a) in buildings.iter().enumerate() {
            for b in &buildings[i + 1..] {
                assert!(a.cells.iter().all(|p| !b.cells.contains(p)));
            }
        }
        for b in &buildings {
            assert!(b.cells.iter().all(|p| !streets[0].cells.contains(p)));
        }
    }

    #[test]
    fn test_wall_colors_skip_zero() {
        for seed in 0..20 {
            let mut grid = Grid::new(60, 30);
            let streets = vec![street(&mut grid, horizontal(15, 2, 57))];
            let mut rng = TownRng::new(seed);
            let buildings = place_buildings(&mut grid, &streets, &config(), &mut rng);
            assert!(!buildings.is_empty());
            for b in &buildings {
                assert!((1..=15).contains(&b.color), "color {}", b.color);
                assert!(b.cells.iter().all(|p| grid.get(*p).unwrap().color() == b.color));
            }
        }
    }

    #[test]
    fn test_placement_skips_past_footprint() {
        for seed in 0..20 {
            let mut grid = Grid::new(80, 30);
            let streets = vec![street(&mut grid, horizontal(15, 2, 77))];
            let mut rng = TownRng::new(seed);
            let buildings = place_buildings(&mut grid, &streets, &config(), &mut rng);
            assert!(buildings.len() >= 2);
            for pair in buildings.windows(2) {
                let a = pair[0].origin.unwrap();
                let b = pair[1].origin.unwrap();
                let (w, h) = extent(&pair[0].cells);
                let gap = b.x - a.x;
                assert!(gap >= w.max(h), "origins {a} and {b} closer than {w}x{h}");
            }
        }
    }

    #[test]
    fn test_setback_keeps_buildings_apart() {
        let mut grid = Grid::new(60, 30);
        let streets = vec![street(&mut grid, horizontal(15, 2, 57))];
        let mut rng = TownRng::new(12);
        let buildings = place_buildings(&mut grid, &streets, &config(), &mut rng);
        for (i, a) in buildings.iter().enumerate() {
            let ring = grow(&grid, &a.cells, 1);
            for b in &buildings[i + 1..] {
                assert!(b.cells.iter().all(|p| !ring.contains(p)));
            }
        }
    }

    #[test]
    fn test_finish_cuts_one_door_facing_road() {
        let mut grid = Grid::new(60, 30);
        let streets = vec![street(&mut grid, horizontal(15, 2, 57))];
        let mut rng = TownRng::new(4);
        let mut buildings = place_buildings(&mut grid, &streets, &config(), &mut rng);
        let stats = finish_buildings(&mut grid, &mut buildings, &mut rng);
        assert!(stats.standing > 0);

        for b in buildings.iter().filter(|b| b.is_standing()) {
            let door = b.door.unwrap();
            assert!(b.walls().contains(&door));
            assert!(!b.bounds().unwrap().corners().contains(&door));
            assert!(grid.is_tile(door, Tile::Reserved));
            let walls_left = b.walls().iter().filter(|p| grid.is_tile(**p, Tile::Building)).count();
            assert_eq!(walls_left, b.walls().len() - 1);
            assert!(b.floor().iter().all(|p| grid.is_tile(*p, Tile::Reserved)));
        }
    }

    #[test]
    fn test_disconnected_building_is_erased() {
        let mut grid = Grid::new(20, 20);
        let cells = rectangle(&grid, Point::new(5, 5), 4, 4);
        grid.paint(&cells, Tile::Building, 3);
        let mut buildings = vec![Building::new(cells.clone(), 3)];
        let mut rng = TownRng::new(1);
        let stats = finish_buildings(&mut grid, &mut buildings, &mut rng);
        assert_eq!(stats.disconnected, 1);
        assert_eq!(buildings[0].state, BuildingState::Disconnected);
        assert!(buildings[0].door.is_none());
        assert!(cells.iter().all(|p| grid.is_tile(*p, Tile::Blank)));
    }

    #[test]
    fn test_corner_only_contact_is_doorless() {
        let mut grid = Grid::new(20, 20);
        let cells = rectangle(&grid, Point::new(5, 5), 4, 4);
        grid.paint(&cells, Tile::Building, 3);
        // road touches only the bottom-right corner diagonally
        grid.set(Point::new(9, 9), Tile::Road, 7);
        let mut buildings = vec![Building::new(cells.clone(), 3)];
        let mut rng = TownRng::new(1);
        let stats = finish_buildings(&mut grid, &mut buildings, &mut rng);
        assert_eq!(stats.doorless, 1);
        assert!(buildings[0].door.is_none());
        assert!(cells.iter().all(|p| grid.is_tile(*p, Tile::Blank)));
    }

    #[test]
    fn test_door_candidates_need_two_road_neighbours() {
        let mut grid = Grid::new(20, 20);
        let cells = rectangle(&grid, Point::new(5, 5), 5, 4);
        grid.paint(&cells, Tile::Building, 3);
        grid.paint(&horizontal(9, 3, 12), Tile::Road, 7);
        let building = Building::new(cells, 3);
        let mut doors = door_candidates(&grid, &building);
        doors.sort();
        assert_eq!(doors, vec![Point::new(6, 8), Point::new(7, 8), Point::new(8, 8)]);
    }
}
