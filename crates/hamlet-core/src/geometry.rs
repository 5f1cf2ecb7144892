//! Geometry primitives over the tile grid
//!
//! Rasterization (lines, circles, rectangles), angular projection and set
//! operations on cell lists (dilation, hollowing, bounding boxes). Every
//! point these functions return lies on the grid they were given.

use hashbrown::HashSet;

use crate::error::GenResult;
use crate::grid::{Grid, Point};
use crate::rng::TownRng;

/// Inclusive bounding box of a set of points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn width(&self) -> i32 {
        self.max.x - self.min.x + 1
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y + 1
    }

    /// `(width, height)`
    pub fn extent(&self) -> (i32, i32) {
        (self.width(), self.height())
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Whether `p` lies strictly inside the box
    pub fn is_interior(&self, p: Point) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }

    /// Top-left, top-right, bottom-left, bottom-right
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            Point::new(self.max.x, self.min.y),
            Point::new(self.min.x, self.max.y),
            self.max,
        ]
    }
}

/// Clamp `value` into `min..=max`
pub fn clamp(value: i32, min: i32, max: i32) -> i32 {
    if value > max {
        return max;
    }
    if value < min {
        return min;
    }
    value
}

/// Clamp a point onto the grid
pub fn clamp_to_grid(grid: &Grid, p: Point) -> Point {
    Point::new(
        clamp(p.x, 0, grid.width() as i32 - 1),
        clamp(p.y, 0, grid.height() as i32 - 1),
    )
}

/// Bresenham line from `a` to `b`, both inclusive
///
/// The longer axis drives; the other axis steps when the accumulated error
/// (starting at half the driving length) reaches the driving length. The
/// result always has `max(|dx|, |dy|) + 1` points.
pub fn line(grid: &Grid, a: Point, b: Point) -> GenResult<Vec<Point>> {
    grid.check(a)?;
    grid.check(b)?;

    let w = b.x - a.x;
    let h = b.y - a.y;

    let (dx1, dy1) = (w.signum(), h.signum());
    let (mut dx2, mut dy2) = (w.signum(), 0);

    let mut longest = w.abs();
    let mut shortest = h.abs();
    if longest <= shortest {
        longest = h.abs();
        shortest = w.abs();
        dy2 = h.signum();
        dx2 = 0;
    }

    let mut points = Vec::with_capacity(longest as usize + 1);
    let (mut x, mut y) = (a.x, a.y);
    let mut numerator = longest >> 1;
    for _ in 0..=longest {
        points.push(Point::new(x, y));
        numerator += shortest;
        if numerator >= longest {
            numerator -= longest;
            x += dx1;
            y += dy1;
        } else {
            x += dx2;
            y += dy2;
        }
    }

    Ok(points)
}

/// Slope-interpolated line over `a.x..b.x`
///
/// Empty when `b` lies left of `a`. Points sharing an X coordinate are a
/// vertical line and walk `a.y..b.y` instead of dividing by zero.
pub fn naive_line(grid: &Grid, a: Point, b: Point) -> GenResult<Vec<Point>> {
    grid.check(a)?;
    grid.check(b)?;

    let dx = b.x - a.x;
    let dy = b.y - a.y;

    if dx == 0 {
        let step = dy.signum();
        let points = (0..dy.abs()).map(|i| Point::new(a.x, a.y + i * step)).collect();
        return Ok(points);
    }

    let points = (a.x..b.x)
        .map(|x| Point::new(x, a.y + dy * (x - a.x) / dx))
        .collect();
    Ok(points)
}

/// Filled disc of `radius` around `center`
///
/// Each offset in the upper-left quadrant is mirrored into all four
/// quadrants, so cells on the axes appear more than once.
pub fn circle(grid: &Grid, center: Point, radius: i32) -> Vec<Point> {
    let mut points = Vec::new();
    for dx in -radius..=0 {
        for dy in -radius..=0 {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            for p in [
                center.offset(-dx, -dy),
                center.offset(dx, dy),
                center.offset(-dx, dy),
                center.offset(dx, -dy),
            ] {
                if grid.contains(p) {
                    points.push(p);
                }
            }
        }
    }
    points
}

/// Cells of the `w × h` rectangle anchored at `origin`
///
/// Negative sizes extend left/up from the origin, exclusive of it. Cells off
/// the grid are dropped.
pub fn rectangle(grid: &Grid, origin: Point, w: i32, h: i32) -> Vec<Point> {
    let (min_x, max_x) = if w < 0 {
        (origin.x + w, origin.x)
    } else {
        (origin.x, origin.x + w)
    };
    let (min_y, max_y) = if h < 0 {
        (origin.y + h, origin.y)
    } else {
        (origin.y, origin.y + h)
    };

    let mut points = Vec::with_capacity((w.abs() * h.abs()) as usize);
    for y in min_y.max(0)..max_y.min(grid.height() as i32) {
        for x in min_x.max(0)..max_x.min(grid.width() as i32) {
            points.push(Point::new(x, y));
        }
    }
    points
}

/// Project `origin` by `distance` along `angle` degrees, without bounds checks
///
/// Angles grow counter-clockwise with Y pointing down the screen. Exact axis
/// angles zero the cross-axis offset so the projection stays on its row or
/// column.
pub fn project(origin: Point, distance: i32, angle: f32) -> Point {
    let radians = (angle as f64).to_radians();
    let normalized = angle.rem_euclid(360.0);

    let dx = if normalized == 90.0 || normalized == 270.0 {
        0.0
    } else {
        radians.cos() as f32 * distance as f32
    };
    let dy = if normalized == 0.0 || normalized == 180.0 {
        0.0
    } else {
        (-radians).sin() as f32 * distance as f32
    };

    Point::new((dx + origin.x as f32) as i32, (dy + origin.y as f32) as i32)
}

/// Project `origin` by `distance` along `angle` degrees
///
/// Fails if the target leaves the grid.
pub fn point_at_distance_on_angle(
    grid: &Grid,
    origin: Point,
    distance: i32,
    angle: f32,
) -> GenResult<Point> {
    grid.check(project(origin, distance, angle))
}

/// Line of total `length` centred on `center`, running along `angle`
pub fn diameter_line(grid: &Grid, center: Point, length: i32, angle: f32) -> GenResult<Vec<Point>> {
    let half = length / 2;
    let a = point_at_distance_on_angle(grid, center, half, angle)?;
    let b = point_at_distance_on_angle(grid, center, half, angle + 180.0)?;
    line(grid, a, b)
}

/// Like [`diameter_line`] but with both ends clamped onto the grid
pub fn clamped_diameter_line(
    grid: &Grid,
    center: Point,
    length: i32,
    angle: f32,
) -> GenResult<Vec<Point>> {
    let half = length / 2;
    let a = clamp_to_grid(grid, project(center, half, angle));
    let b = clamp_to_grid(grid, project(center, half, angle + 180.0));
    line(grid, a, b)
}

/// Drop repeated points, keeping first occurrences in order
pub fn dedup(points: &[Point]) -> Vec<Point> {
    let mut seen = HashSet::with_capacity(points.len());
    points.iter().copied().filter(|p| seen.insert(*p)).collect()
}

/// Dilate `points` by a `(2·size+1)²` square, clipped to the grid
pub fn grow(grid: &Grid, points: &[Point], size: i32) -> Vec<Point> {
    let mut seen = HashSet::new();
    let mut grown = Vec::new();
    for p in points {
        for dy in -size..=size {
            for dx in -size..=size {
                let q = p.offset(dx, dy);
                if grid.contains(q) && seen.insert(q) {
                    grown.push(q);
                }
            }
        }
    }
    grown
}

/// The eight cells around `p` that lie on the grid
pub fn neighbours(grid: &Grid, p: Point) -> Vec<Point> {
    grow(grid, &[p], 1).into_iter().filter(|q| *q != p).collect()
}

pub fn bounding_box(points: &[Point]) -> Option<Bounds> {
    let first = *points.first()?;
    let mut bounds = Bounds {
        min: first,
        max: first,
    };
    for p in &points[1..] {
        bounds.min.x = bounds.min.x.min(p.x);
        bounds.min.y = bounds.min.y.min(p.y);
        bounds.max.x = bounds.max.x.max(p.x);
        bounds.max.y = bounds.max.y.max(p.y);
    }
    Some(bounds)
}

/// `(width, height)` of the bounding box, `(0, 0)` when empty
pub fn extent(points: &[Point]) -> (i32, i32) {
    bounding_box(points).map_or((0, 0), |b| b.extent())
}

/// Interior of a filled rectangle: one cell in from every edge
pub fn hollow(rect: &[Point]) -> Vec<Point> {
    let Some(bounds) = bounding_box(rect) else {
        return Vec::new();
    };
    rect.iter().copied().filter(|p| bounds.is_interior(*p)).collect()
}

/// Perimeter of a filled rectangle: everything [`hollow`] leaves out
pub fn border(rect: &[Point]) -> Vec<Point> {
    let Some(bounds) = bounding_box(rect) else {
        return Vec::new();
    };
    rect.iter().copied().filter(|p| !bounds.is_interior(*p)).collect()
}

/// Uniformly random point on the grid
pub fn random_cell(grid: &Grid, rng: &mut TownRng) -> Point {
    let x = rng.next_int(0, grid.width() as i32);
    let y = rng.next_int(0, grid.height() as i32);
    Point::new(x, y)
}

/// Angle in degrees of the direction from `b` to `a`, measured as `180 - atan2`
pub fn degrees_between(a: Point, b: Point) -> f32 {
    let delta_x = (a.x - b.x) as f64;
    let delta_y = (a.y - b.y) as f64;
    (180.0 - delta_y.atan2(delta_x).to_degrees()) as f32
}

/// Point `radius` away from `center` at `radians`, clamped onto the grid
pub fn point_on_radius(grid: &Grid, center: Point, radius: i32, radians: f64) -> Point {
    let x = (center.x as f64 + radius as f64 * radians.cos()) as i32;
    let y = (center.y as f64 + radius as f64 * radians.sin()) as i32;
    clamp_to_grid(grid, Point::new(x, y))
}

/// [`point_on_radius`] at a random whole-degree angle
///
/// The drawn integer in `0..360` is read as degrees and converted, so the
/// directions are spread evenly around the circle. Reading it as raw radians
/// would wrap the circle about 57 times with uneven coverage.
pub fn random_point_on_radius(
    grid: &Grid,
    center: Point,
    radius: i32,
    rng: &mut TownRng,
) -> Point {
    let degrees = rng.next_int(0, 360) as f64;
    point_on_radius(grid, center, radius, degrees.to_radians())
}
