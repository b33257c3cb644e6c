//! Incremental ring search over the hall grid.
//!
//! A [`DistanceFinder`] is created per search and thrown away afterwards.
//! It grows a breadth-first labelling outward from one origin, one ring per
//! [`DistanceFinder::advance_distance`] call, touching only the square box
//! `origin ± radius` clipped to the grid. On an obstacle-free 4-connected
//! grid the label of a cell equals its Manhattan distance from the origin.

use super::error::HallError;
use super::point::Point;

#[derive(Debug, Clone)]
pub struct DistanceFinder {
    rows: i32,
    cols: i32,
    origin: Point,
    radius: i32,
    // row-major, `None` until the ring containing the cell is reached
    distances: Vec<Option<i32>>,
}

impl DistanceFinder {
    /// Seed a finder at `origin`, which must lie inside the `rows x cols` grid.
    pub fn new(rows: i32, cols: i32, origin: Point) -> Result<Self, HallError> {
        if rows <= 0 || cols <= 0 {
            return Err(HallError::EmptyHall { rows, cols });
        }
        if origin.x < 0 || origin.x >= rows || origin.y < 0 || origin.y >= cols {
            return Err(HallError::OutOfBounds { x: origin.x, y: origin.y, rows, cols });
        }

        let mut finder = Self {
            rows,
            cols,
            origin,
            radius: 0,
            distances: vec![None; rows as usize * cols as usize],
        };
        let start = finder.index(origin);
        finder.distances[start] = Some(0);
        Ok(finder)
    }

    /// The ring currently exposed by [`Self::all_at_distance`].
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Label the next ring.
    ///
    /// Only cells of the previous ring propagate, so a cell labelled during
    /// this sweep never feeds a further label in the same sweep.
    pub fn advance_distance(&mut self) {
        self.radius += 1;
        let frontier = self.radius - 1;
        let (low, high) = self.bounds();

        for x in low.x..=high.x {
            for y in low.y..=high.y {
                let here = Point::new(x, y);
                if self.distances[self.index(here)] != Some(frontier) {
                    continue;
                }
                for next in here.neighbours() {
                    if !self.contains(next) {
                        continue;
                    }
                    let i = self.index(next);
                    if self.distances[i].is_none() {
                        self.distances[i] = Some(self.radius);
                    }
                }
            }
        }
    }

    /// Every in-grid point at exactly [`Self::radius`] from the origin, in
    /// row-major order. Empty once the radius passes the farthest corner.
    pub fn all_at_distance(&self) -> Vec<Point> {
        let (low, high) = self.bounds();
        let mut ring = Vec::new();

        for x in low.x..=high.x {
            for y in low.y..=high.y {
                let here = Point::new(x, y);
                if self.distances[self.index(here)] == Some(self.radius) {
                    ring.push(here);
                }
            }
        }

        ring
    }

    /// Inclusive corners of the search box for the current radius.
    fn bounds(&self) -> (Point, Point) {
        let low = Point::new(
            self.origin.x.saturating_sub(self.radius).max(0),
            self.origin.y.saturating_sub(self.radius).max(0),
        );
        let high = Point::new(
            self.origin.x.saturating_add(self.radius).min(self.rows - 1),
            self.origin.y.saturating_add(self.radius).min(self.cols - 1),
        );
        (low, high)
    }

    fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.rows && p.y >= 0 && p.y < self.cols
    }

    fn index(&self, p: Point) -> usize {
        p.x as usize * self.cols as usize + p.y as usize
    }
}
