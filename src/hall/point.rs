use serde::{Deserialize, Serialize};

/// A cell coordinate: `x` is the row, `y` is the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan (L1) distance. Widened to `i64` so that any two `i32`
    /// points have a representable distance.
    pub fn distance_to(&self, other: Point) -> i64 {
        (i64::from(self.x) - i64::from(other.x)).abs()
            + (i64::from(self.y) - i64::from(other.y)).abs()
    }

    /// Manhattan distance between two cells of one hall. Hall dimensions are
    /// capped so that `rows + cols` fits an `i32`, which bounds every
    /// in-hall distance.
    pub(crate) fn grid_distance(&self, other: Point) -> i32 {
        self.distance_to(other) as i32
    }

    /// The four orthogonal points. Callers clip them to the grid.
    pub fn neighbours(&self) -> [Point; 4] {
        [
            Point::new(self.x - 1, self.y),
            Point::new(self.x + 1, self.y),
            Point::new(self.x, self.y - 1),
            Point::new(self.x, self.y + 1),
        ]
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
