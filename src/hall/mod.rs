//! The seat grid and the allocation algorithm.
//!
//! A [`Hall`] owns a dense row-major grid of [`Seat`]s. Allocation walks
//! rings of growing Manhattan distance around an origin (the hall center by
//! default) and reserves the first seat that keeps every reserved seat free
//! of reserved orthogonal neighbours.

pub mod distance;
pub mod error;
pub mod point;
pub mod seat;
pub mod snapshot;

pub use distance::DistanceFinder;
pub use error::HallError;
pub use point::Point;
pub use seat::Seat;
pub use snapshot::{HallSnapshot, SeatSnapshot};

use parking_lot::Mutex;
use tracing::debug;

#[derive(Debug)]
pub struct Hall {
    rows: i32,
    cols: i32,
    center: Point,
    seats: Vec<Seat>,
    // One lock per row. Reserving a seat in row r holds rows r-1..=r+1, so
    // two orthogonally adjacent seats never run check + reserve at once.
    row_locks: Vec<Mutex<()>>,
}

impl Hall {
    /// A fresh hall with every seat free.
    pub fn new(rows: i32, cols: i32) -> Result<Self, HallError> {
        check_dimensions(rows, cols)?;
        let center = Point::new(rows / 2, cols / 2);
        let seats = (0..rows)
            .flat_map(|x| (0..cols).map(move |y| Seat::new(Point::new(x, y), center)))
            .collect();
        Ok(Self::assemble(rows, cols, center, seats))
    }

    /// Rebuild a hall from persisted seats.
    ///
    /// Every cell must appear exactly once and carry the distance to
    /// `(rows / 2, cols / 2)` it would have in a fresh hall.
    pub fn from_snapshots(
        rows: i32,
        cols: i32,
        snapshots: impl IntoIterator<Item = SeatSnapshot>,
    ) -> Result<Self, HallError> {
        check_dimensions(rows, cols)?;
        let center = Point::new(rows / 2, cols / 2);
        let expected = rows as usize * cols as usize;
        let mut slots: Vec<Option<Seat>> = (0..expected).map(|_| None).collect();
        let mut found = 0;

        for snap in snapshots {
            let position = Point::new(snap.x, snap.y);
            if !in_bounds(rows, cols, position) {
                return Err(HallError::OutOfBounds { x: snap.x, y: snap.y, rows, cols });
            }
            let distance = position.grid_distance(center);
            if snap.distance_to_center != distance {
                return Err(HallError::DistanceMismatch {
                    x: snap.x,
                    y: snap.y,
                    expected: distance,
                    found: snap.distance_to_center,
                });
            }
            let slot = &mut slots[position.x as usize * cols as usize + position.y as usize];
            if slot.is_some() {
                return Err(HallError::DuplicateSeat { x: snap.x, y: snap.y });
            }
            *slot = Some(Seat::from_snapshot(&snap));
            found += 1;
        }

        if found != expected {
            return Err(HallError::MissingSeats { expected, found });
        }

        let seats = slots.into_iter().flatten().collect();
        Ok(Self::assemble(rows, cols, center, seats))
    }

    pub fn from_snapshot(snapshot: HallSnapshot) -> Result<Self, HallError> {
        Self::from_snapshots(snapshot.rows, snapshot.cols, snapshot.seats)
    }

    fn assemble(rows: i32, cols: i32, center: Point, seats: Vec<Seat>) -> Self {
        let row_locks = (0..rows).map(|_| Mutex::new(())).collect();
        Self { rows, cols, center, seats, row_locks }
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn center(&self) -> &Seat {
        &self.seats[self.index(self.center)]
    }

    /// Seat at row `x`, column `y`, or `None` outside the hall.
    pub fn get(&self, x: i32, y: i32) -> Option<&Seat> {
        self.at(Point::new(x, y))
    }

    pub fn at(&self, p: Point) -> Option<&Seat> {
        in_bounds(self.rows, self.cols, p).then(|| &self.seats[self.index(p)])
    }

    /// All seats in row-major order.
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter()
    }

    pub fn reserved_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_reserved()).count()
    }

    /// Largest Manhattan distance between two cells of this hall.
    pub fn max_distance(&self) -> i32 {
        self.rows + self.cols - 2
    }

    /// In-hall orthogonal neighbours of `seat`.
    pub fn neighbours(&self, seat: &Seat) -> impl Iterator<Item = &Seat> + '_ {
        seat.position()
            .neighbours()
            .into_iter()
            .filter_map(move |p| self.at(p))
    }

    /// Free, and no neighbour is reserved.
    pub fn is_available(&self, seat: &Seat) -> bool {
        !seat.is_reserved() && self.neighbours(seat).all(|n| !n.is_reserved())
    }

    /// Reserve `seat` only if it is still available, with the neighbour
    /// check and the reservation done under the surrounding row locks.
    pub fn try_reserve(&self, seat: &Seat) -> bool {
        if !in_bounds(self.rows, self.cols, seat.position()) {
            return false;
        }
        let row = seat.position().x;
        let first = (row - 1).max(0) as usize;
        let last = (row + 1).min(self.rows - 1) as usize;
        let _guards: Vec<_> = self.row_locks[first..=last].iter().map(|l| l.lock()).collect();

        self.is_available(seat) && seat.reserve()
    }

    /// Seats at exactly `distance` from `origin`, in row-major order.
    pub fn all_at_distance(&self, origin: Point, distance: i32) -> Result<Vec<&Seat>, HallError> {
        let mut finder = DistanceFinder::new(self.rows, self.cols, origin)?;
        if distance < 0 || distance > self.max_distance() {
            return Ok(Vec::new());
        }
        for _ in 0..distance {
            finder.advance_distance();
        }
        Ok(self.ring_seats(&finder))
    }

    /// Reserve the best available seat around the hall center.
    pub fn get_next_available_ticket(&self) -> Option<&Seat> {
        self.get_next_available_ticket_from(self.center).ok().flatten()
    }

    /// Reserve the best available seat around `origin`.
    ///
    /// Rings are visited in order of distance from `origin`. Inside one ring
    /// seats closer to the hall center win, then seats closer to `origin` in
    /// a straight line, then row-major order. Returns `Ok(None)` when every
    /// free seat touches a reserved one.
    pub fn get_next_available_ticket_from(&self, origin: Point) -> Result<Option<&Seat>, HallError> {
        let mut finder = DistanceFinder::new(self.rows, self.cols, origin)?;

        for distance in 0..=self.max_distance() {
            let mut candidates = self.ring_seats(&finder);
            candidates.sort_by_key(|seat| {
                (seat.distance_to_center(), straight_line(seat.position(), origin))
            });

            let taken = candidates
                .into_iter()
                .filter(|seat| self.is_available(seat))
                .find(|seat| self.try_reserve(seat));

            if let Some(seat) = taken {
                debug!("Reserved seat {} at distance {} from {}", seat.position(), distance, origin);
                return Ok(Some(seat));
            }

            finder.advance_distance();
        }

        debug!("No seat available around {}", origin);
        Ok(None)
    }

    pub fn snapshot(&self) -> HallSnapshot {
        HallSnapshot {
            rows: self.rows,
            cols: self.cols,
            seats: self.seats.iter().map(Seat::snapshot).collect(),
        }
    }

    fn ring_seats(&self, finder: &DistanceFinder) -> Vec<&Seat> {
        finder
            .all_at_distance()
            .into_iter()
            .filter_map(|p| self.at(p))
            .collect()
    }

    fn index(&self, p: Point) -> usize {
        p.x as usize * self.cols as usize + p.y as usize
    }
}

fn check_dimensions(rows: i32, cols: i32) -> Result<(), HallError> {
    if rows <= 0 || cols <= 0 {
        return Err(HallError::EmptyHall { rows, cols });
    }
    if rows.checked_add(cols).is_none()
        || (rows as usize).checked_mul(cols as usize).is_none()
    {
        return Err(HallError::DimensionsTooLarge { rows, cols });
    }
    Ok(())
}

fn in_bounds(rows: i32, cols: i32, p: Point) -> bool {
    p.x >= 0 && p.x < rows && p.y >= 0 && p.y < cols
}

// squared euclidean distance
fn straight_line(a: Point, b: Point) -> i64 {
    let dx = (a.x - b.x) as i64;
    let dy = (a.y - b.y) as i64;
    dx * dx + dy * dy
}
