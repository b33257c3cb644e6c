use std::sync::atomic::{AtomicBool, Ordering};

use super::point::Point;
use super::snapshot::SeatSnapshot;

/// One cell of the hall.
///
/// The reservation flag only ever goes `false -> true`. Equality compares
/// positions only, so a seat read back from the hall equals the one handed
/// out by the allocator.
#[derive(Debug)]
pub struct Seat {
    position: Point,
    reserved: AtomicBool,
    distance_to_center: i32,
}

impl Seat {
    pub(crate) fn new(position: Point, center: Point) -> Self {
        Self {
            position,
            reserved: AtomicBool::new(false),
            distance_to_center: position.grid_distance(center),
        }
    }

    pub(crate) fn from_snapshot(snapshot: &SeatSnapshot) -> Self {
        Self {
            position: Point::new(snapshot.x, snapshot.y),
            reserved: AtomicBool::new(snapshot.reserved),
            distance_to_center: snapshot.distance_to_center,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn distance_to_center(&self) -> i32 {
        self.distance_to_center
    }

    pub fn is_reserved(&self) -> bool {
        self.reserved.load(Ordering::Acquire)
    }

    /// Flip the seat to reserved. Returns `true` only for the caller that
    /// performed the transition.
    pub fn reserve(&self) -> bool {
        self.reserved
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn distance_to(&self, other: &Seat) -> i32 {
        self.position.grid_distance(other.position)
    }

    pub fn snapshot(&self) -> SeatSnapshot {
        SeatSnapshot {
            x: self.position.x,
            y: self.position.y,
            reserved: self.is_reserved(),
            distance_to_center: self.distance_to_center,
        }
    }
}

impl PartialEq for Seat {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for Seat {}
