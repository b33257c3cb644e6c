pub mod hall;
pub mod seat;

pub use hall::HallRow;
pub use seat::SeatRow;
