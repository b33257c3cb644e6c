use thiserror::Error;

/// Errors from building a hall or querying it with bad coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HallError {
    #[error("hall must have at least one row and one column, got {rows}x{cols}")]
    EmptyHall { rows: i32, cols: i32 },

    #[error("hall dimensions {rows}x{cols} are too large")]
    DimensionsTooLarge { rows: i32, cols: i32 },

    #[error("point ({x}, {y}) is outside the hall [0, {rows}) x [0, {cols})")]
    OutOfBounds { x: i32, y: i32, rows: i32, cols: i32 },

    #[error("seat ({x}, {y}) appears more than once in the snapshot")]
    DuplicateSeat { x: i32, y: i32 },

    #[error("snapshot covers {found} of {expected} seats")]
    MissingSeats { expected: usize, found: usize },

    #[error("seat ({x}, {y}) records distance {found} to center, expected {expected}")]
    DistanceMismatch { x: i32, y: i32, expected: i32, found: i32 },
}
