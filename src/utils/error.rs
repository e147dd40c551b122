use thiserror::Error;

/// Errors reported by [`Universe`](crate::Universe) operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid dimensions {width}x{height}: sides must be positive and the grid must fit in memory")]
    InvalidDimension { width: u32, height: u32 },

    #[error("cell ({row}, {col}) is outside of the {width}x{height} grid")]
    InvalidIndex {
        row: u32,
        col: u32,
        width: u32,
        height: u32,
    },

    #[error("fill rate {0} is not within [0, 1]")]
    InvalidFillRate(f64),

    #[error("malformed RLE pattern: {0}")]
    Rle(String),
}

pub type Result<T> = std::result::Result<T, Error>;
