use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown map symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },

    #[error("unknown unit type {0:?}")]
    UnknownUnit(String),

    #[error("({x}, {y}) is outside the map")]
    OutOfBounds { x: i32, y: i32 },

    #[error("{unit} cannot stand on ({x}, {y})")]
    BadPlacement { unit: String, x: i32, y: i32 },
}
