// Error types shared by the field model and the labeling algorithm.

use thiserror::Error;

/// Errors raised while interpreting a declarative field specification.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A row definition that is not an integer, a range/shift mapping,
    /// a list of definitions, or null.
    #[error("row '{row}' has an unrecognized definition: {detail}")]
    UnknownRowSpec { row: String, detail: String },
    /// A shift referencing a row that is not defined earlier in the spec.
    #[error("row '{row}' shifts '{reference}', which is not defined before it")]
    UnresolvedShiftReference { row: String, reference: String },
    #[error("unknown row direction '{0}' (expected 'north_to_south' or 'west_to_east')")]
    UnknownRowDirection(String),
    #[error("field spec has no 'rows' mapping")]
    MissingRows,
    #[error("field spec defines no rows")]
    EmptyRows,
}

/// Errors raised by layout construction, lookups, and plot labeling.
#[derive(Error, Debug)]
pub enum FieldError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("repeat count must be at least 1 (got {repeats})")]
    InvalidRange { repeats: i64 },
    #[error("cannot merge zero rows")]
    EmptyMerge,
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("{num_plots} plots cannot be split evenly across {num_rows} rows")]
    RowCountMismatch { num_plots: usize, num_rows: usize },
    #[error("got {boundaries} plot boundaries for a field with {num_plots} plots")]
    BoundaryCountMismatch { boundaries: usize, num_plots: usize },
    #[error("plot boundary {index} has no computable centroid")]
    DegenerateBoundary { index: usize },
}
