use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to walk the images directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("failed to parse calibration: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Transform(#[from] cw_core::Error),
    #[error("no png images found in {0}")]
    NoImages(PathBuf),
    #[error("motion capture table not found at {0}")]
    MissingMocap(PathBuf),
    #[error("motion capture table has no header row")]
    EmptyMocap,
    #[error("motion capture table must have {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },
    #[error("motion capture table has no column named {0:?}")]
    MissingColumn(String),
    #[error("motion capture row {row} has {found} fields, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("motion capture row {row}, column {column:?}: cannot parse {value:?} as a number")]
    ParseField {
        row: usize,
        column: String,
        value: String,
    },
    #[error("motion capture table has {rows} rows but there are {images} images")]
    RowCount { rows: usize, images: usize },
    #[error("image number {index} out of range 1..={count}")]
    ImageOutOfRange { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, DatasetError>;
