use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SheetError>;

/// Every failure is terminal for the current batch; no retries.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("No barcode specifications provided")]
    EmptySpecs,
    #[error("Barcode {number} (spec {index}): count must be at least 1")]
    InvalidCount { index: usize, number: String },
    #[error("Failed to encode barcode {number}: {reason}")]
    Encode { number: String, reason: String },
    #[error("Barcode unit {width}x{height}px does not fit the printable area")]
    UnitTooLarge { width: u32, height: u32 },
    #[error("Failed to render barcode {index}/{total} ({number}) on sheet {sheet}: {reason}")]
    Render {
        index: usize,
        total: usize,
        sheet: usize,
        number: String,
        reason: String,
    },
    #[error("Failed to create PDF: {0}")]
    Pdf(String),
    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Failed to write {path}: {source}")]
    Export { path: PathBuf, source: io::Error },
    #[error("Failed to read spec file: {0}")]
    SpecFile(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
