//! Error type shared by the workbook model and the xlsx writer.

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

/// Grid axis named in coordinate errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumAxis {
    Row,
    Column,
}

impl std::fmt::Display for EnumAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnumAxis::Row => f.write_str("row"),
            EnumAxis::Column => f.write_str("column"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PoiyerError {
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("{axis} index out of bounds: {index}")]
    OutOfBounds { axis: EnumAxis, index: usize },

    #[error("invalid sheet name {name:?}: {reason}")]
    InvalidSheetName { name: String, reason: String },

    #[error("sheet already exists: {0:?}")]
    DuplicateSheet(String),

    #[error("invalid merge region: {0}")]
    InvalidRegion(String),
}

pub type Result<T> = std::result::Result<T, PoiyerError>;
