//! Estimate how many columns the matcher's CSV header should have by
//! scanning the source that builds it.

pub mod config;
pub mod scan;

pub use config::{FormulaConfig, DEFAULT_BASE_COLUMNS, DEFAULT_BLOCK_COLUMNS};
pub use scan::{estimate_header, estimate_header_file, HeaderEstimate};

#[derive(Debug, thiserror::Error)]
pub enum FormulaError {
    #[error("start anchor `{0}` not found")]
    StartAnchorNotFound(String),

    #[error("end anchor `{0}` not found after the start anchor")]
    EndAnchorNotFound(String),

    #[error("invalid call pattern")]
    Pattern(#[from] regex::Error),
}
