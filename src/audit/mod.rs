pub mod document;
pub mod error;
pub mod lookup;
pub mod shape;

pub use document::CsvDocument;
pub use error::{AuditError, LookupError};
pub use lookup::{lookup_column, lookup_named_columns, NamedLookup};
pub use shape::{
    boundary_window, discrepancy, extra_values, length_extremes, missing_columns, tail,
    BoundaryCell, LengthExtremes,
};

/// File row number of the first data row. The header is row 1.
pub const FIRST_DATA_ROW: usize = 2;
