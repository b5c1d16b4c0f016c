use std::path::PathBuf;

/// Reasons a CSV document could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `offset` is the byte position of the first invalid sequence.
    #[error("{} is not valid UTF-8 (invalid byte at offset {offset})", path.display())]
    Decode { path: PathBuf, offset: usize },

    #[error("malformed CSV in {}: {reason}", path.display())]
    MalformedCsv { path: PathBuf, reason: String },

    #[error("{} has no header row", path.display())]
    MissingHeader { path: PathBuf },
}

/// Per-name failure of a named column lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("column `{name}` is not in the header")]
    NotFound { name: String },

    /// `column` is 1-based, matching how reports number columns.
    #[error("column `{name}` is column {column} but the row has only {row_len} values")]
    IndexOutOfRange {
        name: String,
        column: usize,
        row_len: usize,
    },
}
