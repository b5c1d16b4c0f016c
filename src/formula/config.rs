use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Columns the matcher writes before any name list or block
/// (`line_pressure` .. `roi_h`). Observed, not derived.
pub const DEFAULT_BASE_COLUMNS: usize = 7;

/// Columns added by each parametrized block call, whatever its argument.
/// Observed from the matcher's output; revalidate when its header changes.
pub const DEFAULT_BLOCK_COLUMNS: usize = 32;

/// Where to look in the matcher source and how to count what is found.
///
/// Every field has a default, so a YAML file only needs the keys it changes:
///
/// ```yaml
/// block_columns: 36
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormulaConfig {
    pub start_anchor: String,
    pub end_anchor: String,
    /// Call that appends a literal list of quoted names.
    pub names_call: String,
    /// Call that appends one fixed-width block per invocation.
    pub block_call: String,
    pub base_columns: usize,
    pub block_columns: usize,
}

impl Default for FormulaConfig {
    fn default() -> Self {
        Self {
            start_anchor: "var header = new StringBuilder".into(),
            end_anchor: "var headerText = header.ToString()".into(),
            names_call: "AppendHeaderCsvNames".into(),
            block_call: "AppendHeaderShapeWithOverUnder".into(),
            base_columns: DEFAULT_BASE_COLUMNS,
            block_columns: DEFAULT_BLOCK_COLUMNS,
        }
    }
}

impl FormulaConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("parsing formula config")
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading formula config {}", path.display()))?;
        Self::from_yaml_str(&text).with_context(|| format!("in {}", path.display()))
    }
}
