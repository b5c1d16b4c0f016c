use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::{fs, path::Path};
use tracing::{debug, info};

use super::{FormulaConfig, FormulaError};

static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]+)""#).unwrap());

/// What the header-building code adds up to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEstimate {
    pub base_columns: usize,
    /// Quoted names found in each name-list call, in source order.
    pub name_blocks: Vec<usize>,
    /// Argument of each block call, in source order. It picks a naming
    /// prefix and does not change the width.
    pub block_params: Vec<String>,
    pub block_columns: usize,
}

impl HeaderEstimate {
    pub fn name_columns(&self) -> usize {
        self.name_blocks.iter().sum()
    }

    pub fn block_total(&self) -> usize {
        self.block_columns * self.block_params.len()
    }

    pub fn total(&self) -> usize {
        self.base_columns + self.name_columns() + self.block_total()
    }
}

/// Scan `source` between the configured anchors.
///
/// Heuristic: a reformatted call site or a renamed helper silently drops
/// out of the count.
pub fn estimate_header(
    source: &str,
    config: &FormulaConfig,
) -> Result<HeaderEstimate, FormulaError> {
    let chunk = header_chunk(source, config)?;

    let names_re = Regex::new(&format!(
        r"(?s){}\(\s*\w+\s*,\s*ref\s+\w+\s*,\s*new\s*\[\]\s*\{{(.*?)\}}\s*\)\s*;",
        regex::escape(&config.names_call)
    ))?;
    let block_re = Regex::new(&format!(
        r"{}\(\s*\w+\s*,\s*ref\s+\w+\s*,\s*(\d+)\s*\)",
        regex::escape(&config.block_call)
    ))?;

    let name_blocks: Vec<usize> = names_re
        .captures_iter(chunk)
        .map(|caps| QUOTED.find_iter(&caps[1]).count())
        .collect();
    for (i, n) in name_blocks.iter().enumerate() {
        debug!(block = i, names = n, "name list");
    }

    let block_params: Vec<String> = block_re
        .captures_iter(chunk)
        .map(|caps| caps[1].to_string())
        .collect();
    debug!(?block_params, "block calls");

    let estimate = HeaderEstimate {
        base_columns: config.base_columns,
        name_blocks,
        block_params,
        block_columns: config.block_columns,
    };
    info!(total = estimate.total(), "estimated header columns");
    Ok(estimate)
}

pub fn estimate_header_file<P: AsRef<Path>>(
    path: P,
    config: &FormulaConfig,
) -> Result<HeaderEstimate> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("reading matcher source {}", path.display()))?;
    estimate_header(&source, config).with_context(|| format!("scanning {}", path.display()))
}

/// Text from the start anchor up to the first end anchor after it.
fn header_chunk<'a>(source: &'a str, config: &FormulaConfig) -> Result<&'a str, FormulaError> {
    let start = source
        .find(&config.start_anchor)
        .ok_or_else(|| FormulaError::StartAnchorNotFound(config.start_anchor.clone()))?;
    let len = source[start..]
        .find(&config.end_anchor)
        .ok_or_else(|| FormulaError::EndAnchorNotFound(config.end_anchor.clone()))?;
    Ok(&source[start..start + len])
}
