use std::collections::BTreeMap;

use super::LookupError;

/// Resolve one column name against `row`, using its first header position.
pub fn lookup_column<'r>(
    header: &[String],
    row: &'r [String],
    name: &str,
) -> Result<&'r str, LookupError> {
    let idx = header
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| LookupError::NotFound {
            name: name.to_string(),
        })?;
    row.get(idx)
        .map(String::as_str)
        .ok_or_else(|| LookupError::IndexOutOfRange {
            name: name.to_string(),
            column: idx + 1,
            row_len: row.len(),
        })
}

/// Results of looking several names up in one row, in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedLookup<'r> {
    pub entries: Vec<(String, Result<&'r str, LookupError>)>,
}

impl<'r> NamedLookup<'r> {
    /// Successful lookups as a name → value map.
    pub fn values(&self) -> BTreeMap<&str, &'r str> {
        self.entries
            .iter()
            .filter_map(|(name, res)| res.as_ref().ok().map(|v| (name.as_str(), *v)))
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = &LookupError> {
        self.entries.iter().filter_map(|(_, res)| res.as_ref().err())
    }

    pub fn get(&self, name: &str) -> Option<&Result<&'r str, LookupError>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, res)| res)
    }
}

/// Look every name up independently; one failure does not stop the rest.
pub fn lookup_named_columns<'r, S: AsRef<str>>(
    header: &[String],
    row: &'r [String],
    names: &[S],
) -> NamedLookup<'r> {
    let entries = names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            (name.to_string(), lookup_column(header, row, name))
        })
        .collect();
    NamedLookup { entries }
}
