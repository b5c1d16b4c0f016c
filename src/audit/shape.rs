use std::cmp::Ordering;

use super::FIRST_DATA_ROW;

/// Values past the header's last column; empty when the row is not longer.
pub fn extra_values<'r>(header: &[String], row: &'r [String]) -> &'r [String] {
    row.get(header.len()..).unwrap_or(&[])
}

/// Header names the row has no value for; empty when the row is not shorter.
pub fn missing_columns<'h>(header: &'h [String], row: &[String]) -> &'h [String] {
    header.get(row.len()..).unwrap_or(&[])
}

/// Signed `row_len - header_len`.
pub fn discrepancy(header: &[String], row: &[String]) -> isize {
    row.len() as isize - header.len() as isize
}

/// The last `k` values of `row`, or all of them when the row is shorter.
pub fn tail(row: &[String], k: usize) -> &[String] {
    &row[row.len().saturating_sub(k)..]
}

/// Shortest and longest rows of a document, with every file row that ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthExtremes {
    pub min_len: usize,
    pub min_rows: Vec<usize>,
    pub max_len: usize,
    pub max_rows: Vec<usize>,
}

/// Single pass over the data rows. `None` when there are no data rows.
pub fn length_extremes<R: AsRef<[String]>>(rows: &[R]) -> Option<LengthExtremes> {
    let first_len = rows.first()?.as_ref().len();
    let mut ext = LengthExtremes {
        min_len: first_len,
        min_rows: vec![FIRST_DATA_ROW],
        max_len: first_len,
        max_rows: vec![FIRST_DATA_ROW],
    };

    for (idx, row) in rows.iter().enumerate().skip(1) {
        let len = row.as_ref().len();
        let file_row = idx + FIRST_DATA_ROW;

        match len.cmp(&ext.min_len) {
            Ordering::Less => {
                ext.min_len = len;
                ext.min_rows = vec![file_row];
            }
            Ordering::Equal => ext.min_rows.push(file_row),
            Ordering::Greater => {}
        }
        match len.cmp(&ext.max_len) {
            Ordering::Greater => {
                ext.max_len = len;
                ext.max_rows = vec![file_row];
            }
            Ordering::Equal => ext.max_rows.push(file_row),
            Ordering::Less => {}
        }
    }

    Some(ext)
}

/// One column of a [`boundary_window`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryCell<'a> {
    /// 1-based column number.
    pub column: usize,
    /// `None` for values beyond the header.
    pub name: Option<&'a str>,
    pub value: &'a str,
}

/// Columns within `radius` of the header's end, so a shifted row shows
/// where its values stop lining up with the names.
pub fn boundary_window<'a>(
    header: &'a [String],
    row: &'a [String],
    radius: usize,
) -> Vec<BoundaryCell<'a>> {
    let start = header.len().saturating_sub(radius);
    let end = row.len().min(header.len().saturating_add(radius));
    (start..end)
        .map(|idx| BoundaryCell {
            column: idx + 1,
            name: header.get(idx).map(String::as_str),
            value: &row[idx],
        })
        .collect()
}
