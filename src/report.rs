//! Line-oriented text reports, one per audit. Every writer takes any
//! `io::Write` so the binaries print to stdout and tests capture a buffer.

use std::io::{self, Write};

use crate::audit::{
    boundary_window, extra_values, missing_columns, tail, CsvDocument, NamedLookup,
};
use crate::formula::HeaderEstimate;

/// Header length, then length and tail of the first `rows` data rows.
pub fn write_shape<W: Write>(
    out: &mut W,
    doc: &CsvDocument,
    rows: usize,
    tail_len: usize,
) -> io::Result<()> {
    writeln!(out, "header {}", doc.header_len())?;
    for (file_row, row) in doc.numbered_rows().take(rows) {
        writeln!(
            out,
            "row {} {} tail {:?}",
            file_row,
            row.len(),
            tail(row, tail_len)
        )?;
    }
    Ok(())
}

/// Every row with values past the header, or only the first one.
pub fn write_extras<W: Write>(
    out: &mut W,
    doc: &CsvDocument,
    first_only: bool,
) -> io::Result<()> {
    writeln!(out, "header_len {}", doc.header_len())?;
    let mut found = 0;
    for (file_row, row) in doc.rows_with_extras() {
        let extra = extra_values(&doc.header, row);
        writeln!(
            out,
            "row {} len {} extra_len {} extra {:?}",
            file_row,
            row.len(),
            extra.len(),
            extra
        )?;
        found += 1;
        if first_only {
            break;
        }
    }
    if found == 0 {
        writeln!(out, "no rows with extra values")?;
    }
    Ok(())
}

pub fn write_missing<W: Write>(
    out: &mut W,
    header: &[String],
    file_row: usize,
    row: &[String],
) -> io::Result<()> {
    let missing = missing_columns(header, row);
    writeln!(out, "row {} len {} header_len {}", file_row, row.len(), header.len())?;
    writeln!(out, "missing count {}", missing.len())?;
    writeln!(out, "missing columns {:?}", missing)
}

/// Shortest and longest rows: up to `limit` row numbers each, then the
/// tail of the first row at each extreme.
pub fn write_extremes<W: Write>(
    out: &mut W,
    doc: &CsvDocument,
    limit: usize,
    tail_len: usize,
) -> io::Result<()> {
    writeln!(out, "header_len {}", doc.header_len())?;
    let Some(ext) = doc.length_extremes() else {
        return writeln!(out, "no data rows");
    };

    writeln!(
        out,
        "min_len {} rows {:?} count {}",
        ext.min_len,
        &ext.min_rows[..ext.min_rows.len().min(limit)],
        ext.min_rows.len()
    )?;
    writeln!(
        out,
        "max_len {} rows {:?} count {}",
        ext.max_len,
        &ext.max_rows[..ext.max_rows.len().min(limit)],
        ext.max_rows.len()
    )?;

    for (label, rows) in [("min_row", &ext.min_rows), ("max_row", &ext.max_rows)] {
        if let Some(row) = rows.first().and_then(|&n| doc.row(n).map(|r| (n, r))) {
            writeln!(
                out,
                "{} {} len {} tail {:?}",
                label,
                row.0,
                row.1.len(),
                tail(row.1, tail_len)
            )?;
        }
    }
    Ok(())
}

/// One row against the header: lengths, extras and the columns around the
/// point where the header ends.
pub fn write_row_analysis<W: Write>(
    out: &mut W,
    header: &[String],
    file_row: usize,
    row: &[String],
    radius: usize,
) -> io::Result<()> {
    let extra = extra_values(header, row);
    writeln!(out, "header_len {}", header.len())?;
    writeln!(out, "row{}_len {}", file_row, row.len())?;
    writeln!(out, "extra_len {} extra {:?}", extra.len(), extra)?;
    writeln!(out, "--- boundary ---")?;
    for cell in boundary_window(header, row, radius) {
        writeln!(
            out,
            "{} {} {}",
            cell.column,
            cell.name.unwrap_or("(extra)"),
            cell.value
        )?;
    }
    Ok(())
}

pub fn write_lookup<W: Write>(out: &mut W, lookup: &NamedLookup<'_>) -> io::Result<()> {
    for (name, result) in &lookup.entries {
        match result {
            Ok(value) => writeln!(out, "{} {}", name, value)?,
            Err(e) => writeln!(out, "{} <{}>", name, e)?,
        }
    }
    Ok(())
}

pub fn write_estimate<W: Write>(out: &mut W, est: &HeaderEstimate) -> io::Result<()> {
    writeln!(out, "name list blocks: {}", est.name_blocks.len())?;
    writeln!(out, "names per block: {:?}", est.name_blocks)?;
    writeln!(out, "total names: {}", est.name_columns())?;
    writeln!(out, "block calls: {:?}", est.block_params)?;
    writeln!(
        out,
        "calculated columns: {} = {} + {} + {} x {}",
        est.total(),
        est.base_columns,
        est.name_columns(),
        est.block_columns,
        est.block_params.len()
    )
}

/// Estimate against an actual header; a non-zero difference means the
/// formula constants or the CSV writer have drifted.
pub fn write_cross_check<W: Write>(
    out: &mut W,
    est: &HeaderEstimate,
    header_len: usize,
) -> io::Result<()> {
    let diff = header_len as isize - est.total() as isize;
    writeln!(
        out,
        "csv header_len {} estimated {} difference {:+}",
        header_len,
        est.total(),
        diff
    )
}
