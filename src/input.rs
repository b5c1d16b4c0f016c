// src/input.rs
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDateTime;
use glob::glob;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::audit::CsvDocument;

/// Matches the `YYYYMMDD-HHMMSS` stamp the matcher puts in its file names,
/// e.g. `lineN1-vs-dotN1-match-20260211-173104.csv`.
static STAMP: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{8}-\d{6})").unwrap());

/// Turn a CLI argument into one CSV path.
///
/// A plain path is returned untouched (loading reports if it is missing).
/// A glob pattern resolves to the matching file with the newest stamp in
/// its name; unstamped files lose to stamped ones and ties go to the
/// lexically greatest path.
pub fn resolve_input(arg: &str) -> Result<PathBuf> {
    if !is_pattern(arg) {
        return Ok(PathBuf::from(arg));
    }

    let mut candidates = Vec::new();
    for entry in glob(arg).with_context(|| format!("failed to read glob pattern '{}'", arg))? {
        match entry {
            Ok(path) if path.is_file() => candidates.push(path),
            Ok(_) => {}
            Err(e) => debug!("skipping unreadable glob entry: {}", e),
        }
    }
    debug!(pattern = arg, matches = candidates.len(), "glob resolved");

    let newest = candidates
        .into_iter()
        .max_by(|a, b| (file_stamp(a), a).cmp(&(file_stamp(b), b)))
        .ok_or_else(|| anyhow!("no files match '{}'", arg))?;
    info!(path = %newest.display(), "selected newest match");
    Ok(newest)
}

/// Resolve `arg` and load the CSV it names, keeping the path in the error chain.
pub fn load_document(arg: &str) -> Result<CsvDocument> {
    let path = resolve_input(arg)?;
    CsvDocument::load(&path).with_context(|| format!("failed to audit {}", path.display()))
}

/// Timestamp embedded in the file name, if it has a valid one.
pub fn file_stamp(path: &Path) -> Option<NaiveDateTime> {
    let name = path.file_name()?.to_str()?;
    STAMP
        .captures_iter(name)
        .find_map(|caps| NaiveDateTime::parse_from_str(&caps[1], "%Y%m%d-%H%M%S").ok())
}

fn is_pattern(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn plain_path_passes_through() -> Result<()> {
        assert_eq!(resolve_input("out/a.csv")?, PathBuf::from("out/a.csv"));
        Ok(())
    }

    #[test]
    fn stamp_parses_matcher_names() {
        let stamp = file_stamp(Path::new("lineN1-vs-dotN1-match-20260211-173104.csv")).unwrap();
        assert_eq!(stamp.to_string(), "2026-02-11 17:31:04");
        assert_eq!(file_stamp(Path::new("match-20261399-000000.csv")), None);
        assert_eq!(file_stamp(Path::new("plain.csv")), None);
    }

    #[test]
    fn pattern_picks_newest_stamp() -> Result<()> {
        let dir = tempdir()?;
        for name in [
            "lineN1-vs-dotN1-match-20260211-203018.csv",
            "lineN1-vs-dotN1-match-20260211-164727.csv",
            "lineN1-vs-dotN1-match-20260211-182745.csv",
            "zzz-unstamped.csv",
        ] {
            fs::write(dir.path().join(name), "a\n")?;
        }
        let pattern = format!("{}/*.csv", dir.path().display());
        let picked = resolve_input(&pattern)?;
        assert_eq!(
            picked.file_name().and_then(|n| n.to_str()),
            Some("lineN1-vs-dotN1-match-20260211-203018.csv")
        );
        Ok(())
    }

    #[test]
    fn pattern_without_matches_fails() -> Result<()> {
        let dir = tempdir()?;
        let pattern = format!("{}/*.csv", dir.path().display());
        let err = resolve_input(&pattern).unwrap_err();
        assert!(err.to_string().starts_with("no files match"));
        Ok(())
    }

    #[test]
    fn load_document_keeps_path_and_cause() {
        let err = load_document("no/such/match.csv").unwrap_err();
        assert_eq!(err.to_string(), "failed to audit no/such/match.csv");
        assert!(matches!(
            err.downcast_ref::<crate::audit::AuditError>(),
            Some(crate::audit::AuditError::FileNotFound { .. })
        ));
    }

    #[test]
    fn load_document_reads_newest_match() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("m-20260211-164727.csv"), "a\n1\n")?;
        fs::write(dir.path().join("m-20260211-203018.csv"), "a,b\n1,2\n")?;
        let doc = load_document(&format!("{}/m-*.csv", dir.path().display()))?;
        assert_eq!(doc.header_len(), 2);
        Ok(())
    }
}
