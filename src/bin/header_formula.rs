use anyhow::Result;
use clap::Parser;
use matchaudit::{
    formula::{estimate_header_file, FormulaConfig},
    input::load_document,
    report,
};
use std::{io, path::PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

/// Estimate the matcher's header width from the source that builds it.
#[derive(Parser)]
#[command(name = "header_formula", version)]
struct Args {
    /// Matcher source file to scan
    source: PathBuf,

    /// CSV (path or glob) whose header length to compare against
    #[arg(long)]
    csv: Option<String>,

    /// YAML file overriding anchors, call names or column constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Columns written before any name list or block
    #[arg(long)]
    base_columns: Option<usize>,

    /// Columns added by each parametrized block call
    #[arg(long)]
    block_columns: Option<usize>,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => FormulaConfig::from_yaml_file(path)?,
        None => FormulaConfig::default(),
    };
    if let Some(n) = args.base_columns {
        config.base_columns = n;
    }
    if let Some(n) = args.block_columns {
        config.block_columns = n;
    }

    let estimate = estimate_header_file(&args.source, &config)?;
    let mut out = io::stdout().lock();
    report::write_estimate(&mut out, &estimate)?;

    if let Some(csv) = &args.csv {
        let doc = load_document(csv)?;
        report::write_cross_check(&mut out, &estimate, doc.header_len())?;
    }
    Ok(())
}
