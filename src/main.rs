use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use matchaudit::{
    audit::{lookup_named_columns, CsvDocument, FIRST_DATA_ROW},
    input::load_document,
    report,
};
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "matchaudit",
    about = "Inspect matcher CSV output for rows that do not line up with the header",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Header length plus length and tail of the first rows
    Shape {
        /// CSV path, or a glob that resolves to the newest stamped file
        input: String,

        /// Number of data rows to show
        #[arg(long, default_value_t = 5)]
        rows: usize,

        /// Trailing values to print per row
        #[arg(long, default_value_t = 6)]
        tail: usize,
    },

    /// Rows carrying values past the last header column
    Extras {
        input: String,

        /// Stop after the first such row
        #[arg(long)]
        first: bool,
    },

    /// Header columns a row has no value for
    Missing {
        input: String,

        /// File row number (header is row 1)
        #[arg(long, default_value_t = FIRST_DATA_ROW)]
        row: usize,
    },

    /// Shortest and longest rows in the file
    Extremes {
        input: String,

        /// Row numbers to list per extreme
        #[arg(long, default_value_t = 10)]
        limit: usize,

        #[arg(long, default_value_t = 10)]
        tail: usize,
    },

    /// One row against the header, with the columns around the header's end
    Row {
        input: String,

        /// File row number (header is row 1)
        #[arg(long, default_value_t = 3)]
        row: usize,

        /// Columns to show on each side of the header's end
        #[arg(long, default_value_t = 10)]
        radius: usize,
    },

    /// Values of named columns in one row
    Lookup {
        input: String,

        #[arg(long, default_value_t = FIRST_DATA_ROW)]
        row: usize,

        /// Column name to look up (repeatable)
        #[arg(long = "column", required = true)]
        columns: Vec<String>,
    },
}

fn main() -> Result<()> {
    // ─── 1) init logging (stderr, stdout is the report) ─────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    // ─── 2) run the selected audit ──────────────────────────────────
    match cli.command {
        Commands::Shape { input, rows, tail } => {
            let doc = load_document(&input)?;
            report::write_shape(&mut out, &doc, rows, tail)?;
        }
        Commands::Extras { input, first } => {
            let doc = load_document(&input)?;
            report::write_extras(&mut out, &doc, first)?;
        }
        Commands::Missing { input, row } => {
            let doc = load_document(&input)?;
            let values = select_row(&doc, row)?;
            report::write_missing(&mut out, &doc.header, row, values)?;
        }
        Commands::Extremes { input, limit, tail } => {
            let doc = load_document(&input)?;
            report::write_extremes(&mut out, &doc, limit, tail)?;
        }
        Commands::Row { input, row, radius } => {
            let doc = load_document(&input)?;
            let values = select_row(&doc, row)?;
            report::write_row_analysis(&mut out, &doc.header, row, values, radius)?;
        }
        Commands::Lookup {
            input,
            row,
            columns,
        } => {
            let doc = load_document(&input)?;
            let values = select_row(&doc, row)?;
            let found = lookup_named_columns(&doc.header, values, &columns);
            report::write_lookup(&mut out, &found)?;
        }
    }

    out.flush()?;
    info!("done");
    Ok(())
}

fn select_row(doc: &CsvDocument, file_row: usize) -> Result<&[String]> {
    doc.row(file_row).with_context(|| {
        format!(
            "row {} out of range: {} has data rows {}..={}",
            file_row,
            doc.path.display(),
            FIRST_DATA_ROW,
            doc.rows.len() + FIRST_DATA_ROW - 1
        )
    })
}
