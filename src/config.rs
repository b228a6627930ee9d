//! Command line and environment configuration.

use crate::data::Field;
use crate::view::ExportMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Weekly table to load (parquet, csv or feather)
    #[arg(short, long, env = "WEEKLY_TRENDS_DATA", default_value = "weekly_data.parquet")]
    pub data: PathBuf,

    /// Verbose logging (RUST_LOG still takes precedence)
    #[arg(long)]
    pub debug: bool,

    /// How the Download button maps onto exports
    #[arg(long, value_enum, default_value_t = ExportMode::OneShot)]
    pub export_mode: ExportMode,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Default)]
pub enum Command {
    /// Open the dashboard window (default)
    #[default]
    Gui,
    /// Render one selection and print it as JSON
    Render(RenderArgs),
    /// List tickers with their week counts
    Tickers,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Ticker symbol (case-insensitive)
    #[arg(long)]
    pub ticker: String,

    /// Comma-separated fields to plot, in order
    #[arg(long, value_delimiter = ',', default_value = "Close")]
    pub fields: Vec<Field>,

    /// First week index (default: first week)
    #[arg(long)]
    pub start: Option<usize>,

    /// Last week index, inclusive (default: last week)
    #[arg(long)]
    pub end: Option<usize>,

    /// Download click counter; any positive value attaches an export
    #[arg(long, default_value_t = 0)]
    pub clicks: u64,

    /// Directory the export is written to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}
