//! Headless subcommands: render one selection, list tickers.

use crate::config::RenderArgs;
use crate::data::{Dataset, DATE_FORMAT};
use crate::view::{render, IndexRange, Selection};
use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;

/// Render the selection described by `args`, print it as JSON and write any
/// export payload to `args.out_dir`.
pub fn run_render(dataset: &Dataset, args: &RenderArgs, out: &mut impl Write) -> Result<()> {
    let last = dataset.date_labels().len().saturating_sub(1);
    let range = IndexRange::new(args.start.unwrap_or(0), args.end.unwrap_or(last));
    let selection =
        Selection::new(args.ticker.clone(), args.fields.clone(), range).with_click_count(args.clicks);

    let view = render(dataset, &selection)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;

    if let Some(payload) = &view.export {
        let path = payload
            .write_to(&args.out_dir)
            .with_context(|| format!("Failed to write {}", payload.filename))?;
        info!(path = %path.display(), "export written");
    }
    Ok(())
}

/// One line per ticker with its week count, then the overall date span.
pub fn run_tickers(dataset: &Dataset, out: &mut impl Write) -> Result<()> {
    for (ticker, weeks) in dataset.ticker_row_counts()? {
        writeln!(out, "{ticker}\t{weeks} weeks")?;
    }
    match dataset.date_span() {
        Some((first, last)) => writeln!(
            out,
            "{} .. {} ({} weeks)",
            first.format(DATE_FORMAT),
            last.format(DATE_FORMAT),
            dataset.dates().len()
        )?,
        None => writeln!(out, "no weeks loaded")?,
    }
    Ok(())
}
