//! View Controller
//! Pure function from the dataset and a widget selection to everything the
//! dashboard shows: chart curves, the EMA status line and an optional export.

use crate::data::{
    column_dates, column_values, date_to_days, Dataset, Field, DATE_COL, DATE_FORMAT, TICKER_COL,
};
use crate::view::export::{ExportError, ExportPayload};
use crate::view::selection::{IndexRange, Selection};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::debug;

/// Status line shown when the filter matches nothing.
pub const NO_DATA_MESSAGE: &str = "No data in selected range.";

/// Curve colours, assigned by position in the field selection.
pub const PALETTE: [Rgb; 6] = [
    Rgb(0x0f, 0x54, 0x99),
    Rgb(0x9e, 0x2f, 0x50),
    Rgb(0x6a, 0x73, 0x7b),
    Rgb(0xff, 0xbc, 0x42),
    Rgb(0x00, 0x5f, 0x73),
    Rgb(0xb0, 0x89, 0x68),
];

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Unknown ticker '{0}'")]
    NotFound(String),
    #[error("Week index {index} out of range for {len} weeks")]
    OutOfRange { index: usize, len: usize },
    #[error("Week range start {start} is after end {end}")]
    InvertedRange { start: usize, end: usize },
    #[error("Filtering failed: {0}")]
    Polars(#[from] PolarsError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

/// One plotted line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    pub field: Field,
    pub color: Rgb,
    pub points: Vec<(NaiveDate, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewResult {
    /// Chart title, the resolved ticker.
    pub title: String,
    pub curves: Vec<Curve>,
    pub status: String,
    pub row_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportPayload>,
}

/// Filter the dataset by `selection` and build the view.
pub fn render(dataset: &Dataset, selection: &Selection) -> Result<ViewResult, ViewError> {
    let ticker = dataset
        .resolve_ticker(&selection.ticker)
        .ok_or_else(|| ViewError::NotFound(selection.ticker.clone()))?;
    let (start, end) = resolve_range(dataset, selection.range)?;

    let rows = filter_rows(dataset.frame(), ticker, start, end)?;
    let dates = column_dates(&rows)?;

    let curves = selection
        .fields
        .iter()
        .enumerate()
        .map(|(i, &field)| -> PolarsResult<Curve> {
            let values = column_values(&rows, field.column())?;
            Ok(Curve {
                field,
                color: PALETTE[i % PALETTE.len()],
                points: dates.iter().copied().zip(values).collect(),
            })
        })
        .collect::<PolarsResult<Vec<_>>>()?;

    let status = status_text(&rows, &dates)?;

    let export = if selection.export_requested && rows.height() > 0 {
        Some(ExportPayload::from_rows(ticker, &rows)?)
    } else {
        None
    };

    debug!(
        ticker,
        %start,
        %end,
        rows = rows.height(),
        curves = curves.len(),
        export = export.is_some(),
        "rendered view"
    );

    Ok(ViewResult {
        title: ticker.to_string(),
        curves,
        status,
        row_count: rows.height(),
        export,
    })
}

/// Map slider indexes to the calendar dates they label.
fn resolve_range(dataset: &Dataset, range: IndexRange) -> Result<(NaiveDate, NaiveDate), ViewError> {
    let dates = dataset.dates();
    let lookup = |index: usize| {
        dates.get(index).copied().ok_or(ViewError::OutOfRange {
            index,
            len: dates.len(),
        })
    };

    let start = lookup(range.start)?;
    let end = lookup(range.end)?;
    if range.start > range.end {
        return Err(ViewError::InvertedRange {
            start: range.start,
            end: range.end,
        });
    }
    Ok((start, end))
}

fn filter_rows(
    frame: &DataFrame,
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> PolarsResult<DataFrame> {
    let day = col(DATE_COL).cast(DataType::Int32);
    frame
        .clone()
        .lazy()
        .filter(
            col(TICKER_COL)
                .eq(lit(ticker))
                .and(day.clone().gt_eq(lit(date_to_days(start))))
                .and(day.lt_eq(lit(date_to_days(end)))),
        )
        .collect()
}

/// EMA summary for the latest week in `rows`.
fn status_text(rows: &DataFrame, dates: &[NaiveDate]) -> PolarsResult<String> {
    let Some((latest, date)) = dates.iter().enumerate().max_by_key(|(_, d)| **d) else {
        return Ok(NO_DATA_MESSAGE.to_string());
    };

    let ema_high = column_values(rows, Field::EmaHigh.column())?;
    let ema_low = column_values(rows, Field::EmaLow.column())?;

    Ok(format!(
        "Latest Week: {} | EMA 48-Week High: {:.2} | EMA 48-Week Low: {:.2}",
        date.format(DATE_FORMAT),
        ema_high[latest],
        ema_low[latest]
    ))
}
