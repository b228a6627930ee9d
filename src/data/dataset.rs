//! Weekly Dataset
//! Immutable, date-sorted weekly table plus the ticker and date-label indexes
//! the dashboard widgets are built from.

use chrono::{DateTime, NaiveDate, TimeDelta};
use polars::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

pub const DATE_COL: &str = "Date";
pub const TICKER_COL: &str = "Ticker";

/// Format used for date labels, status text and CSV export.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Cleaned weekly table. Built once by the loader and shared read-only.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
    tickers: Vec<String>,
    dates: Vec<NaiveDate>,
    date_labels: Vec<String>,
    source: Option<PathBuf>,
}

impl Dataset {
    /// Build the indexes over a frame that is already cleaned and sorted by date.
    pub(crate) fn from_clean_frame(
        frame: DataFrame,
        source: Option<PathBuf>,
    ) -> PolarsResult<Self> {
        let tickers: BTreeSet<String> = frame
            .column(TICKER_COL)?
            .as_materialized_series()
            .str()?
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();

        let mut dates = column_dates(&frame)?;
        dates.dedup();
        let date_labels = dates
            .iter()
            .map(|d| d.format(DATE_FORMAT).to_string())
            .collect();

        Ok(Self {
            frame,
            tickers: tickers.into_iter().collect(),
            dates,
            date_labels,
            source,
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Distinct normalized tickers, sorted.
    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// Distinct dates, ascending. Range-slider indexes point into this.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn date_labels(&self) -> &[String] {
        &self.date_labels
    }

    pub fn row_count(&self) -> usize {
        self.frame.height()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Look a ticker up after trimming and uppercasing it.
    pub fn resolve_ticker(&self, raw: &str) -> Option<&str> {
        let wanted = normalize_ticker(raw);
        self.tickers
            .binary_search(&wanted)
            .ok()
            .map(|idx| self.tickers[idx].as_str())
    }

    /// First and last week present.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((*self.dates.first()?, *self.dates.last()?))
    }

    /// Number of weekly rows per ticker.
    pub fn ticker_row_counts(&self) -> PolarsResult<BTreeMap<String, usize>> {
        let mut counts = BTreeMap::new();
        for ticker in self
            .frame
            .column(TICKER_COL)?
            .as_materialized_series()
            .str()?
            .into_iter()
            .flatten()
        {
            *counts.entry(ticker.to_string()).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

/// Trim and uppercase a ticker symbol.
pub fn normalize_ticker(raw: &str) -> String {
    raw.trim().to_uppercase()
}

fn epoch() -> NaiveDate {
    DateTime::UNIX_EPOCH.date_naive()
}

/// Days since 1970-01-01, the physical representation of a polars `Date`.
pub fn date_to_days(date: NaiveDate) -> i32 {
    date.signed_duration_since(epoch()).num_days() as i32
}

pub fn days_to_date(days: i32) -> Option<NaiveDate> {
    epoch().checked_add_signed(TimeDelta::days(i64::from(days)))
}

/// Read the `Date` column of a frame as calendar dates, in row order.
pub(crate) fn column_dates(frame: &DataFrame) -> PolarsResult<Vec<NaiveDate>> {
    let days = frame.column(DATE_COL)?.cast(&DataType::Int32)?;
    Ok(days
        .as_materialized_series()
        .i32()?
        .into_iter()
        .flatten()
        .filter_map(days_to_date)
        .collect())
}

/// Read a numeric column as f64 values, in row order.
pub(crate) fn column_values(frame: &DataFrame, name: &str) -> PolarsResult<Vec<f64>> {
    let values = frame.column(name)?.cast(&DataType::Float64)?;
    Ok(values
        .as_materialized_series()
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}
