//! Weekly Table Loader
//! Reads the pre-computed weekly table with Polars and cleans it into a `Dataset`.

use crate::data::dataset::{date_to_days, normalize_ticker, Dataset, DATE_COL, TICKER_COL};
use chrono::NaiveDate;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Columns every input table must carry.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "Date", "Open", "High", "Low", "Close", "Volume", "Ticker", "EMA_High", "EMA_Low",
];

/// Price-like columns, coerced to f64.
const FLOAT_COLUMNS: [&str; 6] = ["Open", "High", "Low", "Close", "EMA_High", "EMA_Low"];

const VOLUME_COL: &str = "Volume";

/// Accepted layouts for string dates.
const DATE_INPUT_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read table: {0}")]
    Polars(#[from] PolarsError),
    #[error("Data file not found: {0}")]
    NotFound(PathBuf),
    #[error("Unsupported table format '{0}' (expected parquet, csv or feather)")]
    UnsupportedFormat(String),
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Date column has unsupported type {0}")]
    DateType(String),
}

/// On-disk table layout, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Parquet,
    Csv,
    Ipc,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self, LoaderError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "parquet" | "pq" => Ok(TableFormat::Parquet),
            "csv" => Ok(TableFormat::Csv),
            "feather" | "arrow" | "ipc" => Ok(TableFormat::Ipc),
            _ => Err(LoaderError::UnsupportedFormat(ext)),
        }
    }
}

/// Loads the weekly table once at startup.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Read and clean the table at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Dataset, LoaderError> {
        let path = path.as_ref();
        let format = TableFormat::from_path(path)?;
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        info!(path = %path.display(), ?format, "loading weekly table");
        let raw = Self::read_frame(path, format)?;
        Self::from_frame(raw, Some(path.to_path_buf()))
    }

    fn read_frame(path: &Path, format: TableFormat) -> Result<DataFrame, LoaderError> {
        let lazy = match format {
            TableFormat::Csv => LazyCsvReader::new(path)
                .with_infer_schema_length(Some(10000))
                .with_try_parse_dates(true)
                .with_ignore_errors(true)
                .finish()?,
            TableFormat::Parquet => LazyFrame::scan_parquet(path, ScanArgsParquet::default())?,
            TableFormat::Ipc => LazyFrame::scan_ipc(path, ScanArgsIpc::default())?,
        };
        Ok(lazy.collect()?)
    }

    /// Clean an in-memory frame: check columns, coerce types, normalize
    /// tickers, drop incomplete rows and sort by date.
    pub fn from_frame(mut df: DataFrame, source: Option<PathBuf>) -> Result<Dataset, LoaderError> {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| df.get_column_index(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoaderError::MissingColumns(missing));
        }

        let raw_rows = df.height();

        let dates = normalize_dates(df.column(DATE_COL)?)?;
        df.with_column(dates)?;

        for name in FLOAT_COLUMNS {
            let values = df.column(name)?.cast(&DataType::Float64)?;
            df.with_column(values)?;
        }
        let volume = df.column(VOLUME_COL)?.cast(&DataType::Int64)?;
        df.with_column(volume)?;

        let tickers = normalize_tickers(df.column(TICKER_COL)?)?;
        df.with_column(tickers)?;

        let clean = df
            .lazy()
            .filter(complete_rows())
            .sort(
                [DATE_COL],
                SortMultipleOptions::default().with_maintain_order(true),
            )
            .collect()?;

        let dropped = raw_rows - clean.height();
        if dropped > 0 {
            warn!(dropped, "dropped rows with missing values");
        }

        let dataset = Dataset::from_clean_frame(clean, source)?;
        info!(
            rows = dataset.row_count(),
            tickers = dataset.tickers().len(),
            weeks = dataset.dates().len(),
            "weekly table ready"
        );
        Ok(dataset)
    }
}

/// Every required value present, and no NaN prices.
fn complete_rows() -> Expr {
    let mut expr = col(DATE_COL)
        .is_not_null()
        .and(col(TICKER_COL).is_not_null())
        .and(col(VOLUME_COL).is_not_null());
    for name in FLOAT_COLUMNS {
        expr = expr.and(col(name).is_not_null()).and(col(name).is_not_nan());
    }
    expr
}

/// Coerce the date column to a polars `Date`.
fn normalize_dates(column: &Column) -> Result<Column, LoaderError> {
    match column.dtype() {
        DataType::Date => Ok(column.clone()),
        DataType::Datetime(_, _) => Ok(column.cast(&DataType::Date)?),
        DataType::String => {
            let days: Vec<Option<i32>> = column
                .as_materialized_series()
                .str()?
                .into_iter()
                .map(|v| v.and_then(parse_date).map(date_to_days))
                .collect();
            let series = Series::new(DATE_COL.into(), days).cast(&DataType::Date)?;
            Ok(Column::from(series))
        }
        other => Err(LoaderError::DateType(other.to_string())),
    }
}

/// Parse a date string, ignoring any trailing time part.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let candidates = [Some(raw), raw.get(..10)];
    candidates.into_iter().flatten().find_map(|text| {
        DATE_INPUT_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
    })
}

fn normalize_tickers(column: &Column) -> Result<Column, LoaderError> {
    let as_text = column.cast(&DataType::String)?;
    let normalized: StringChunked = as_text
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|v| v.map(normalize_ticker))
        .collect();
    Ok(Column::from(
        normalized.with_name(TICKER_COL.into()).into_series(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::column_dates;
    use crate::data::fixtures::{sample_frame, WEEKS};
    use crate::data::Field;
    use crate::view::{render, IndexRange, Selection};
    use std::io::Write;

    const CSV_HEADER: &str = "Date,Ticker,Open,High,Low,Close,Volume,EMA_High,EMA_Low";

    fn write_csv(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "{CSV_HEADER}").unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    /// Sample frame with the date column stored as `Datetime(ms)` one hour
    /// past midnight.
    fn datetime_frame() -> DataFrame {
        let mut df = sample_frame();
        let millis: Vec<Option<i64>> = df
            .column(DATE_COL)
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| {
                v.and_then(parse_date)
                    .map(|d| i64::from(date_to_days(d)) * 86_400_000 + 3_600_000)
            })
            .collect();
        let dates = Series::new(DATE_COL.into(), millis)
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
            .unwrap();
        df.with_column(dates).unwrap();
        df
    }

    fn assert_sample_loaded(dataset: &Dataset) {
        assert_eq!(dataset.tickers(), ["AAA", "BBB"]);
        assert_eq!(dataset.row_count(), 10);
        assert_eq!(dataset.date_labels(), WEEKS);

        let view = render(
            dataset,
            &Selection::new("AAA", vec![Field::Close], IndexRange::new(0, 4)),
        )
        .unwrap();
        assert_eq!(
            view.status,
            "Latest Week: 2024-02-02 | EMA 48-Week High: 24.46 | EMA 48-Week Low: 12.00"
        );
    }

    #[test]
    fn datetime_dates_are_cut_to_calendar_days() {
        let dataset = DatasetLoader::from_frame(datetime_frame(), None).unwrap();
        assert_eq!(dataset.frame().column(DATE_COL).unwrap().dtype(), &DataType::Date);
        assert_sample_loaded(&dataset);
    }

    #[test]
    fn loads_parquet_with_datetime_dates() {
        let mut df = datetime_frame();
        let mut file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .unwrap();
        ParquetWriter::new(file.as_file_mut())
            .finish(&mut df)
            .unwrap();

        let dataset = DatasetLoader::load(file.path()).unwrap();
        assert_sample_loaded(&dataset);
    }

    #[test]
    fn loads_feather_with_datetime_dates() {
        let mut df = datetime_frame();
        let mut file = tempfile::Builder::new()
            .suffix(".feather")
            .tempfile()
            .unwrap();
        IpcWriter::new(file.as_file_mut()).finish(&mut df).unwrap();

        let dataset = DatasetLoader::load(file.path()).unwrap();
        assert_sample_loaded(&dataset);
    }

    #[test]
    fn normalizes_tickers_and_sorts_by_date() {
        let dataset = DatasetLoader::from_frame(sample_frame(), None).unwrap();

        assert_eq!(dataset.tickers(), ["AAA", "BBB"]);
        assert_eq!(dataset.row_count(), 10);

        let dates = column_dates(dataset.frame()).unwrap();
        assert!(dates.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(dataset.date_labels(), WEEKS);
    }

    #[test]
    fn loads_csv_and_drops_incomplete_rows() {
        let file = write_csv(&[
            "2024-01-12, msft ,10,11,9,10.5,1000,12.1,8.2",
            "2024-01-05,MSFT,9,10,8,9.5,900,12.0,8.1",
            "2024-01-19,MSFT,,11,9,10.5,1000,12.1,8.2",
            "2024-01-19,MSFT,10,11,9,10.5,1000,NaN,8.2",
            "not-a-date,MSFT,10,11,9,10.5,1000,12.1,8.2",
        ]);

        let dataset = DatasetLoader::load(file.path()).unwrap();

        assert_eq!(dataset.tickers(), ["MSFT"]);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.date_labels(), ["2024-01-05", "2024-01-12"]);
        assert_eq!(dataset.source(), Some(file.path()));
    }

    #[test]
    fn date_labels_collapse_shared_weeks() {
        let file = write_csv(&[
            "2024-01-05,AAA,1,1,1,1,1,1,1",
            "2024-01-05,BBB,1,1,1,1,1,1,1",
            "2024-01-12,AAA,1,1,1,1,1,1,1",
        ]);

        let dataset = DatasetLoader::load(file.path()).unwrap();
        assert_eq!(dataset.date_labels(), ["2024-01-05", "2024-01-12"]);
        assert_eq!(dataset.row_count(), 3);
    }

    #[test]
    fn reports_missing_columns() {
        let df = df!(
            "Date" => ["2024-01-05"],
            "Ticker" => ["AAA"],
            "Close" => [1.0]
        )
        .unwrap();

        match DatasetLoader::from_frame(df, None) {
            Err(LoaderError::MissingColumns(cols)) => assert_eq!(
                cols,
                ["Open", "High", "Low", "Volume", "EMA_High", "EMA_Low"]
            ),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_extension_and_missing_file() {
        assert!(matches!(
            DatasetLoader::load("weekly.xlsx"),
            Err(LoaderError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
        assert!(matches!(
            DatasetLoader::load("/nonexistent/weekly_data.parquet"),
            Err(LoaderError::NotFound(_))
        ));
    }

    #[test]
    fn parses_common_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 8);
        assert_eq!(parse_date("2024-03-08"), expected);
        assert_eq!(parse_date("2024-03-08 00:00:00"), expected);
        assert_eq!(parse_date("03/08/2024"), expected);
        assert_eq!(parse_date("week ten"), None);
    }
}
