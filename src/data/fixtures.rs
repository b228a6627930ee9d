//! Shared test fixtures.

use crate::data::{Dataset, DatasetLoader};
use polars::prelude::*;

pub(crate) const WEEKS: [&str; 5] = [
    "2024-01-05",
    "2024-01-12",
    "2024-01-19",
    "2024-01-26",
    "2024-02-02",
];

/// Two tickers ("AAA" written as " aaa", "BBB" as "BBB "), five weeks each,
/// rows in reverse chronological order.
pub(crate) fn sample_frame() -> DataFrame {
    let mut dates = Vec::new();
    let mut tickers = Vec::new();
    let mut open = Vec::new();
    let mut high = Vec::new();
    let mut low = Vec::new();
    let mut close = Vec::new();
    let mut volume = Vec::new();
    let mut ema_high = Vec::new();
    let mut ema_low = Vec::new();

    for (i, week) in WEEKS.iter().enumerate().rev() {
        for (ticker, base) in [(" aaa", 10.0), ("BBB ", 100.0)] {
            let step = i as f64;
            dates.push(week.to_string());
            tickers.push(ticker.to_string());
            open.push(base + step);
            high.push(base + step + 1.0);
            low.push(base + step - 1.0);
            close.push(base + step + 0.5);
            volume.push(1000 * (i as i64 + 1));
            ema_high.push(base * 2.0 + step + 0.456);
            ema_low.push(base - 2.0 + step);
        }
    }

    df!(
        "Date" => dates,
        "Ticker" => tickers,
        "Open" => open,
        "High" => high,
        "Low" => low,
        "Close" => close,
        "Volume" => volume,
        "EMA_High" => ema_high,
        "EMA_Low" => ema_low
    )
    .unwrap()
}

pub(crate) fn sample_dataset() -> Dataset {
    DatasetLoader::from_frame(sample_frame(), None).unwrap()
}
