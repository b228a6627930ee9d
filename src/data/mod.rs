//! Data module - weekly table loading and indexes

mod dataset;
mod field;
mod loader;

#[cfg(test)]
pub(crate) mod fixtures;

pub use dataset::{date_to_days, days_to_date, Dataset, DATE_COL, DATE_FORMAT, TICKER_COL};
pub(crate) use dataset::{column_dates, column_values};
pub use field::Field;
pub use loader::DatasetLoader;
