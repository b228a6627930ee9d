//! Widget Selection
//! Snapshot of the user's current choices, handed to `render` on every change.

use crate::data::{Dataset, Field};
use serde::Serialize;

/// Inclusive pair of indexes into the dataset's date labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexRange {
    pub start: usize,
    pub end: usize,
}

impl IndexRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Whole range over `len` labels, `None` when there are none.
    pub fn full(len: usize) -> Option<Self> {
        len.checked_sub(1).map(|last| Self::new(0, last))
    }
}

/// How a Download click maps onto export requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportMode {
    /// Only the render triggered by the click exports.
    #[default]
    OneShot,
    /// Once clicked, every later render exports the current filter too.
    Sticky,
}

impl ExportMode {
    pub fn export_requested(self, click_count: u64, clicked_now: bool) -> bool {
        match self {
            ExportMode::OneShot => clicked_now,
            ExportMode::Sticky => click_count > 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub ticker: String,
    /// Fields in the order the user picked them.
    pub fields: Vec<Field>,
    pub range: IndexRange,
    pub export_requested: bool,
}

impl Selection {
    pub fn new(ticker: impl Into<String>, fields: Vec<Field>, range: IndexRange) -> Self {
        Self {
            ticker: ticker.into(),
            fields,
            range,
            export_requested: false,
        }
    }

    /// Dashboard start-up state: first ticker, Close only, every week.
    pub fn initial(dataset: &Dataset) -> Option<Self> {
        let ticker = dataset.tickers().first()?;
        let range = IndexRange::full(dataset.date_labels().len())?;
        Some(Self::new(ticker.clone(), vec![Field::Close], range))
    }

    pub fn with_export(mut self) -> Self {
        self.export_requested = true;
        self
    }

    /// Derive the export flag from an accumulated click counter.
    pub fn with_click_count(mut self, clicks: u64) -> Self {
        self.export_requested = ExportMode::Sticky.export_requested(clicks, false);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::sample_dataset;

    #[test]
    fn initial_selection_covers_everything() {
        let selection = Selection::initial(&sample_dataset()).unwrap();
        assert_eq!(selection.ticker, "AAA");
        assert_eq!(selection.fields, [Field::Close]);
        assert_eq!(selection.range, IndexRange::new(0, 4));
        assert!(!selection.export_requested);
    }

    #[test]
    fn full_range_of_nothing_is_none() {
        assert_eq!(IndexRange::full(0), None);
        assert_eq!(IndexRange::full(1), Some(IndexRange::new(0, 0)));
    }

    #[test]
    fn one_shot_exports_only_on_click() {
        assert!(ExportMode::OneShot.export_requested(1, true));
        assert!(!ExportMode::OneShot.export_requested(3, false));
    }

    #[test]
    fn sticky_exports_after_first_click() {
        assert!(!ExportMode::Sticky.export_requested(0, false));
        assert!(ExportMode::Sticky.export_requested(2, false));

        let base = Selection::new("AAA", vec![], IndexRange::new(0, 0));
        assert!(!base.clone().with_click_count(0).export_requested);
        assert!(base.with_click_count(1).export_requested);
    }
}
