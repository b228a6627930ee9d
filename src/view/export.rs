//! CSV Export
//! Serializes the filtered weekly rows into a downloadable CSV payload.

use polars::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to serialize rows: {0}")]
    Polars(#[from] PolarsError),
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// CSV content of a filtered slice and the file name it should be saved as.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportPayload {
    pub filename: String,
    pub rows: usize,
    #[serde(skip)]
    pub content: String,
}

impl ExportPayload {
    /// Serialize every column of `rows`, header first.
    pub fn from_rows(ticker: &str, rows: &DataFrame) -> Result<Self, ExportError> {
        let mut frame = rows.clone();
        let mut buf: Vec<u8> = Vec::new();
        CsvWriter::new(&mut buf)
            .include_header(true)
            .finish(&mut frame)?;

        Ok(Self {
            filename: Self::filename_for(ticker),
            rows: frame.height(),
            content: String::from_utf8_lossy(&buf).into_owned(),
        })
    }

    pub fn filename_for(ticker: &str) -> String {
        format!("{ticker}_weekly.csv")
    }

    /// Write the payload under `dir` using its own file name.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        self.save_as(&path)?;
        Ok(path)
    }

    pub fn save_as(&self, path: &Path) -> Result<(), ExportError> {
        fs::write(path, &self.content)?;
        info!(path = %path.display(), rows = self.rows, "exported weekly rows");
        Ok(())
    }
}
