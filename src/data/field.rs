//! Plottable Fields
//! The fixed set of numeric columns a user can put on the chart.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown field '{0}' (expected one of Open, High, Low, Close, Volume, EMA_High, EMA_Low)")]
pub struct FieldParseError(pub String);

/// A numeric column of the weekly table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Field {
    Open,
    High,
    Low,
    Close,
    Volume,
    #[serde(rename = "EMA_High")]
    EmaHigh,
    #[serde(rename = "EMA_Low")]
    EmaLow,
}

impl Field {
    /// Display order of the field checklist.
    pub const ALL: [Field; 7] = [
        Field::Open,
        Field::High,
        Field::Low,
        Field::Close,
        Field::Volume,
        Field::EmaHigh,
        Field::EmaLow,
    ];

    /// Column name in the source table.
    pub fn column(self) -> &'static str {
        match self {
            Field::Open => "Open",
            Field::High => "High",
            Field::Low => "Low",
            Field::Close => "Close",
            Field::Volume => "Volume",
            Field::EmaHigh => "EMA_High",
            Field::EmaLow => "EMA_Low",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Field {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Field::ALL
            .into_iter()
            .find(|f| f.column().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FieldParseError(wanted.to_string()))
    }
}
