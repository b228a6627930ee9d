//! View module - selection snapshot, render controller and CSV export

mod controller;
mod export;
mod selection;

pub use controller::{render, Curve, Rgb, ViewResult, NO_DATA_MESSAGE};
pub use export::ExportPayload;
pub use selection::{ExportMode, IndexRange, Selection};
