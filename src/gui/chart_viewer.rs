//! Chart Viewer Widget
//! Central panel showing the EMA status line and the weekly line chart.

use crate::charts::{ChartPlotter, ACCENT};
use crate::view::{ViewResult, NO_DATA_MESSAGE};
use egui::{Color32, RichText};

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// Displays the most recent render result.
#[derive(Default)]
pub struct ChartViewer {
    view: Option<ViewResult>,
    error: Option<String>,
    notice: Option<String>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// New render result; any notice from the previous render is dropped.
    pub fn set_view(&mut self, view: ViewResult) {
        self.view = Some(view);
        self.error = None;
        self.notice = None;
    }

    /// Render failed; keep the error on screen instead of a stale chart.
    pub fn set_error(&mut self, error: String) {
        self.view = None;
        self.error = Some(error);
        self.notice = None;
    }

    /// One-line message under the status, e.g. where an export was saved.
    pub fn set_notice(&mut self, notice: String) {
        self.notice = Some(notice);
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        if let Some(error) = &self.error {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new(error).size(20.0).color(ERROR_COLOR));
            });
            return;
        }

        let Some(view) = &self.view else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        let status_color = if view.status == NO_DATA_MESSAGE {
            Color32::GRAY
        } else {
            ACCENT
        };
        ui.label(RichText::new(&view.status).size(20.0).color(status_color));

        if let Some(notice) = &self.notice {
            ui.label(RichText::new(notice).size(12.0).color(Color32::GRAY));
        }

        ui.add_space(10.0);
        ChartPlotter::draw_line_chart(ui, view);
    }
}
