//! Weekly Trends Main Application
//! Main window with control panel and chart viewer. Every widget change
//! re-renders the view from the shared dataset.

use crate::charts::ACCENT;
use crate::data::Dataset;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::view::{render, ExportMode, ExportPayload};
use egui::{RichText, SidePanel};
use std::sync::Arc;
use tracing::{info, warn};

/// Main application window.
pub struct WeeklyTrendsApp {
    dataset: Arc<Dataset>,
    export_mode: ExportMode,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl WeeklyTrendsApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        dataset: Arc<Dataset>,
        export_mode: ExportMode,
    ) -> Self {
        let mut app = Self {
            control_panel: ControlPanel::new(&dataset),
            chart_viewer: ChartViewer::new(),
            dataset,
            export_mode,
        };
        app.refresh(false);
        app
    }

    /// Render the current selection and hand any export to a save dialog.
    fn refresh(&mut self, clicked_now: bool) {
        let export_requested = self
            .export_mode
            .export_requested(self.control_panel.download_clicks, clicked_now);
        let selection = self.control_panel.selection(export_requested);

        match render(&self.dataset, &selection) {
            Ok(mut view) => {
                let payload = view.export.take();
                self.chart_viewer.set_view(view);
                if let Some(payload) = payload {
                    self.handle_export(&payload);
                } else if clicked_now {
                    self.chart_viewer
                        .set_notice("Nothing to download for this range".to_string());
                }
            }
            Err(e) => {
                warn!(error = %e, ticker = %selection.ticker, "render failed");
                self.chart_viewer.set_error(format!("Error: {}", e));
            }
        }
    }

    /// Ask where to save the CSV, pre-filled with `<ticker>_weekly.csv`.
    fn handle_export(&mut self, payload: &ExportPayload) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&payload.filename)
            .save_file()
        else {
            info!(file = %payload.filename, "export cancelled");
            return;
        };

        match payload.save_as(&path) {
            Ok(()) => self.chart_viewer.set_notice(format!(
                "Saved {} rows to {}",
                payload.rows,
                path.display()
            )),
            Err(e) => {
                warn!(error = %e, path = %path.display(), "export failed");
                self.chart_viewer.set_notice(format!("Export error: {}", e));
            }
        }
    }
}

impl eframe::App for WeeklyTrendsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::SelectionChanged => self.refresh(false),
                        ControlPanelAction::Download => self.refresh(true),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - header and chart
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(
                RichText::new("Weekly Stock Trends")
                    .size(36.0)
                    .strong()
                    .color(ACCENT),
            );
            ui.label(RichText::new("1-Week Interval • Last 2 Years").size(14.0));
            if let Some(source) = self.dataset.source() {
                ui.label(
                    RichText::new(format!("Source: {}", source.display()))
                        .size(11.0)
                        .color(egui::Color32::GRAY),
                );
            }
            ui.add_space(15.0);
            self.chart_viewer.show(ui);
        });
    }
}
