//! Control Panel Widget
//! Left side panel with the ticker, field, week-range and download controls.

use crate::charts::ACCENT;
use crate::data::{Dataset, Field};
use crate::view::{IndexRange, Selection};
use egui::{Color32, ComboBox, RichText};
use std::ops::RangeInclusive;

/// Left side control panel. Holds the widget state the view is rendered from.
pub struct ControlPanel {
    tickers: Vec<String>,
    date_labels: Vec<String>,
    pub ticker: String,
    /// Checked fields, in the order they were checked.
    pub fields: Vec<Field>,
    pub range: IndexRange,
    pub download_clicks: u64,
}

impl ControlPanel {
    pub fn new(dataset: &Dataset) -> Self {
        let initial = Selection::initial(dataset);
        Self {
            tickers: dataset.tickers().to_vec(),
            date_labels: dataset.date_labels().to_vec(),
            ticker: initial
                .as_ref()
                .map(|s| s.ticker.clone())
                .unwrap_or_default(),
            fields: initial
                .as_ref()
                .map(|s| s.fields.clone())
                .unwrap_or_default(),
            range: initial
                .map(|s| s.range)
                .unwrap_or(IndexRange::new(0, 0)),
            download_clicks: 0,
        }
    }

    /// Snapshot of the current widget state.
    pub fn selection(&self, export_requested: bool) -> Selection {
        let selection = Selection::new(self.ticker.clone(), self.fields.clone(), self.range);
        if export_requested {
            selection.with_export()
        } else {
            selection
        }
    }

    /// Check or uncheck a field, keeping selection order.
    pub fn set_field(&mut self, field: Field, checked: bool) {
        let present = self.fields.contains(&field);
        if checked && !present {
            self.fields.push(field);
        } else if !checked && present {
            self.fields.retain(|f| *f != field);
        }
    }

    /// Keep the two slider handles from crossing; the moved handle yields.
    pub fn clamp_range(&mut self, start_moved: bool) {
        if self.range.start > self.range.end {
            if start_moved {
                self.range.start = self.range.end;
            } else {
                self.range.end = self.range.start;
            }
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // ===== Ticker Section =====
        ui.label(RichText::new("Ticker").size(14.0).strong());
        ui.add_space(5.0);
        ComboBox::from_id_salt("ticker")
            .width(200.0)
            .selected_text(&self.ticker)
            .show_ui(ui, |ui| {
                for ticker in &self.tickers {
                    if ui
                        .selectable_label(self.ticker == *ticker, ticker)
                        .clicked()
                        && self.ticker != *ticker
                    {
                        self.ticker = ticker.clone();
                        action = ControlPanelAction::SelectionChanged;
                    }
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Field Section =====
        ui.label(RichText::new("Fields").size(14.0).strong());
        ui.add_space(5.0);
        for field in Field::ALL {
            let mut checked = self.fields.contains(&field);
            if ui.checkbox(&mut checked, field.column()).changed() {
                self.set_field(field, checked);
                action = ControlPanelAction::SelectionChanged;
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Week Range Section =====
        ui.label(
            RichText::new("Select Week Range:")
                .size(14.0)
                .strong()
                .color(ACCENT),
        );
        ui.add_space(5.0);

        if self.date_labels.is_empty() {
            ui.label(RichText::new("No weeks loaded").color(Color32::GRAY));
        } else {
            let last = self.date_labels.len() - 1;
            let labels = &self.date_labels;
            let label_for = |v: f64, _: RangeInclusive<usize>| {
                labels.get(v as usize).cloned().unwrap_or_default()
            };

            let start = ui.add(
                egui::Slider::new(&mut self.range.start, 0..=last)
                    .text("From")
                    .custom_formatter(label_for),
            );
            let end = ui.add(
                egui::Slider::new(&mut self.range.end, 0..=last)
                    .text("To")
                    .custom_formatter(label_for),
            );

            if start.changed() || end.changed() {
                self.clamp_range(start.changed());
            }
            // Re-render once the handle is released, not on every drag frame.
            if range_settled(start.changed(), start.dragged(), start.drag_stopped())
                || range_settled(end.changed(), end.dragged(), end.drag_stopped())
            {
                action = ControlPanelAction::SelectionChanged;
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("Download Data").size(14.0))
                .min_size(egui::vec2(150.0, 30.0));
            if ui.add(button).clicked() {
                self.download_clicks += 1;
                action = ControlPanelAction::Download;
            }
        });

        action
    }
}

/// A slider has a new resting value: released after a drag, or moved
/// without dragging (keyboard or click on the track).
fn range_settled(changed: bool, dragged: bool, drag_stopped: bool) -> bool {
    drag_stopped || (changed && !dragged)
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectionChanged,
    Download,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::sample_dataset;

    #[test]
    fn starts_from_initial_selection() {
        let panel = ControlPanel::new(&sample_dataset());
        let selection = panel.selection(false);
        assert_eq!(selection.ticker, "AAA");
        assert_eq!(selection.fields, [Field::Close]);
        assert_eq!(selection.range, IndexRange::new(0, 4));
        assert!(panel.selection(true).export_requested);
    }

    #[test]
    fn fields_keep_check_order() {
        let mut panel = ControlPanel::new(&sample_dataset());
        panel.set_field(Field::Volume, true);
        panel.set_field(Field::Open, true);
        panel.set_field(Field::Close, false);
        panel.set_field(Field::Close, true);
        panel.set_field(Field::Volume, true);
        assert_eq!(panel.fields, [Field::Volume, Field::Open, Field::Close]);
    }

    #[test]
    fn range_settles_only_when_not_dragging() {
        // mid-drag frames
        assert!(!range_settled(true, true, false));
        assert!(!range_settled(false, true, false));
        // release
        assert!(range_settled(false, false, true));
        // keyboard / track click
        assert!(range_settled(true, false, false));
        assert!(!range_settled(false, false, false));
    }

    #[test]
    fn slider_handles_do_not_cross() {
        let mut panel = ControlPanel::new(&sample_dataset());
        panel.range = IndexRange::new(3, 1);
        panel.clamp_range(true);
        assert_eq!(panel.range, IndexRange::new(1, 1));

        panel.range = IndexRange::new(3, 1);
        panel.clamp_range(false);
        assert_eq!(panel.range, IndexRange::new(3, 3));
    }
}
