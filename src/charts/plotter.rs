//! Chart Plotter Module
//! Draws the weekly line chart for a `ViewResult` using egui_plot.

use crate::data::{date_to_days, days_to_date, DATE_FORMAT};
use crate::view::{Curve, Rgb, ViewResult};
use egui::{Color32, RichText};
use egui_plot::{Corner, Legend, Line, Plot, PlotPoints};

/// Chart title colour, shared with the status line.
pub const ACCENT: Color32 = Color32::from_rgb(0x0f, 0x54, 0x99);

const CHART_HEIGHT: f32 = 550.0;
const LINE_WIDTH: f32 = 2.0;

/// Creates the interactive weekly chart.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color(rgb: Rgb) -> Color32 {
        Color32::from_rgb(rgb.0, rgb.1, rgb.2)
    }

    /// Plot x coordinate of a week: days since 1970-01-01.
    pub fn curve_points(curve: &Curve) -> PlotPoints {
        curve
            .points
            .iter()
            .map(|(date, value)| [f64::from(date_to_days(*date)), *value])
            .collect()
    }

    /// Axis label for an x coordinate.
    pub fn date_label(x: f64) -> String {
        if !x.is_finite() || x.abs() > f64::from(i32::MAX) {
            return String::new();
        }
        days_to_date(x.round() as i32)
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// Draw the chart: one line per selected field, x axis in dates.
    pub fn draw_line_chart(ui: &mut egui::Ui, view: &ViewResult) {
        ui.label(RichText::new(&view.title).size(20.0).color(ACCENT));

        Plot::new("weekly_chart")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .legend(Legend::default().position(Corner::LeftTop))
            .x_axis_label("Date")
            .y_axis_label("Value")
            .x_axis_formatter(|mark, _range| Self::date_label(mark.value))
            .label_formatter(|name, point| {
                let date = Self::date_label(point.x);
                if name.is_empty() {
                    format!("Date: {}\nValue: {:.2}", date, point.y)
                } else {
                    format!("{}\nDate: {}\nValue: {:.2}", name, date, point.y)
                }
            })
            .show(ui, |plot_ui| {
                for curve in &view.curves {
                    plot_ui.line(
                        Line::new(Self::curve_points(curve))
                            .name(curve.field.to_string())
                            .color(Self::color(curve.color))
                            .width(LINE_WIDTH),
                    );
                }
            });
    }
}
