use std::ops::RangeInclusive;

use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints};

use crate::chart::{ChartSpec, SeriesKind};

// ---------------------------------------------------------------------------
// ChartSpec renderer
// ---------------------------------------------------------------------------

/// Render a [`ChartSpec`] as an egui_plot chart.
///
/// Bar series of the same spec are laid out side by side within each
/// category slot. Percent series have no axis of their own in egui_plot,
/// so they are scaled onto the bar value range; their hover labels keep
/// the real percent text.
pub fn chart(ui: &mut Ui, id: &str, height: f32, spec: &ChartSpec) {
    if spec.is_empty() {
        ui.label("No data for the current selection.");
        return;
    }

    let n_bar_series = spec
        .series
        .iter()
        .filter(|s| s.kind == SeriesKind::Bar)
        .count()
        .max(1);
    let group_width = 0.8;
    let bar_width = group_width / n_bar_series as f64;

    let max_bar_value = spec
        .series
        .iter()
        .filter(|s| !s.percent)
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0_f64, f64::max);

    let labels = spec.x_labels.clone();
    let x_formatter = move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let rounded = mark.value.round();
        if (mark.value - rounded).abs() > 1e-3 || rounded < 0.0 {
            return String::new();
        }
        labels.get(rounded as usize).cloned().unwrap_or_default()
    };

    Plot::new(id.to_string())
        .height(height)
        .legend(Legend::default())
        .x_axis_formatter(x_formatter)
        .y_axis_label(spec.value_axis.clone())
        .show(ui, |plot_ui| {
            let mut bar_slot = 0usize;
            for series in &spec.series {
                match series.kind {
                    SeriesKind::Bar => {
                        let offset =
                            (bar_slot as f64 + 0.5) * bar_width - group_width / 2.0;
                        let bars: Vec<Bar> = series
                            .values
                            .iter()
                            .enumerate()
                            .map(|(i, &v)| {
                                Bar::new(i as f64 + offset, v)
                                    .width(bar_width * 0.9)
                                    .fill(series.color)
                                    .name(&series.labels[i])
                            })
                            .collect();
                        plot_ui.bar_chart(
                            BarChart::new(bars).name(&series.name).color(series.color),
                        );
                        bar_slot += 1;
                    }
                    SeriesKind::Line => {
                        let scale = if series.percent && max_bar_value > 0.0 {
                            max_bar_value / 100.0
                        } else {
                            1.0
                        };
                        let points: PlotPoints = series
                            .values
                            .iter()
                            .enumerate()
                            .map(|(i, &v)| [i as f64, v * scale])
                            .collect();
                        plot_ui.line(
                            Line::new(points)
                                .name(&series.name)
                                .color(series.color)
                                .width(2.0),
                        );
                    }
                }
            }
        });
}
