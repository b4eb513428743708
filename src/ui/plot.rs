use eframe::egui::{RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints};

use crate::color::{CountGradient, MASS_BARS, YEAR_LINE};
use crate::data::model::{DerivedViews, FilterOutcome, TopCountries, YearCounts};
use crate::state::AppState;
use crate::ui::bins::LogHistogram;

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render the three charts, or a placeholder when there is nothing to show.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    match &state.outcome {
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a file to explore meteorite landings  (File → Open…)");
            });
        }
        Some(FilterOutcome::Empty) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("No data for these filters.");
            });
        }
        Some(FilterOutcome::Views(views)) => {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    charts(ui, views, &state.histogram, state.controls.top_n)
                });
        }
    }
}

fn charts(ui: &mut Ui, views: &DerivedViews, histogram: &LogHistogram, top_n: usize) {
    ui.heading(top_countries_heading(top_n));
    top_countries_chart(ui, &views.top_countries);
    top_countries_table(ui, &views.top_countries);
    ui.separator();

    ui.heading("Discoveries per year");
    year_chart(ui, &views.year_counts);
    ui.separator();

    ui.heading("Mass distribution (log scale)");
    mass_histogram(ui, histogram);
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

/// Horizontal bars, largest count at the top.
fn top_countries_chart(ui: &mut Ui, top: &TopCountries) {
    let gradient = CountGradient::new(top.iter().map(|c| c.count));

    // Bottom-up order: the last bar drawn sits highest on the y axis.
    let names: Vec<String> = top.iter().rev().map(|c| c.country.clone()).collect();
    let bars: Vec<Bar> = top
        .iter()
        .rev()
        .enumerate()
        .map(|(i, c)| {
            Bar::new(i as f64, c.count as f64)
                .name(&c.country)
                .fill(gradient.color_for(c.count))
                .width(0.7)
        })
        .collect();

    Plot::new("top_countries")
        .height(CHART_HEIGHT)
        .x_axis_label("Count")
        .y_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            names.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().name("Meteorites"));
        });
}

fn top_countries_table(ui: &mut Ui, top: &TopCountries) {
    ui.push_id("top_countries_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(40.0))
            .column(Column::auto().at_least(160.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("#");
                });
                header.col(|ui| {
                    ui.strong("Country");
                });
                header.col(|ui| {
                    ui.strong("Count");
                });
            })
            .body(|mut body| {
                for (rank, c) in top.iter().enumerate() {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(format!("{}", rank + 1));
                        });
                        row.col(|ui| {
                            ui.label(&c.country);
                        });
                        row.col(|ui| {
                            ui.label(c.count.to_string());
                        });
                    });
                }
            });
    });
}

/// Chronological line; `YearCounts` is already ordered by year.
fn year_chart(ui: &mut Ui, years: &YearCounts) {
    let points: PlotPoints = years
        .iter()
        .map(|(&year, &count)| [year as f64, count as f64])
        .collect();

    Plot::new("year_counts")
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Discoveries")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).name("Discoveries").color(YEAR_LINE).width(2.0));
        });
}

/// Histogram over log10(mass); tick labels show the mass itself.
fn mass_histogram(ui: &mut Ui, histogram: &LogHistogram) {
    let bars: Vec<Bar> = histogram
        .bins
        .iter()
        .map(|b| {
            Bar::new(b.center(), b.count as f64)
                .width(b.width())
                .name(format!("{} – {}", mass_label(b.lo), mass_label(b.hi)))
                .fill(MASS_BARS)
        })
        .collect();

    Plot::new("mass_histogram")
        .height(CHART_HEIGHT)
        .x_axis_label("Mass")
        .y_axis_label("Frequency")
        .x_axis_formatter(|mark, _range| mass_label(mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(MASS_BARS).name("Meteorites"));
        });

    if histogram.non_positive > 0 {
        ui.label(
            RichText::new(format!(
                "{} meteorites with a non-positive mass are not shown on the log axis",
                histogram.non_positive
            ))
            .weak(),
        );
    }
}

/// Titled after the requested N, even when fewer countries match.
fn top_countries_heading(top_n: usize) -> String {
    format!("Top {top_n} countries")
}

/// Format a log10(grams) axis position as a readable mass.
fn mass_label(log10_grams: f64) -> String {
    let label = if log10_grams >= 6.0 {
        format!("{:.3} t", 10f64.powf(log10_grams - 6.0))
    } else if log10_grams >= 3.0 {
        format!("{:.3} kg", 10f64.powf(log10_grams - 3.0))
    } else {
        format!("{:.3} g", 10f64.powf(log10_grams))
    };
    label.replace(".000", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mass_labels_pick_a_unit() {
        assert_eq!(mass_label(0.0), "1 g");
        assert_eq!(mass_label(2.0), "100 g");
        assert_eq!(mass_label(3.0), "1 kg");
        assert_eq!(mass_label(4.5), "31.623 kg");
        assert_eq!(mass_label(7.0), "10 t");
    }

    #[test]
    fn heading_uses_requested_count() {
        assert_eq!(top_countries_heading(10), "Top 10 countries");
    }
}
