use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints};

use crate::color::{Ramp, DELIVERY_COLOR, FREIGHT_COLOR, PRICE_COLOR};
use crate::data::aggregate::Summary;
use crate::data::histogram::Histogram;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render metrics and charts for the current window in the central panel.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    if state.is_unavailable() {
        let msg = state
            .status_message
            .clone()
            .unwrap_or_else(|| "Data unavailable".to_string());
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(RichText::new(msg).color(Color32::RED));
        });
        return;
    }

    let report = match &state.report {
        Some(r) => r,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a file to view orders  (File → Open…)");
            });
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new("E-commerce Dashboard ✨").size(26.0));

            subheader(ui, "Basic Metrics");
            metrics_row(ui, &report.summary);

            subheader(ui, "Best Performing Product Categories");
            let categories: Vec<(String, f64)> = report.revenue_by_category.clone();
            let colors = Ramp::Viridis.colors(categories.len());
            category_bar_chart(
                ui,
                "category_revenue",
                categories,
                colors,
                "Product Category",
                "Total Revenue",
            );

            subheader(ui, "Price Distribution");
            histogram_chart(ui, "price_hist", &report.price, PRICE_COLOR, "Price");

            subheader(ui, "Freight Value Distribution");
            histogram_chart(ui, "freight_hist", &report.freight, FREIGHT_COLOR, "Freight Value");

            subheader(ui, "Delivery Time Analysis");
            histogram_chart(
                ui,
                "delivery_hist",
                &report.delivery_time,
                DELIVERY_COLOR,
                "Delivery Time (days)",
            );

            subheader(ui, "Customer State Analysis");
            let states: Vec<(String, f64)> = report
                .orders_by_state
                .iter()
                .map(|(state, count)| (state.clone(), *count as f64))
                .collect();
            let colors = Ramp::Magma.colors(states.len());
            category_bar_chart(
                ui,
                "state_orders",
                states,
                colors,
                "Customer State",
                "Number of Orders",
            );
        });
}

fn subheader(ui: &mut Ui, text: &str) {
    ui.add_space(12.0);
    ui.label(RichText::new(text).size(18.0).strong());
    ui.separator();
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

fn metrics_row(ui: &mut Ui, summary: &Summary) {
    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total Orders", summary.order_count.to_string());
        metric(&mut cols[1], "Total Revenue", summary.revenue_label());
        metric(
            &mut cols[2],
            "Average Delivery Time (days)",
            summary.delivery_label(),
        );
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.label(label);
    ui.label(RichText::new(value).size(28.0).strong());
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Axis formatter that labels integer positions with category names.
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let idx = mark.value.round();
        if idx < 0.0 || (mark.value - idx).abs() > 1e-6 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

fn static_plot(id: &str, x_label: &str, y_label: &str) -> Plot<'static> {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(x_label.to_string())
        .y_axis_label(y_label.to_string())
        .include_y(0.0)
        .allow_scroll(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
}

/// One bar per group, in the given order, labelled on the x axis.
fn category_bar_chart(
    ui: &mut Ui,
    id: &str,
    groups: Vec<(String, f64)>,
    colors: Vec<Color32>,
    x_label: &str,
    y_label: &str,
) {
    if groups.is_empty() {
        ui.label("No data in the selected range.");
        return;
    }

    let bars: Vec<Bar> = groups
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(i, ((name, value), color))| {
            Bar::new(i as f64, *value).width(0.8).name(name).fill(color)
        })
        .collect();
    let labels: Vec<String> = groups.into_iter().map(|(name, _)| name).collect();

    static_plot(id, x_label, y_label)
        .x_axis_formatter(category_axis(labels))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Count histogram with its density curve overlaid.
fn histogram_chart(ui: &mut Ui, id: &str, hist: &Histogram, color: Color32, x_label: &str) {
    if hist.is_empty() {
        ui.label("No data in the selected range.");
        return;
    }

    let bars: Vec<Bar> = hist
        .bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .fill(color.gamma_multiply(0.8))
        })
        .collect();

    static_plot(id, x_label, "Frequency").show(ui, |plot_ui| {
        plot_ui.bar_chart(BarChart::new(bars).name(x_label));
        if !hist.density.is_empty() {
            let curve = Line::new(PlotPoints::new(hist.density.clone()))
                .color(color)
                .width(2.0)
                .name("density");
            plot_ui.line(curve);
        }
    });
}
