use std::fmt;

use crate::data::aggregate::{
    format_revenue, order_count_by_state, revenue_by_category, Summary,
};
use crate::data::filter::OrderView;
use crate::data::histogram::Histogram;

// ---------------------------------------------------------------------------
// Report: everything the dashboard shows for one date window
// ---------------------------------------------------------------------------

/// Metrics and chart data computed from a filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub summary: Summary,
    pub revenue_by_category: Vec<(String, f64)>,
    pub orders_by_state: Vec<(String, usize)>,
    pub price: Histogram,
    pub freight: Histogram,
    pub delivery_time: Histogram,
}

impl Report {
    pub fn compute(view: &OrderView<'_>, bins: usize) -> Self {
        log::debug!("Recomputing report over {} rows", view.len());

        let prices: Vec<f64> = view.iter().filter_map(|o| o.price).collect();
        let freights: Vec<f64> = view.iter().filter_map(|o| o.freight_value).collect();
        let delivery: Vec<f64> = view
            .iter()
            .filter_map(|o| o.delivery_time)
            .map(|d| d as f64)
            .collect();

        Report {
            summary: Summary::compute(view),
            revenue_by_category: revenue_by_category(view),
            orders_by_state: order_count_by_state(view),
            price: Histogram::from_values(&prices, bins),
            freight: Histogram::from_values(&freights, bins),
            delivery_time: Histogram::from_values(&delivery, bins),
        }
    }
}

fn write_histogram(f: &mut fmt::Formatter<'_>, title: &str, hist: &Histogram) -> fmt::Result {
    writeln!(f, "\n{title}")?;
    if hist.is_empty() {
        return writeln!(f, "  no data");
    }
    for bin in &hist.bins {
        writeln!(f, "  [{:>10.2}, {:>10.2})  {}", bin.start, bin.end, bin.count)?;
    }
    Ok(())
}

/// Plain-text rendering used by `--summary`.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Basic Metrics")?;
        writeln!(f, "  Total Orders: {}", self.summary.order_count)?;
        writeln!(f, "  Total Revenue: {}", self.summary.revenue_label())?;
        writeln!(
            f,
            "  Average Delivery Time (days): {}",
            self.summary.delivery_label()
        )?;

        writeln!(f, "\nBest Performing Product Categories")?;
        if self.revenue_by_category.is_empty() {
            writeln!(f, "  no data")?;
        }
        for (category, revenue) in &self.revenue_by_category {
            writeln!(f, "  {category:<40} {:>14}", format_revenue(*revenue))?;
        }

        write_histogram(f, "Price Distribution", &self.price)?;
        write_histogram(f, "Freight Value Distribution", &self.freight)?;
        write_histogram(f, "Delivery Time Analysis", &self.delivery_time)?;

        writeln!(f, "\nCustomer State Analysis")?;
        if self.orders_by_state.is_empty() {
            writeln!(f, "  no data")?;
        }
        for (state, count) in &self.orders_by_state {
            writeln!(f, "  {state:<4} {count:>8}")?;
        }
        Ok(())
    }
}
