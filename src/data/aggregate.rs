use std::collections::{BTreeMap, HashSet};

use super::filter::OrderView;
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Scalar reductions
// ---------------------------------------------------------------------------

/// Number of unique order ids. Missing ids are not counted.
pub fn distinct_order_count(view: &OrderView<'_>) -> usize {
    view.iter()
        .filter_map(|o| o.order_id.as_deref())
        .collect::<HashSet<_>>()
        .len()
}

/// Sum of item prices, skipping missing prices. `0.0` for an empty view.
pub fn total_revenue(view: &OrderView<'_>) -> f64 {
    view.iter().filter_map(|o| o.price).sum()
}

/// Mean of the defined delivery times.
pub fn mean_delivery_time(view: &OrderView<'_>) -> Result<f64, DashboardError> {
    let (sum, n) = view
        .iter()
        .filter_map(|o| o.delivery_time)
        .fold((0i64, 0usize), |(sum, n), days| (sum + days, n + 1));
    if n == 0 {
        return Err(DashboardError::UndefinedAggregate {
            metric: "mean delivery time",
        });
    }
    Ok(sum as f64 / n as f64)
}

// ---------------------------------------------------------------------------
// Grouped reductions
// ---------------------------------------------------------------------------

/// Sort groups by value, largest first. Groups arrive in key order and the
/// sort is stable, so ties stay alphabetical.
fn sorted_desc<V: Copy + PartialOrd>(groups: BTreeMap<String, V>) -> Vec<(String, V)> {
    let mut out: Vec<(String, V)> = groups.into_iter().collect();
    out.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    out
}

/// Revenue per product category, highest first. Rows without a category are
/// left out; a category whose prices are all missing sums to `0.0`.
pub fn revenue_by_category(view: &OrderView<'_>) -> Vec<(String, f64)> {
    let mut groups: BTreeMap<String, f64> = BTreeMap::new();
    for order in view.iter() {
        if let Some(category) = &order.category {
            *groups.entry(category.clone()).or_default() += order.price.unwrap_or(0.0);
        }
    }
    sorted_desc(groups)
}

/// Row count per customer state, highest first. Rows without a state are left out.
pub fn order_count_by_state(view: &OrderView<'_>) -> Vec<(String, usize)> {
    let mut groups: BTreeMap<String, usize> = BTreeMap::new();
    for state in view.iter().filter_map(|o| o.customer_state.as_ref()) {
        *groups.entry(state.clone()).or_default() += 1;
    }
    sorted_desc(groups)
}

// ---------------------------------------------------------------------------
// Summary: the three headline metrics
// ---------------------------------------------------------------------------

/// Headline metrics for a view.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub order_count: usize,
    pub total_revenue: f64,
    /// `None` when no row in the view has a delivery time.
    pub mean_delivery_time: Option<f64>,
}

impl Summary {
    pub fn compute(view: &OrderView<'_>) -> Self {
        Summary {
            order_count: distinct_order_count(view),
            total_revenue: total_revenue(view),
            mean_delivery_time: mean_delivery_time(view).ok(),
        }
    }

    pub fn revenue_label(&self) -> String {
        format_revenue(self.total_revenue)
    }

    pub fn delivery_label(&self) -> String {
        format_days(self.mean_delivery_time)
    }
}

/// `$1234.57`
pub fn format_revenue(value: f64) -> String {
    format!("${value:.2}")
}

/// Mean day count with one decimal, or an explicit "no data" marker.
pub fn format_days(value: Option<f64>) -> String {
    match value {
        Some(days) => format!("{days:.1}"),
        None => "no data".to_string(),
    }
}
