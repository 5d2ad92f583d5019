use std::path::PathBuf;

use chrono::NaiveDate;

use crate::data::cache::DatasetCache;
use crate::data::filter::{filter, DateRange, OrderView};
use crate::report::Report;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Session cache for the opened file (None until a file is opened).
    pub cache: Option<DatasetCache>,

    /// Observed purchase-date bounds of the loaded table.
    pub bounds: Option<DateRange>,

    /// Currently selected window; always inside `bounds`.
    pub range: Option<DateRange>,

    /// Indices of orders inside the current window (cached).
    pub visible_indices: Vec<usize>,

    /// Metrics and chart data for the current window.
    pub report: Option<Report>,

    /// Bin count for the distribution charts.
    pub bins: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(bins: usize) -> Self {
        Self {
            cache: None,
            bounds: None,
            range: None,
            visible_indices: Vec::new(),
            report: None,
            bins,
            status_message: None,
        }
    }

    /// Start a new session on `path`: load it once, reset the window to the
    /// full observed range and compute the report.
    pub fn open(&mut self, path: PathBuf) {
        let cache = DatasetCache::new(path);
        self.bounds = None;
        self.range = None;
        self.visible_indices.clear();
        self.report = None;

        match cache.get() {
            Ok(table) => {
                self.bounds = table.purchase_date_bounds();
                self.range = self.bounds;
                self.status_message = None;
                if self.bounds.is_none() {
                    self.status_message = Some("No order has a purchase timestamp".to_string());
                    self.report = Some(Report::compute(&OrderView::empty(table), self.bins));
                }
            }
            Err(e) => {
                self.status_message = Some(e.to_string());
            }
        }

        self.cache = Some(cache);
        self.refilter();
    }

    /// Whether the opened file failed to load.
    pub fn is_unavailable(&self) -> bool {
        self.cache.as_ref().is_some_and(|c| !c.is_loaded())
    }

    /// Recompute `visible_indices` and the report after a range change.
    pub fn refilter(&mut self) {
        let (Some(cache), Some(range)) = (&self.cache, self.range) else {
            return;
        };
        let Some(table) = cache.loaded() else {
            return;
        };
        let view = filter(table, range);
        self.report = Some(Report::compute(&view, self.bins));
        self.visible_indices = view.into_indices();
    }

    /// Apply a new window, clamped into the observed bounds.
    pub fn set_range(&mut self, range: DateRange) {
        let Some(bounds) = self.bounds else {
            return;
        };
        let range = range.clamp_to(bounds);
        if self.range != Some(range) {
            self.range = Some(range);
            self.refilter();
        }
    }

    pub fn set_start(&mut self, start: NaiveDate) {
        if let Some(range) = self.range {
            self.set_range(range.with_start(start));
        }
    }

    pub fn set_end(&mut self, end: NaiveDate) {
        if let Some(range) = self.range {
            self.set_range(range.with_end(end));
        }
    }

    /// Reset the window to the full observed range.
    pub fn reset_range(&mut self) {
        if let Some(bounds) = self.bounds {
            self.set_range(bounds);
        }
    }

    /// Number of rows in the loaded table.
    pub fn total_rows(&self) -> usize {
        self.cache
            .as_ref()
            .and_then(DatasetCache::loaded)
            .map_or(0, |t| t.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
order_id,product_category_name_english,order_purchase_timestamp,order_estimated_delivery_date,price,freight_value,customer_state
a1,toys,2017-01-05 10:00:00,2017-01-20 00:00:00,50.0,8.5,SP
a2,garden,2017-01-10 15:00:00,2017-01-12 00:00:00,30.0,4.0,RJ
";

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn opened() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        std::fs::write(&path, CSV).unwrap();
        let mut state = AppState::new(20);
        state.open(path);
        (dir, state)
    }

    #[test]
    fn open_selects_full_range() {
        let (_dir, state) = opened();
        assert_eq!(
            state.range,
            Some(DateRange::new(date("2017-01-05"), date("2017-01-10")))
        );
        assert_eq!(state.visible_indices, vec![0, 1]);
        let report = state.report.as_ref().unwrap();
        assert_eq!(report.summary.total_revenue, 80.0);
        assert!(!state.is_unavailable());
    }

    #[test]
    fn narrowing_the_window_recomputes() {
        let (_dir, mut state) = opened();
        state.set_end(date("2017-01-07"));
        assert_eq!(state.visible_indices, vec![0]);
        let report = state.report.as_ref().unwrap();
        assert_eq!(report.summary.order_count, 1);
        assert_eq!(report.summary.total_revenue, 50.0);

        state.reset_range();
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn picker_values_stay_in_bounds() {
        let (_dir, mut state) = opened();
        state.set_start(date("2016-01-01"));
        state.set_end(date("2020-01-01"));
        assert_eq!(state.range, state.bounds);

        state.set_start(date("2017-01-09"));
        state.set_end(date("2017-01-06"));
        assert_eq!(
            state.range,
            Some(DateRange::new(date("2017-01-06"), date("2017-01-06")))
        );
        let report = state.report.as_ref().unwrap();
        assert_eq!(report.summary.order_count, 0);
        assert_eq!(report.summary.mean_delivery_time, None);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(20);
        state.open(dir.path().join("missing.csv"));
        assert!(state.is_unavailable());
        assert!(state.report.is_none());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Data unavailable")));
    }
}
