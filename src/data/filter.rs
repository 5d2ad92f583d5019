use chrono::NaiveDate;

use super::model::{Order, OrderTable};

// ---------------------------------------------------------------------------
// Date range: inclusive window on purchase dates
// ---------------------------------------------------------------------------

/// Inclusive `[start, end]` window of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// Whether `date` lies in the window, both ends included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Clamp both ends into `bounds`, then pull `end` up to `start` if they crossed.
    pub fn clamp_to(self, bounds: DateRange) -> DateRange {
        let start = self.start.clamp(bounds.start, bounds.end);
        let end = self.end.clamp(bounds.start, bounds.end).max(start);
        DateRange { start, end }
    }

    /// Replace the start date, moving `end` along if it would precede it.
    pub fn with_start(self, start: NaiveDate) -> DateRange {
        DateRange {
            start,
            end: self.end.max(start),
        }
    }

    /// Replace the end date, moving `start` along if it would follow it.
    pub fn with_end(self, end: NaiveDate) -> DateRange {
        DateRange {
            start: self.start.min(end),
            end,
        }
    }
}

// ---------------------------------------------------------------------------
// OrderView: read-only subset of an OrderTable
// ---------------------------------------------------------------------------

/// Rows of a table selected by index. Never mutates the table.
#[derive(Debug, Clone)]
pub struct OrderView<'a> {
    table: &'a OrderTable,
    indices: Vec<usize>,
}

impl<'a> OrderView<'a> {
    /// View over every row of `table`.
    pub fn all(table: &'a OrderTable) -> Self {
        OrderView {
            table,
            indices: (0..table.len()).collect(),
        }
    }

    /// View over no rows.
    pub fn empty(table: &'a OrderTable) -> Self {
        OrderView {
            table,
            indices: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }

    /// Iterate over the selected rows in table order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Order> + '_ {
        let orders = self.table.orders();
        self.indices.iter().map(move |&i| &orders[i])
    }
}

/// Return indices of orders purchased within `range`.
/// Rows without a purchase timestamp never match.
pub fn filtered_indices(table: &OrderTable, range: DateRange) -> Vec<usize> {
    table
        .orders()
        .iter()
        .enumerate()
        .filter(|(_, order)| order.purchase_date().is_some_and(|d| range.contains(d)))
        .map(|(i, _)| i)
        .collect()
}

/// Select the orders purchased within `range`.
pub fn filter(table: &OrderTable, range: DateRange) -> OrderView<'_> {
    OrderView {
        table,
        indices: filtered_indices(table, range),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::parse_timestamp;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn order(purchased: &str, price: f64) -> Order {
        Order {
            purchased_at: parse_timestamp(purchased),
            price: Some(price),
            ..Default::default()
        }
    }

    fn sample_table() -> OrderTable {
        OrderTable::from_orders(vec![
            order("2017-01-05 10:00:00", 50.0),
            order("2017-01-10 23:59:59", 30.0),
            order("2017-01-07 00:00:00", 20.0),
            order("garbage", 10.0),
        ])
    }

    #[test]
    fn keeps_rows_inside_window() {
        let table = sample_table();
        let view = filter(&table, DateRange::new(date("2017-01-01"), date("2017-01-07")));
        assert_eq!(view.indices(), &[0, 2]);
        for o in view.iter() {
            let d = o.purchase_date().unwrap();
            assert!(date("2017-01-01") <= d && d <= date("2017-01-07"));
        }
    }

    #[test]
    fn end_date_includes_the_whole_day() {
        let table = sample_table();
        let view = filter(&table, DateRange::new(date("2017-01-10"), date("2017-01-10")));
        assert_eq!(view.indices(), &[1]);
    }

    #[test]
    fn full_range_returns_every_dated_row() {
        let table = sample_table();
        let bounds = table.purchase_date_bounds().unwrap();
        let view = filter(&table, bounds);
        assert_eq!(view.indices(), &[0, 1, 2]);
    }

    #[test]
    fn day_without_orders_is_empty() {
        let table = sample_table();
        let view = filter(&table, DateRange::new(date("2017-01-06"), date("2017-01-06")));
        assert!(view.is_empty());
    }

    #[test]
    fn inverted_range_is_empty() {
        let table = sample_table();
        let view = filter(&table, DateRange::new(date("2017-01-10"), date("2017-01-01")));
        assert!(view.is_empty());
    }

    #[test]
    fn filtering_leaves_table_untouched() {
        let table = sample_table();
        let before = table.orders().to_vec();
        let _ = filter(&table, DateRange::new(date("2017-01-06"), date("2017-01-08")));
        assert_eq!(table.orders(), before.as_slice());
    }

    #[test]
    fn clamp_keeps_range_inside_bounds() {
        let bounds = DateRange::new(date("2017-01-05"), date("2017-01-10"));
        let clamped = DateRange::new(date("2016-12-01"), date("2018-01-01")).clamp_to(bounds);
        assert_eq!(clamped, bounds);

        let crossed = DateRange::new(date("2017-01-09"), date("2017-01-06")).clamp_to(bounds);
        assert_eq!(crossed, DateRange::new(date("2017-01-09"), date("2017-01-09")));
    }

    #[test]
    fn moving_one_end_drags_the_other() {
        let range = DateRange::new(date("2017-01-05"), date("2017-01-07"));
        assert_eq!(
            range.with_start(date("2017-01-08")),
            DateRange::new(date("2017-01-08"), date("2017-01-08"))
        );
        assert_eq!(
            range.with_end(date("2017-01-01")),
            DateRange::new(date("2017-01-01"), date("2017-01-01"))
        );
    }
}
