use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use super::filter::DateRange;

// ---------------------------------------------------------------------------
// Column names of the source file
// ---------------------------------------------------------------------------

pub const ORDER_ID: &str = "order_id";
pub const CATEGORY: &str = "product_category_name_english";
pub const PURCHASE_TIMESTAMP: &str = "order_purchase_timestamp";
pub const ESTIMATED_DELIVERY: &str = "order_estimated_delivery_date";
pub const PRICE: &str = "price";
pub const FREIGHT_VALUE: &str = "freight_value";
pub const CUSTOMER_STATE: &str = "customer_state";

/// Columns every orders file must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    ORDER_ID,
    CATEGORY,
    PURCHASE_TIMESTAMP,
    ESTIMATED_DELIVERY,
    PRICE,
    FREIGHT_VALUE,
    CUSTOMER_STATE,
];

// ---------------------------------------------------------------------------
// Timestamp parsing
// ---------------------------------------------------------------------------

const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a timestamp cell. Date-only values land on midnight.
/// Returns `None` for empty or unrecognised text.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ts);
        }
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.naive_utc());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Whole days from `purchased_at` to `estimated`, rounded towards negative
/// infinity. An estimate before the purchase gives a negative count.
pub fn delivery_days(purchased_at: NaiveDateTime, estimated: NaiveDateTime) -> i64 {
    let delta = estimated.signed_duration_since(purchased_at);
    let days = delta.num_days();
    if delta < TimeDelta::days(days) {
        days - 1
    } else {
        days
    }
}

// ---------------------------------------------------------------------------
// Order – one row of the source table
// ---------------------------------------------------------------------------

/// A single order line item. Any cell may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
    pub order_id: Option<String>,
    pub category: Option<String>,
    pub purchased_at: Option<NaiveDateTime>,
    pub estimated_delivery: Option<NaiveDateTime>,
    pub price: Option<f64>,
    pub freight_value: Option<f64>,
    pub customer_state: Option<String>,
    /// Derived by [`derive_delivery_time`]; missing when either timestamp is.
    pub delivery_time: Option<i64>,
}

impl Order {
    /// Calendar date of the purchase, used for range filtering.
    pub fn purchase_date(&self) -> Option<NaiveDate> {
        self.purchased_at.map(|ts| ts.date())
    }
}

/// Fill `delivery_time` for every row.
pub fn derive_delivery_time(orders: &mut [Order]) {
    for order in orders {
        order.delivery_time = match (order.purchased_at, order.estimated_delivery) {
            (Some(purchased), Some(estimated)) => Some(delivery_days(purchased, estimated)),
            _ => None,
        };
    }
}

// ---------------------------------------------------------------------------
// OrderTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full loaded table. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct OrderTable {
    orders: Vec<Order>,
}

impl OrderTable {
    /// Build the table and derive `delivery_time` over every row.
    pub fn from_orders(mut orders: Vec<Order>) -> Self {
        derive_delivery_time(&mut orders);
        OrderTable { orders }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Observed min/max purchase dates, or `None` when no row has one.
    pub fn purchase_date_bounds(&self) -> Option<DateRange> {
        let mut dates = self.orders.iter().filter_map(Order::purchase_date);
        let first = dates.next()?;
        let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(DateRange::new(start, end))
    }
}
