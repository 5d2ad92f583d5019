use std::path::PathBuf;

use chrono::NaiveDate;
use rusty_orders::data::aggregate::{
    distinct_order_count, mean_delivery_time, order_count_by_state, revenue_by_category,
    total_revenue,
};
use rusty_orders::data::cache::DatasetCache;
use rusty_orders::data::filter::{filter, DateRange};
use rusty_orders::data::histogram::DEFAULT_BINS;
use rusty_orders::error::DashboardError;
use rusty_orders::report::Report;

const HEADER: &str = "order_id,customer_id,product_category_name_english,order_purchase_timestamp,order_estimated_delivery_date,price,freight_value,customer_state";

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn write_orders(dir: &tempfile::TempDir, rows: &[&str]) -> PathBuf {
    let path = dir.path().join("data_project.csv");
    let mut body = String::from(HEADER);
    for row in rows {
        body.push('\n');
        body.push_str(row);
    }
    body.push('\n');
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn two_orders_narrowed_to_first_week() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_orders(
        &dir,
        &[
            "o1,c1,toys,2017-01-05 10:00:00,2017-01-20 00:00:00,50.00,10.0,SP",
            "o2,c2,garden,2017-01-10 09:30:00,2017-01-25 00:00:00,30.00,7.5,RJ",
        ],
    );
    let cache = DatasetCache::new(path);
    let table = cache.get().unwrap();

    let view = filter(table, DateRange::new(date("2017-01-01"), date("2017-01-07")));
    assert_eq!(view.len(), 1);
    assert_eq!(total_revenue(&view), 50.0);
    assert_eq!(distinct_order_count(&view), 1);
}

#[test]
fn full_range_keeps_everything_and_groups_add_up() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_orders(
        &dir,
        &[
            "o1,c1,toys,2017-01-05 10:00:00,2017-01-20 00:00:00,50.00,10.0,SP",
            "o1,c1,toys,2017-01-05 10:00:00,2017-01-20 00:00:00,12.50,3.0,SP",
            "o2,c2,garden,2017-01-10 09:30:00,2017-01-25 00:00:00,30.00,7.5,RJ",
            "o3,c3,auto,2017-02-01 18:00:00,2017-01-30 00:00:00,99.90,20.0,MG",
        ],
    );
    let cache = DatasetCache::new(path);
    let table = cache.get().unwrap();
    let bounds = table.purchase_date_bounds().unwrap();
    assert_eq!(bounds, DateRange::new(date("2017-01-05"), date("2017-02-01")));

    let view = filter(table, bounds);
    assert_eq!(view.len(), table.len());
    assert_eq!(distinct_order_count(&view), 3);

    let by_category = revenue_by_category(&view);
    assert_eq!(by_category[0].0, "auto");
    let summed: f64 = by_category.iter().map(|(_, v)| v).sum();
    assert!((summed - total_revenue(&view)).abs() < 1e-9);

    assert_eq!(order_count_by_state(&view)[0], ("SP".to_string(), 2));

    // o3 was estimated to arrive before it was bought.
    let o3 = &table.orders()[3];
    assert_eq!(o3.delivery_time, Some(-3));
    let mean = mean_delivery_time(&view).unwrap();
    assert!((mean - (14.0 + 14.0 + 14.0 - 3.0) / 4.0).abs() < 1e-9);
}

#[test]
fn empty_window_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_orders(
        &dir,
        &[
            "o1,c1,toys,2017-01-05 10:00:00,2017-01-20 00:00:00,50.00,10.0,SP",
            "o2,c2,garden,2017-01-10 09:30:00,2017-01-25 00:00:00,30.00,7.5,RJ",
        ],
    );
    let cache = DatasetCache::new(path);
    let table = cache.get().unwrap();

    let view = filter(table, DateRange::new(date("2017-01-08"), date("2017-01-08")));
    let report = Report::compute(&view, DEFAULT_BINS);
    assert_eq!(report.summary.order_count, 0);
    assert_eq!(report.summary.total_revenue, 0.0);
    assert_eq!(report.summary.mean_delivery_time, None);
    assert!(report.revenue_by_category.is_empty());
    assert!(report.orders_by_state.is_empty());
    assert!(report.price.is_empty());
    assert!(matches!(
        mean_delivery_time(&view),
        Err(DashboardError::UndefinedAggregate { .. })
    ));
}

#[test]
fn unparseable_timestamps_do_not_abort_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_orders(
        &dir,
        &[
            "o1,c1,toys,2017-03-01 00:00:00,2017-03-10 00:00:00,50.00,10.0,SP",
            "o2,c2,toys,??,2017-03-10 00:00:00,20.00,5.0,SP",
        ],
    );
    let cache = DatasetCache::new(path);
    let table = cache.get().unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.orders()[0].delivery_time, Some(9));
    assert_eq!(table.orders()[1].delivery_time, None);

    // The undated row is outside every window.
    let view = filter(table, table.purchase_date_bounds().unwrap());
    assert_eq!(view.indices(), &[0]);
}

#[test]
fn missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DatasetCache::new(dir.path().join("data_project.csv"));
    let err = cache.get().unwrap_err();
    assert!(matches!(err, DashboardError::DataUnavailable { .. }));
    assert!(err.to_string().contains("data_project.csv"));
}
