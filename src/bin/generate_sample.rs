use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    /// Log-normal sample, used for right-skewed prices.
    fn log_normal(&mut self, mu: f64, sigma: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        (mu + sigma * z).exp()
    }
}

#[derive(Serialize)]
struct SampleOrder {
    order_id: String,
    product_category_name_english: String,
    order_purchase_timestamp: String,
    order_estimated_delivery_date: String,
    price: f64,
    freight_value: f64,
    customer_state: String,
}

const CATEGORIES: [&str; 8] = [
    "bed_bath_table",
    "health_beauty",
    "sports_leisure",
    "furniture_decor",
    "computers_accessories",
    "housewares",
    "watches_gifts",
    "toys",
];

const STATES: [&str; 8] = ["SP", "RJ", "MG", "RS", "PR", "SC", "BA", "DF"];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn generate(rng: &mut SimpleRng, n_orders: usize) -> Vec<SampleOrder> {
    let first_day = NaiveDate::from_ymd_opt(2017, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid start date");

    let mut rows = Vec::new();
    for i in 0..n_orders {
        let purchased: NaiveDateTime =
            first_day + TimeDelta::seconds((rng.next_f64() * 365.0 * 86_400.0) as i64);
        // Estimates are whole dates; a few land before the purchase.
        let lead_days = rng.below(40) as i64 - 2;
        let estimated = (purchased + TimeDelta::days(lead_days)).date();
        let state = STATES[rng.below(STATES.len())];

        // One to three line items per order.
        for _ in 0..=rng.below(3) {
            let price = round2(rng.log_normal(4.3, 0.8));
            rows.push(SampleOrder {
                order_id: format!("order{i:06}"),
                product_category_name_english: CATEGORIES[rng.below(CATEGORIES.len())]
                    .to_string(),
                order_purchase_timestamp: purchased.format(TIMESTAMP_FORMAT).to_string(),
                order_estimated_delivery_date: format!("{estimated} 00:00:00"),
                price,
                freight_value: round2(5.0 + price * 0.12 + rng.next_f64() * 10.0),
                customer_state: state.to_string(),
            });
        }
    }
    rows
}

fn write_csv(rows: &[SampleOrder], path: &str) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV file");
    for row in rows {
        writer.serialize(row).expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");
}

fn write_parquet(rows: &[SampleOrder], path: &str) {
    let text = |f: fn(&SampleOrder) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let float = |f: fn(&SampleOrder) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("order_id", DataType::Utf8, false),
        Field::new("product_category_name_english", DataType::Utf8, false),
        Field::new("order_purchase_timestamp", DataType::Utf8, false),
        Field::new("order_estimated_delivery_date", DataType::Utf8, false),
        Field::new("price", DataType::Float64, false),
        Field::new("freight_value", DataType::Float64, false),
        Field::new("customer_state", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            text(|r| r.order_id.as_str()),
            text(|r| r.product_category_name_english.as_str()),
            text(|r| r.order_purchase_timestamp.as_str()),
            text(|r| r.order_estimated_delivery_date.as_str()),
            float(|r| r.price),
            float(|r| r.freight_value),
            text(|r| r.customer_state.as_str()),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng, 2_000);

    write_csv(&rows, "sample_orders.csv");
    write_parquet(&rows, "sample_orders.parquet");

    println!(
        "Wrote {} line items to sample_orders.csv and sample_orders.parquet",
        rows.len()
    );
}
