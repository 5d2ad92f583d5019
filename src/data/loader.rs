use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, NaiveDateTime, Utc};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use super::model::{
    parse_timestamp, Order, OrderTable, CATEGORY, CUSTOMER_STATE, ESTIMATED_DELIVERY,
    FREIGHT_VALUE, ORDER_ID, PRICE, PURCHASE_TIMESTAMP, REQUIRED_COLUMNS,
};
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the orders table, mapping any failure to [`DashboardError::DataUnavailable`].
pub fn load_orders(path: &Path) -> Result<OrderTable, DashboardError> {
    match load_file(path) {
        Ok(table) => {
            match table.purchase_date_bounds() {
                Some(bounds) => log::info!(
                    "Loaded {} orders from {} ({} to {})",
                    table.len(),
                    path.display(),
                    bounds.start,
                    bounds.end
                ),
                None => log::info!(
                    "Loaded {} orders from {} (no purchase dates)",
                    table.len(),
                    path.display()
                ),
            }
            Ok(table)
        }
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            Err(DashboardError::DataUnavailable {
                path: path.to_path_buf(),
                reason: format!("{e:#}"),
            })
        }
    }
}

/// Load an orders file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming at least the required columns
/// * `.json`    – `[{ "order_id": "...", "price": 12.5, ... }, ...]`
/// * `.parquet` – any column types Arrow can cast to text / Float64
pub fn load_file(path: &Path) -> Result<OrderTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    Ok(into_table(rows))
}

// ---------------------------------------------------------------------------
// RawOrder: one row before timestamp parsing
// ---------------------------------------------------------------------------

/// A row as read from disk: timestamps still text, unparseable numbers already missing.
#[derive(Debug, Deserialize)]
struct RawOrder {
    order_id: Option<String>,
    #[serde(rename = "product_category_name_english")]
    category: Option<String>,
    order_purchase_timestamp: Option<String>,
    order_estimated_delivery_date: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    price: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    freight_value: Option<f64>,
    customer_state: Option<String>,
}

/// Parse timestamps and build the table. Unparseable timestamps become
/// missing values; they are counted and reported once.
fn into_table(rows: Vec<RawOrder>) -> OrderTable {
    let mut unparsed = 0usize;
    let mut parse = |text: Option<String>| -> Option<NaiveDateTime> {
        let text = text?;
        let parsed = parse_timestamp(&text);
        if parsed.is_none() && !text.trim().is_empty() {
            unparsed += 1;
        }
        parsed
    };

    let orders: Vec<Order> = rows
        .into_iter()
        .map(|raw| Order {
            order_id: non_empty(raw.order_id),
            category: non_empty(raw.category),
            purchased_at: parse(raw.order_purchase_timestamp),
            estimated_delivery: parse(raw.order_estimated_delivery_date),
            price: finite(raw.price),
            freight_value: finite(raw.freight_value),
            customer_state: non_empty(raw.customer_state),
            delivery_time: None,
        })
        .collect();

    if unparsed > 0 {
        log::warn!("{unparsed} timestamp cells could not be parsed and are treated as missing");
    }
    OrderTable::from_orders(orders)
}

/// `NaN` and infinities parse as floats but count as missing values.
fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|v| v.is_finite())
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn ensure_columns(mut present: impl FnMut(&str) -> bool, what: &str) -> Result<()> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !present(col))
        .collect();
    if !missing.is_empty() {
        bail!("{what} missing required column(s): {}", missing.join(", "));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one order line item per record.
fn load_csv(path: &Path) -> Result<Vec<RawOrder>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();
    ensure_columns(|col| headers.iter().any(|h| h == col), "CSV")?;

    reader
        .deserialize::<RawOrder>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "order_id": "e481f51cbdc54678b7cc49136f2d6af7",
///     "product_category_name_english": "housewares",
///     "order_purchase_timestamp": "2017-10-02 10:56:33",
///     "order_estimated_delivery_date": "2017-10-18 00:00:00",
///     "price": 29.99,
///     "freight_value": 8.72,
///     "customer_state": "SP"
///   },
///   ...
/// ]
/// ```
///
/// Epoch-millisecond timestamps (pandas' default for datetimes) are accepted too.
fn load_json(path: &Path) -> Result<Vec<RawOrder>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let objects: Vec<&Map<String, JsonValue>> = records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            rec.as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))
        })
        .collect::<Result<_>>()?;

    if !objects.is_empty() {
        ensure_columns(|col| objects.iter().any(|obj| obj.contains_key(col)), "JSON")?;
    }

    Ok(objects
        .into_iter()
        .map(|obj| RawOrder {
            order_id: json_text(obj.get(ORDER_ID)),
            category: json_text(obj.get(CATEGORY)),
            order_purchase_timestamp: json_timestamp(obj.get(PURCHASE_TIMESTAMP)),
            order_estimated_delivery_date: json_timestamp(obj.get(ESTIMATED_DELIVERY)),
            price: json_number(obj.get(PRICE)),
            freight_value: json_number(obj.get(FREIGHT_VALUE)),
            customer_state: json_text(obj.get(CUSTOMER_STATE)),
        })
        .collect())
}

fn json_text(val: Option<&JsonValue>) -> Option<String> {
    match val? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Null => None,
        other => Some(other.to_string()),
    }
}

fn json_number(val: Option<&JsonValue>) -> Option<f64> {
    let number = match val? {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    finite(number)
}

fn json_timestamp(val: Option<&JsonValue>) -> Option<String> {
    match val? {
        JsonValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v as i64))
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.naive_utc().format("%Y-%m-%d %H:%M:%S").to_string()),
        other => json_text(Some(other)),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of orders.
///
/// Text columns (ids, category, state) and timestamp columns are cast to
/// Utf8, so both string timestamps and Arrow `Timestamp`/`Date32` columns
/// work. Price columns are cast to Float64; values that fail the cast are null.
fn load_parquet(path: &Path) -> Result<Vec<RawOrder>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    {
        let schema = builder.schema();
        ensure_columns(|col| schema.index_of(col).is_ok(), "Parquet file")?;
    }
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let order_ids = column_as(&batch, ORDER_ID, &DataType::Utf8)?;
        let categories = column_as(&batch, CATEGORY, &DataType::Utf8)?;
        let purchased = column_as(&batch, PURCHASE_TIMESTAMP, &DataType::Utf8)?;
        let estimated = column_as(&batch, ESTIMATED_DELIVERY, &DataType::Utf8)?;
        let prices = column_as(&batch, PRICE, &DataType::Float64)?;
        let freights = column_as(&batch, FREIGHT_VALUE, &DataType::Float64)?;
        let states = column_as(&batch, CUSTOMER_STATE, &DataType::Utf8)?;

        let order_ids = order_ids.as_string::<i32>();
        let categories = categories.as_string::<i32>();
        let purchased = purchased.as_string::<i32>();
        let estimated = estimated.as_string::<i32>();
        let prices = prices.as_primitive::<Float64Type>();
        let freights = freights.as_primitive::<Float64Type>();
        let states = states.as_string::<i32>();

        for row in 0..batch.num_rows() {
            rows.push(RawOrder {
                order_id: text_at(order_ids, row),
                category: text_at(categories, row),
                order_purchase_timestamp: text_at(purchased, row),
                order_estimated_delivery_date: text_at(estimated, row),
                price: float_at(prices, row),
                freight_value: float_at(freights, row),
                customer_state: text_at(states, row),
            });
        }
    }

    Ok(rows)
}

// -- Parquet / Arrow helpers --

/// Fetch a named column and cast it to `to`.
fn column_as(batch: &RecordBatch, name: &str, to: &DataType) -> Result<ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow!("Parquet file missing '{name}' column"))?;
    cast(batch.column(idx).as_ref(), to)
        .with_context(|| format!("column '{name}' cannot be read as {to}"))
}

fn text_at(arr: &StringArray, row: usize) -> Option<String> {
    arr.is_valid(row).then(|| arr.value(row).to_string())
}

fn float_at(arr: &Float64Array, row: usize) -> Option<f64> {
    finite(arr.is_valid(row).then(|| arr.value(row)))
}
