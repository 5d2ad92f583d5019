//! Data layer: order model, loading, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → OrderTable (delivery_time derived once)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ DatasetCache  │  write-once, read-many for the session
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  purchase-date window → OrderView (row indices)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌────────────────────────┐
//!   │ aggregate / histogram   │  metrics, grouped revenue, bins + KDE
//!   └────────────────────────┘
//! ```

pub mod aggregate;
pub mod cache;
pub mod filter;
pub mod histogram;
pub mod loader;
pub mod model;
