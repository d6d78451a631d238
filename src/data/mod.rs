/// Data layer: the value column, its loading, filtering and classification.
///
/// Architecture:
/// ```text
///  .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (the `value` column)
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │  filter   │   │ classify │  value → Level (Low / Medium / High)
///   └──────────┘   └──────────┘
///   indices below
///   the threshold
/// ```

pub mod classify;
pub mod filter;
pub mod loader;
pub mod model;
