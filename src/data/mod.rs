/// Data layer: core types, loading, filtering, and story aggregates.
///
/// Architecture:
/// ```text
///      .csv bytes
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode (UTF-8 → Windows-1252) → coerce → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  typed columns, numeric/categorical partition
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply categorical allow-lists → working row set
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  story    │  group sums, negative rows, summary stats
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod story;
