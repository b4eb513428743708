/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  meteorite-landings.csv  (';'-separated, bilingual headers)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  rename → drop incomplete rows → coerce
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ MeteoriteTable  │  Vec<Meteorite>, immutable
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  mass/year mask → top countries, year counts, masses
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
