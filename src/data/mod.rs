/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  anac_dados_estatisticos.csv      demonstrativos.csv
///             │                            │
///             ▼                            ▼
///        ┌──────────┐                ┌──────────┐
///        │  loader   │  parse CSV →  │  loader   │
///        └──────────┘                └──────────┘
///             │                            │
///             ▼                            ▼
///  ┌────────────────────┐      ┌───────────────────┐
///  │ OperationalDataset  │      │ FinancialDataset   │
///  └────────────────────┘      └───────────────────┘
///             │                            │
///             ▼                            ▼
///        ┌──────────┐                ┌──────────┐
///        │  filter   │  row indices  │  filter   │
///        └──────────┘                └──────────┘
///             │                            │
///             ▼                            ▼
///        ┌──────────┐                ┌──────────┐
///        │   agg     │  KPI sums,    │   agg     │
///        └──────────┘  chart series  └──────────┘
/// ```

pub mod agg;
pub mod filter;
pub mod loader;
pub mod model;
