// Adapters layer: concrete implementations for external systems (CSV dataset, SQLite, local files).

pub mod csv_source;
pub mod sqlite;
