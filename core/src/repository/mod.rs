pub mod api;
pub mod csv;
pub mod traits;

// Re-export
pub use api::{ApiConfig, MonitoringApi};
pub use self::csv::read_energy_csv;
pub use traits::{ingest_month, EnergyReading, PowerReading, ReadingSource};
