pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use error::{StatsError, StatsResult};
pub use model::report::ProductionReport;
pub use model::series::ProductionSeries;
pub use repository::{ingest_month, read_energy_csv, ApiConfig, MonitoringApi, ReadingSource};
pub use service::analysis::analyze;
pub use service::comparison::{compare, PeriodComparison, RelativeChange};
pub use time::{month_bounds, month_power_window, period_label};
