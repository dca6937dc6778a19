// Library exports for testing and reuse

pub mod catalog;
pub mod categories;
pub mod cli;
pub mod config;
pub mod error;
pub mod stats_mode;
pub mod units;

// Re-export commonly used types
pub use catalog::{MapLocation, MapsetCatalog, RasterCatalog};
pub use config::{LayerSpec, ReportConfig, ReportConfigBuilder, Sink};
pub use error::{ReportError, Result};
pub use stats_mode::StatsMode;
pub use units::UnitSpec;
