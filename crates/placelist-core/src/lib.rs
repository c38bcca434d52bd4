pub mod app_config;
pub mod config;
pub mod listing;
pub mod region;
pub mod report;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use listing::{Coordinate, GeoPoint, Listing, Photo};
pub use region::{load_regions, Region};
pub use report::{save_listings, CollectionReport, JsonFileSink, PersistError, ReportSink};
