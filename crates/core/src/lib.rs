pub mod checker;
pub mod config;
pub mod crawler;
pub mod dispatcher;
pub mod fetcher;
pub mod judge;
pub mod parser;
pub mod rematch;
pub mod similarity;
pub mod store;
pub mod testing;

pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError};
pub use similarity::similarity;
