// Core of the wp-mcp server: upstream fetching and text rendering

pub mod blog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod format;
pub mod types;
pub mod weather;

pub use blog::BlogService;
pub use config::ApiConfig;
pub use error::{FetchError, FetchResult};
pub use fetch::JsonFetcher;
pub use weather::WeatherService;
