pub mod blog;
pub mod weather;
mod registry;

pub use blog::LatestPostsTool;
pub use registry::{
    json_schema_bounded_number, json_schema_fixed_string, json_schema_object, parse_arguments,
    Tool, ToolRegistry,
};
pub use weather::{AlertsTool, ForecastTool};

use std::sync::Arc;
use wp_mcp_core::{ApiConfig, BlogService, FetchResult, JsonFetcher, WeatherService};

/// Registry with the weather and blog tools over one shared HTTP client
pub fn default_registry(config: Arc<ApiConfig>) -> FetchResult<ToolRegistry> {
    let fetcher = JsonFetcher::new(&config)?;
    let weather = WeatherService::new(fetcher.clone(), config.clone());
    let blog = BlogService::new(fetcher, config);

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(AlertsTool::new(weather.clone())));
    registry.register(Arc::new(ForecastTool::new(weather)));
    registry.register(Arc::new(LatestPostsTool::new(blog)));

    Ok(registry)
}
