// Weather tools backed by the National Weather Service API

use crate::error::ToolError;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    json_schema_bounded_number, json_schema_fixed_string, json_schema_object, parse_arguments, Tool,
};
use serde::Deserialize;
use wp_mcp_core::WeatherService;

const STATE_CODE_LEN: usize = 2;
const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Tool to list active weather alerts for a US state
pub struct AlertsTool {
    weather: WeatherService,
}

impl AlertsTool {
    pub const NAME: &'static str = "get-alerts";

    pub fn new(weather: WeatherService) -> Self {
        Self { weather }
    }
}

#[derive(Debug, Deserialize)]
struct AlertsArgs {
    state: String,
}

impl AlertsArgs {
    fn validate(self) -> Result<Self, ToolError> {
        let len = self.state.chars().count();
        if len != STATE_CODE_LEN {
            return Err(ToolError::invalid_arguments(
                AlertsTool::NAME,
                format!("state must be exactly {} characters, got {}", STATE_CODE_LEN, len),
            ));
        }
        Ok(self)
    }
}

#[async_trait::async_trait]
impl Tool for AlertsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Get weather alerts for a state".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "state": json_schema_fixed_string("Two-letter state code (e.g. CA, NY)", STATE_CODE_LEN)
                }),
                vec!["state"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolError> {
        let args = parse_arguments::<AlertsArgs>(Self::NAME, arguments)?.validate()?;

        Ok(CallToolResult::text(self.weather.alerts(&args.state).await))
    }
}

/// Tool to get the forecast for a coordinate pair
pub struct ForecastTool {
    weather: WeatherService,
}

impl ForecastTool {
    pub const NAME: &'static str = "get-forecast";

    pub fn new(weather: WeatherService) -> Self {
        Self { weather }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastArgs {
    latitude: f64,
    longitude: f64,
}

impl ForecastArgs {
    fn validate(self) -> Result<Self, ToolError> {
        check_range("latitude", self.latitude, LATITUDE_RANGE)?;
        check_range("longitude", self.longitude, LONGITUDE_RANGE)?;
        Ok(self)
    }
}

fn check_range(field: &str, value: f64, (min, max): (f64, f64)) -> Result<(), ToolError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ToolError::invalid_arguments(
            ForecastTool::NAME,
            format!("{} must be between {} and {}, got {}", field, min, max, value),
        ))
    }
}

#[async_trait::async_trait]
impl Tool for ForecastTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Get weather forecast for a location".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "latitude": json_schema_bounded_number(
                        "Latitude of the location",
                        LATITUDE_RANGE.0,
                        LATITUDE_RANGE.1
                    ),
                    "longitude": json_schema_bounded_number(
                        "Longitude of the location",
                        LONGITUDE_RANGE.0,
                        LONGITUDE_RANGE.1
                    )
                }),
                vec!["latitude", "longitude"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolError> {
        let args = parse_arguments::<ForecastArgs>(Self::NAME, arguments)?.validate()?;

        Ok(CallToolResult::text(
            self.weather.forecast(args.latitude, args.longitude).await,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ToolContent;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use wp_mcp_core::{ApiConfig, JsonFetcher};

    fn weather(base: &str) -> WeatherService {
        let config = Arc::new(ApiConfig {
            weather_base: base.to_string(),
            ..Default::default()
        });
        WeatherService::new(JsonFetcher::new(&config).unwrap(), config)
    }

    fn text_of(result: &CallToolResult) -> &str {
        assert_eq!(result.content.len(), 1);
        match &result.content[0] {
            ToolContent::Text { text } => text,
        }
    }

    #[tokio::test]
    async fn test_alerts_normalizes_state() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/alerts"))
            .and(query_param("area", "WA"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"features": []})))
            .expect(1)
            .mount(&server)
            .await;

        let tool = AlertsTool::new(weather(&server.uri()));
        let result = tool.execute(json!({"state": "wa"})).await.unwrap();

        assert_eq!(text_of(&result), "No active alerts for WA");
        assert!(result.is_error.is_none());
    }

    #[tokio::test]
    async fn test_alerts_rejects_bad_state_length() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"features": []})))
            .expect(0)
            .mount(&server)
            .await;

        let tool = AlertsTool::new(weather(&server.uri()));

        for state in ["C", "CAL", ""] {
            let err = tool.execute(json!({"state": state})).await.unwrap_err();
            assert!(matches!(err, ToolError::InvalidArguments { .. }));
        }
    }

    #[tokio::test]
    async fn test_alerts_rejects_missing_state() {
        let tool = AlertsTool::new(weather("http://127.0.0.1:9"));

        assert!(tool.execute(json!({})).await.is_err());
        assert!(tool.execute(json!({"state": 12})).await.is_err());
    }

    #[tokio::test]
    async fn test_alerts_unreachable_upstream() {
        // Port 9 (discard) is not expected to be listening
        let tool = AlertsTool::new(weather("http://127.0.0.1:9"));
        let result = tool.execute(json!({"state": "CA"})).await.unwrap();

        assert_eq!(text_of(&result), "Failed to retrieve alerts data");
    }

    #[tokio::test]
    async fn test_forecast_rejects_out_of_range() {
        let tool = ForecastTool::new(weather("http://127.0.0.1:9"));

        for args in [
            json!({"latitude": 90.5, "longitude": 0}),
            json!({"latitude": -91, "longitude": 0}),
            json!({"latitude": 0, "longitude": 180.01}),
            json!({"latitude": 0, "longitude": -200}),
            json!({"latitude": "north", "longitude": 0}),
            json!({"latitude": 10}),
        ] {
            let err = tool.execute(args).await.unwrap_err();
            assert!(matches!(err, ToolError::InvalidArguments { .. }));
        }
    }

    #[tokio::test]
    async fn test_forecast_accepts_bounds() {
        let tool = ForecastTool::new(weather("http://127.0.0.1:9"));
        let result = tool
            .execute(json!({"latitude": 90, "longitude": -180}))
            .await
            .unwrap();

        assert_eq!(
            text_of(&result),
            "Failed to get forecast data for coordinates: 90, -180"
        );
    }

    #[test]
    fn test_schemas() {
        let weather = weather("http://127.0.0.1:9");

        let alerts = AlertsTool::new(weather.clone()).schema();
        assert_eq!(alerts.name, "get-alerts");
        assert_eq!(alerts.input_schema["properties"]["state"]["maxLength"], 2);
        assert_eq!(alerts.input_schema["required"], json!(["state"]));

        let forecast = ForecastTool::new(weather).schema();
        assert_eq!(forecast.name, "get-forecast");
        assert_eq!(forecast.input_schema["properties"]["latitude"]["maximum"], 90.0);
        assert_eq!(forecast.input_schema["properties"]["longitude"]["minimum"], -180.0);
    }
}
