// National Weather Service alerts and forecasts

use crate::config::ApiConfig;
use crate::fetch::{JsonFetcher, GEO_JSON_ACCEPT};
use crate::format::{format_alert, format_period, join_blocks};
use crate::types::{AlertsResponse, ForecastResponse, PointsResponse};
use std::sync::Arc;
use tracing::debug;

/// Renders weather alerts and forecasts as plain text.
///
/// Every outcome, including upstream failure, is a message for the caller.
#[derive(Debug, Clone)]
pub struct WeatherService {
    fetcher: JsonFetcher,
    config: Arc<ApiConfig>,
}

impl WeatherService {
    pub fn new(fetcher: JsonFetcher, config: Arc<ApiConfig>) -> Self {
        Self { fetcher, config }
    }

    /// Active alerts for a two-letter state code (any case).
    pub async fn alerts(&self, state: &str) -> String {
        let state_code = state.to_uppercase();
        let url = self.config.alerts_url(&state_code);

        let Some(alerts) = self
            .fetcher
            .fetch::<AlertsResponse>(&url, GEO_JSON_ACCEPT)
            .await
        else {
            return "Failed to retrieve alerts data".to_string();
        };

        if alerts.features.is_empty() {
            return format!("No active alerts for {}", state_code);
        }

        debug!(state = %state_code, count = alerts.features.len(), "Formatting alerts");
        let blocks: Vec<String> = alerts.features.iter().map(format_alert).collect();
        join_blocks(&format!("Active alerts for {}:", state_code), &blocks)
    }

    /// Forecast for a coordinate pair: resolves the grid point, then fetches its forecast.
    pub async fn forecast(&self, latitude: f64, longitude: f64) -> String {
        let points_url = self.config.points_url(latitude, longitude);
        let points = self
            .fetcher
            .fetch::<PointsResponse>(&points_url, GEO_JSON_ACCEPT)
            .await;

        let Some(forecast_url) = points.as_ref().and_then(PointsResponse::forecast_url) else {
            return format!(
                "Failed to get forecast data for coordinates: {}, {}",
                latitude, longitude
            );
        };

        let Some(forecast) = self
            .fetcher
            .fetch::<ForecastResponse>(forecast_url, &[])
            .await
        else {
            return "Failed to retrieve forecast data".to_string();
        };

        let periods = &forecast.properties.periods;
        if periods.is_empty() {
            return "No forecast periods available".to_string();
        }

        debug!(latitude, longitude, count = periods.len(), "Formatting forecast");
        let blocks: Vec<String> = periods.iter().map(format_period).collect();
        join_blocks(&format!("Forecast for {}, {}:", latitude, longitude), &blocks)
    }
}
