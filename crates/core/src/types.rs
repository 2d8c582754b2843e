// Upstream response shapes consumed by the weather and blog services

use serde::{Deserialize, Serialize};

/// `GET /alerts?area=XX` response (GeoJSON feature collection)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertsResponse {
    #[serde(default)]
    pub features: Vec<AlertFeature>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertFeature {
    #[serde(default)]
    pub properties: AlertProperties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertProperties {
    pub event: Option<String>,
    pub area_desc: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub headline: Option<String>,
}

/// `GET /points/{lat},{lon}` response; only the forecast link is used
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointsResponse {
    #[serde(default)]
    pub properties: PointsProperties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointsProperties {
    pub forecast: Option<String>,
}

impl PointsResponse {
    /// The forecast endpoint, if the grid point has one.
    pub fn forecast_url(&self) -> Option<&str> {
        self.properties
            .forecast
            .as_deref()
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub properties: ForecastProperties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastProperties {
    #[serde(default)]
    pub periods: Vec<ForecastPeriod>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub name: Option<String>,
    /// Kept as a JSON number so integral readings print without a fraction
    pub temperature: Option<serde_json::Number>,
    pub temperature_unit: Option<String>,
    pub wind_speed: Option<String>,
    pub wind_direction: Option<String>,
    pub short_forecast: Option<String>,
}

/// WordPress post, restricted to `_fields=id,title,link,date,excerpt`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: Rendered,
    pub link: String,
    pub date: String,
    pub excerpt: Rendered,
}

/// WordPress `{ "rendered": "<html>" }` wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rendered {
    pub rendered: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_alerts_missing_features() {
        let alerts: AlertsResponse = serde_json::from_value(json!({"type": "FeatureCollection"})).unwrap();
        assert!(alerts.features.is_empty());
    }

    #[test]
    fn test_alert_properties_camel_case() {
        let feature: AlertFeature = serde_json::from_value(json!({
            "properties": {
                "event": "Flood Warning",
                "areaDesc": "Sacramento",
                "severity": "Severe"
            }
        }))
        .unwrap();

        assert_eq!(feature.properties.area_desc.as_deref(), Some("Sacramento"));
        assert!(feature.properties.headline.is_none());
    }

    #[test]
    fn test_points_forecast_url() {
        let points: PointsResponse = serde_json::from_value(json!({
            "properties": {"forecast": "https://api.weather.gov/gridpoints/TOP/31,80/forecast"}
        }))
        .unwrap();
        assert_eq!(
            points.forecast_url(),
            Some("https://api.weather.gov/gridpoints/TOP/31,80/forecast")
        );

        let empty: PointsResponse = serde_json::from_value(json!({"properties": {"forecast": ""}})).unwrap();
        assert!(empty.forecast_url().is_none());

        let missing: PointsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(missing.forecast_url().is_none());
    }

    #[test]
    fn test_forecast_period_fields() {
        let period: ForecastPeriod = serde_json::from_value(json!({
            "name": "Tonight",
            "temperature": 45,
            "temperatureUnit": "F",
            "windSpeed": "5 mph",
            "windDirection": "NW",
            "shortForecast": "Clear"
        }))
        .unwrap();

        assert_eq!(period.temperature.unwrap().to_string(), "45");
        assert_eq!(period.wind_direction.as_deref(), Some("NW"));
    }

    #[test]
    fn test_post_requires_all_fields() {
        let result: Result<Post, _> = serde_json::from_value(json!({
            "id": 1,
            "title": {"rendered": "Hello"},
            "link": "https://hafiz.blog/hello"
        }));
        assert!(result.is_err());
    }
}
