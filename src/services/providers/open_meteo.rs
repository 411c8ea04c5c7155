//! Open-Meteo weather provider
//!
//! Calls `/v1/forecast` with the `current` block only and projects the
//! response onto a [`WeatherSnapshot`]. No API key is required.

use crate::{
    error::{AppError, AppResult},
    models::{Coordinates, WeatherSnapshot},
    services::providers::WeatherSource,
};
use chrono::Utc;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::time::Duration;

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,weather_code";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    #[serde(default)]
    relative_humidity_2m: Option<f64>,
    #[serde(default)]
    weather_code: Option<u8>,
}

#[derive(Clone)]
pub struct OpenMeteoWeather {
    http_client: HttpClient,
    api_url: String,
}

impl OpenMeteoWeather {
    pub fn new(api_url: String) -> Self {
        let http_client = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Maps a WMO weather interpretation code to a condition string
pub fn condition_for_code(code: u8) -> &'static str {
    match code {
        0 => "Clear",
        1..=3 => "Clouds",
        45 | 48 => "Fog",
        51..=57 => "Drizzle",
        61..=67 | 80..=82 => "Rain",
        71..=77 | 85 | 86 => "Snow",
        95..=99 => "Thunderstorm",
        _ => "Unknown",
    }
}

fn to_snapshot(current: CurrentConditions) -> WeatherSnapshot {
    WeatherSnapshot {
        temperature: current.temperature_2m,
        condition: current
            .weather_code
            .map(condition_for_code)
            .unwrap_or("Unknown")
            .to_string(),
        humidity: current.relative_humidity_2m.unwrap_or_default(),
        observed_at: Utc::now(),
    }
}

#[async_trait::async_trait]
impl WeatherSource for OpenMeteoWeather {
    async fn current(&self, coordinates: Coordinates) -> AppResult<WeatherSnapshot> {
        let url = format!("{}/v1/forecast", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Open-Meteo returned status {}: {}",
                status, body
            )));
        }

        let forecast: ForecastResponse = response.json().await?;
        let snapshot = to_snapshot(forecast.current);

        tracing::debug!(
            latitude = coordinates.latitude,
            longitude = coordinates.longitude,
            temperature = snapshot.temperature,
            condition = %snapshot.condition,
            provider = "open_meteo",
            "Fetched current weather"
        );

        Ok(snapshot)
    }

    fn name(&self) -> &'static str {
        "open_meteo"
    }
}
