use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const FALLBACK_TEMPERATURE_C: f64 = 22.0;
pub const FALLBACK_CONDITION: &str = "Clear";
pub const FALLBACK_HUMIDITY: f64 = 50.0;

/// Minimal projection of the current weather used by the recommender
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub condition: String,
    #[serde(default)]
    pub humidity: f64,
    #[serde(default = "Utc::now")]
    pub observed_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    pub fn new(temperature: f64, condition: impl Into<String>, humidity: f64) -> Self {
        Self {
            temperature,
            condition: condition.into(),
            humidity,
            observed_at: Utc::now(),
        }
    }

    /// Snapshot substituted when the weather source is unavailable
    pub fn fallback() -> Self {
        Self::new(FALLBACK_TEMPERATURE_C, FALLBACK_CONDITION, FALLBACK_HUMIDITY)
    }
}

/// Location used to query a weather source
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Builds coordinates only when both parts are present and in range
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude))
                if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) =>
            {
                Some(Self {
                    latitude,
                    longitude,
                })
            }
            _ => None,
        }
    }
}
