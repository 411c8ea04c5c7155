//! External data sources consumed by the recommender
//!
//! The service only sees the traits below; a Postgres wardrobe, a JSON
//! fixture or a test mock plug in behind them.

use crate::{
    error::AppResult,
    models::{Coordinates, WardrobeItem, WeatherSnapshot},
};

pub mod in_memory;
pub mod open_meteo;
pub mod postgres;

pub use in_memory::InMemoryWardrobe;
pub use open_meteo::OpenMeteoWeather;
pub use postgres::PgWardrobe;

/// Supplies the garments a user owns
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait WardrobeSource: Send + Sync {
    /// Returns every item in the user's wardrobe; an unknown user has none
    async fn items_for_user(&self, user_id: &str) -> AppResult<Vec<WardrobeItem>>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Supplies current conditions at a location
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current(&self, coordinates: Coordinates) -> AppResult<WeatherSnapshot>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Resolves the weather for a request, never failing
///
/// Missing coordinates or any source error yield [`WeatherSnapshot::fallback`].
pub async fn resolve_weather(
    source: &dyn WeatherSource,
    coordinates: Option<Coordinates>,
) -> WeatherSnapshot {
    let Some(coordinates) = coordinates else {
        tracing::warn!("No coordinates supplied, using fallback weather");
        return WeatherSnapshot::fallback();
    };

    match source.current(coordinates).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(
                error = %e,
                source = source.name(),
                latitude = coordinates.latitude,
                longitude = coordinates.longitude,
                "Weather lookup failed, using fallback weather"
            );
            WeatherSnapshot::fallback()
        }
    }
}
