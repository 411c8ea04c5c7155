use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use outfit_api::{
    api::{create_router, AppState},
    config::Config,
    db::create_pool,
    services::{
        providers::{InMemoryWardrobe, OpenMeteoWeather, PgWardrobe, WardrobeSource},
        RecommendationService, RuleRepository,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let wardrobe = wardrobe_source(&config).await?;
    let weather = Arc::new(OpenMeteoWeather::new(config.weather_api_url.clone()));
    let rules = Arc::new(RuleRepository::with_override(config.rules_path.clone()));

    // Load rules up front so a bad document is reported at startup
    let ruleset = rules.ruleset().await;
    tracing::info!(
        temperature_bands = ruleset.temperature_rules.len(),
        occasions = ruleset.occasion_rules.len(),
        "Outfit rules ready"
    );

    let recommender = RecommendationService::new(rules, wardrobe, weather)
        .with_default_mode(config.scoring_mode);
    let app = create_router(AppState::new(recommender));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        address = %address,
        scoring_mode = %config.scoring_mode,
        "Outfit API listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}

async fn wardrobe_source(config: &Config) -> anyhow::Result<Arc<dyn WardrobeSource>> {
    if let Some(database_url) = &config.database_url {
        let pool = create_pool(database_url).await?;
        return Ok(Arc::new(PgWardrobe::new(pool)));
    }

    if let Some(path) = &config.wardrobe_file {
        return Ok(Arc::new(InMemoryWardrobe::from_file(path).await?));
    }

    tracing::warn!("Neither DATABASE_URL nor WARDROBE_FILE set, starting with an empty wardrobe");
    Ok(Arc::new(InMemoryWardrobe::new()))
}
