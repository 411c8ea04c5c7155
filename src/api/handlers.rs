use axum::{extract::State, http::StatusCode, Extension, Json};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{DailyOutfitRequest, OutfitDescriptor, RankRequest, RankedOutfit, RecommendRequest},
    services::ranking::rank_outfits,
};

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Daily outfits for a stored wardrobe at the caller's location
pub async fn daily_outfits(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<DailyOutfitRequest>,
) -> AppResult<Json<Vec<OutfitDescriptor>>> {
    tracing::debug!(
        request_id = %request_id,
        user_id = %request.user_id,
        occasion = %request.occasion,
        "Daily outfit request"
    );

    let outfits = state.recommender.daily_outfits(request).await?;
    Ok(Json(outfits))
}

/// Outfits for caller-supplied items and weather; no external sources consulted
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<Vec<OutfitDescriptor>>> {
    if request.occasion.trim().is_empty() {
        return Err(AppError::InvalidInput("occasion cannot be empty".to_string()));
    }

    let mode = request
        .mode
        .unwrap_or_else(|| state.recommender.default_mode());
    let outfits = state
        .recommender
        .recommend(request.items, &request.weather, &request.occasion, mode)
        .await;

    Ok(Json(outfits))
}

/// Reorders an arbitrary outfit list by user preferences
pub async fn rank(Json(request): Json<RankRequest>) -> Json<Vec<RankedOutfit>> {
    Json(rank_outfits(request.outfits, request.preferences.as_ref()))
}
