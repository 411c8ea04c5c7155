use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{
        Coordinates, DailyOutfitRequest, OutfitCandidate, OutfitDescriptor, RankableOutfit,
        RuleSet, ScoringMode, UserPreferences, WardrobeItem, WeatherSnapshot,
    },
    services::{
        candidates::generate_candidates,
        filters::{filter_by_occasion, filter_by_weather},
        presentation::to_descriptors,
        providers::{resolve_weather, WardrobeSource, WeatherSource},
        ranking::rank_outfits,
        rule_repository::RuleRepository,
        scorer::HybridScorer,
    },
};

/// Recommends outfits from a user's wardrobe for the current weather and an occasion
///
/// Pipeline: weather filter -> occasion filter -> candidate generation ->
/// hybrid scoring / diversity selection -> presentation. An empty wardrobe or
/// a wardrobe with no viable combination yields an empty list, not an error.
#[derive(Clone)]
pub struct RecommendationService {
    rules: Arc<RuleRepository>,
    wardrobe: Arc<dyn WardrobeSource>,
    weather: Arc<dyn WeatherSource>,
    scorer: HybridScorer,
    default_mode: ScoringMode,
}

impl RecommendationService {
    pub fn new(
        rules: Arc<RuleRepository>,
        wardrobe: Arc<dyn WardrobeSource>,
        weather: Arc<dyn WeatherSource>,
    ) -> Self {
        Self {
            rules,
            wardrobe,
            weather,
            scorer: HybridScorer::default(),
            default_mode: ScoringMode::RuleOnly,
        }
    }

    pub fn with_scorer(mut self, scorer: HybridScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_default_mode(mut self, mode: ScoringMode) -> Self {
        self.default_mode = mode;
        self
    }

    pub fn default_mode(&self) -> ScoringMode {
        self.default_mode
    }

    /// Runs the full pipeline over caller-supplied items and weather
    pub async fn recommend(
        &self,
        items: Vec<WardrobeItem>,
        weather: &WeatherSnapshot,
        occasion: &str,
        mode: ScoringMode,
    ) -> Vec<OutfitDescriptor> {
        let rules = self.rules.ruleset().await;
        let selected = self.select(items, weather, occasion, mode, &rules).await;
        to_descriptors(&selected, weather, occasion)
    }

    /// Daily outfit flow: fetch wardrobe, resolve weather, recommend, optionally rank
    pub async fn daily_outfits(
        &self,
        request: DailyOutfitRequest,
    ) -> AppResult<Vec<OutfitDescriptor>> {
        validate_daily_request(&request)?;

        let mode = request.mode.unwrap_or(self.default_mode);
        let items = self
            .wardrobe
            .items_for_user(&request.user_id)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    user_id = %request.user_id,
                    source = self.wardrobe.name(),
                    "Wardrobe lookup failed"
                );
                e
            })?;

        if items.is_empty() {
            tracing::info!(user_id = %request.user_id, "Wardrobe is empty, nothing to recommend");
            return Ok(Vec::new());
        }

        let coordinates = Coordinates::from_parts(request.latitude, request.longitude);
        let weather = resolve_weather(self.weather.as_ref(), coordinates).await;
        let rules = self.rules.ruleset().await;

        let mut selected = self
            .select(items, &weather, &request.occasion, mode, &rules)
            .await;

        if let Some(preferences) = request.preferences.as_ref().filter(|p| !p.is_empty()) {
            selected = apply_preferences(selected, preferences, &rules);
        }

        tracing::info!(
            user_id = %request.user_id,
            occasion = %request.occasion,
            mode = %mode,
            temperature = weather.temperature,
            outfits = selected.len(),
            "Daily outfits recommended"
        );

        Ok(to_descriptors(&selected, &weather, &request.occasion))
    }

    async fn select(
        &self,
        items: Vec<WardrobeItem>,
        weather: &WeatherSnapshot,
        occasion: &str,
        mode: ScoringMode,
        rules: &RuleSet,
    ) -> Vec<OutfitCandidate> {
        let total = items.len();
        let items = filter_by_weather(items, weather, rules);
        let items = filter_by_occasion(items, occasion, rules);
        let candidates = generate_candidates(&items, weather, occasion, rules);

        tracing::debug!(
            total,
            eligible = items.len(),
            candidates = candidates.len(),
            "Prepared outfit candidates"
        );

        if candidates.is_empty() {
            return Vec::new();
        }

        self.scorer
            .select(candidates, weather, occasion, mode, rules)
            .await
    }
}

fn validate_daily_request(request: &DailyOutfitRequest) -> AppResult<()> {
    if request.user_id.trim().is_empty() {
        return Err(AppError::InvalidInput("user_id cannot be empty".to_string()));
    }
    if request.occasion.trim().is_empty() {
        return Err(AppError::InvalidInput("occasion cannot be empty".to_string()));
    }
    if request.latitude.is_some() != request.longitude.is_some() {
        return Err(AppError::InvalidInput(
            "latitude and longitude must be supplied together".to_string(),
        ));
    }
    Ok(())
}

/// Reorders selected outfits with the ranking module
fn apply_preferences(
    selected: Vec<OutfitCandidate>,
    preferences: &UserPreferences,
    rules: &RuleSet,
) -> Vec<OutfitCandidate> {
    let rankable: Vec<RankableOutfit> = selected
        .iter()
        .map(|candidate| RankableOutfit {
            id: candidate.id.clone(),
            score: candidate.score.unwrap_or(rules.scoring.base_score),
            tags: candidate.tags(),
        })
        .collect();

    let ranked = rank_outfits(rankable, Some(preferences));

    let mut remaining: Vec<Option<OutfitCandidate>> = selected.into_iter().map(Some).collect();
    ranked
        .into_iter()
        .filter_map(|entry| {
            let slot = remaining
                .iter_mut()
                .find(|slot| slot.as_ref().is_some_and(|c| c.id == entry.id))?;
            let mut candidate = slot.take()?;
            candidate.score = Some(entry.final_score);
            candidate.reasons.extend(
                entry
                    .reasons
                    .matched_preferred
                    .iter()
                    .map(|tag| format!("preferred tag: {}", tag)),
            );
            candidate.reasons.extend(
                entry
                    .reasons
                    .matched_blacklist
                    .iter()
                    .map(|tag| format!("blacklisted tag: {}", tag)),
            );
            Some(candidate)
        })
        .collect()
}
