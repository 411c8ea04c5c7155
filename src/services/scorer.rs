use std::sync::Arc;

use crate::{
    models::{OutfitCandidate, RuleSet, ScoringMode, WeatherSnapshot},
    services::diversity::select_diverse,
};

/// External outfit scoring model
///
/// Returning `None` means the model could not score the candidate; the hybrid
/// scorer then falls back to rule-only selection for the whole batch.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait OutfitScorer: Send + Sync {
    async fn score(
        &self,
        candidate: &OutfitCandidate,
        weather: &WeatherSnapshot,
        occasion: &str,
    ) -> Option<f64>;

    /// Scorer name for logging
    fn name(&self) -> &'static str;
}

/// Placeholder model: scoring is not implemented yet
pub struct NoopModelScorer;

#[async_trait::async_trait]
impl OutfitScorer for NoopModelScorer {
    async fn score(&self, _: &OutfitCandidate, _: &WeatherSnapshot, _: &str) -> Option<f64> {
        None
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}

/// Chooses the final outfits according to the scoring mode
#[derive(Clone)]
pub struct HybridScorer {
    model: Arc<dyn OutfitScorer>,
}

impl Default for HybridScorer {
    fn default() -> Self {
        Self::new(Arc::new(NoopModelScorer))
    }
}

impl HybridScorer {
    pub fn new(model: Arc<dyn OutfitScorer>) -> Self {
        Self { model }
    }

    /// Selects up to `output.max_recommendations` candidates
    ///
    /// Rule-only mode goes straight to diversity selection. Hybrid mode asks the
    /// model for a score per candidate, blends it into the base score and
    /// re-ranks before selection; if any candidate is left unscored it logs
    /// the gap and behaves exactly like rule-only mode.
    pub async fn select(
        &self,
        candidates: Vec<OutfitCandidate>,
        weather: &WeatherSnapshot,
        occasion: &str,
        mode: ScoringMode,
        rules: &RuleSet,
    ) -> Vec<OutfitCandidate> {
        let count = rules.output.max_recommendations;

        match mode {
            ScoringMode::RuleOnly => select_diverse(candidates, count),
            ScoringMode::Hybrid => {
                match self.model_ranked(&candidates, weather, occasion, rules).await {
                    Some(ranked) => select_diverse(ranked, count),
                    None => {
                        tracing::warn!(
                            scorer = self.model.name(),
                            candidates = candidates.len(),
                            "Model scoring not implemented, falling back to rule-only selection"
                        );
                        select_diverse(candidates, count)
                    }
                }
            }
        }
    }

    async fn model_ranked(
        &self,
        candidates: &[OutfitCandidate],
        weather: &WeatherSnapshot,
        occasion: &str,
        rules: &RuleSet,
    ) -> Option<Vec<OutfitCandidate>> {
        let blend = rules.scoring.model_blend.clamp(0.0, 1.0);
        let mut ranked = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let model_score = self.model.score(candidate, weather, occasion).await?;
            let mut scored = candidate.clone();
            scored.score = Some((1.0 - blend) * rules.scoring.base_score + blend * model_score);
            scored
                .reasons
                .push(format!("{} model score {:.2}", self.model.name(), model_score));
            ranked.push(scored);
        }

        ranked.sort_by(|a, b| {
            b.score
                .unwrap_or_default()
                .total_cmp(&a.score.unwrap_or_default())
        });
        Some(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemType, WardrobeItem};

    fn candidates() -> Vec<OutfitCandidate> {
        (0..5)
            .map(|i| {
                OutfitCandidate::new(vec![
                    WardrobeItem::new(format!("t{}", i), ItemType::Top),
                    WardrobeItem::new(format!("b{}", i), ItemType::Bottom),
                ])
            })
            .collect()
    }

    fn weather() -> WeatherSnapshot {
        WeatherSnapshot::new(18.0, "Cloudy", 55.0)
    }

    #[tokio::test]
    async fn test_rule_only_applies_diversity_selection() {
        let rules = RuleSet::builtin();
        let selected = HybridScorer::default()
            .select(candidates(), &weather(), "casual", ScoringMode::RuleOnly, &rules)
            .await;

        assert_eq!(selected.len(), rules.output.max_recommendations);
        assert_eq!(selected[0].id, "outfit_t0_b0");
    }

    #[tokio::test]
    async fn test_hybrid_with_noop_model_matches_rule_only() {
        let rules = RuleSet::builtin();
        let scorer = HybridScorer::default();

        let rule_only = scorer
            .select(candidates(), &weather(), "casual", ScoringMode::RuleOnly, &rules)
            .await;
        let hybrid = scorer
            .select(candidates(), &weather(), "casual", ScoringMode::Hybrid, &rules)
            .await;

        assert_eq!(hybrid, rule_only);
        assert!(hybrid.iter().all(|c| c.score.is_none()));
    }

    #[tokio::test]
    async fn test_hybrid_reranks_by_model_score() {
        let mut model = MockOutfitScorer::new();
        model
            .expect_score()
            .returning(|candidate, _, _| Some(if candidate.id == "outfit_t4_b4" { 0.9 } else { 0.1 }));
        model.expect_name().return_const("mock");

        let rules = RuleSet::builtin();
        let selected = HybridScorer::new(Arc::new(model))
            .select(candidates(), &weather(), "casual", ScoringMode::Hybrid, &rules)
            .await;

        assert_eq!(selected[0].id, "outfit_t4_b4");
        let blended = selected[0].score.unwrap();
        assert!((blended - 0.7).abs() < 1e-9);
        assert_eq!(selected.len(), 3);
    }

    #[tokio::test]
    async fn test_rule_only_never_consults_model() {
        let mut model = MockOutfitScorer::new();
        model.expect_score().never();
        model.expect_name().return_const("mock");

        let selected = HybridScorer::new(Arc::new(model))
            .select(candidates(), &weather(), "casual", ScoringMode::RuleOnly, &RuleSet::builtin())
            .await;
        assert_eq!(selected.len(), 3);
    }
}
