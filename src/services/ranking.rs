use std::collections::HashSet;

use crate::models::{
    RankableOutfit, RankedOutfit, RankingReasons, ScoreAdjustments, UserPreferences,
};

/// Added to the score for every outfit tag the user prefers
pub const PREFERENCE_BOOST_PER_TAG: f64 = 0.1;

/// Share of the boosted score removed when any tag is blacklisted
pub const BLACKLIST_PENALTY_RATIO: f64 = 0.8;

/// Reorders scored, tagged outfits by user taste
///
/// Boosts are applied first, then the blacklist penalty on the boosted score,
/// and the result is clamped into `[0, 1]`. Without preferences the final
/// score is simply the clamped input score. Output is sorted by final score,
/// highest first.
pub fn rank_outfits(
    outfits: Vec<RankableOutfit>,
    preferences: Option<&UserPreferences>,
) -> Vec<RankedOutfit> {
    let preferred: HashSet<&str> = preferences
        .map(|p| p.preferred_tags.iter().map(String::as_str).collect())
        .unwrap_or_default();
    let blacklisted: HashSet<&str> = preferences
        .map(|p| p.blacklist_tags.iter().map(String::as_str).collect())
        .unwrap_or_default();

    let mut ranked: Vec<RankedOutfit> = outfits
        .into_iter()
        .map(|outfit| rank_one(outfit, &preferred, &blacklisted))
        .collect();

    ranked.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
    ranked
}

fn rank_one(
    outfit: RankableOutfit,
    preferred: &HashSet<&str>,
    blacklisted: &HashSet<&str>,
) -> RankedOutfit {
    let matched_preferred: Vec<String> = outfit
        .tags
        .iter()
        .filter(|tag| preferred.contains(tag.as_str()))
        .cloned()
        .collect();
    let matched_blacklist: Vec<String> = outfit
        .tags
        .iter()
        .filter(|tag| blacklisted.contains(tag.as_str()))
        .cloned()
        .collect();

    let base = if outfit.score.is_nan() { 0.0 } else { outfit.score };
    let preference_boost = matched_preferred.len() as f64 * PREFERENCE_BOOST_PER_TAG;
    let boosted = base + preference_boost;

    let blacklist_penalty = if matched_blacklist.is_empty() {
        0.0
    } else {
        boosted * BLACKLIST_PENALTY_RATIO
    };
    let adjusted = if matched_blacklist.is_empty() {
        boosted
    } else {
        boosted * (1.0 - BLACKLIST_PENALTY_RATIO)
    };

    RankedOutfit {
        id: outfit.id,
        score: outfit.score,
        tags: outfit.tags,
        final_score: adjusted.clamp(0.0, 1.0),
        adjustments: ScoreAdjustments {
            preference_boost,
            blacklist_penalty,
        },
        reasons: RankingReasons {
            matched_preferred,
            matched_blacklist,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_preferred_outfit_ranks_first() {
        let outfits = vec![
            RankableOutfit::new("o1", 0.9, &["minimal", "work"]),
            RankableOutfit::new("o2", 0.4, &["sport"]),
        ];
        let prefs = UserPreferences::new(&["minimal"], &["sport"]);

        let ranked = rank_outfits(outfits, Some(&prefs));

        assert_eq!(ranked[0].id, "o1");
        assert!(approx(ranked[0].final_score, 1.0));
        assert!(approx(ranked[0].adjustments.preference_boost, 0.1));
        assert_eq!(ranked[0].reasons.matched_preferred, vec!["minimal"]);

        assert!(approx(ranked[1].adjustments.blacklist_penalty, 0.32));
        assert!(approx(ranked[1].final_score, 0.08));
        assert_eq!(ranked[1].reasons.matched_blacklist, vec!["sport"]);
    }

    #[test]
    fn test_zero_score_without_preferences_stays_zero() {
        let ranked = rank_outfits(vec![RankableOutfit::new("o1", 0.0, &[])], None);
        assert_eq!(ranked[0].final_score, 0.0);
        assert_eq!(ranked[0].adjustments, ScoreAdjustments::default());
    }

    #[test]
    fn test_final_score_is_clamped() {
        let ranked = rank_outfits(
            vec![
                RankableOutfit::new("low", -0.5, &[]),
                RankableOutfit::new("high", 1.5, &[]),
            ],
            None,
        );

        assert_eq!(ranked[0].id, "high");
        assert_eq!(ranked[0].final_score, 1.0);
        assert_eq!(ranked[1].final_score, 0.0);
    }

    #[test]
    fn test_missing_tags_mean_no_match() {
        let outfit: RankableOutfit = serde_json::from_str(r#"{"id": "o1", "score": 0.5}"#).unwrap();
        let prefs = UserPreferences::new(&["minimal"], &[]);

        let ranked = rank_outfits(vec![outfit], Some(&prefs));

        assert_eq!(ranked[0].adjustments.preference_boost, 0.0);
        assert_eq!(ranked[0].final_score, 0.5);
    }

    #[test]
    fn test_empty_preferences_change_nothing() {
        let ranked = rank_outfits(
            vec![RankableOutfit::new("o1", 0.6, &["minimal"])],
            Some(&UserPreferences::default()),
        );
        assert_eq!(ranked[0].final_score, 0.6);
        assert!(ranked[0].reasons.matched_preferred.is_empty());
    }

    #[test]
    fn test_penalty_applies_after_boost() {
        let prefs = UserPreferences::new(&["minimal", "linen"], &["loud"]);
        let ranked = rank_outfits(
            vec![RankableOutfit::new("o1", 0.3, &["minimal", "linen", "loud"])],
            Some(&prefs),
        );

        // (0.3 + 0.2) * 0.2, not 0.3 * 0.2 + 0.2
        assert!(approx(ranked[0].final_score, 0.1));
        assert!(approx(ranked[0].adjustments.blacklist_penalty, 0.4));
    }

    #[test]
    fn test_output_sorted_non_increasing() {
        let prefs = UserPreferences::new(&["a"], &["b"]);
        let outfits: Vec<RankableOutfit> = (0..20)
            .map(|i| {
                let tags: &[&str] = match i % 3 {
                    0 => &["a"],
                    1 => &["b"],
                    _ => &["a", "b"],
                };
                RankableOutfit::new(format!("o{}", i), (i as f64 - 5.0) / 10.0, tags)
            })
            .collect();

        let ranked = rank_outfits(outfits, Some(&prefs));

        assert_eq!(ranked.len(), 20);
        for pair in ranked.windows(2) {
            assert!(pair[0].final_score >= pair[1].final_score);
        }
        assert!(ranked.iter().all(|r| (0.0..=1.0).contains(&r.final_score)));
    }
}
