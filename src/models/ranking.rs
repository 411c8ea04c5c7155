use serde::{Deserialize, Serialize};

/// Any scored, tagged outfit that can be reordered by user taste
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankableOutfit {
    pub id: String,
    pub score: f64,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl RankableOutfit {
    pub fn new(id: impl Into<String>, score: f64, tags: &[&str]) -> Self {
        Self {
            id: id.into(),
            score,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Tags a user has declared as liked or disliked
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub preferred_tags: Vec<String>,
    #[serde(default)]
    pub blacklist_tags: Vec<String>,
}

impl UserPreferences {
    pub fn new(preferred_tags: &[&str], blacklist_tags: &[&str]) -> Self {
        Self {
            preferred_tags: preferred_tags.iter().map(|t| t.to_string()).collect(),
            blacklist_tags: blacklist_tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.preferred_tags.is_empty() && self.blacklist_tags.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreAdjustments {
    pub preference_boost: f64,
    pub blacklist_penalty: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankingReasons {
    pub matched_preferred: Vec<String>,
    pub matched_blacklist: Vec<String>,
}

/// A rankable outfit enriched with its final score and the adjustments behind it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankedOutfit {
    pub id: String,
    pub score: f64,
    pub tags: Vec<String>,
    pub final_score: f64,
    pub adjustments: ScoreAdjustments,
    pub reasons: RankingReasons,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rankable_outfit_without_tags_deserializes() {
        let outfit: RankableOutfit = serde_json::from_str(r#"{"id": "o1", "score": 0.3}"#).unwrap();
        assert!(outfit.tags.is_empty());
    }

    #[test]
    fn test_preferences_accept_partial_payload() {
        let prefs: UserPreferences =
            serde_json::from_str(r#"{"preferredTags": ["minimal"]}"#).unwrap();
        assert_eq!(prefs.preferred_tags, vec!["minimal"]);
        assert!(prefs.blacklist_tags.is_empty());
        assert!(!prefs.is_empty());
    }
}
