pub mod outfit;
pub mod ranking;
pub mod rules;
pub mod wardrobe;
pub mod weather;

use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub use outfit::{OutfitCandidate, OutfitDescriptor, OutfitItemView};
pub use ranking::{RankableOutfit, RankedOutfit, RankingReasons, ScoreAdjustments, UserPreferences};
pub use rules::{
    FilterSpec, OccasionRule, OutputSettings, RuleError, RuleSet, ScoringWeights, SearchBounds,
    TemperatureRule,
};
pub use wardrobe::{ItemType, WardrobeItem};
pub use weather::{Coordinates, WeatherSnapshot};

/// How selected candidates are scored before diversity selection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Diversity selection over rule-generated candidates only
    #[default]
    RuleOnly,
    /// External model scoring before selection, falling back to rule-only
    Hybrid,
}

impl Display for ScoringMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringMode::RuleOnly => write!(f, "rule_only"),
            ScoringMode::Hybrid => write!(f, "hybrid"),
        }
    }
}

/// Request for the daily outfit flow
#[derive(Debug, Clone, Deserialize)]
pub struct DailyOutfitRequest {
    pub user_id: String,
    pub occasion: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub mode: Option<ScoringMode>,
    #[serde(default)]
    pub preferences: Option<UserPreferences>,
}

/// Request to run the pipeline over caller-supplied items and weather
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendRequest {
    pub items: Vec<WardrobeItem>,
    pub weather: WeatherSnapshot,
    pub occasion: String,
    #[serde(default)]
    pub mode: Option<ScoringMode>,
}

/// Request to rank an arbitrary outfit list against user preferences
#[derive(Debug, Clone, Deserialize)]
pub struct RankRequest {
    pub outfits: Vec<RankableOutfit>,
    #[serde(default)]
    pub preferences: Option<UserPreferences>,
}
