use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Validation failures for a rule configuration document
#[derive(Debug, Error, PartialEq)]
pub enum RuleError {
    #[error("temperature rule {index} has min {min} above max {max}")]
    InvertedBand { index: usize, min: f64, max: f64 },
    #[error("max_recommendations must be at least 1")]
    NoRecommendations,
    #[error("item bounds are invalid: min {min}, max {max}")]
    ItemBounds { min: usize, max: usize },
    #[error("max_color_variety must be at least 1")]
    NoColorVariety,
    #[error("search bound `{0}` must be at least 1")]
    SearchBound(&'static str),
}

/// Complete declarative ruleset driving filtering, generation and output limits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleSet {
    #[serde(default)]
    pub temperature_rules: Vec<TemperatureRule>,
    #[serde(default)]
    pub occasion_rules: HashMap<String, OccasionRule>,
    #[serde(default)]
    pub color_compatibility: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub style_compatibility: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub scoring: ScoringWeights,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub search: SearchBounds,
}

/// Celsius band mapped to a filter spec; bounds are inclusive
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemperatureRule {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub filter: FilterSpec,
}

impl TemperatureRule {
    pub fn contains(&self, temperature: f64) -> bool {
        temperature >= self.min && temperature <= self.max
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterSpec {
    /// Items must carry at least one of these season tags (empty = any)
    #[serde(default)]
    pub seasons: Vec<String>,
    /// Items tagged with any of these seasons are excluded
    #[serde(default)]
    pub exclude_seasons: Vec<String>,
    /// Case-insensitive substrings matched against item material
    #[serde(default)]
    pub avoid_materials: Vec<String>,
    /// Parsed and carried, never used to exclude or score items
    #[serde(default)]
    pub recommended_materials: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OccasionRule {
    #[serde(default)]
    pub preferred_styles: Vec<String>,
    #[serde(default)]
    pub avoid_styles: Vec<String>,
    #[serde(default)]
    pub avoid_colors: Vec<String>,
    #[serde(default)]
    pub required_colors: Vec<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringWeights {
    /// Seed score given to rule-generated outfits before preference ranking
    #[serde(default = "default_base_score")]
    pub base_score: f64,
    /// Share of an external model score blended into the base score
    #[serde(default = "default_model_blend")]
    pub model_blend: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base_score: default_base_score(),
            model_blend: default_model_blend(),
        }
    }
}

fn default_base_score() -> f64 {
    0.5
}

fn default_model_blend() -> f64 {
    0.5
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputSettings {
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,
    #[serde(default = "default_min_items")]
    pub min_items: usize,
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    #[serde(default = "default_max_color_variety")]
    pub max_color_variety: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            max_recommendations: default_max_recommendations(),
            min_items: default_min_items(),
            max_items: default_max_items(),
            max_color_variety: default_max_color_variety(),
        }
    }
}

fn default_max_recommendations() -> usize {
    3
}

fn default_min_items() -> usize {
    2
}

fn default_max_items() -> usize {
    4
}

fn default_max_color_variety() -> usize {
    3
}

/// Bounds on the combinatorial candidate search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchBounds {
    /// How many outerwear options are tried per top/bottom pair
    #[serde(default = "default_outerwear_options")]
    pub outerwear_options: usize,
    /// Generation stops once candidates reach this multiple of max_recommendations
    #[serde(default = "default_candidate_multiplier")]
    pub candidate_multiplier: usize,
    /// Outerwear is layered on only strictly below this temperature
    #[serde(default = "default_outerwear_below")]
    pub outerwear_below_celsius: f64,
}

impl Default for SearchBounds {
    fn default() -> Self {
        Self {
            outerwear_options: default_outerwear_options(),
            candidate_multiplier: default_candidate_multiplier(),
            outerwear_below_celsius: default_outerwear_below(),
        }
    }
}

fn default_outerwear_options() -> usize {
    3
}

fn default_candidate_multiplier() -> usize {
    3
}

fn default_outerwear_below() -> f64 {
    20.0
}

impl SearchBounds {
    /// Maximum number of candidates the generator accumulates
    pub fn candidate_limit(&self, max_recommendations: usize) -> usize {
        self.candidate_multiplier.saturating_mul(max_recommendations)
    }
}

impl RuleSet {
    /// Built-in ruleset used when no valid document can be loaded
    pub fn builtin() -> Self {
        let neutrals = ["black", "white", "gray", "navy", "beige"];
        let color_compatibility = neutrals
            .iter()
            .map(|color| {
                (
                    color.to_string(),
                    neutrals.iter().map(|c| c.to_string()).collect(),
                )
            })
            .collect();

        let mut style_compatibility = HashMap::new();
        style_compatibility.insert(
            "casual".to_string(),
            vec!["casual".to_string(), "sporty".to_string(), "minimal".to_string()],
        );

        let mut occasion_rules = HashMap::new();
        occasion_rules.insert(
            "casual".to_string(),
            OccasionRule {
                preferred_styles: vec!["casual".to_string()],
                description: "Relaxed everyday wear".to_string(),
                ..OccasionRule::default()
            },
        );

        Self {
            temperature_rules: vec![TemperatureRule {
                min: -50.0,
                max: 60.0,
                filter: FilterSpec::default(),
            }],
            occasion_rules,
            color_compatibility,
            style_compatibility,
            scoring: ScoringWeights::default(),
            output: OutputSettings::default(),
            search: SearchBounds::default(),
        }
    }

    /// Checks structural constraints serde cannot express
    pub fn validate(&self) -> Result<(), RuleError> {
        for (index, rule) in self.temperature_rules.iter().enumerate() {
            if rule.min > rule.max || rule.min.is_nan() || rule.max.is_nan() {
                return Err(RuleError::InvertedBand {
                    index,
                    min: rule.min,
                    max: rule.max,
                });
            }
        }

        if self.output.max_recommendations == 0 {
            return Err(RuleError::NoRecommendations);
        }

        if self.output.min_items == 0 || self.output.min_items > self.output.max_items {
            return Err(RuleError::ItemBounds {
                min: self.output.min_items,
                max: self.output.max_items,
            });
        }

        if self.output.max_color_variety == 0 {
            return Err(RuleError::NoColorVariety);
        }

        if self.search.outerwear_options == 0 {
            return Err(RuleError::SearchBound("outerwear_options"));
        }

        if self.search.candidate_multiplier == 0 {
            return Err(RuleError::SearchBound("candidate_multiplier"));
        }

        Ok(())
    }

    /// Case-folded occasion lookup
    pub fn occasion(&self, key: &str) -> Option<&OccasionRule> {
        let key = key.trim().to_lowercase();
        self.occasion_rules
            .iter()
            .find(|(name, _)| name.to_lowercase() == key)
            .map(|(_, rule)| rule)
    }

    /// First temperature band containing the given temperature
    pub fn temperature_rule(&self, temperature: f64) -> Option<&TemperatureRule> {
        self.temperature_rules
            .iter()
            .find(|rule| rule.contains(temperature))
    }
}
