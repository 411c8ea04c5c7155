use std::collections::HashSet;

use crate::models::{FilterSpec, OccasionRule, RuleSet, WardrobeItem, WeatherSnapshot};

/// Season tag that satisfies any season requirement
const ALL_SEASONS: &str = "all";

/// Narrows items to those suitable for the temperature band matching the weather
///
/// Fails open: when no band contains the temperature every item passes.
pub fn filter_by_weather(
    items: Vec<WardrobeItem>,
    weather: &WeatherSnapshot,
    rules: &RuleSet,
) -> Vec<WardrobeItem> {
    let Some(rule) = rules.temperature_rule(weather.temperature) else {
        tracing::warn!(
            temperature = weather.temperature,
            "No temperature rule matches, skipping weather filter"
        );
        return items;
    };

    let before = items.len();
    let kept: Vec<WardrobeItem> = items
        .into_iter()
        .filter(|item| suits_temperature(item, &rule.filter))
        .collect();

    tracing::debug!(
        temperature = weather.temperature,
        band_min = rule.min,
        band_max = rule.max,
        before,
        after = kept.len(),
        "Applied weather filter"
    );

    kept
}

fn suits_temperature(item: &WardrobeItem, filter: &FilterSpec) -> bool {
    let seasons: HashSet<String> = item.season.iter().map(|s| s.trim().to_lowercase()).collect();

    if !filter.seasons.is_empty()
        && !seasons.contains(ALL_SEASONS)
        && !filter
            .seasons
            .iter()
            .any(|allowed| seasons.contains(&allowed.to_lowercase()))
    {
        return false;
    }

    if filter
        .exclude_seasons
        .iter()
        .any(|excluded| seasons.contains(&excluded.to_lowercase()))
    {
        return false;
    }

    // recommended_materials never affects eligibility
    let material = item.material.to_lowercase();
    !filter
        .avoid_materials
        .iter()
        .map(|avoid| avoid.trim().to_lowercase())
        .any(|avoid| !avoid.is_empty() && material.contains(&avoid))
}

/// Narrows items by the avoided styles and colors of the requested occasion
///
/// Fails open: an unknown occasion lets every item through.
pub fn filter_by_occasion(
    items: Vec<WardrobeItem>,
    occasion: &str,
    rules: &RuleSet,
) -> Vec<WardrobeItem> {
    let Some(rule) = rules.occasion(occasion) else {
        tracing::warn!(occasion = %occasion, "Unknown occasion, skipping occasion filter");
        return items;
    };

    let before = items.len();
    let kept: Vec<WardrobeItem> = items
        .into_iter()
        .filter(|item| suits_occasion(item, rule))
        .collect();

    tracing::debug!(occasion = %occasion, before, after = kept.len(), "Applied occasion filter");

    kept
}

fn suits_occasion(item: &WardrobeItem, rule: &OccasionRule) -> bool {
    let style = item.style.trim().to_lowercase();
    if rule
        .avoid_styles
        .iter()
        .any(|avoid| avoid.to_lowercase() == style)
    {
        return false;
    }

    let avoided: HashSet<String> = rule.avoid_colors.iter().map(|c| c.to_lowercase()).collect();
    !item
        .colors
        .iter()
        .any(|color| avoided.contains(&color.trim().to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemType, TemperatureRule};
    use std::collections::HashMap;

    fn banded_rules() -> RuleSet {
        let mut rules = RuleSet::builtin();
        rules.temperature_rules = vec![
            TemperatureRule {
                min: -30.0,
                max: 9.99,
                filter: FilterSpec {
                    seasons: vec!["winter".to_string(), "autumn".to_string()],
                    exclude_seasons: vec!["summer".to_string()],
                    avoid_materials: vec!["linen".to_string()],
                    recommended_materials: vec!["wool".to_string()],
                },
            },
            TemperatureRule {
                min: 10.0,
                max: 24.99,
                filter: FilterSpec {
                    seasons: vec!["spring".to_string(), "autumn".to_string()],
                    ..FilterSpec::default()
                },
            },
            TemperatureRule {
                min: 25.0,
                max: 45.0,
                filter: FilterSpec {
                    seasons: vec!["summer".to_string()],
                    avoid_materials: vec!["wool".to_string(), "down".to_string()],
                    ..FilterSpec::default()
                },
            },
        ];
        rules
    }

    fn occasion_rules() -> RuleSet {
        let mut rules = RuleSet::builtin();
        let mut occasions = HashMap::new();
        occasions.insert(
            "Work".to_string(),
            OccasionRule {
                avoid_styles: vec!["sporty".to_string()],
                avoid_colors: vec!["neon".to_string()],
                ..OccasionRule::default()
            },
        );
        rules.occasion_rules = occasions;
        rules
    }

    #[test]
    fn test_contiguous_bands_select_exactly_one_rule() {
        let rules = banded_rules();
        for temperature in [-30.0, -5.0, 9.5, 10.0, 17.0, 24.99, 25.0, 38.0, 45.0] {
            let matching = rules
                .temperature_rules
                .iter()
                .filter(|rule| rule.contains(temperature))
                .count();
            assert_eq!(matching, 1, "temperature {}", temperature);
        }
    }

    #[test]
    fn test_unmatched_temperature_is_noop() {
        let rules = banded_rules();
        let items = vec![
            WardrobeItem::new("t1", ItemType::Top).with_seasons(&["summer"]),
            WardrobeItem::new("t2", ItemType::Top).with_material("linen"),
        ];

        let kept = filter_by_weather(items.clone(), &WeatherSnapshot::new(60.0, "Clear", 10.0), &rules);
        assert_eq!(kept, items);
    }

    #[test]
    fn test_weather_filter_applies_seasons_and_materials() {
        let rules = banded_rules();
        let items = vec![
            WardrobeItem::new("coat", ItemType::Outerwear)
                .with_seasons(&["winter"])
                .with_material("Wool blend"),
            WardrobeItem::new("shirt", ItemType::Top)
                .with_seasons(&["winter", "summer"])
                .with_material("cotton"),
            WardrobeItem::new("linen", ItemType::Top)
                .with_seasons(&["autumn"])
                .with_material("100% LINEN"),
            WardrobeItem::new("tee", ItemType::Top).with_seasons(&["spring"]),
            WardrobeItem::new("jeans", ItemType::Bottom).with_seasons(&["all"]),
            WardrobeItem::new("untagged", ItemType::Bottom),
        ];

        let kept = filter_by_weather(items, &WeatherSnapshot::new(3.0, "Snow", 80.0), &rules);
        let ids: Vec<&str> = kept.iter().map(|i| i.id.as_str()).collect();

        // wool is only recommended for this band, so the coat stays
        assert_eq!(ids, vec!["coat", "jeans"]);
    }

    #[test]
    fn test_weather_filter_without_season_requirement_keeps_untagged() {
        let mut rules = banded_rules();
        rules.temperature_rules[1].filter.seasons.clear();
        let items = vec![WardrobeItem::new("untagged", ItemType::Top)];

        let kept = filter_by_weather(items, &WeatherSnapshot::new(15.0, "Cloudy", 60.0), &rules);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_occasion_filter_excludes_styles_and_colors() {
        let rules = occasion_rules();
        let items = vec![
            WardrobeItem::new("blazer", ItemType::Outerwear).with_style("formal"),
            WardrobeItem::new("track", ItemType::Bottom).with_style("Sporty"),
            WardrobeItem::new("loud", ItemType::Top).with_colors(&["black", "Neon"]),
            WardrobeItem::new("plain", ItemType::Top).with_colors(&["white"]),
        ];

        let kept = filter_by_occasion(items, "work", &rules);
        let ids: Vec<&str> = kept.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["blazer", "plain"]);
    }

    #[test]
    fn test_unknown_occasion_is_noop() {
        let rules = occasion_rules();
        let items = vec![WardrobeItem::new("track", ItemType::Bottom).with_style("sporty")];

        let kept = filter_by_occasion(items.clone(), "wedding", &rules);
        assert_eq!(kept, items);
    }
}
