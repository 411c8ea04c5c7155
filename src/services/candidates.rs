use std::collections::HashMap;

use crate::models::{ItemType, OutfitCandidate, RuleSet, WardrobeItem, WeatherSnapshot};

/// Items partitioned by the slot they can fill
#[derive(Debug, Default)]
struct Wardrobe<'a> {
    tops: Vec<&'a WardrobeItem>,
    bottoms: Vec<&'a WardrobeItem>,
    outerwear: Vec<&'a WardrobeItem>,
    shoes: Vec<&'a WardrobeItem>,
}

impl<'a> Wardrobe<'a> {
    fn partition(items: &'a [WardrobeItem]) -> Self {
        let mut wardrobe = Self::default();
        for item in items {
            match item.item_type {
                ItemType::Top => wardrobe.tops.push(item),
                ItemType::Bottom => wardrobe.bottoms.push(item),
                ItemType::Outerwear => wardrobe.outerwear.push(item),
                ItemType::Shoes => wardrobe.shoes.push(item),
                ItemType::Accessory => {}
            }
        }
        wardrobe
    }
}

/// Builds outfit candidates from filtered items
///
/// Every top/bottom pair is checked for color and style compatibility. Below
/// the outerwear threshold the first `search.outerwear_options` outerwear items
/// are layered on; the first pair of shoes is appended whenever it keeps the
/// outfit compatible and within `output.max_items`. Generation stops as soon
/// as `search.candidate_limit(max_recommendations)` candidates exist, so the
/// search is intentionally not exhaustive.
pub fn generate_candidates(
    items: &[WardrobeItem],
    weather: &WeatherSnapshot,
    occasion: &str,
    rules: &RuleSet,
) -> Vec<OutfitCandidate> {
    let wardrobe = Wardrobe::partition(items);
    let limit = rules.search.candidate_limit(rules.output.max_recommendations);
    let needs_outerwear =
        weather.temperature < rules.search.outerwear_below_celsius && !wardrobe.outerwear.is_empty();
    let first_shoe = wardrobe.shoes.first().copied();

    let mut candidates = Vec::new();

    'pairs: for top in &wardrobe.tops {
        for bottom in &wardrobe.bottoms {
            let base = vec![(*top).clone(), (*bottom).clone()];
            if !is_compatible(&base, rules) {
                continue;
            }

            if needs_outerwear {
                for outer in wardrobe.outerwear.iter().take(rules.search.outerwear_options) {
                    let mut layered = base.clone();
                    layered.push((*outer).clone());
                    if !is_compatible(&layered, rules) {
                        continue;
                    }

                    candidates.push(OutfitCandidate::new(with_shoe(layered, first_shoe, rules)));
                    if candidates.len() >= limit {
                        break 'pairs;
                    }
                }
            } else {
                candidates.push(OutfitCandidate::new(with_shoe(base, first_shoe, rules)));
                if candidates.len() >= limit {
                    break 'pairs;
                }
            }
        }
    }

    tracing::debug!(
        occasion = %occasion,
        tops = wardrobe.tops.len(),
        bottoms = wardrobe.bottoms.len(),
        outerwear = wardrobe.outerwear.len(),
        shoes = wardrobe.shoes.len(),
        needs_outerwear,
        candidates = candidates.len(),
        limit,
        "Generated outfit candidates"
    );

    candidates
}

/// Appends the shoe when it fits the item bound and keeps the outfit compatible
fn with_shoe(
    items: Vec<WardrobeItem>,
    shoe: Option<&WardrobeItem>,
    rules: &RuleSet,
) -> Vec<WardrobeItem> {
    let Some(shoe) = shoe else {
        return items;
    };
    if items.len() >= rules.output.max_items {
        return items;
    }

    let mut with_shoe = items.clone();
    with_shoe.push(shoe.clone());
    if is_compatible(&with_shoe, rules) {
        with_shoe
    } else {
        items
    }
}

fn is_compatible(items: &[WardrobeItem], rules: &RuleSet) -> bool {
    colors_compatible(items, rules) && styles_compatible(items, &rules.style_compatibility)
}

/// Color check: bounded variety, and every distinct pair compatible in at least one direction
pub fn colors_compatible(items: &[WardrobeItem], rules: &RuleSet) -> bool {
    let mut colors: Vec<String> = Vec::new();
    for color in items.iter().flat_map(|item| item.colors.iter()) {
        let color = color.trim().to_lowercase();
        if !color.is_empty() && !colors.contains(&color) {
            colors.push(color);
        }
    }

    if colors.len() > rules.output.max_color_variety {
        return false;
    }

    all_pairs_compatible(&colors, &rules.color_compatibility)
}

/// Style check: zero or one distinct style always passes
pub fn styles_compatible(items: &[WardrobeItem], table: &HashMap<String, Vec<String>>) -> bool {
    let mut styles: Vec<String> = Vec::new();
    for style in items.iter().map(|item| item.style.trim().to_lowercase()) {
        if !style.is_empty() && !styles.contains(&style) {
            styles.push(style);
        }
    }

    styles.len() <= 1 || all_pairs_compatible(&styles, table)
}

fn all_pairs_compatible(values: &[String], table: &HashMap<String, Vec<String>>) -> bool {
    values.iter().enumerate().all(|(i, a)| {
        values[i + 1..]
            .iter()
            .all(|b| lists(table, a, b) || lists(table, b, a))
    })
}

/// Whether `table[from]` names `to`; the table is hand-authored and may be asymmetric
fn lists(table: &HashMap<String, Vec<String>>, from: &str, to: &str) -> bool {
    table
        .iter()
        .find(|(key, _)| key.to_lowercase() == from)
        .map(|(_, compatible)| compatible.iter().any(|c| c.to_lowercase() == to))
        .unwrap_or(false)
}
