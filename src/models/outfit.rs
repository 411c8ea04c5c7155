use serde::{Deserialize, Serialize};

use super::{ItemType, WardrobeItem};

/// One concrete combination of wardrobe items considered for recommendation
#[derive(Debug, Clone, PartialEq)]
pub struct OutfitCandidate {
    pub id: String,
    pub items: Vec<WardrobeItem>,
    pub score: Option<f64>,
    pub reasons: Vec<String>,
}

impl OutfitCandidate {
    /// Creates a candidate whose id is derived from its item ids
    pub fn new(items: Vec<WardrobeItem>) -> Self {
        let id = items
            .iter()
            .map(|item| item.id.as_str())
            .collect::<Vec<_>>()
            .join("_");

        Self {
            id: format!("outfit_{}", id),
            items,
            score: None,
            reasons: Vec::new(),
        }
    }

    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.id.as_str())
    }

    pub fn first_of(&self, item_type: ItemType) -> Option<&WardrobeItem> {
        self.items.iter().find(|item| item.item_type == item_type)
    }

    /// Distinct non-empty styles in item order
    pub fn styles(&self) -> Vec<&str> {
        let mut styles: Vec<&str> = Vec::new();
        for style in self.items.iter().map(|item| item.style.trim()) {
            if !style.is_empty() && !styles.contains(&style) {
                styles.push(style);
            }
        }
        styles
    }

    /// Distinct colors across all items, case-folded, in item order
    pub fn colors(&self) -> Vec<String> {
        let mut colors: Vec<String> = Vec::new();
        for color in self.items.iter().flat_map(|item| item.colors.iter()) {
            let color = color.trim().to_lowercase();
            if !color.is_empty() && !colors.contains(&color) {
                colors.push(color);
            }
        }
        colors
    }

    /// Tags describing this outfit for preference ranking
    pub fn tags(&self) -> Vec<String> {
        let styles = self.styles().into_iter().map(str::to_lowercase);
        let mut tags: Vec<String> = Vec::new();
        for tag in styles.chain(self.colors()) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }
}

/// Outfit as handed to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutfitDescriptor {
    pub id: String,
    pub title: String,
    pub description: String,
    pub hero_image_url: String,
    pub items: Vec<OutfitItemView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutfitItemView {
    pub id: String,
    pub name: String,
    pub image_url: String,
}

impl From<&WardrobeItem> for OutfitItemView {
    fn from(item: &WardrobeItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.display_name().to_string(),
            image_url: item.image_url.clone(),
        }
    }
}
