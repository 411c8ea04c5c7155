use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Garment slot a wardrobe item fills in an outfit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Top,
    Bottom,
    Outerwear,
    Shoes,
    Accessory,
}

impl ItemType {
    /// Parses a free-form type label coming from a wardrobe source
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "top" | "tops" | "shirt" => Some(ItemType::Top),
            "bottom" | "bottoms" | "pants" => Some(ItemType::Bottom),
            "outerwear" | "outer" | "jacket" | "coat" => Some(ItemType::Outerwear),
            "shoes" | "shoe" | "footwear" => Some(ItemType::Shoes),
            "accessory" | "accessories" => Some(ItemType::Accessory),
            _ => None,
        }
    }

    /// Human-readable label used when an item has no name
    pub fn label(&self) -> &'static str {
        match self {
            ItemType::Top => "Top",
            ItemType::Bottom => "Bottom",
            ItemType::Outerwear => "Outerwear",
            ItemType::Shoes => "Shoes",
            ItemType::Accessory => "Accessory",
        }
    }
}

impl Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label().to_lowercase())
    }
}

/// A garment owned by the user, as supplied by a wardrobe source
///
/// Read-only from the recommender's point of view: filters and the
/// candidate generator only ever clone these into request-local outfits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WardrobeItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub season: Vec<String>,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub image_url: String,
}

impl WardrobeItem {
    /// Creates an item with only the mandatory fields set
    pub fn new(id: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            item_type,
            colors: Vec::new(),
            style: String::new(),
            season: Vec::new(),
            material: String::new(),
            image_url: String::new(),
        }
    }

    /// Name shown to the user, falling back to the garment type
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.item_type.label()
        } else {
            &self.name
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_colors(mut self, colors: &[&str]) -> Self {
        self.colors = colors.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_seasons(mut self, seasons: &[&str]) -> Self {
        self.season = seasons.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = material.into();
        self
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }
}
