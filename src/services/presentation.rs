use crate::models::{
    ItemType, OutfitCandidate, OutfitDescriptor, OutfitItemView, WeatherSnapshot,
};

const ITEM_SEPARATOR: &str = " + ";

/// Temperature bucket used in outfit titles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBucket {
    Cold,
    Cool,
    Warm,
    Hot,
}

impl TemperatureBucket {
    pub fn from_celsius(temperature: f64) -> Self {
        if temperature < 10.0 {
            TemperatureBucket::Cold
        } else if temperature < 20.0 {
            TemperatureBucket::Cool
        } else if temperature < 28.0 {
            TemperatureBucket::Warm
        } else {
            TemperatureBucket::Hot
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemperatureBucket::Cold => "Cozy",
            TemperatureBucket::Cool => "Layered",
            TemperatureBucket::Warm => "Easy",
            TemperatureBucket::Hot => "Breezy",
        }
    }
}

fn occasion_label(occasion: &str) -> String {
    let label = match occasion.trim().to_lowercase().as_str() {
        "casual" => "everyday",
        "work" | "office" => "office",
        "formal" => "formal",
        "date" => "date-night",
        "sport" | "gym" => "active",
        "party" => "party",
        "travel" => "travel",
        _ => return occasion.trim().to_string(),
    };
    label.to_string()
}

/// Maps selected candidates to outward outfit descriptors
pub fn to_descriptors(
    candidates: &[OutfitCandidate],
    weather: &WeatherSnapshot,
    occasion: &str,
) -> Vec<OutfitDescriptor> {
    candidates
        .iter()
        .map(|candidate| to_descriptor(candidate, weather, occasion))
        .collect()
}

fn to_descriptor(
    candidate: &OutfitCandidate,
    weather: &WeatherSnapshot,
    occasion: &str,
) -> OutfitDescriptor {
    let bucket = TemperatureBucket::from_celsius(weather.temperature);
    let mut title = format!("{} {} look", bucket.label(), occasion_label(occasion));
    if let Some(style) = candidate.styles().first() {
        title.push_str(&format!(" ({})", style));
    }

    let names: Vec<&str> = candidate.items.iter().map(|item| item.display_name()).collect();
    let description = format!(
        "{}, {:.0}°C",
        names.join(ITEM_SEPARATOR),
        weather.temperature
    );

    OutfitDescriptor {
        id: candidate.id.clone(),
        title,
        description,
        hero_image_url: hero_image(candidate),
        items: candidate.items.iter().map(OutfitItemView::from).collect(),
    }
}

/// Outerwear image, else top image, else first item image, else empty
fn hero_image(candidate: &OutfitCandidate) -> String {
    let image_of = |item_type: ItemType| {
        candidate
            .items
            .iter()
            .filter(|item| item.item_type == item_type)
            .map(|item| item.image_url.as_str())
            .find(|url| !url.is_empty())
    };

    image_of(ItemType::Outerwear)
        .or_else(|| image_of(ItemType::Top))
        .or_else(|| {
            candidate
                .items
                .first()
                .map(|item| item.image_url.as_str())
                .filter(|url| !url.is_empty())
        })
        .unwrap_or_default()
        .to_string()
}
