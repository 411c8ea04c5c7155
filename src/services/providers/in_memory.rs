use std::collections::HashMap;
use std::path::Path;

use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::WardrobeItem,
    services::providers::WardrobeSource,
};

/// Wardrobe kept in process memory, keyed by user id
#[derive(Default)]
pub struct InMemoryWardrobe {
    wardrobes: RwLock<HashMap<String, Vec<WardrobeItem>>>,
}

impl InMemoryWardrobe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(wardrobes: HashMap<String, Vec<WardrobeItem>>) -> Self {
        Self {
            wardrobes: RwLock::new(wardrobes),
        }
    }

    /// Loads a JSON fixture of the form `{ "<user id>": [item, ...] }`
    pub async fn from_file(path: &Path) -> AppResult<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let wardrobes: HashMap<String, Vec<WardrobeItem>> = serde_json::from_str(&content)
            .map_err(|e| AppError::Internal(format!("Invalid wardrobe file: {}", e)))?;

        tracing::info!(
            path = %path.display(),
            users = wardrobes.len(),
            items = wardrobes.values().map(Vec::len).sum::<usize>(),
            "Loaded wardrobe fixture"
        );

        Ok(Self::with_items(wardrobes))
    }

    /// Replaces a user's wardrobe
    pub async fn set_items(&self, user_id: impl Into<String>, items: Vec<WardrobeItem>) {
        self.wardrobes.write().await.insert(user_id.into(), items);
    }
}

#[async_trait::async_trait]
impl WardrobeSource for InMemoryWardrobe {
    async fn items_for_user(&self, user_id: &str) -> AppResult<Vec<WardrobeItem>> {
        Ok(self
            .wardrobes
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}
