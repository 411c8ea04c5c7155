//! Postgres-backed wardrobe source
//!
//! Reads the `wardrobe_items` table owned by the wardrobe service. Colors and
//! seasons are stored as `TEXT[]`; usage columns (wear counts, purchase data)
//! exist in the table but are not selected.

use crate::{
    error::AppResult,
    models::{ItemType, WardrobeItem},
    services::providers::WardrobeSource,
};
use sqlx::{FromRow, PgPool};

#[derive(Debug, FromRow)]
struct WardrobeRow {
    id: String,
    name: Option<String>,
    item_type: String,
    colors: Option<Vec<String>>,
    style: Option<String>,
    seasons: Option<Vec<String>>,
    material: Option<String>,
    image_url: Option<String>,
}

impl WardrobeRow {
    fn into_item(self) -> Option<WardrobeItem> {
        let Some(item_type) = ItemType::parse(&self.item_type) else {
            tracing::debug!(
                item_id = %self.id,
                item_type = %self.item_type,
                "Skipping wardrobe item with unknown type"
            );
            return None;
        };

        Some(WardrobeItem {
            id: self.id,
            name: self.name.unwrap_or_default(),
            item_type,
            colors: self.colors.unwrap_or_default(),
            style: self.style.unwrap_or_default(),
            season: self.seasons.unwrap_or_default(),
            material: self.material.unwrap_or_default(),
            image_url: self.image_url.unwrap_or_default(),
        })
    }
}

#[derive(Clone)]
pub struct PgWardrobe {
    db_pool: PgPool,
}

impl PgWardrobe {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait::async_trait]
impl WardrobeSource for PgWardrobe {
    async fn items_for_user(&self, user_id: &str) -> AppResult<Vec<WardrobeItem>> {
        let rows: Vec<WardrobeRow> = sqlx::query_as(
            r#"
            SELECT id, name, item_type, colors, style, seasons, material, image_url
            FROM wardrobe_items
            WHERE user_id = $1 AND archived = false
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db_pool)
        .await?;

        let fetched = rows.len();
        let items: Vec<WardrobeItem> = rows.into_iter().filter_map(WardrobeRow::into_item).collect();

        tracing::debug!(
            user_id = %user_id,
            fetched,
            usable = items.len(),
            provider = "postgres",
            "Fetched wardrobe"
        );

        Ok(items)
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
