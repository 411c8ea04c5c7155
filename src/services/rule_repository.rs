use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::models::RuleSet;

/// Default rule document locations, relative to the process working directory
pub const DEFAULT_RULE_PATHS: [&str; 3] = [
    "config/outfit_rules.json",
    "../config/outfit_rules.json",
    "outfit_rules.json",
];

/// Lazily loaded, process-lifetime ruleset
///
/// The first call to [`RuleRepository::ruleset`] probes the search path, parses
/// and validates the first document found, and caches the result. A missing,
/// unreadable, malformed or invalid document is replaced by
/// [`RuleSet::builtin`]; that fallback is cached just like a loaded ruleset.
pub struct RuleRepository {
    search_paths: Vec<PathBuf>,
    cache: OnceCell<Arc<RuleSet>>,
}

impl Default for RuleRepository {
    fn default() -> Self {
        Self::new(DEFAULT_RULE_PATHS.iter().map(PathBuf::from).collect())
    }
}

impl RuleRepository {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths,
            cache: OnceCell::new(),
        }
    }

    /// Default search path with an optional explicit location probed first
    pub fn with_override(path: Option<PathBuf>) -> Self {
        let mut search_paths: Vec<PathBuf> = path.into_iter().collect();
        search_paths.extend(DEFAULT_RULE_PATHS.iter().map(PathBuf::from));
        Self::new(search_paths)
    }

    /// Repository that never touches the filesystem
    pub fn from_ruleset(rules: RuleSet) -> Self {
        Self {
            search_paths: Vec::new(),
            cache: OnceCell::new_with(Some(Arc::new(rules))),
        }
    }

    /// Returns the cached ruleset, loading it on first use
    pub async fn ruleset(&self) -> Arc<RuleSet> {
        self.cache
            .get_or_init(|| async { Arc::new(self.load().await) })
            .await
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.initialized()
    }

    async fn load(&self) -> RuleSet {
        let Some(path) = self.locate().await else {
            tracing::warn!(
                searched = ?self.search_paths,
                "No rule configuration found, using built-in defaults"
            );
            return RuleSet::builtin();
        };

        match read_ruleset(&path).await {
            Ok(rules) => {
                tracing::info!(
                    path = %path.display(),
                    temperature_rules = rules.temperature_rules.len(),
                    occasions = rules.occasion_rules.len(),
                    "Loaded rule configuration"
                );
                rules
            }
            Err(reason) => {
                tracing::warn!(
                    path = %path.display(),
                    reason = %reason,
                    "Rule configuration unusable, using built-in defaults"
                );
                RuleSet::builtin()
            }
        }
    }

    async fn locate(&self) -> Option<PathBuf> {
        for path in &self.search_paths {
            if tokio::fs::try_exists(path).await.unwrap_or(false) {
                return Some(path.clone());
            }
        }
        None
    }
}

async fn read_ruleset(path: &Path) -> Result<RuleSet, String> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("read failed: {}", e))?;
    let rules: RuleSet =
        serde_json::from_str(&content).map_err(|e| format!("parse failed: {}", e))?;
    rules
        .validate()
        .map_err(|e| format!("validation failed: {}", e))?;
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_rule_file(content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("outfit_rules_{}.json", Uuid::new_v4()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_missing_file_falls_back_to_builtin() {
        let repository = RuleRepository::new(vec![PathBuf::from("/nonexistent/outfit_rules.json")]);

        let rules = repository.ruleset().await;

        assert_eq!(*rules, RuleSet::builtin());
        assert_eq!(rules.temperature_rules.len(), 1);
        assert!(rules.occasion("casual").is_some());
        assert!(repository.is_loaded());
    }

    #[tokio::test]
    async fn test_first_existing_path_wins() {
        let first = temp_rule_file(r#"{"output": {"max_recommendations": 7}}"#);
        let second = temp_rule_file(r#"{"output": {"max_recommendations": 2}}"#);
        let repository = RuleRepository::new(vec![
            PathBuf::from("/nonexistent/outfit_rules.json"),
            first.clone(),
            second.clone(),
        ]);

        let rules = repository.ruleset().await;
        assert_eq!(rules.output.max_recommendations, 7);

        std::fs::remove_file(first).ok();
        std::fs::remove_file(second).ok();
    }

    #[tokio::test]
    async fn test_malformed_document_falls_back_to_builtin() {
        let path = temp_rule_file("{ this is not json");
        let repository = RuleRepository::new(vec![path.clone()]);

        assert_eq!(*repository.ruleset().await, RuleSet::builtin());
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_shape_mismatch_falls_back_to_builtin() {
        let path = temp_rule_file(r#"{"temperature_rules": [{"min": "cold", "max": 10}]}"#);
        let repository = RuleRepository::new(vec![path.clone()]);

        assert_eq!(*repository.ruleset().await, RuleSet::builtin());
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_invalid_document_falls_back_to_builtin() {
        let path = temp_rule_file(r#"{"output": {"max_recommendations": 0}}"#);
        let repository = RuleRepository::new(vec![path.clone()]);

        assert_eq!(*repository.ruleset().await, RuleSet::builtin());
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_ruleset_is_cached_after_first_load() {
        let path = temp_rule_file(r#"{"output": {"max_recommendations": 4}}"#);
        let repository = RuleRepository::new(vec![path.clone()]);

        let first = repository.ruleset().await;
        std::fs::write(&path, r#"{"output": {"max_recommendations": 9}}"#).unwrap();
        let second = repository.ruleset().await;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.output.max_recommendations, 4);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_from_ruleset_is_preloaded() {
        let mut rules = RuleSet::builtin();
        rules.output.max_recommendations = 1;
        let repository = RuleRepository::from_ruleset(rules);

        assert!(repository.is_loaded());
        let loaded = tokio_test::block_on(repository.ruleset());
        assert_eq!(loaded.output.max_recommendations, 1);
    }

    #[test]
    fn test_override_is_probed_first() {
        let repository = RuleRepository::with_override(Some(PathBuf::from("/etc/rules.json")));
        assert_eq!(repository.search_paths[0], PathBuf::from("/etc/rules.json"));
        assert_eq!(repository.search_paths.len(), DEFAULT_RULE_PATHS.len() + 1);
    }

    #[tokio::test]
    async fn test_shipped_document_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/outfit_rules.json");
        let repository = RuleRepository::new(vec![path]);

        let rules = repository.ruleset().await;

        assert_ne!(*rules, RuleSet::builtin());
        assert_eq!(rules.temperature_rules.len(), 5);
        for occasion in ["casual", "work", "formal", "date", "sport"] {
            assert!(rules.occasion(occasion).is_some(), "missing {}", occasion);
        }
        for temperature in [-20.0, 5.0, 12.5, 22.0, 35.0] {
            assert!(rules.temperature_rule(temperature).is_some());
        }
    }
}
