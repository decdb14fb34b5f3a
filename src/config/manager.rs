use super::{meta::MetaConfig, outer::OuterConfig, traits::ConfigSection};
use crate::error::{MetaError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub meta: MetaConfig,
    pub outer: OuterConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.meta.validate()?;
        self.outer.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, AppConfig> {
        self.config.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, AppConfig> {
        self.config.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Load a TOML or JSON file (by extension), then apply `METAEVO__SECTION__KEY`
    /// environment overrides
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config: AppConfig = Config::builder()
            .add_source(File::from(path))
            .add_source(
                Environment::with_prefix("METAEVO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| {
                MetaError::Configuration(format!(
                    "Failed to load config {}: {}",
                    path.display(),
                    e
                ))
            })?;

        config.validate()?;

        log::info!(
            "Loaded configuration from {} ([{}] and [{}] sections)",
            path.display(),
            MetaConfig::section_name(),
            OuterConfig::section_name()
        );
        *self.write() = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_str = toml::to_string_pretty(&*self.read())
            .map_err(|e| MetaError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| MetaError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.read().clone()
    }

    pub fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.get();
        f(&mut candidate);
        candidate.validate()?;
        *self.write() = candidate;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::evaluation::EvaluationBudgetStrategy;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metaevo.toml");

        let manager = ConfigManager::new();
        manager
            .update(|config| {
                config.meta.training_problems = vec!["ZDT1".into(), "ZDT2".into()];
                config.meta.budget = EvaluationBudgetStrategy::Fixed {
                    evaluations: vec![1000, 2000],
                };
                config.outer.generations = 3;
            })
            .unwrap();
        manager.save_to_file(&path).unwrap();

        let loaded = ConfigManager::new();
        loaded.load_from_file(&path).unwrap();
        let config = loaded.get();
        assert_eq!(config.outer.generations, 3);
        assert_eq!(config.meta.training_problems, vec!["ZDT1", "ZDT2"]);
        assert_eq!(
            config.meta.budget,
            EvaluationBudgetStrategy::Fixed {
                evaluations: vec![1000, 2000]
            }
        );
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[outer]\npopulation_size = 8\n").unwrap();

        let manager = ConfigManager::new();
        manager.load_from_file(&path).unwrap();
        let config = manager.get();
        assert_eq!(config.outer.population_size, 8);
        assert_eq!(config.meta.indicators, MetaConfig::default().indicators);
    }

    #[test]
    fn test_invalid_update_is_rejected() {
        let manager = ConfigManager::new();
        let result = manager.update(|config| config.meta.indicators.clear());
        assert!(result.is_err());
        assert!(!manager.get().meta.indicators.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let manager = ConfigManager::new();
        assert!(matches!(
            manager.load_from_file("/nonexistent/metaevo.toml"),
            Err(MetaError::Configuration(_))
        ));
    }
}
