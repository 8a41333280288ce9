//! Configuration file support for mealplan.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/mealplan/config.toml`.

use crate::{BiometricInput, ConditionSet, Error, Gender, Goal, MealCatalog, MealSlot, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub defaults: ProfileDefaults,

    /// Per-slot replacements for the built-in meal catalog, keyed by slot name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meals: BTreeMap<String, Vec<String>>,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Values used when a plan is requested without a saved profile or flags
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileDefaults {
    #[serde(default = "default_weight_kg")]
    pub weight_kg: f64,

    #[serde(default = "default_height_cm")]
    pub height_cm: f64,

    #[serde(default = "default_age_years")]
    pub age_years: u32,

    #[serde(default)]
    pub gender: Gender,

    #[serde(default)]
    pub goal: Goal,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            weight_kg: default_weight_kg(),
            height_cm: default_height_cm(),
            age_years: default_age_years(),
            gender: Gender::default(),
            goal: Goal::default(),
        }
    }
}

impl ProfileDefaults {
    /// Turn the defaults into a full input with no declared conditions
    pub fn to_input(&self) -> BiometricInput {
        BiometricInput {
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            age_years: self.age_years,
            gender: self.gender,
            goal: self.goal,
            conditions: ConditionSet::new(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|| PathBuf::from("."))
    });
    base.join("mealplan")
}

fn default_weight_kg() -> f64 {
    60.0
}

fn default_height_cm() -> f64 {
    165.0
}

fn default_age_years() -> u32 {
    25
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    ///
    /// The profile defaults must lie within the input domains.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config
            .defaults
            .to_input()
            .validate()
            .map_err(|e| Error::Config(format!("[defaults] {}", e)))?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        base.join("mealplan").join("config.toml")
    }

    /// Build the meal catalog this configuration describes
    ///
    /// Fails on a `[meals]` key that doesn't name a meal slot.
    pub fn meal_catalog(&self) -> Result<MealCatalog> {
        let mut overrides = BTreeMap::new();
        for (name, items) in &self.meals {
            let slot: MealSlot = name
                .parse()
                .map_err(|_| Error::Config(format!("[meals] unknown meal slot '{}'", name)))?;
            overrides.insert(slot, items.clone());
        }
        Ok(MealCatalog::with_overrides(&overrides))
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
