//! Service settings
//!
//! Loaded from a JSON file. Missing fields take their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory of the record store
    pub db_path: PathBuf,
    /// Radius used when a client does not send one (meters)
    pub search_radius_m: f64,
    /// Fixed RNG seed for reproducible pot placement. Random when unset.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("satoshigo.db"),
            search_radius_m: 500.0,
            seed: None,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "satoshigo.json";

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings in {}: {}", path.display(), e),
            },
            Err(e) => log::info!("No settings at {} ({}), using defaults", path.display(), e),
        }
        Self::default()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// RNG for pot placement and ids
    pub fn rng(&self) -> Pcg32 {
        match self.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "seed": 7 }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.db_path, Settings::default().db_path);
        assert_eq!(settings.search_radius_m, 500.0);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load("/definitely/not/here/satoshigo.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir()
            .join(format!("satoshigo-settings-{}.json", std::process::id()));
        let settings = Settings {
            db_path: PathBuf::from("/tmp/hunt.db"),
            search_radius_m: 250.0,
            seed: Some(99),
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let settings = Settings {
            seed: Some(1234),
            ..Default::default()
        };
        let a: u64 = settings.rng().random();
        let b: u64 = settings.rng().random();
        assert_eq!(a, b);
    }
}
