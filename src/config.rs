use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the trained model artifacts
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,

    /// Path to the raw transaction log mined by the trainer
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Minimum itemset support used by the trainer
    #[serde(default = "default_min_support")]
    pub min_support: f64,

    /// Minimum rule lift used by the trainer
    #[serde(default = "default_min_lift")]
    pub min_lift: f64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/transactions.csv")
}

fn default_min_support() -> f64 {
    0.01
}

fn default_min_lift() -> f64 {
    1.0
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Path of the rules artifact inside the model directory
    pub fn rules_path(&self) -> PathBuf {
        self.model_dir.join(crate::store::RULES_ARTIFACT)
    }

    /// Path of the segment artifact inside the model directory
    pub fn segments_path(&self) -> PathBuf {
        self.model_dir.join(crate::store::SEGMENTS_ARTIFACT)
    }

    /// Path of the training manifest inside the model directory
    pub fn manifest_path(&self) -> PathBuf {
        self.model_dir.join(crate::store::MANIFEST_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_paths_join_model_dir() {
        let config = Config {
            host: default_host(),
            port: default_port(),
            model_dir: PathBuf::from("/srv/models"),
            data_path: default_data_path(),
            min_support: default_min_support(),
            min_lift: default_min_lift(),
        };
        assert_eq!(config.rules_path(), PathBuf::from("/srv/models/rules_model.csv"));
        assert_eq!(
            config.segments_path(),
            PathBuf::from("/srv/models/segment_model.csv")
        );
        assert_eq!(
            config.manifest_path(),
            PathBuf::from("/srv/models/rules_manifest.json")
        );
    }
}
