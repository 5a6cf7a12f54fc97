// ============================================================
// Layer 6 — Run Store
// ============================================================
// Persists the resolved configuration of a training run next
// to its metrics so a result can always be traced back to the
// settings that produced it.
//
// File layout:
//   <output_dir>/
//     train_config.json   ← hyperparameters of the run
//     vocab.json          ← written by VocabStore
//     metrics.csv         ← written by MetricsLogger
//
// Model weights are not stored here.
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::application::train_use_case::TrainConfig;

pub struct RunStore {
    dir: PathBuf,
}

impl RunStore {
    /// Create the store, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create output directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join("train_config.json")
    }

    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.config_path();
        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::train_use_case::ComputeDevice;
    use tempfile::tempdir;

    #[test]
    fn test_config_survives_save_and_load() {
        let dir   = tempdir().unwrap();
        let store = RunStore::new(dir.path().join("nested/run")).unwrap();
        let cfg   = TrainConfig {
            hidden_dim: 17,
            vocab_path: Some("v.json".into()),
            device: ComputeDevice::Cpu,
            ..TrainConfig::default()
        };

        store.save_config(&cfg).unwrap();

        let json = fs::read_to_string(store.config_path()).unwrap();
        let back: TrainConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_save_overwrites_previous_run() {
        let dir   = tempdir().unwrap();
        let store = RunStore::new(dir.path()).unwrap();
        store.save_config(&TrainConfig { seed: 1, ..TrainConfig::default() }).unwrap();
        store.save_config(&TrainConfig { seed: 2, ..TrainConfig::default() }).unwrap();

        let json = fs::read_to_string(store.config_path()).unwrap();
        let back: TrainConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, 2);
    }
}
