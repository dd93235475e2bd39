use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::ScoredCandidate;

pub const MANIFEST_NAME: &str = "run_manifest.json";
pub const MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistEntry {
    pub player: String,
    pub squad: String,
    pub suitability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub version: u32,
    pub generated_at: String,
    pub input: PathBuf,
    pub rows_read: usize,
    pub players_merged: usize,
    pub shortlist_pool: usize,
    pub market_pool: usize,
    pub shortlist: Vec<ShortlistEntry>,
    pub artifacts: Vec<String>,
}

impl RunManifest {
    pub fn new(input: &Path, rows_read: usize, players_merged: usize) -> Self {
        Self {
            version: MANIFEST_VERSION,
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            input: input.to_path_buf(),
            rows_read,
            players_merged,
            shortlist_pool: 0,
            market_pool: 0,
            shortlist: Vec::new(),
            artifacts: Vec::new(),
        }
    }

    pub fn with_shortlist(mut self, shortlist: &[ScoredCandidate]) -> Self {
        self.shortlist = shortlist
            .iter()
            .map(|c| ShortlistEntry {
                player: c.player.player.clone(),
                squad: c.player.squad.clone(),
                suitability: c.suitability,
            })
            .collect();
        self
    }
}

pub fn save_manifest(dir: &Path, manifest: &RunManifest) -> Result<PathBuf> {
    let path = dir.join(MANIFEST_NAME);
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(manifest).context("serialize run manifest")?;
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, &path).with_context(|| format!("swap {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(path)
}

pub fn load_manifest(path: &Path) -> Result<RunManifest> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = RunManifest::new(Path::new("data/x.csv"), 3, 2);
        let path = save_manifest(dir.path(), &manifest).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("run_manifest.json.tmp").exists());
        let loaded = load_manifest(&path).unwrap();
        assert_eq!(loaded, manifest);
        assert_eq!(loaded.version, MANIFEST_VERSION);
    }

    #[test]
    fn timestamp_is_rfc3339_utc() {
        let manifest = RunManifest::new(Path::new("in.csv"), 0, 0);
        assert!(manifest.generated_at.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&manifest.generated_at).is_ok());
    }
}
