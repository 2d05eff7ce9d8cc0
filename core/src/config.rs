use crate::{game::NUMBER_OF_GUESSES, roster::AuthorRoster, selector::PuzzleCollection};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const STORAGE_VERSION: &str = "0";
pub const STORAGE_KEY_GAMES: &str = "postle.games";
pub const STORAGE_KEY_VERSION: &str = "postle.version";
pub const SUGGESTION_LIMIT: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostleConfig {
    pub max_guesses: usize,
    /// Bump to invalidate every stored game.
    pub storage_version: String,
    pub games_key: String,
    pub version_key: String,
    pub suggestion_limit: usize,
}

impl Default for PostleConfig {
    fn default() -> Self {
        Self {
            max_guesses:      NUMBER_OF_GUESSES,
            storage_version:  STORAGE_VERSION.into(),
            games_key:        STORAGE_KEY_GAMES.into(),
            version_key:      STORAGE_KEY_VERSION.into(),
            suggestion_limit: SUGGESTION_LIMIT,
        }
    }
}

impl PostleConfig {
    /// Load `{data_dir}/postle.json`. A missing file means defaults.
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/postle.json");
        if !Path::new(&path).exists() {
            log::debug!("{path} not found, using default config");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: PostleConfig = serde_json::from_str(&content)?;
        if config.max_guesses == 0 {
            anyhow::bail!("{path}: max_guesses must be positive");
        }
        if config.games_key == config.version_key {
            anyhow::bail!("{path}: games_key and version_key must differ");
        }
        Ok(config)
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        Self::default()
    }
}

/// Everything the external data layer provides: the schedule of postings
/// and the names a player may guess.
#[derive(Debug, Clone)]
pub struct GameData {
    pub puzzles: PuzzleCollection,
    pub roster:  AuthorRoster,
}

impl GameData {
    /// Load `postings.json` and `users.json` from the data directory.
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let postings_path = format!("{data_dir}/postings.json");
        let postings_content = std::fs::read_to_string(&postings_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {postings_path}: {e}"))?;
        let puzzles = PuzzleCollection::from_json(&postings_content)
            .map_err(|e| anyhow::anyhow!("{postings_path}: {e}"))?;

        let users_path = format!("{data_dir}/users.json");
        let users_content = std::fs::read_to_string(&users_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {users_path}: {e}"))?;
        let roster: AuthorRoster = serde_json::from_str(&users_content)?;

        log::info!(
            "loaded {} puzzles and {} authors from {data_dir}",
            puzzles.len(),
            roster.len()
        );
        Ok(Self { puzzles, roster })
    }
}
