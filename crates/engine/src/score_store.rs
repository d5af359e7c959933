//! JSON file of completed runs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::collab::ScoreSink;

#[derive(Debug, Error)]
pub enum ScoreStoreError {
    #[error("score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("score file {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode scores: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub id: u64,
    pub elapsed_time: f64,
}

#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored runs in insertion order. A missing file is an empty store.
    pub fn load(&self) -> Result<Vec<Score>, ScoreStoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(ScoreStoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&text).map_err(|source| ScoreStoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Append a run; its id is one more than the largest stored id.
    pub fn add(&self, elapsed_time: f64) -> Result<Score, ScoreStoreError> {
        let mut scores = self.load()?;
        let id = scores.iter().map(|s| s.id).max().map_or(1, |m| m + 1);
        let score = Score { id, elapsed_time };
        scores.push(score);

        let json = serde_json::to_string_pretty(&scores).map_err(ScoreStoreError::Encode)?;
        fs::write(&self.path, json).map_err(|source| ScoreStoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(id, elapsed_time, path = %self.path.display(), "score saved");
        Ok(score)
    }

    /// The `n` fastest runs, fastest first.
    pub fn best(&self, n: usize) -> Result<Vec<Score>, ScoreStoreError> {
        let mut scores = self.load()?;
        scores.sort_by(|a, b| a.elapsed_time.total_cmp(&b.elapsed_time));
        scores.truncate(n);
        Ok(scores)
    }
}

impl ScoreSink for JsonScoreStore {
    fn save_score(&mut self, elapsed_secs: f64) -> anyhow::Result<()> {
        self.add(elapsed_secs)?;
        Ok(())
    }
}
