//! Pipeline configuration: input/output paths and the reply threshold.
//!
//! The defaults are the fixed paths the batch job has always used; an
//! optional TOML file can override any subset of them, which is how tests
//! point the pipeline at fixtures without touching pipeline logic.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ConfigError, MsgnetResult};

/// Minimum number of replies a conversation needs to produce an edge.
///
/// Threads below this are treated as noise so the visualization stays
/// legible. The boundary is inclusive: exactly this many replies is kept.
pub const DEFAULT_MIN_REPLIES: u64 = 3;

/// Configuration for one pipeline run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// CSV of private messages (`thread_id`, `author_id`).
    pub messages_csv: PathBuf,
    /// CSV of thread metadata (`thread_id`, `starter_id`, `recipient_id`, `reply_count`).
    pub threads_csv: PathBuf,
    /// CSV of public forum posts (`author_id`).
    pub posts_csv: PathBuf,
    /// Output path for the aggregated edge-list snapshot.
    pub edges_out: PathBuf,
    /// Output path for the GEXF graph.
    pub gexf_out: PathBuf,
    /// Reply-count threshold for keeping a conversation.
    pub min_replies: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            messages_csv: PathBuf::from("csv/core_message_posts.csv"),
            threads_csv: PathBuf::from("csv/core_message_topics.csv"),
            posts_csv: PathBuf::from("csv/forums_posts.csv"),
            edges_out: PathBuf::from("output/message_edges.csv"),
            gexf_out: PathBuf::from("output/messages.gexf"),
            min_replies: DEFAULT_MIN_REPLIES,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a TOML file.
    ///
    /// Missing keys fall back to the defaults; unknown keys are rejected so
    /// a typo does not silently leave a path at its default.
    pub fn from_toml(path: &Path) -> MsgnetResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }
}
