//! Loader: typed, header-checked CSV reads for the three input tables.
//!
//! Columns are matched by header name, so the input files may carry extra
//! columns (the raw forum dumps have dozens); only the ones named here are
//! consumed. A missing required column or a non-integer value aborts the run.

use std::num::NonZeroU64;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::PipelineConfig;
use crate::error::{MsgnetResult, SourceError};

/// Identifier of a forum user.
///
/// Uses `NonZeroU64` because the dumps use `0` as a sentinel for "no user
/// recorded" (historical threads have no recipient). `Option<UserId>` is the
/// same size as `UserId` and the sentinel can never leak into an edge or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct UserId(NonZeroU64);

impl UserId {
    /// Create a `UserId` from a raw `u64`. Returns `None` for the sentinel 0.
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(UserId)
    }

    /// Get the underlying `u64` value.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a private-message thread (conversation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct ThreadId(pub u64);

impl std::fmt::Display for ThreadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

/// One private message. Many messages belong to one thread.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MessageRecord {
    /// Thread this message belongs to.
    pub thread_id: ThreadId,
    /// Author of the message. Raw value; 0 means unrecorded.
    pub author_id: u64,
}

impl MessageRecord {
    /// Author as a `UserId`, `None` if unrecorded.
    pub fn author(&self) -> Option<UserId> {
        UserId::new(self.author_id)
    }
}

/// Metadata for one thread. Exactly one row per thread.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ThreadRecord {
    /// Unique thread key; drives edge-aggregation iteration.
    pub thread_id: ThreadId,
    /// User who opened the thread. Raw value; 0 means unrecorded.
    pub starter_id: u64,
    /// User the thread was addressed to. Empty or 0 in historical rows.
    pub recipient_id: Option<u64>,
    /// Number of replies in the thread.
    pub reply_count: u64,
}

impl ThreadRecord {
    /// Starter as a `UserId`, `None` if unrecorded.
    pub fn starter(&self) -> Option<UserId> {
        UserId::new(self.starter_id)
    }

    /// Recipient as a `UserId`, `None` if absent or unrecorded.
    pub fn recipient(&self) -> Option<UserId> {
        self.recipient_id.and_then(UserId::new)
    }
}

/// One public forum post. Only the author is consumed, in aggregate.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PostRecord {
    /// Author of the post. Raw value; 0 means unrecorded.
    pub author_id: u64,
}

impl PostRecord {
    /// Author as a `UserId`, `None` if unrecorded.
    pub fn author(&self) -> Option<UserId> {
        UserId::new(self.author_id)
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// The three input tables, loaded and typed. Immutable for the run.
#[derive(Debug)]
pub struct Tables {
    pub messages: Vec<MessageRecord>,
    pub threads: Vec<ThreadRecord>,
    pub posts: Vec<PostRecord>,
}

/// Load all three input tables from the configured paths.
pub fn load_tables(config: &PipelineConfig) -> MsgnetResult<Tables> {
    let messages = load_messages(&config.messages_csv)?;
    let threads = load_threads(&config.threads_csv)?;
    let posts = load_posts(&config.posts_csv)?;
    Ok(Tables {
        messages,
        threads,
        posts,
    })
}

/// Load the private-message table.
pub fn load_messages(path: &Path) -> MsgnetResult<Vec<MessageRecord>> {
    Ok(read_records(path, &["thread_id", "author_id"])?)
}

/// Load the thread-metadata table.
pub fn load_threads(path: &Path) -> MsgnetResult<Vec<ThreadRecord>> {
    Ok(read_records(
        path,
        &["thread_id", "starter_id", "recipient_id", "reply_count"],
    )?)
}

/// Load the public-post table.
pub fn load_posts(path: &Path) -> MsgnetResult<Vec<PostRecord>> {
    Ok(read_records(path, &["author_id"])?)
}

/// Read a whole CSV file into typed records, validating headers first.
fn read_records<T: DeserializeOwned>(
    path: &Path,
    required_columns: &[&str],
) -> Result<Vec<T>, SourceError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let headers = reader
        .headers()
        .map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    for column in required_columns {
        if !headers.iter().any(|h| h == *column) {
            return Err(SourceError::MissingColumn {
                path: path.to_path_buf(),
                column: (*column).to_string(),
            });
        }
    }

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: T = result.map_err(|err| classify_row_error(path, err))?;
        records.push(record);
    }

    tracing::debug!(path = %path.display(), rows = records.len(), "loaded table");
    Ok(records)
}

/// Distinguish value-level schema violations from I/O failures mid-read.
fn classify_row_error(path: &Path, err: csv::Error) -> SourceError {
    if let csv::ErrorKind::Deserialize { pos, err: cause } = err.kind() {
        let message = match pos.as_ref().map(|p| p.line()) {
            Some(line) => format!("line {line}: {cause}"),
            None => cause.to_string(),
        };
        return SourceError::Schema {
            path: path.to_path_buf(),
            message,
        };
    }
    SourceError::Read {
        path: path.to_path_buf(),
        source: err,
    }
}
