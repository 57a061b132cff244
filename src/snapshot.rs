//! Edge-list snapshot: the aggregated pairs persisted as CSV.
//!
//! Not needed for the GEXF output itself, but downstream steps and re-runs
//! use it to skip re-aggregation, so it must be byte-reproducible for
//! identical inputs. Weights here are the raw summed reply counts, pre
//! log-scaling; rows come out in canonical key order. The header is written
//! even when no edge survived filtering, so an empty result is still a
//! well-formed table.

use std::path::Path;

use crate::aggregate::EdgeWeights;
use crate::error::{ExportError, MsgnetResult};

/// Write the aggregated edge list to `path` as CSV (`source,target,weight`).
pub fn write_edge_snapshot(edges: &EdgeWeights, path: &Path) -> MsgnetResult<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source: csv_to_io(source),
    })?;

    let write_err = |source: csv::Error| ExportError::Write {
        path: path.to_path_buf(),
        source: csv_to_io(source),
    };

    writer
        .write_record(["source", "target", "weight"])
        .map_err(write_err)?;
    for (pair, &weight) in edges {
        writer
            .write_record([
                pair.lo().to_string(),
                pair.hi().to_string(),
                weight.to_string(),
            ])
            .map_err(write_err)?;
    }
    writer.flush().map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), edges = edges.len(), "wrote edge snapshot");
    Ok(())
}

/// Unwrap a csv error back to its underlying I/O error.
fn csv_to_io(err: csv::Error) -> std::io::Error {
    match err.into_kind() {
        csv::ErrorKind::Io(io) => io,
        other => std::io::Error::other(format!("{other:?}")),
    }
}
