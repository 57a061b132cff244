//! Pipeline orchestration: load → aggregate → size → build → write.
//!
//! Every stage is a pure function of the loaded tables; outputs are written
//! only after all in-memory stages have succeeded, so a failed run never
//! leaves a partial file pretending to be valid.

use crate::activity::activity_scores;
use crate::aggregate::{AggregateStats, aggregate_edges};
use crate::config::PipelineConfig;
use crate::error::MsgnetResult;
use crate::gexf::write_gexf;
use crate::graph::MessageGraph;
use crate::snapshot::write_edge_snapshot;
use crate::source::load_tables;

/// What one run did, for the operator's log.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    /// Thread filtering outcomes.
    pub stats: AggregateStats,
    /// Participants that became nodes.
    pub nodes: usize,
    /// Canonical pairs that became edges.
    pub edges: usize,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} threads in, {} kept ({} not dyadic, {} below threshold); {} nodes, {} edges out",
            self.stats.threads_seen,
            self.stats.kept,
            self.stats.dropped_not_dyadic,
            self.stats.dropped_below_threshold,
            self.nodes,
            self.edges,
        )
    }
}

/// Run the whole pipeline for one configuration.
pub fn run(config: &PipelineConfig) -> MsgnetResult<RunSummary> {
    let tables = load_tables(config)?;
    tracing::info!(
        messages = tables.messages.len(),
        threads = tables.threads.len(),
        posts = tables.posts.len(),
        "loaded input tables"
    );

    let (edges, stats) = aggregate_edges(&tables.threads, &tables.messages, config.min_replies);
    tracing::info!(
        kept = stats.kept,
        dropped_not_dyadic = stats.dropped_not_dyadic,
        dropped_below_threshold = stats.dropped_below_threshold,
        pairs = edges.len(),
        "aggregated conversation edges"
    );

    let scores = activity_scores(&edges, &tables.posts);
    let graph = MessageGraph::build(&edges, &scores);

    // all stages succeeded: only now touch the filesystem
    write_edge_snapshot(&edges, &config.edges_out)?;
    write_gexf(&graph, &config.gexf_out)?;

    Ok(RunSummary {
        stats,
        nodes: graph.node_count(),
        edges: graph.edge_count(),
    })
}
