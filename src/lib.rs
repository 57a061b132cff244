//! # msgnet
//!
//! Batch extractor that turns three forum CSV dumps into a weighted,
//! undirected private-message interaction graph, serialized as GEXF for
//! visualization plus a CSV edge-list snapshot for caching.
//!
//! ## Pipeline
//!
//! - **Loader** (`source`): typed, header-checked reads of the message,
//!   thread, and post tables
//! - **Edge aggregator** (`aggregate`): two-party conversations collapsed
//!   into canonical pairs with summed reply counts
//! - **Node sizer** (`activity`): `log10(1 + post count)` activity scores
//! - **Graph builder/writers** (`graph`, `gexf`, `snapshot`): petgraph
//!   assembly and serialization
//!
//! ## Library usage
//!
//! ```no_run
//! use msgnet::config::PipelineConfig;
//!
//! let summary = msgnet::pipeline::run(&PipelineConfig::default()).unwrap();
//! println!("{summary}");
//! ```

pub mod activity;
pub mod aggregate;
pub mod config;
pub mod error;
pub mod gexf;
pub mod graph;
pub mod pipeline;
pub mod snapshot;
pub mod source;
