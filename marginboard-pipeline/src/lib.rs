//! Reconciliation and margin-computation engine for the style margin
//! dashboard.
//!
//! Three already-parsed record arrays come in: line-list product rows,
//! sales transactions, and cost-sheet rows. The engine joins them on
//! (style, season) with source-priority field resolution, normalizes
//! sales channels onto a fixed canonical set, computes baseline and
//! channel-weighted margins, and runs the result through a staged
//! candidate pipeline (source, hydrate, filter, score, select) that the
//! dashboard re-executes on every filter change.

pub mod aggregate;
pub mod candidate_pipeline;
pub mod channel_rollup;
pub mod components;
pub mod cost_resolver;
pub mod error;
pub mod export;
pub mod filter;
pub mod hydrator;
pub mod pipelines;
pub mod query_hydrator;
pub mod reconcile;
pub mod records;
pub mod recompute;
pub mod scorer;
pub mod selector;
pub mod side_effect;
pub mod source;
pub mod types;
mod util;

pub use candidate_pipeline::{CandidatePipeline, HasRequestId, PipelineResult};
pub use error::{EngineError, EngineResult};
pub use pipelines::DashboardPipeline;
pub use records::{CostRecord, CostSource, ProductRecord, SalesRecord};
pub use recompute::RecomputeGate;
pub use types::{
    ChannelMetric, ChannelSlice, DashboardQuery, FilterConfig, Provenance, ReconciledStyleSeason,
    Resolved, StyleCandidate, StyleMargin, MULTIPLE,
};
