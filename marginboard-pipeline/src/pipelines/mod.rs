//! Assembled pipelines, ready to execute.

pub mod dashboard;

pub use dashboard::DashboardPipeline;
