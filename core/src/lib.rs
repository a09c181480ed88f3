//! Transaction-graph fraud-ring detection.
//!
//! Feed a batch of transfers to [`engine::DetectionEngine::run`] and get back
//! per-account suspicion scores plus a ranked ring report. Ingestion and
//! rendering live outside this crate.

pub mod config;
pub mod cycle_detector;
pub mod detector;
pub mod engine;
pub mod error;
pub mod graph;
pub mod pattern;
pub mod report;
pub mod ring;
pub mod shell_detector;
pub mod smurfing_detector;
pub mod transaction;
pub mod types;

pub use config::DetectionConfig;
pub use engine::{AnalysisResult, DetectionEngine};
pub use error::{DetectError, DetectResult};
pub use pattern::PatternType;
pub use report::ForensicReport;
pub use transaction::Transaction;
