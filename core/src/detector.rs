//! Detector trait and hit types.
//!
//! RULE: Every pattern detector implements PatternDetector.
//! Detectors only READ the built graph; they never touch account scores.
//! The engine hands their hits to the ring assembler in registration order
//! (fixed, documented in engine.rs).

use crate::{
    graph::TransactionGraph,
    pattern::PatternType,
    types::{AccountIdx, Score},
};

/// One detected pattern instance, before it becomes a ring.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternHit {
    pub pattern:    PatternType,
    pub risk_score: Score,
    /// Registry indices. May contain repeats; the assembler dedups.
    pub members:    Vec<AccountIdx>,
}

/// Everything a detector produced in one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectorOutcome {
    pub hits:      Vec<PatternHit>,
    /// The detector hit a hard search cap and skipped some candidates.
    pub truncated: bool,
}

impl DetectorOutcome {
    pub fn from_hits(hits: Vec<PatternHit>) -> Self {
        Self { hits, truncated: false }
    }
}

/// The contract every pattern detector must fulfill.
pub trait PatternDetector: Send + Sync {
    /// Unique stable name for logging.
    fn name(&self) -> &'static str;

    /// Scan the graph and return raw hits in discovery order.
    fn detect(&self, graph: &TransactionGraph) -> DetectorOutcome;
}
