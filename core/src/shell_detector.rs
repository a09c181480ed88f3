//! Layered-shell detector.
//!
//! A shell is a pass-through account: exactly one transaction in, exactly one
//! out, non-zero volume. Only one hop is inspected, so a run of three shells
//! yields two overlapping two-member rings rather than one long chain.

use crate::{
    config::ShellConfig,
    detector::{DetectorOutcome, PatternDetector, PatternHit},
    graph::{AccountNode, TransactionGraph},
    pattern::PatternType,
};

pub struct ShellDetector {
    config: ShellConfig,
}

impl ShellDetector {
    pub fn new(config: ShellConfig) -> Self {
        Self { config }
    }
}

fn is_pass_through(node: &AccountNode) -> bool {
    node.in_degree == 1 && node.out_degree == 1
}

impl PatternDetector for ShellDetector {
    fn name(&self) -> &'static str {
        "shells"
    }

    fn detect(&self, graph: &TransactionGraph) -> DetectorOutcome {
        let mut hits = Vec::new();

        for (idx, node) in graph.accounts().iter().enumerate() {
            if !is_pass_through(node) || node.total_volume == 0.0 {
                continue;
            }
            // The downstream shell is not held to the volume rule.
            let Some(&target) = graph.successors(idx).first() else {
                continue;
            };
            if is_pass_through(graph.account(target)) {
                hits.push(PatternHit {
                    pattern:    PatternType::LayeredShell,
                    risk_score: self.config.risk_score,
                    members:    vec![idx, target],
                });
            }
        }

        log::debug!("shells: {} shell pairs found", hits.len());
        DetectorOutcome::from_hits(hits)
    }
}
