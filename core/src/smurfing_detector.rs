//! Smurfing detector — fan-in aggregators and fan-out distributors.
//!
//! A hub is flagged together with every distinct counterparty on the
//! aggregating/distributing side. Two false-positive filters run first:
//!   - Merchant: many senders, nothing ever leaves the account.
//!   - Payroll:  many receivers, nothing ever arrives.

use crate::{
    config::SmurfingConfig,
    detector::{DetectorOutcome, PatternDetector, PatternHit},
    graph::TransactionGraph,
    pattern::PatternType,
};

pub struct SmurfingDetector {
    config: SmurfingConfig,
}

impl SmurfingDetector {
    pub fn new(config: SmurfingConfig) -> Self {
        Self { config }
    }
}

impl PatternDetector for SmurfingDetector {
    fn name(&self) -> &'static str {
        "smurfing"
    }

    fn detect(&self, graph: &TransactionGraph) -> DetectorOutcome {
        let mut hits = Vec::new();
        let mut suppressed = 0usize;

        for (idx, node) in graph.accounts().iter().enumerate() {
            let unique_senders = graph.unique_senders(idx);
            let unique_receivers = graph.unique_receivers(idx);

            let likely_merchant =
                unique_senders > self.config.merchant_sender_floor && node.out_degree == 0;
            let likely_payroll =
                unique_receivers > self.config.payroll_receiver_floor && node.in_degree == 0;

            if likely_merchant || likely_payroll {
                suppressed += 1;
            }

            // Fan-in: aggregator that keeps the money moving.
            if unique_senders >= self.config.min_counterparties
                && !likely_merchant
                && node.out_degree > 0
            {
                let mut members = vec![idx];
                members.extend_from_slice(graph.predecessors(idx));
                hits.push(PatternHit {
                    pattern:    PatternType::SmurfingFanIn,
                    risk_score: self.config.risk_score,
                    members,
                });
            }

            // Fan-out: distributor that was funded from somewhere.
            if unique_receivers >= self.config.min_counterparties
                && !likely_payroll
                && node.in_degree > 0
            {
                let mut members = vec![idx];
                members.extend_from_slice(graph.successors(idx));
                hits.push(PatternHit {
                    pattern:    PatternType::SmurfingFanOut,
                    risk_score: self.config.risk_score,
                    members,
                });
            }
        }

        log::debug!(
            "smurfing: {} hubs flagged, {} merchant/payroll accounts suppressed",
            hits.len(),
            suppressed
        );
        DetectorOutcome::from_hits(hits)
    }
}
