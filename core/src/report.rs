//! Report compiler — the terminal output of a run.

use crate::{
    graph::AccountNode,
    pattern::PatternType,
    ring::FraudRing,
    types::{AccountId, RingId, Score},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuspiciousAccount {
    pub account_id:        AccountId,
    pub suspicion_score:   Score,
    pub detected_patterns: Vec<PatternType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring_id:           Option<RingId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_accounts_analyzed:     usize,
    pub suspicious_accounts_flagged: usize,
    pub fraud_rings_detected:        usize,
    pub processing_time_seconds:     f64,
    /// The cycle search hit its root cap; some loops may be missing.
    #[serde(default)]
    pub cycle_search_truncated:      bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreatLevel {
    Low,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForensicReport {
    pub suspicious_accounts: Vec<SuspiciousAccount>,
    pub fraud_rings:         Vec<FraudRing>,
    pub summary:             SummaryStats,
}

impl ForensicReport {
    /// Build the report from scored accounts and assembled rings.
    ///
    /// Both lists are sorted descending by score. The sort is stable, so
    /// ties keep registry / detection order.
    pub fn compile(
        accounts: &[AccountNode],
        mut rings: Vec<FraudRing>,
        elapsed: Duration,
        cycle_search_truncated: bool,
    ) -> Self {
        let mut suspicious_accounts: Vec<SuspiciousAccount> = accounts
            .iter()
            .filter(|n| n.is_suspicious())
            .map(|n| SuspiciousAccount {
                account_id:        n.account_id.clone(),
                suspicion_score:   n.suspicion_score,
                detected_patterns: n.flags.clone(),
                ring_id:           n.ring_id.clone(),
            })
            .collect();
        suspicious_accounts.sort_by(|a, b| b.suspicion_score.cmp(&a.suspicion_score));
        rings.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));

        let summary = SummaryStats {
            total_accounts_analyzed:     accounts.len(),
            suspicious_accounts_flagged: suspicious_accounts.len(),
            fraud_rings_detected:        rings.len(),
            processing_time_seconds:     round_seconds(elapsed),
            cycle_search_truncated,
        };

        Self {
            suspicious_accounts,
            fraud_rings: rings,
            summary,
        }
    }

    pub fn threat_level(&self) -> ThreatLevel {
        if self.summary.fraud_rings_detected > 0 {
            ThreatLevel::Critical
        } else {
            ThreatLevel::Low
        }
    }

    /// Case-insensitive substring match on ring id or pattern label.
    /// An empty filter matches every ring.
    pub fn rings_matching(&self, filter: &str) -> Vec<&FraudRing> {
        let needle = filter.to_lowercase();
        self.fraud_rings
            .iter()
            .filter(|r| {
                r.pattern_type.label().contains(&needle)
                    || r.ring_id.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn ring(&self, ring_id: &str) -> Option<&FraudRing> {
        self.fraud_rings.iter().find(|r| r.ring_id == ring_id)
    }

    pub fn account(&self, account_id: &str) -> Option<&SuspiciousAccount> {
        self.suspicious_accounts.iter().find(|a| a.account_id == account_id)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Wall-clock seconds, rounded to 4 decimal places.
fn round_seconds(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processing_time_keeps_four_decimals() {
        assert_eq!(round_seconds(Duration::from_micros(123_456)), 0.1235);
        assert_eq!(round_seconds(Duration::ZERO), 0.0);
    }

    #[test]
    fn empty_report_is_low_threat() {
        let report = ForensicReport::compile(&[], Vec::new(), Duration::ZERO, false);
        assert_eq!(report.threat_level(), ThreatLevel::Low);
        assert_eq!(report.summary.total_accounts_analyzed, 0);
        assert!(report.rings_matching("").is_empty());
    }
}
