//! Ring assembler — turns detector hits into fraud rings.
//!
//! The assembler is the only writer of account scoring state. It owns the
//! ring id counter for exactly one run, so concurrent runs never share ids.

use crate::{
    detector::PatternHit,
    graph::TransactionGraph,
    pattern::PatternType,
    types::{AccountId, AccountIdx, RingId, Score},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One detected pattern instance. Rings are never merged, even when
/// their members overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudRing {
    pub ring_id:         RingId,
    pub member_accounts: Vec<AccountId>,
    pub pattern_type:    PatternType,
    pub risk_score:      Score,
}

impl FraudRing {
    pub fn contains(&self, account_id: &str) -> bool {
        self.member_accounts.iter().any(|m| m == account_id)
    }
}

/// Sequential `RING_NNN` ids, starting at 1.
#[derive(Debug, Default)]
pub struct RingIdGenerator {
    issued: u32,
}

impl RingIdGenerator {
    pub fn next_id(&mut self) -> RingId {
        self.issued += 1;
        format!("RING_{:03}", self.issued)
    }

    pub fn issued(&self) -> u32 {
        self.issued
    }
}

#[derive(Debug, Default)]
pub struct RingAssembler {
    ids:   RingIdGenerator,
    rings: Vec<FraudRing>,
}

impl RingAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one hit and fold its evidence into every member account.
    ///
    /// An id is consumed even if no member resolves, so ids reflect
    /// detection order. Returns the ring id when a ring was recorded.
    pub fn assemble(&mut self, graph: &mut TransactionGraph, hit: &PatternHit) -> Option<RingId> {
        let ring_id = self.ids.next_id();
        let members = Self::apply(graph, &ring_id, hit.pattern, hit.risk_score, &hit.members);

        if members.is_empty() {
            log::debug!("{ring_id} ({}) dropped: no resolvable members", hit.pattern);
            return None;
        }

        self.rings.push(FraudRing {
            ring_id:         ring_id.clone(),
            member_accounts: members,
            pattern_type:    hit.pattern,
            risk_score:      hit.risk_score,
        });
        Some(ring_id)
    }

    fn apply(
        graph: &mut TransactionGraph,
        ring_id: &RingId,
        pattern: PatternType,
        score: Score,
        members: &[AccountIdx],
    ) -> Vec<AccountId> {
        let mut seen = HashSet::new();
        let mut resolved = Vec::new();
        for &idx in members {
            if !seen.insert(idx) {
                continue;
            }
            if let Some(node) = graph.account_mut(idx) {
                node.mark(ring_id, pattern, score);
                resolved.push(node.account_id.clone());
            }
        }
        resolved
    }

    pub fn into_rings(self) -> Vec<FraudRing> {
        self.rings
    }
}
