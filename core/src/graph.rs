//! Graph builder — the account registry and adjacency lists for one run.
//!
//! RULES:
//!   - Built once per run in a single pass over the transactions.
//!   - Topology (degrees, volume, adjacency) is read-only after build().
//!   - Only the scoring fields of an AccountNode change afterwards, and only
//!     through AccountNode::mark(), which the ring assembler owns.

use crate::{
    pattern::PatternType,
    transaction::Transaction,
    types::{AccountId, AccountIdx, RingId, Score},
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Per-account aggregate. One per distinct sender/receiver id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountNode {
    pub account_id:      AccountId,
    pub in_degree:       usize,
    pub out_degree:      usize,
    /// Inbound plus outbound amounts, not net flow.
    pub total_volume:    f64,
    pub suspicion_score: Score,
    pub flags:           Vec<PatternType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring_id:         Option<RingId>,
}

impl AccountNode {
    fn new(account_id: AccountId) -> Self {
        Self {
            account_id,
            in_degree:       0,
            out_degree:      0,
            total_volume:    0.0,
            suspicion_score: 0,
            flags:           Vec::new(),
            ring_id:         None,
        }
    }

    /// Apply one piece of ring evidence to this account.
    ///
    /// - ring_id: first writer wins
    /// - flags:   set union, insertion order kept
    /// - score:   max, never a sum
    pub fn mark(&mut self, ring_id: &RingId, pattern: PatternType, score: Score) {
        if self.ring_id.is_none() {
            self.ring_id = Some(ring_id.clone());
        }
        if !self.flags.contains(&pattern) {
            self.flags.push(pattern);
        }
        self.suspicion_score = self.suspicion_score.max(score);
    }

    pub fn is_suspicious(&self) -> bool {
        self.suspicion_score > 0
    }
}

/// Directed multigraph of accounts, stored as an index arena.
///
/// Account indices follow first appearance in the input (sender before
/// receiver within a transaction), so iteration order is stable for a
/// given input order.
#[derive(Debug, Clone, Default)]
pub struct TransactionGraph {
    accounts: Vec<AccountNode>,
    index:    HashMap<AccountId, AccountIdx>,
    /// sender -> receivers, one entry per transaction
    forward:  Vec<Vec<AccountIdx>>,
    /// receiver -> senders, one entry per transaction
    reverse:  Vec<Vec<AccountIdx>>,
}

impl TransactionGraph {
    pub fn build(transactions: &[Transaction]) -> Self {
        let mut graph = TransactionGraph::default();
        let mut self_transfers = 0usize;

        for tx in transactions {
            let sender = graph.intern(&tx.sender_id);
            let receiver = graph.intern(&tx.receiver_id);

            let s = &mut graph.accounts[sender];
            s.out_degree += 1;
            s.total_volume += tx.amount;

            let r = &mut graph.accounts[receiver];
            r.in_degree += 1;
            r.total_volume += tx.amount;

            graph.forward[sender].push(receiver);
            graph.reverse[receiver].push(sender);

            if tx.is_self_transfer() {
                self_transfers += 1;
            }
        }

        log::debug!(
            "graph built: {} accounts, {} transactions ({} self-transfers)",
            graph.accounts.len(),
            transactions.len(),
            self_transfers
        );
        graph
    }

    fn intern(&mut self, account_id: &str) -> AccountIdx {
        if let Some(&idx) = self.index.get(account_id) {
            return idx;
        }
        let idx = self.accounts.len();
        self.accounts.push(AccountNode::new(account_id.to_string()));
        self.forward.push(Vec::new());
        self.reverse.push(Vec::new());
        self.index.insert(account_id.to_string(), idx);
        idx
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn index_of(&self, account_id: &str) -> Option<AccountIdx> {
        self.index.get(account_id).copied()
    }

    pub fn account(&self, idx: AccountIdx) -> &AccountNode {
        &self.accounts[idx]
    }

    pub fn account_mut(&mut self, idx: AccountIdx) -> Option<&mut AccountNode> {
        self.accounts.get_mut(idx)
    }

    pub fn get(&self, account_id: &str) -> Option<&AccountNode> {
        self.index_of(account_id).map(|idx| &self.accounts[idx])
    }

    pub fn accounts(&self) -> &[AccountNode] {
        &self.accounts
    }

    pub fn into_accounts(self) -> Vec<AccountNode> {
        self.accounts
    }

    /// Receivers of `idx`, one entry per outbound transaction.
    pub fn successors(&self, idx: AccountIdx) -> &[AccountIdx] {
        &self.forward[idx]
    }

    /// Senders into `idx`, one entry per inbound transaction.
    pub fn predecessors(&self, idx: AccountIdx) -> &[AccountIdx] {
        &self.reverse[idx]
    }

    pub fn unique_senders(&self, idx: AccountIdx) -> usize {
        self.reverse[idx].iter().collect::<HashSet<_>>().len()
    }

    pub fn unique_receivers(&self, idx: AccountIdx) -> usize {
        self.forward[idx].iter().collect::<HashSet<_>>().len()
    }
}
