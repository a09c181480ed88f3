//! Cycle detector — bounded-depth DFS for short transaction loops.
//!
//! Search shape:
//!   - Roots are accounts with both inbound and outbound transactions, in
//!     registry order, capped at `max_root_searches`.
//!   - The path never repeats an account and never exceeds `max_length`.
//!   - The first edge that closes back onto the root with at least
//!     `min_length` accounts on the path ends that branch and emits a hit.
//!
//! The same loop is reached once from every member that gets searched as a
//! root. Each loop is emitted once, keyed by its rotation that starts at the
//! lowest registry index.

use crate::{
    config::CycleConfig,
    detector::{DetectorOutcome, PatternDetector, PatternHit},
    graph::TransactionGraph,
    pattern::PatternType,
    types::AccountIdx,
};
use std::collections::HashSet;

pub struct CycleDetector {
    config: CycleConfig,
}

/// One level of the explicit DFS stack.
struct Frame {
    node: AccountIdx,
    /// Next position in `node`'s successor list to try.
    next: usize,
}

impl CycleDetector {
    pub fn new(config: CycleConfig) -> Self {
        Self { config }
    }

    /// Accounts that can sit on a loop at all.
    fn candidates(graph: &TransactionGraph) -> Vec<AccountIdx> {
        graph
            .accounts()
            .iter()
            .enumerate()
            .filter(|(_, n)| n.in_degree > 0 && n.out_degree > 0)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// All loops reachable from `root` under the depth bound.
    /// Each returned path starts at `root` and omits the closing edge.
    pub fn search_from(&self, graph: &TransactionGraph, root: AccountIdx) -> Vec<Vec<AccountIdx>> {
        let mut found = Vec::new();
        let mut path: Vec<AccountIdx> = vec![root];
        let mut stack = vec![Frame { node: root, next: 0 }];

        while let Some(frame) = stack.last_mut() {
            let successors = graph.successors(frame.node);
            let Some(&neighbor) = successors.get(frame.next) else {
                stack.pop();
                path.pop();
                continue;
            };
            frame.next += 1;

            let depth = path.len();
            if neighbor == root && depth >= self.config.min_length {
                found.push(path.clone());
                // A closing edge ends this branch; siblings of the parent
                // are still explored.
                stack.pop();
                path.pop();
                continue;
            }
            if depth < self.config.max_length && !path.contains(&neighbor) {
                path.push(neighbor);
                stack.push(Frame { node: neighbor, next: 0 });
            }
        }

        found
    }
}

/// Rotate a loop so it starts at its smallest index.
fn canonical_rotation(cycle: &[AccountIdx]) -> Vec<AccountIdx> {
    let start = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, idx)| **idx)
        .map(|(pos, _)| pos)
        .unwrap_or(0);
    cycle[start..].iter().chain(&cycle[..start]).copied().collect()
}

impl PatternDetector for CycleDetector {
    fn name(&self) -> &'static str {
        "cycles"
    }

    fn detect(&self, graph: &TransactionGraph) -> DetectorOutcome {
        let candidates = Self::candidates(graph);
        let truncated = candidates.len() > self.config.max_root_searches;
        if truncated {
            log::warn!(
                "cycle search truncated: {} candidates, only {} roots searched",
                candidates.len(),
                self.config.max_root_searches
            );
        }

        let mut seen: HashSet<Vec<AccountIdx>> = HashSet::new();
        let mut hits = Vec::new();

        for &root in candidates.iter().take(self.config.max_root_searches) {
            for cycle in self.search_from(graph, root) {
                if !seen.insert(canonical_rotation(&cycle)) {
                    continue;
                }
                hits.push(PatternHit {
                    pattern:    PatternType::Cycle { length: cycle.len() },
                    risk_score: self.config.risk_score,
                    members:    cycle,
                });
            }
        }

        log::debug!("cycles: {} distinct loops found", hits.len());
        DetectorOutcome { hits, truncated }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_starts_at_lowest_index() {
        assert_eq!(canonical_rotation(&[3, 1, 2]), vec![1, 2, 3]);
        assert_eq!(canonical_rotation(&[0, 5, 4]), vec![0, 5, 4]);
    }

    #[test]
    fn opposite_directions_stay_distinct() {
        assert_ne!(canonical_rotation(&[0, 1, 2]), canonical_rotation(&[0, 2, 1]));
    }
}
