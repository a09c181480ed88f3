//! Bounded cycle search: lengths, de-duplication and the root cap.

use ringwatch_core::{
    config::CycleConfig,
    cycle_detector::CycleDetector,
    detector::PatternDetector,
    graph::TransactionGraph,
    DetectionConfig, DetectionEngine, PatternType, Transaction,
};

fn tx(id: &str, from: &str, to: &str) -> Transaction {
    Transaction::new(id, "2026-03-03 11:00:00", from, to, 100_000.0)
}

/// A closed loop through `names` in order.
fn ring_of(prefix: &str, names: &[&str]) -> Vec<Transaction> {
    names
        .iter()
        .enumerate()
        .map(|(i, from)| {
            let to = names[(i + 1) % names.len()];
            tx(&format!("{prefix}-{i}"), from, to)
        })
        .collect()
}

fn cycle_rings(report: &ringwatch_core::ForensicReport) -> Vec<&ringwatch_core::ring::FraudRing> {
    report
        .fraud_rings
        .iter()
        .filter(|r| matches!(r.pattern_type, PatternType::Cycle { .. }))
        .collect()
}

#[test]
fn four_account_loop_is_one_cycle_ring() {
    let txns = ring_of("c", &["A", "B", "C", "D"]);

    let report = DetectionEngine::default().run(&txns).report;
    let cycles = cycle_rings(&report);

    assert_eq!(cycles.len(), 1, "each loop is reported once");
    let ring = cycles[0];
    assert_eq!(ring.pattern_type, PatternType::Cycle { length: 4 });
    assert_eq!(ring.risk_score, 95);
    let mut members = ring.member_accounts.clone();
    members.sort();
    assert_eq!(members, vec!["A", "B", "C", "D"]);

    // The loop is found before the shell pass, so it owns every ring_id.
    assert_eq!(ring.ring_id, "RING_001");
    for account in &report.suspicious_accounts {
        assert_eq!(account.suspicion_score, 95);
        assert_eq!(account.ring_id.as_deref(), Some("RING_001"));
    }
}

#[test]
fn triangle_and_pentagon_are_detected() {
    let mut txns = ring_of("t", &["T1", "T2", "T3"]);
    txns.extend(ring_of("p", &["P1", "P2", "P3", "P4", "P5"]));

    let report = DetectionEngine::default().run(&txns).report;
    let mut lengths: Vec<PatternType> = cycle_rings(&report).iter().map(|r| r.pattern_type).collect();
    lengths.sort_by_key(|p| p.label());

    assert_eq!(
        lengths,
        vec![PatternType::Cycle { length: 3 }, PatternType::Cycle { length: 5 }]
    );
}

#[test]
fn loops_outside_length_bounds_are_ignored() {
    let mut txns = ring_of("two", &["X", "Y"]);
    txns.extend(ring_of("six", &["S1", "S2", "S3", "S4", "S5", "S6"]));

    let report = DetectionEngine::default().run(&txns).report;
    assert!(cycle_rings(&report).is_empty());
}

#[test]
fn raising_max_length_finds_longer_loops() {
    let txns = ring_of("six", &["S1", "S2", "S3", "S4", "S5", "S6"]);
    let mut config = DetectionConfig::default();
    config.cycles.max_length = 6;

    let report = DetectionEngine::new(config).unwrap().run(&txns).report;
    let cycles = cycle_rings(&report);
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].pattern_type, PatternType::Cycle { length: 6 });
}

#[test]
fn branching_loops_through_one_root_are_distinct() {
    // A -> B -> D -> A and A -> C -> D -> A
    let txns = vec![
        tx("1", "A", "B"),
        tx("2", "A", "C"),
        tx("3", "B", "D"),
        tx("4", "C", "D"),
        tx("5", "D", "A"),
    ];
    let graph = TransactionGraph::build(&txns);
    let detector = CycleDetector::new(CycleConfig::default());
    let idx = |id: &str| graph.index_of(id).unwrap();

    let from_a = detector.search_from(&graph, idx("A"));
    assert_eq!(
        from_a,
        vec![vec![idx("A"), idx("B"), idx("D")], vec![idx("A"), idx("C"), idx("D")]]
    );

    let outcome = detector.detect(&graph);
    assert_eq!(outcome.hits.len(), 2);
    assert!(!outcome.truncated);
}

#[test]
fn search_stops_at_max_depth() {
    let txns = ring_of("six", &["S1", "S2", "S3", "S4", "S5", "S6"]);
    let graph = TransactionGraph::build(&txns);
    let detector = CycleDetector::new(CycleConfig::default());

    assert!(detector.search_from(&graph, 0).is_empty());
}

#[test]
fn exactly_max_root_searches_candidates_is_not_truncated() {
    // 50 disjoint squares = 200 candidates.
    let mut txns = Vec::new();
    for s in 0..50 {
        let names: Vec<String> = (0..4).map(|i| format!("SQ{s}_{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        txns.extend(ring_of(&format!("sq{s}"), &refs));
    }

    let report = DetectionEngine::default().run(&txns).report;
    assert_eq!(cycle_rings(&report).len(), 50);
    assert!(!report.summary.cycle_search_truncated);
}

#[test]
fn candidates_past_the_cap_are_skipped_and_flagged() {
    // 51 squares = 204 candidates; the last square's accounts are never roots.
    let mut txns = Vec::new();
    for s in 0..51 {
        let names: Vec<String> = (0..4).map(|i| format!("SQ{s}_{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        txns.extend(ring_of(&format!("sq{s}"), &refs));
    }

    let report = DetectionEngine::default().run(&txns).report;
    let cycles = cycle_rings(&report);
    assert_eq!(cycles.len(), 50);
    assert!(cycles.iter().all(|r| !r.contains("SQ50_0")));
    assert!(report.summary.cycle_search_truncated);
}

#[test]
fn small_root_cap_limits_search() {
    let mut txns = ring_of("a", &["A1", "A2", "A3"]);
    txns.extend(ring_of("b", &["B1", "B2", "B3"]));
    let mut config = DetectionConfig::default();
    config.cycles.max_root_searches = 1;

    let report = DetectionEngine::new(config).unwrap().run(&txns).report;
    let cycles = cycle_rings(&report);
    assert_eq!(cycles.len(), 1);
    assert!(cycles[0].contains("A1"));
    assert!(report.summary.cycle_search_truncated);
}

#[test]
fn pure_sources_and_sinks_are_never_roots() {
    let mut txns = ring_of("c", &["A", "B", "C"]);
    txns.push(tx("in", "SOURCE", "A"));
    txns.push(tx("out", "C", "SINK"));

    let report = DetectionEngine::default().run(&txns).report;
    let cycles = cycle_rings(&report);
    assert_eq!(cycles.len(), 1);
    assert!(!cycles[0].contains("SOURCE"));
    assert!(!cycles[0].contains("SINK"));
}
