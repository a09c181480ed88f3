//! ring-runner: headless fraud-ring analysis over a transaction file.
//!
//! Usage:
//!   ring-runner --input transactions.json
//!   ring-runner --input transactions.json --config detection.json --output report.json
//!   ring-runner --input transactions.json --filter cycle --top 20

use anyhow::{Context, Result};
use ringwatch_core::{
    report::ThreatLevel, AnalysisResult, DetectionConfig, DetectionEngine, Transaction,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let input = string_arg(&args, "--input")
        .context("missing --input <transactions.json>")?;
    let config_path = string_arg(&args, "--config");
    let output = string_arg(&args, "--output");
    let filter = string_arg(&args, "--filter").unwrap_or("");
    let top = parse_arg(&args, "--top", 10usize);

    println!("RingWatch — ring-runner");
    println!("  started:   {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!("  input:     {input}");
    println!("  config:    {}", config_path.unwrap_or("(defaults)"));
    println!();

    let config = match config_path {
        Some(path) => DetectionConfig::load(path)?,
        None => DetectionConfig::default(),
    };
    let engine = DetectionEngine::new(config)?;
    log::debug!("detectors: {:?}", engine.detector_names());

    let transactions = load_transactions(input)?;
    let result = engine.run(&transactions);

    print_summary(&result, filter, top);

    if let Some(path) = output {
        let json = result.report.to_json_pretty()?;
        std::fs::write(path, json).with_context(|| format!("Cannot write {path}"))?;
        println!();
        println!("report written to {path}");
    }

    Ok(())
}

/// Parse a JSON array of transactions. No validation beyond decoding.
fn load_transactions(path: &str) -> Result<Vec<Transaction>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Cannot read {path}"))?;
    let transactions: Vec<Transaction> = serde_json::from_str(&content)
        .with_context(|| format!("{path} is not a JSON array of transactions"))?;
    log::info!("loaded {} transactions from {path}", transactions.len());
    Ok(transactions)
}

fn print_summary(result: &AnalysisResult, filter: &str, top: usize) {
    let report = &result.report;
    let s = &report.summary;

    let threat = match report.threat_level() {
        ThreatLevel::Critical => "CRITICAL",
        ThreatLevel::Low => "LOW",
    };

    println!("=== RUN SUMMARY ===");
    println!("  transactions:     {}", result.edges.len());
    println!("  accounts:         {}", s.total_accounts_analyzed);
    println!("  flagged:          {}", s.suspicious_accounts_flagged);
    println!("  rings:            {}", s.fraud_rings_detected);
    println!("  threat level:     {threat}");
    println!("  processing time:  {}s", s.processing_time_seconds);
    if s.cycle_search_truncated {
        println!("  note:             cycle search hit its root cap; some loops may be missing");
    }

    println!();
    println!("=== FRAUD RINGS ===");
    let rings = report.rings_matching(filter);
    if rings.is_empty() {
        println!("  (none)");
    }
    for ring in rings {
        println!(
            "  {} | {:<18} | score {:>3} | {} members: {}",
            ring.ring_id,
            ring.pattern_type.title(),
            ring.risk_score,
            ring.member_accounts.len(),
            ring.member_accounts.join(", ")
        );
    }

    println!();
    println!("=== TOP SUSPICIOUS ACCOUNTS ===");
    if report.suspicious_accounts.is_empty() {
        println!("  (none)");
    }
    for account in report.suspicious_accounts.iter().take(top) {
        let patterns: Vec<String> = account.detected_patterns.iter().map(|p| p.label()).collect();
        println!(
            "  {:<20} | score {:>3} | {} | {}",
            account.account_id,
            account.suspicion_score,
            account.ring_id.as_deref().unwrap_or("-"),
            patterns.join(", ")
        );
    }
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
