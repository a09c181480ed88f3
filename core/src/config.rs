use crate::{
    error::{DetectError, DetectResult},
    types::Score,
};
use serde::{Deserialize, Serialize};

// ── Smurfing (fan-in / fan-out) ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmurfingConfig {
    /// Distinct counterparties needed before a hub is considered.
    pub min_counterparties: usize,
    /// A pure sink with strictly more unique senders than this is a merchant.
    pub merchant_sender_floor: usize,
    /// A pure source with strictly more unique receivers than this is payroll.
    pub payroll_receiver_floor: usize,
    pub risk_score: Score,
}

impl Default for SmurfingConfig {
    fn default() -> Self {
        Self {
            min_counterparties:     10,
            merchant_sender_floor:  10,
            payroll_receiver_floor: 10,
            risk_score:             85,
        }
    }
}

// ── Cycles ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    pub min_length: usize,
    pub max_length: usize,
    /// Hard cap on DFS roots per run. Candidates past the cap are skipped.
    pub max_root_searches: usize,
    pub risk_score: Score,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            min_length:        3,
            max_length:        5,
            max_root_searches: 200,
            risk_score:        95,
        }
    }
}

// ── Layered shells ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub risk_score: Score,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self { risk_score: 75 }
    }
}

// ── Top level ───────────────────────────────────────────────────────────────

/// Every tunable the detectors read. Defaults are the production thresholds;
/// a JSON file only needs to name the fields it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub smurfing: SmurfingConfig,
    pub cycles:   CycleConfig,
    pub shells:   ShellConfig,
}

impl DetectionConfig {
    /// Load and validate a config file.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json_str(&content)
            .map_err(|e| anyhow::anyhow!("Bad detection config {path}: {e}"))
    }

    pub fn from_json_str(json: &str) -> DetectResult<Self> {
        let config: DetectionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DetectResult<()> {
        check_score("smurfing.risk_score", self.smurfing.risk_score)?;
        check_score("cycles.risk_score", self.cycles.risk_score)?;
        check_score("shells.risk_score", self.shells.risk_score)?;

        if self.smurfing.min_counterparties == 0 {
            return Err(invalid("smurfing.min_counterparties", "must be at least 1".into()));
        }
        if self.cycles.min_length < 2 {
            return Err(invalid(
                "cycles.min_length",
                format!("must be at least 2, got {}", self.cycles.min_length),
            ));
        }
        if self.cycles.min_length > self.cycles.max_length {
            return Err(invalid(
                "cycles.max_length",
                format!(
                    "must not be below min_length ({} < {})",
                    self.cycles.max_length, self.cycles.min_length
                ),
            ));
        }
        Ok(())
    }
}

fn check_score(field: &'static str, score: Score) -> DetectResult<()> {
    if score == 0 || score > 100 {
        return Err(invalid(field, format!("must be within 1..=100, got {score}")));
    }
    Ok(())
}

fn invalid(field: &'static str, reason: String) -> DetectError {
    DetectError::InvalidConfig { field, reason }
}
