//! Fraud pattern labels.
//!
//! Every detector reports under one of these variants. The wire form is the
//! snake_case label (`smurfing_fan_in`, `cycle_length_4`, ...), which is what
//! reports and downstream dashboards key on.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum PatternType {
    /// Many distinct senders into a hub that keeps moving money.
    SmurfingFanIn,
    /// A funded hub paying out to many distinct receivers.
    SmurfingFanOut,
    /// Directed transaction loop with `length` member accounts.
    Cycle { length: usize },
    /// Two consecutive pass-through accounts (in=1, out=1).
    LayeredShell,
}

const CYCLE_PREFIX: &str = "cycle_length_";

impl PatternType {
    /// Stable machine label, as stored in `flags` and `pattern_type`.
    pub fn label(&self) -> String {
        match self {
            PatternType::SmurfingFanIn    => "smurfing_fan_in".to_string(),
            PatternType::SmurfingFanOut   => "smurfing_fan_out".to_string(),
            PatternType::Cycle { length } => format!("{CYCLE_PREFIX}{length}"),
            PatternType::LayeredShell     => "layered_shell".to_string(),
        }
    }

    /// Display title for tables and legends, e.g. "Cycle Length 4".
    pub fn title(&self) -> String {
        self.label()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "smurfing_fan_in"  => Some(PatternType::SmurfingFanIn),
            "smurfing_fan_out" => Some(PatternType::SmurfingFanOut),
            "layered_shell"    => Some(PatternType::LayeredShell),
            other => other
                .strip_prefix(CYCLE_PREFIX)
                .and_then(|n| n.parse().ok())
                .map(|length| PatternType::Cycle { length }),
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<PatternType> for String {
    fn from(pattern: PatternType) -> Self {
        pattern.label()
    }
}

impl TryFrom<String> for PatternType {
    type Error = String;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        PatternType::parse(&label).ok_or_else(|| format!("unknown pattern type '{label}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_report_vocabulary() {
        assert_eq!(PatternType::SmurfingFanIn.label(), "smurfing_fan_in");
        assert_eq!(PatternType::SmurfingFanOut.label(), "smurfing_fan_out");
        assert_eq!(PatternType::Cycle { length: 4 }.label(), "cycle_length_4");
        assert_eq!(PatternType::LayeredShell.label(), "layered_shell");
    }

    #[test]
    fn titles_are_human_readable() {
        assert_eq!(PatternType::SmurfingFanIn.title(), "Smurfing Fan In");
        assert_eq!(PatternType::Cycle { length: 3 }.title(), "Cycle Length 3");
    }

    #[test]
    fn unknown_labels_are_rejected() {
        assert_eq!(PatternType::parse("cycle_length_x"), None);
        assert_eq!(PatternType::parse("high_velocity"), None);
        assert_eq!(
            PatternType::parse("cycle_length_5"),
            Some(PatternType::Cycle { length: 5 })
        );
    }

    #[test]
    fn serializes_as_label_string() {
        let json = serde_json::to_string(&PatternType::Cycle { length: 3 }).unwrap();
        assert_eq!(json, "\"cycle_length_3\"");
        let back: PatternType = serde_json::from_str("\"layered_shell\"").unwrap();
        assert_eq!(back, PatternType::LayeredShell);
    }
}
