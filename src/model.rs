use serde::{Deserialize, Serialize};

use crate::api::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Welcome,
    Analyzer,
}

/// Which panel receives keystrokes on the analyzer screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Suggestions,
    Generator,
}

#[derive(Debug)]
pub enum AppEvent {
    DebounceElapsed { generation: u64, password: String },
    AnalysisFinished { seq: u64, outcome: Result<AnalyzeOutcome, ApiError> },
    Generated { seq: u64, result: Result<String, ApiError> },
    CopyAckExpired { token: u64 },
}

/// Response body of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisResult {
    pub score: i64,
    pub status: String,
    pub entropy: f64,
    pub hash_pattern_score: i64,
    pub is_common: bool,
    pub has_kb_pattern: bool,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeOutcome {
    Report(AnalysisResult),
    RateLimited,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedPassword {
    pub password: String,
}

/// Generation strategies understood by `POST /generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum GenerateKind {
    Simple,
    Moderate,
    #[default]
    Strong,
    #[serde(rename = "Very Strong")]
    VeryStrong,
}

impl GenerateKind {
    pub const ALL: [GenerateKind; 4] = [
        GenerateKind::Simple,
        GenerateKind::Moderate,
        GenerateKind::Strong,
        GenerateKind::VeryStrong,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GenerateKind::Simple => "Simple",
            GenerateKind::Moderate => "Moderate",
            GenerateKind::Strong => "Strong",
            GenerateKind::VeryStrong => "Very Strong",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Weak,
    Medium,
    Strong,
}

/// State of the remote-only dictionary / keyboard-pattern indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DictionaryIndicator {
    #[default]
    Unknown,
    Secure,
    Patterned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocalChecks {
    pub length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub number: bool,
    pub special: bool,
}

impl LocalChecks {
    /// (label, satisfied) pairs in display order.
    pub fn entries(&self) -> [(&'static str, bool); 5] {
        [
            ("At least 8 characters", self.length),
            ("Uppercase letter", self.uppercase),
            ("Lowercase letter", self.lowercase),
            ("Number", self.number),
            ("Special character", self.special),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_kind_cycles_both_ways() {
        let mut kind = GenerateKind::default();
        assert_eq!(kind, GenerateKind::Strong);
        kind = kind.next();
        assert_eq!(kind, GenerateKind::VeryStrong);
        kind = kind.next();
        assert_eq!(kind, GenerateKind::Simple);
        assert_eq!(kind.prev(), GenerateKind::VeryStrong);
    }

    #[test]
    fn test_generate_kind_wire_names() {
        assert_eq!(serde_json::to_value(GenerateKind::VeryStrong).unwrap(), "Very Strong");
        assert_eq!(serde_json::to_value(GenerateKind::Simple).unwrap(), "Simple");
    }

    #[test]
    fn test_analysis_result_ignores_extra_fields_and_defaults_suggestions() {
        let body = serde_json::json!({
            "score": 35,
            "status": "Weak",
            "entropy": 35.0,
            "hash_pattern_score": 93,
            "is_common": false,
            "has_kb_pattern": true,
            "checks": {"length": true}
        });
        let parsed: AnalysisResult = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.score, 35);
        assert!(parsed.has_kb_pattern);
        assert!(parsed.suggestions.is_empty());
    }
}
