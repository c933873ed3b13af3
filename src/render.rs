//! Pure render-state transitions. Nothing here touches the terminal; `ui.rs`
//! draws whatever `RenderState` it is given.

use crate::model::{AnalysisResult, Band, DictionaryIndicator, LocalChecks};

pub const PLACEHOLDER_STATUS: &str = "Enter password";
pub const RATE_LIMITED_STATUS: &str = "Too Many Attempts";

#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub score: u8,
    /// `None` renders the neutral (no input) frame.
    pub band: Option<Band>,
    pub status: String,
    pub entropy: f64,
    pub hash_pattern_score: u8,
    pub checks: LocalChecks,
    pub dictionary: DictionaryIndicator,
    pub suggestions: Vec<String>,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            score: 0,
            band: None,
            status: PLACEHOLDER_STATUS.to_string(),
            entropy: 0.0,
            hash_pattern_score: 0,
            checks: LocalChecks::default(),
            dictionary: DictionaryIndicator::Unknown,
            suggestions: Vec::new(),
        }
    }
}

impl RenderState {
    pub fn suggestions_visible(&self) -> bool {
        !self.suggestions.is_empty()
    }
}

#[derive(Debug)]
pub enum Signal<'a> {
    Checks(LocalChecks),
    Analysis(&'a AnalysisResult),
    RateLimited,
    Reset,
}

pub fn band_for(score: i64) -> Band {
    if score > 70 {
        Band::Strong
    } else if score > 40 {
        Band::Medium
    } else {
        Band::Weak
    }
}

fn percent(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

pub fn render(prev: &RenderState, signal: Signal<'_>) -> RenderState {
    match signal {
        Signal::Reset => RenderState::default(),
        Signal::Checks(checks) => RenderState {
            checks,
            ..prev.clone()
        },
        // only the status line changes
        Signal::RateLimited => RenderState {
            status: RATE_LIMITED_STATUS.to_string(),
            ..prev.clone()
        },
        Signal::Analysis(result) => {
            let dictionary = if !result.is_common && !result.has_kb_pattern {
                DictionaryIndicator::Secure
            } else {
                DictionaryIndicator::Patterned
            };
            RenderState {
                score: percent(result.score),
                band: Some(band_for(result.score)),
                status: result.status.clone(),
                entropy: result.entropy,
                hash_pattern_score: percent(result.hash_pattern_score),
                checks: prev.checks,
                dictionary,
                suggestions: result.suggestions.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: i64) -> AnalysisResult {
        AnalysisResult {
            score,
            status: "Medium".into(),
            entropy: 52.5,
            hash_pattern_score: 94,
            is_common: false,
            has_kb_pattern: false,
            suggestions: vec![],
        }
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(band_for(0), Band::Weak);
        assert_eq!(band_for(40), Band::Weak);
        assert_eq!(band_for(41), Band::Medium);
        assert_eq!(band_for(70), Band::Medium);
        assert_eq!(band_for(71), Band::Strong);
        assert_eq!(band_for(100), Band::Strong);
    }

    #[test]
    fn test_analysis_replaces_remote_fields_and_keeps_local_checks() {
        let checks = LocalChecks {
            length: true,
            lowercase: true,
            ..Default::default()
        };
        let prev = render(&RenderState::default(), Signal::Checks(checks));
        let mut res = result(55);
        res.suggestions = vec!["Cyber-Vault-Pulse-12".into()];
        let next = render(&prev, Signal::Analysis(&res));

        assert_eq!(next.score, 55);
        assert_eq!(next.band, Some(Band::Medium));
        assert_eq!(next.status, "Medium");
        assert_eq!(next.entropy, 52.5);
        assert_eq!(next.hash_pattern_score, 94);
        assert_eq!(next.checks, checks);
        assert_eq!(next.dictionary, DictionaryIndicator::Secure);
        assert!(next.suggestions_visible());

        // no merging: an empty suggestion list hides the panel again
        let next = render(&next, Signal::Analysis(&result(80)));
        assert!(!next.suggestions_visible());
        assert_eq!(next.band, Some(Band::Strong));
    }

    #[test]
    fn test_dictionary_indicator_is_independent_of_band() {
        let mut res = result(95);
        res.has_kb_pattern = true;
        let next = render(&RenderState::default(), Signal::Analysis(&res));
        assert_eq!(next.band, Some(Band::Strong));
        assert_eq!(next.dictionary, DictionaryIndicator::Patterned);

        let mut res = result(5);
        res.is_common = true;
        let next = render(&RenderState::default(), Signal::Analysis(&res));
        assert_eq!(next.dictionary, DictionaryIndicator::Patterned);
    }

    #[test]
    fn test_rate_limited_only_touches_status() {
        let prev = render(&RenderState::default(), Signal::Analysis(&result(62)));
        let next = render(&prev, Signal::RateLimited);
        assert_eq!(next.status, RATE_LIMITED_STATUS);
        assert_eq!(RenderState { status: prev.status.clone(), ..next }, prev);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let prev = render(&RenderState::default(), Signal::Analysis(&result(90)));
        let once = render(&prev, Signal::Reset);
        let twice = render(&once, Signal::Reset);
        assert_eq!(once, RenderState::default());
        assert_eq!(once, twice);
        assert_eq!(once.status, PLACEHOLDER_STATUS);
    }

    #[test]
    fn test_out_of_range_scores_are_clamped() {
        let mut res = result(140);
        res.hash_pattern_score = -3;
        let next = render(&RenderState::default(), Signal::Analysis(&res));
        assert_eq!(next.score, 100);
        assert_eq!(next.hash_pattern_score, 0);
    }
}
