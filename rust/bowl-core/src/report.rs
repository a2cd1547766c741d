//! End-of-game report: percentage, handicap, comparison and advice.

use serde::Serialize;

use crate::config::{AdviceThresholds, ReportConfig};
use crate::scoring::{Score, MAX_SCORE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advice {
    /// Below the low threshold.
    Aim,
    /// Below the high threshold.
    StrikesAndSpares,
    KeepItUp,
}

impl Advice {
    pub fn for_score(score: Score, t: &AdviceThresholds) -> Self {
        if score < t.low {
            Advice::Aim
        } else if score < t.high {
            Advice::StrikesAndSpares
        } else {
            Advice::KeepItUp
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Advice::Aim => "Practice more on your aim and try to knock down more pins each time.",
            Advice::StrikesAndSpares => "Work on your strikes and spares to get higher scores.",
            Advice::KeepItUp => "You're doing great! Keep practicing to maintain your performance.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameReport {
    pub score: Score,
    /// Share of a perfect game, 0.0..=100.0.
    pub percentage: f64,
    pub handicap: i32,
    pub reference_average: Score,
    /// `score - reference_average`.
    pub vs_average: i32,
    pub advice: Advice,
}

impl GameReport {
    pub fn new(score: Score, cfg: &ReportConfig) -> Self {
        Self {
            score,
            percentage: f64::from(score) / f64::from(MAX_SCORE) * 100.0,
            handicap: i32::from(cfg.handicap_base) - i32::from(score),
            reference_average: cfg.reference_average,
            vs_average: i32::from(score) - i32::from(cfg.reference_average),
            advice: Advice::for_score(score, &cfg.advice),
        }
    }

    /// Report lines in print order.
    pub fn lines(&self) -> Vec<String> {
        let sign = if self.vs_average >= 0 { "+" } else { "" };
        vec![
            format!("Your game score is: {:03} / {MAX_SCORE}", self.score),
            format!(
                "Your score percentage is: {}%",
                format_percentage(self.percentage)
            ),
            format!("Your handicap is: {}", self.handicap),
            format!(
                "Compared to the national average ({}), your score is: {sign}{}",
                self.reference_average, self.vs_average
            ),
            format!("Advice for improvement: {}", self.advice.text()),
        ]
    }
}

/// At most two decimals, trailing zeros and a bare point dropped (`50`, `5.33`, `5.1`).
pub fn format_percentage(p: f64) -> String {
    let s = format!("{p:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
