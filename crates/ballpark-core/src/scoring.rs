//! Guess scoring
//!
//! How far a guess landed from actual spending, as a percentage, an
//! accuracy tier, and a 0-100 session score. Presentation (emoji, colors)
//! belongs to callers; this module is numbers only.

use crate::models::GameResult;

/// Distance between guess and actual, as a percentage of actual.
///
/// A zero actual cannot anchor a ratio, so a zero guess counts as exact and
/// anything else as 100% off.
pub fn percent_difference(guess: f64, actual: f64) -> f64 {
    if actual == 0.0 {
        if guess == 0.0 {
            0.0
        } else {
            100.0
        }
    } else {
        ((guess - actual) / actual).abs() * 100.0
    }
}

/// Accuracy tier for a single guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    Poor,
    VeryPoor,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Fair => "Fair",
            Rating::Poor => "Poor",
            Rating::VeryPoor => "Very Poor",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map a percent-off value onto its accuracy tier
pub fn accuracy_rating(percent_off: f64) -> Rating {
    if percent_off <= 5.0 {
        Rating::Excellent
    } else if percent_off <= 15.0 {
        Rating::Good
    } else if percent_off <= 30.0 {
        Rating::Fair
    } else if percent_off <= 50.0 {
        Rating::Poor
    } else {
        Rating::VeryPoor
    }
}

/// Session score on a 0-100 scale: 100 minus the mean percent-off, clamped.
/// No rounds scores 0.
pub fn overall_score(results: &[GameResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }

    let avg: f64 = results.iter().map(|r| r.percent_off).sum::<f64>() / results.len() as f64;
    (100.0 - avg).clamp(0.0, 100.0)
}

/// Score one guess against the actual spending for a group
pub fn score_round(category_name: &str, guess: f64, actual: f64) -> GameResult {
    GameResult {
        category_name: category_name.to_string(),
        guess,
        actual,
        difference: actual - guess,
        percent_off: percent_difference(guess, actual),
    }
}
