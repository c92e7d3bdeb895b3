//! Triage scoring and priority classification
//!
//! Turns a free-text symptom description and a vitals snapshot into a
//! priority score and a discrete category that drive queue ordering and
//! dashboard color-coding:
//! - Lexical scan over fixed symptom keyword tiers
//! - Threshold checks over the vitals snapshot
//! - Final score-to-category normalization

mod keywords;
mod vitals;

pub use vitals::VitalsSnapshot;

use serde::{Serialize, Deserialize};

/// Triage category in increasing severity. Drives queue priority and the
/// red/yellow/green badges on the dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriageCategory {
    Green,
    Yellow,
    Red,
}

impl TriageCategory {
    /// Raise to `candidate` if it is more severe. A category never demotes
    /// within a single evaluation.
    pub fn escalate(self, candidate: TriageCategory) -> TriageCategory {
        self.max(candidate)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TriageCategory::Green => "green",
            TriageCategory::Yellow => "yellow",
            TriageCategory::Red => "red",
        }
    }
}

/// Outcome of one triage pass. Constructed fresh on every evaluation and
/// never mutated; callers replace a stored result wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResult {
    pub score: u32,
    pub category: TriageCategory,
}

// Floors applied to the accumulated total after both passes. A total above
// a floor forces the category up no matter which rules produced the points.
const RED_SCORE_FLOOR: u32 = 60;
const YELLOW_SCORE_FLOOR: u32 = 30;

/// Run one full triage pass over a symptom description and vitals snapshot.
///
/// Pure and total: no input produces an error, and an empty description with
/// an all-absent snapshot scores zero. Safe to call concurrently; the keyword
/// and threshold tables are read-only.
pub fn evaluate_triage(symptoms: &str, vitals: &VitalsSnapshot) -> TriageResult {
    let (mut score, mut category) = keywords::scan_symptoms(symptoms);

    // Vitals always run, even when the text already forced red
    let (vitals_score, vitals_category) = vitals::scan_vitals(vitals);
    score += vitals_score;
    category = category.escalate(vitals_category);

    if score > RED_SCORE_FLOOR {
        category = category.escalate(TriageCategory::Red);
    } else if score > YELLOW_SCORE_FLOOR {
        category = category.escalate(TriageCategory::Yellow);
    }

    TriageResult { score, category }
}
