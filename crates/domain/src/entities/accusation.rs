//! Accusation entity and verdict computation
//!
//! An accusation is written at most once per session. The verdict compares each field
//! of the guess against the case's ground truth and explains the outcome in terms of
//! the evidence the player actually uncovered.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregates::Case;
use crate::ids::{ClueId, SuspectId};
use crate::value_objects::{grade_text, MatchGrade, VerdictPolicy};

/// The player's final guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccusationGuess {
    /// Suspect id or name
    pub culprit: String,
    pub motive: String,
    pub method: String,
}

impl AccusationGuess {
    pub fn new(
        culprit: impl Into<String>,
        motive: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            culprit: culprit.into(),
            motive: motive.into(),
            method: method.into(),
        }
    }
}

/// Write-once accusation record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accusation {
    pub guess: AccusationGuess,
    pub at: DateTime<Utc>,
    pub verdict: Verdict,
}

/// Computed outcome of an accusation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub success: bool,
    pub culprit: MatchGrade,
    pub motive: MatchGrade,
    pub method: MatchGrade,
    /// The suspect the guess resolved to, if any
    pub accused: Option<SuspectId>,
    /// Revealed clues that point at the accused
    pub supporting_clues: Vec<ClueId>,
    /// Revealed clues that clear the accused or point at someone else
    pub contradicting_clues: Vec<ClueId>,
    pub explanation: String,
}

/// Tuning for verdict computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerdictRules {
    pub policy: VerdictPolicy,
    /// Minimum word-overlap ratio for a `Partial` motive/method grade
    pub partial_threshold: f64,
}

impl Default for VerdictRules {
    fn default() -> Self {
        Self {
            policy: VerdictPolicy::default(),
            partial_threshold: crate::value_objects::DEFAULT_PARTIAL_THRESHOLD,
        }
    }
}

impl Verdict {
    /// Grade `guess` against the ground truth of `case`.
    pub fn compute(
        case: &Case,
        revealed: &BTreeSet<ClueId>,
        guess: &AccusationGuess,
        rules: VerdictRules,
    ) -> Self {
        let accused = case.resolve_suspect(&guess.culprit).map(|s| s.id.clone());
        let culprit = match &accused {
            Some(id) if id == case.culprit() => MatchGrade::Exact,
            _ => MatchGrade::Incorrect,
        };
        let motive = grade_text(&guess.motive, case.motive(), rules.partial_threshold);
        let method = grade_text(&guess.method, case.method(), rules.partial_threshold);

        let success = match rules.policy {
            VerdictPolicy::CulpritOnly => culprit.is_match(),
            VerdictPolicy::AllFields => culprit.is_match() && motive.is_match() && method.is_match(),
        };

        let mut supporting_clues = Vec::new();
        let mut contradicting_clues = Vec::new();
        if let Some(accused_id) = &accused {
            for clue in case.clues().iter().filter(|c| revealed.contains(&c.id)) {
                if clue.implicates_suspect(accused_id) {
                    supporting_clues.push(clue.id.clone());
                } else if clue.exculpates_suspect(accused_id) || !clue.implicates.is_empty() {
                    contradicting_clues.push(clue.id.clone());
                }
            }
        }

        let mut verdict = Self {
            success,
            culprit,
            motive,
            method,
            accused,
            supporting_clues,
            contradicting_clues,
            explanation: String::new(),
        };
        verdict.explanation = verdict.explain(case, guess);
        verdict
    }

    fn explain(&self, case: &Case, guess: &AccusationGuess) -> String {
        let mut parts = Vec::new();

        match &self.accused {
            Some(id) => {
                let name = case
                    .suspect(id)
                    .map(|s| s.name.display_name())
                    .unwrap_or_else(|| id.to_string());
                parts.push(format!("You accused {name}."));
            }
            None => parts.push(format!(
                "No one named '{}' is connected to this case.",
                guess.culprit.trim()
            )),
        }

        let clue_text = |ids: &[ClueId]| {
            ids.iter()
                .filter_map(|id| case.clue(id))
                .map(|c| c.description.clone())
                .collect::<Vec<_>>()
                .join("; ")
        };
        if !self.supporting_clues.is_empty() {
            parts.push(format!(
                "Evidence in your favour: {}.",
                clue_text(&self.supporting_clues)
            ));
        }
        if !self.contradicting_clues.is_empty() {
            parts.push(format!(
                "Evidence against your theory: {}.",
                clue_text(&self.contradicting_clues)
            ));
        }
        if self.accused.is_some()
            && self.supporting_clues.is_empty()
            && self.contradicting_clues.is_empty()
        {
            parts.push("You made this accusation without any evidence to back it.".to_string());
        }

        parts.push(format!(
            "Motive: {}. Method: {}.",
            self.motive.as_str(),
            self.method.as_str()
        ));

        let culprit_name = case
            .culprit_suspect()
            .map(|s| s.name.display_name())
            .unwrap_or_else(|| case.culprit().to_string());
        if self.success {
            parts.push(format!(
                "Case closed: {culprit_name} did it. {} Motive: {}. Method: {}.",
                case.victim_line(),
                case.motive(),
                case.method()
            ));
        } else {
            parts.push(format!(
                "The case goes cold. The truth: {culprit_name} was responsible. Motive: {}. Method: {}.",
                case.motive(),
                case.method()
            ));
        }

        parts.join(" ")
    }
}
