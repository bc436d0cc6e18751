//! LLM-drafted cases.
//!
//! The model is asked for a JSON case document. Whatever comes back has to survive
//! both serde and `Case::new` before it is used.

use serde::Deserialize;

use whodunit_domain::{
    Alibi, Case, CaseDetails, Clue, ClueId, Description, DomainError, Persona, Suspect,
    SuspectId, SuspectName,
};

use crate::infrastructure::ports::{ChatMessage, LlmError, LlmRequest};

#[derive(Debug, thiserror::Error)]
pub enum CaseGenError {
    #[error("LLM unavailable: {0}")]
    UpstreamUnavailable(#[from] LlmError),
    #[error("Malformed case document: {0}")]
    MalformedGeneration(String),
}

impl From<DomainError> for CaseGenError {
    fn from(err: DomainError) -> Self {
        Self::MalformedGeneration(err.to_string())
    }
}

const DRAFT_SYSTEM_PROMPT: &str = "You design fair-play murder mysteries for a detective game. \
Reply with a single JSON object and nothing else.";

const DRAFT_INSTRUCTIONS: &str = r#"Write an original murder mystery with 3 or 4 suspects.
Exactly one suspect is guilty. Every clue must reference suspects by their id.
Use this JSON shape:
{
  "title": "...", "victim": "...", "location": "...", "intro": "...",
  "motive": "...", "method": "...",
  "suspects": [
    {"id": "lowercase_id", "name": "...", "description": "...", "tone": "...",
     "backstory": "...", "relationship_to_victim": "...",
     "alibi": "...", "time_range": "...", "claimed_location": "...",
     "is_guilty": false, "knowledge": ["..."]}
  ],
  "clues": [
    {"id": "lowercase_id", "description": "...", "location": "...", "day": 1,
     "revealed_by_default": false, "implicates": ["suspect_id"], "exculpates": []}
  ]
}
Include at least two clues that implicate the guilty suspect."#;

pub(super) fn draft_request(temperature: f32) -> LlmRequest {
    LlmRequest::new(vec![ChatMessage::user(DRAFT_INSTRUCTIONS)])
        .with_system_prompt(DRAFT_SYSTEM_PROMPT)
        .with_temperature(temperature)
        .expecting_json()
}

#[derive(Debug, Deserialize)]
struct CaseDraft {
    title: String,
    victim: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    intro: String,
    motive: String,
    method: String,
    suspects: Vec<SuspectDraft>,
    #[serde(default)]
    clues: Vec<ClueDraft>,
}

#[derive(Debug, Deserialize)]
struct SuspectDraft {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tone: String,
    #[serde(default)]
    backstory: String,
    #[serde(default)]
    relationship_to_victim: String,
    #[serde(default)]
    alibi: String,
    #[serde(default)]
    time_range: String,
    #[serde(default)]
    claimed_location: String,
    #[serde(default)]
    is_guilty: bool,
    #[serde(default)]
    knowledge: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ClueDraft {
    id: String,
    description: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    day: Option<u32>,
    #[serde(default)]
    revealed_by_default: bool,
    #[serde(default)]
    implicates: Vec<String>,
    #[serde(default)]
    exculpates: Vec<String>,
}

/// Models like to wrap JSON in prose or code fences; keep only the outermost object.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

pub(super) fn parse_case_draft(raw: &str) -> Result<Case, CaseGenError> {
    let json = extract_json_object(raw)
        .ok_or_else(|| CaseGenError::MalformedGeneration("no JSON object in reply".into()))?;
    let draft: CaseDraft = serde_json::from_str(json)
        .map_err(|e| CaseGenError::MalformedGeneration(e.to_string()))?;

    let suspects = draft
        .suspects
        .into_iter()
        .map(|s| -> Result<Suspect, DomainError> {
            let persona = Persona::new(Description::new(s.description)?, s.tone)
                .with_backstory(Description::new(s.backstory)?)
                .with_relationship(s.relationship_to_victim);
            let mut suspect = Suspect::new(
                SuspectId::new(s.id)?,
                SuspectName::new(s.name)?,
                persona,
                Alibi::new(s.alibi, s.time_range, s.claimed_location),
            );
            suspect.is_guilty = s.is_guilty;
            Ok(s.knowledge
                .into_iter()
                .fold(suspect, |acc, fact| acc.with_knowledge(fact)))
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    let clues = draft
        .clues
        .into_iter()
        .map(|c| -> Result<Clue, DomainError> {
            let mut clue = Clue::new(ClueId::new(c.id)?, c.description, c.location)
                .on_day(c.day.unwrap_or(1).max(1));
            if c.revealed_by_default {
                clue = clue.revealed_at_start();
            }
            for id in c.implicates {
                clue = clue.implicating(SuspectId::new(id)?);
            }
            for id in c.exculpates {
                clue = clue.exculpating(SuspectId::new(id)?);
            }
            Ok(clue)
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    let case = Case::new(
        CaseDetails {
            title: draft.title,
            victim: draft.victim,
            location: draft.location,
            intro: draft.intro,
            motive: draft.motive,
            method: draft.method,
        },
        suspects,
        clues,
    )?;
    Ok(case)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_DRAFT: &str = r#"Here is your mystery:
```json
{
  "title": "The Vineyard Affair", "victim": "Henri Dubois", "location": "the cellar",
  "intro": "Harvest night ends with a body among the barrels.",
  "motive": "jealousy over an affair", "method": "struck with a wine bottle",
  "suspects": [
    {"id": "claire", "name": "Claire", "description": "The vintner's wife", "tone": "icy",
     "alibi": "I was at the tasting", "time_range": "8pm - 10pm", "claimed_location": "the tasting room",
     "is_guilty": true, "knowledge": ["Henri was meeting someone"]},
    {"id": "luc", "name": "Luc", "description": "A cellar hand", "tone": "nervous",
     "alibi": "I was loading crates", "time_range": "8pm - 9pm", "claimed_location": "the yard"}
  ],
  "clues": [
    {"id": "broken_bottle", "description": "A broken bottle with lipstick on the neck",
     "location": "cellar", "day": 1, "implicates": ["claire"]},
    {"id": "crate_log", "description": "Luc's crate tally", "location": "yard",
     "day": 2, "exculpates": ["luc"]}
  ]
}
```"#;

    #[test]
    fn parses_fenced_draft() {
        let case = parse_case_draft(GOOD_DRAFT).unwrap();
        assert_eq!(case.title(), "The Vineyard Affair");
        assert_eq!(case.culprit().as_str(), "claire");
        assert_eq!(case.suspects().len(), 2);
        assert_eq!(case.clues()[1].day, 2);
    }

    #[test]
    fn rejects_prose_without_json() {
        assert!(matches!(
            parse_case_draft("Sorry, I can't help with that."),
            Err(CaseGenError::MalformedGeneration(_))
        ));
    }

    #[test]
    fn rejects_draft_that_breaks_case_rules() {
        let no_culprit = GOOD_DRAFT.replace("\"is_guilty\": true", "\"is_guilty\": false");
        assert!(matches!(
            parse_case_draft(&no_culprit),
            Err(CaseGenError::MalformedGeneration(msg)) if msg.contains("guilty")
        ));
    }

    #[test]
    fn rejects_clue_pointing_at_unknown_suspect() {
        let bad = GOOD_DRAFT.replace("[\"claire\"]", "[\"ghost\"]");
        assert!(parse_case_draft(&bad).is_err());
    }
}
