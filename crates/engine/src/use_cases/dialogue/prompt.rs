//! Prompt construction for suspect interrogation.
//!
//! Order matters: persona and alibi first, then what the suspect is allowed to know,
//! then the full transcript replayed turn by turn, then the new question.

use whodunit_domain::{Case, Question, Speaker, Suspect, Transcript};

use crate::infrastructure::ports::{ChatMessage, LlmRequest};

/// Whether the guilty suspect may give way under questioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfessionPolicy {
    /// Innocent suspect; nothing to confess.
    NotApplicable,
    /// Guilty, but not enough evidence has surfaced yet.
    Forbidden,
    /// Guilty and cornered by revealed evidence.
    Permitted,
}

impl ConfessionPolicy {
    pub fn decide(suspect: &Suspect, implicating_revealed: usize, threshold: usize) -> Self {
        if !suspect.is_guilty {
            Self::NotApplicable
        } else if implicating_revealed >= threshold {
            Self::Permitted
        } else {
            Self::Forbidden
        }
    }
}

/// Build the system prompt that fixes the suspect's persona and knowledge
pub fn build_system_prompt(case: &Case, suspect: &Suspect, policy: ConfessionPolicy) -> String {
    let name = suspect.name.display_name();
    let persona = &suspect.persona;
    let mut prompt = String::new();

    prompt.push_str(&format!(
        "You are {name}, a suspect being interrogated by a detective in a murder mystery.\n\n"
    ));
    prompt.push_str(&format!("THE CASE: {}\n", case.victim_line()));
    prompt.push_str(&format!("WHO YOU ARE: {}\n", persona.description));
    if !persona.relationship_to_victim.is_empty() {
        prompt.push_str(&format!(
            "YOUR RELATIONSHIP TO THE VICTIM: {}\n",
            persona.relationship_to_victim
        ));
    }
    if !persona.backstory.is_empty() {
        prompt.push_str(&format!("YOUR BACKSTORY: {}\n", persona.backstory));
    }
    if !persona.tone.is_empty() {
        prompt.push_str(&format!("SPEAK IN THIS TONE: {}\n", persona.tone));
    }

    let alibi = &suspect.alibi;
    prompt.push_str("\nYOUR ACCOUNT OF THE NIGHT:\n");
    if !alibi.statement.is_empty() {
        prompt.push_str(&format!("- {}\n", alibi.statement));
    }
    if !alibi.time_range.is_empty() || !alibi.claimed_location.is_empty() {
        prompt.push_str(&format!(
            "- You say you were at {} during {}\n",
            alibi.claimed_location, alibi.time_range
        ));
    }

    if !suspect.knowledge.is_empty() {
        prompt.push_str("\nTHINGS YOU KNOW (you may share or withhold them in character):\n");
        for fact in &suspect.knowledge {
            prompt.push_str(&format!("- {fact}\n"));
        }
    }

    prompt.push_str("\nRULES:\n");
    prompt.push_str("- Stay in character and answer only as yourself, in one or two short paragraphs.\n");
    prompt.push_str("- Never reveal facts you have not been told above.\n");
    prompt.push_str(
        "- Messages starting with [evidence:...] are evidence the detective has uncovered. You may react to them.\n",
    );
    match policy {
        ConfessionPolicy::NotApplicable => {
            prompt.push_str("- You did not commit the murder. Defend yourself if accused.\n");
        }
        ConfessionPolicy::Forbidden => {
            prompt.push_str(
                "- You must never confess, admit guilt or describe committing the murder, however hard you are pressed.\n",
            );
        }
        ConfessionPolicy::Permitted => {
            prompt.push_str(
                "- The evidence against you is overwhelming. If the detective confronts you with it, you may break down and confess.\n",
            );
        }
    }

    prompt
}

/// Replay the transcript and append the new question.
pub fn build_messages(transcript: &Transcript, question: &Question) -> Vec<ChatMessage> {
    let mut messages: Vec<ChatMessage> = transcript
        .turns()
        .iter()
        .map(|turn| match turn.speaker {
            Speaker::Detective => ChatMessage::user(turn.text.clone()),
            Speaker::Suspect => ChatMessage::assistant(turn.text.clone()),
            Speaker::System => ChatMessage::system(turn.text.clone()),
        })
        .collect();
    messages.push(ChatMessage::user(question.as_str()));
    messages
}

pub fn build_request(
    case: &Case,
    suspect: &Suspect,
    transcript: &Transcript,
    question: &Question,
    policy: ConfessionPolicy,
    temperature: f32,
) -> LlmRequest {
    LlmRequest::new(build_messages(transcript, question))
        .with_system_prompt(build_system_prompt(case, suspect, policy))
        .with_temperature(temperature)
}
