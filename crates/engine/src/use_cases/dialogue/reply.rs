//! Post-processing of model replies, and the fallback when there is no reply.

use std::sync::LazyLock;

use regex_lite::Regex;

/// A leading speaker tag such as `Basil:` or `**Basil:**`; group 1 is the name.
static SPEAKER_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\**\s*([^:*\n]{1,80}?)\s*\**\s*:\s*\**\s*").expect("valid regex")
});

const DEFLECTIONS: &[&str] = &[
    "I... I'd rather not say any more just now, detective.",
    "You'll forgive me if I keep my own counsel on that.",
    "I've told you what I know. Ask me something else.",
    "That is a question for someone else, I think.",
    "My head is spinning. Give me a moment before I answer that.",
    "I don't see what that has to do with anything, detective.",
];

/// A neutral in-character reply, stable for a given question.
pub fn deflection(question: &str) -> &'static str {
    // FNV-1a over the normalized question
    let hash = question
        .trim()
        .to_lowercase()
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325_u64, |acc, b| {
            (acc ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
        });
    let index = (hash % DEFLECTIONS.len() as u64) as usize;
    DEFLECTIONS[index]
}

/// Trim the reply and strip a leading `Name:` speaker tag and wrapping quotes.
pub fn clean_reply(raw: &str, speaker_name: &str) -> String {
    let mut text = raw.trim();

    if let Some(tag) = SPEAKER_TAG_RE.captures(text) {
        let is_speaker = tag
            .get(1)
            .is_some_and(|name| name.as_str().to_lowercase() == speaker_name.trim().to_lowercase());
        if is_speaker {
            let end = tag.get(0).map_or(0, |m| m.end());
            text = text[end..].trim_start();
        }
    }

    let unquoted = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .filter(|t| !t.contains('"'));
    unquoted.unwrap_or(text).trim().to_string()
}
