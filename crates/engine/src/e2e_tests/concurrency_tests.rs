//! Requests to one session are serialized; different sessions run side by side.

use std::time::Duration;

use whodunit_domain::Speaker;

use super::*;
use crate::test_fixtures::{sid, ScriptedLlm};

#[tokio::test]
async fn test_same_session_questions_are_serialized() {
    let ctx = E2ETestContext::new(
        ScriptedLlm::replying("I told you already.").with_delay(Duration::from_millis(50)),
    );
    let session = ctx.begin_three_suspect();

    let (first, second) = tokio::join!(
        ctx.app.game.ask(session, "a", "Where were you at nine?"),
        ctx.app.game.ask(session, "a", "And at ten?"),
    );
    first.unwrap();
    second.unwrap();

    assert_eq!(ctx.llm.max_in_flight(), 1);

    // Two whole exchanges, never interleaved.
    let transcript = ctx.app.game.transcript(session, "a").await.unwrap();
    let speakers: Vec<Speaker> = transcript.turns.iter().map(|t| t.speaker).collect();
    assert_eq!(
        speakers,
        vec![Speaker::Detective, Speaker::Suspect, Speaker::Detective, Speaker::Suspect]
    );
    assert_ne!(transcript.turns[0].text, transcript.turns[2].text);

    // The second call saw the first exchange in its prompt.
    let requests = ctx.llm.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[1].messages.len() > requests[0].messages.len());
}

#[tokio::test]
async fn test_different_sessions_run_in_parallel() {
    let ctx = E2ETestContext::new(
        ScriptedLlm::replying("Ask someone else.").with_delay(Duration::from_millis(100)),
    );
    let first = ctx.begin_three_suspect();
    let second = ctx.begin_three_suspect();

    let (a, b) = tokio::join!(
        ctx.app.game.ask(first, "b", "Did you do it?"),
        ctx.app.game.ask(second, "b", "Did you do it?"),
    );
    a.unwrap();
    b.unwrap();

    assert_eq!(ctx.llm.max_in_flight(), 2);
    for session in [first, second] {
        let view = ctx.app.game.snapshot(session).await.unwrap();
        assert_eq!(view.transcript_lengths[&sid("b")], 2);
    }
}

#[tokio::test]
async fn test_reveal_waits_for_in_flight_question() {
    let ctx = E2ETestContext::new(ScriptedLlm::replying("Well...").with_delay(Duration::from_millis(50)));
    let session = ctx.begin_three_suspect();

    let (asked, revealed) = tokio::join!(
        ctx.app.game.ask(session, "b", "Where is the rope?"),
        ctx.app.game.reveal(session, "bloody_rope"),
    );
    asked.unwrap();
    assert!(revealed.unwrap().newly_revealed);

    // The note lands after the exchange, not inside it.
    let basil = ctx.app.game.transcript(session, "b").await.unwrap();
    let speakers: Vec<Speaker> = basil.turns.iter().map(|t| t.speaker).collect();
    assert_eq!(
        speakers,
        vec![Speaker::Detective, Speaker::Suspect, Speaker::System]
    );
}
