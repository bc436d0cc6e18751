//! A full game from first question to final accusation.

use whodunit_domain::{AccusationGuess, MatchGrade, SessionState, Speaker};

use super::*;
use crate::test_fixtures::{cid, sid, ScriptedLlm};
use crate::use_cases::GameError;

#[tokio::test]
async fn test_three_suspect_game_is_solved() {
    let ctx = E2ETestContext::new(ScriptedLlm::replying("Roses, since you ask."));
    let session = ctx.begin_three_suspect();
    let before = ctx.app.game.snapshot(session).await.unwrap();
    assert!(before.revealed.is_empty());

    // An unrelated question to Agatha touches nobody else.
    let reply = ctx
        .app
        .game
        .ask(session, "a", "What is your favourite flower?")
        .await
        .unwrap();
    assert_eq!(reply.text, "Roses, since you ask.");

    let view = ctx.app.game.snapshot(session).await.unwrap();
    assert_eq!(view.state, SessionState::InProgress);
    assert_eq!(view.transcript_lengths[&sid("a")], 2);
    assert_eq!(view.transcript_lengths[&sid("b")], 0);
    assert_eq!(view.revealed, before.revealed);

    // The rope points at Basil and shows up in his transcript.
    let outcome = ctx.app.game.reveal(session, "bloody_rope").await.unwrap();
    assert!(outcome.newly_revealed);

    let view = ctx.app.game.snapshot(session).await.unwrap();
    assert_eq!(view.revealed.len(), 1);
    assert!(view.revealed.contains(&cid("bloody_rope")));
    let basil = ctx.app.game.transcript(session, "Basil").await.unwrap();
    assert_eq!(basil.turns.len(), 1);
    assert_eq!(basil.turns[0].speaker, Speaker::System);

    // Right culprit, motive and method.
    let verdict = ctx
        .app
        .game
        .accuse(
            session,
            AccusationGuess::new(
                "b",
                "to inherit the estate and clear his gambling debts",
                "strangled with a curtain rope",
            ),
        )
        .await
        .unwrap();
    assert!(verdict.success);
    assert_eq!(verdict.culprit, MatchGrade::Exact);
    assert_eq!(verdict.motive, MatchGrade::Exact);
    assert_eq!(verdict.method, MatchGrade::Exact);
    assert_eq!(verdict.supporting_clues, vec![cid("bloody_rope")]);

    // Second accusation fails whatever it says.
    let again = ctx
        .app
        .game
        .accuse(session, AccusationGuess::new("c", "jealousy", "poison"))
        .await;
    assert_eq!(again.unwrap_err(), GameError::AlreadyAccused);

    let view = ctx.app.game.snapshot(session).await.unwrap();
    assert_eq!(view.state, SessionState::Concluded);
    assert!(view.accused);
}

#[tokio::test]
async fn test_revealed_clues_never_shrink() {
    let ctx = E2ETestContext::new(ScriptedLlm::replying("I couldn't say."));
    let session = ctx.begin_three_suspect();
    let mut previous = ctx.app.game.snapshot(session).await.unwrap().revealed;

    for step in 0..6 {
        match step % 3 {
            0 => {
                ctx.app.game.clue_for(session, 2, "b").await.unwrap();
            }
            1 => {
                ctx.app.game.reveal(session, "bloody_rope").await.unwrap();
            }
            _ => {
                ctx.app.game.ask(session, "c", "Seen anything odd?").await.unwrap();
            }
        }
        let current = ctx.app.game.snapshot(session).await.unwrap().revealed;
        assert!(current.is_superset(&previous), "revealed set shrank at step {step}");
        previous = current;
    }

    assert!(previous.contains(&cid("bloody_rope")));
    assert!(previous.contains(&cid("pawn_receipt")));
}

#[tokio::test]
async fn test_day_clues_unlock_over_time() {
    let ctx = E2ETestContext::new(ScriptedLlm::replying("Hm."));
    let session = ctx.begin_three_suspect();

    let day_one = ctx.app.game.clue_for(session, 1, "Agatha").await.unwrap();
    assert!(day_one.clue.is_none());

    let day_two = ctx.app.game.clue_for(session, 2, "Agatha").await.unwrap();
    assert_eq!(day_two.clue.map(|c| c.id), Some(cid("train_ticket")));
}
