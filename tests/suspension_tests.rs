//! The movement-choice suspension point: prompt contents, responder
//! validation, and resumption.

use harbinger_engine::core::{
    BoardSpace, EngineRng, GameState, PlayerId, PlayerMap, PlayerSummary, PrivatePlayerState,
    Role, SecretIdentity, SubRole,
};
use harbinger_engine::scenario::{catalog::veiled_shore, Scenario};
use harbinger_engine::{
    valid_moves, CardKind, CommandCard, EngineConfig, EngineError, RoundEngine, RoundOutcome,
    SubmittedAction,
};

fn engine(scenario: &Scenario) -> RoundEngine<'_> {
    let config = EngineConfig::new().with_complication_chance(0.0);
    RoundEngine::with_config(scenario, config).unwrap()
}

fn fixture(count: usize) -> (GameState, PlayerMap<PrivatePlayerState>) {
    let players = PlayerMap::new(count, |p| PlayerSummary::new(format!("p{}", p.index())));
    let track = PlayerId::all(count).collect();
    let state = GameState::new(players, track, BoardSpace::new(5, 5));
    let privates = PlayerMap::new(count, |p| {
        PrivatePlayerState::new(Role::Zealot, SubRole::Fanatic, SecretIdentity(p.0))
    });
    (state, privates)
}

fn submit(
    state: &mut GameState,
    privates: &mut PlayerMap<PrivatePlayerState>,
    plays: &[(PlayerId, CardKind)],
) -> Vec<SubmittedAction> {
    plays
        .iter()
        .map(|&(player, kind)| {
            let card = CommandCard::new(state.alloc_card_id(), kind);
            privates[player].hand.push(card);
            SubmittedAction {
                player,
                card,
                priority_index: state.priority_index(player).unwrap(),
            }
        })
        .collect()
}

#[test]
fn test_multi_destination_move_suspends_with_prompt() {
    let scenario = veiled_shore();
    let engine = engine(&scenario);
    let (mut state, mut privates) = fixture(2);

    let actions = submit(
        &mut state,
        &mut privates,
        &[
            (PlayerId::new(0), CardKind::MoveTwo),
            (PlayerId::new(1), CardKind::Buffer),
        ],
    );

    let outcome = engine
        .resolve_round(state, privates, actions, EngineRng::new(1))
        .unwrap();

    let suspended = match outcome {
        RoundOutcome::AwaitingMove(suspended) => suspended,
        RoundOutcome::Complete(_) => panic!("expected suspension"),
    };

    let prompt = suspended.prompt();
    assert_eq!(prompt.player, PlayerId::new(0));
    assert_eq!(prompt.username, "p0");
    assert_eq!(
        prompt.valid_moves,
        valid_moves(BoardSpace::new(5, 5), 2, scenario.board_size)
    );

    // The queued Buffer is untouched while the round waits.
    assert!(!suspended
        .game_state()
        .game_log
        .iter()
        .any(|l| l.contains("bides their time")));
    assert_eq!(suspended.game_state().harbinger, BoardSpace::new(5, 5));
}

#[test]
fn test_wrong_responder_is_rejected_without_mutation() {
    let scenario = veiled_shore();
    let engine = engine(&scenario);
    let (mut state, mut privates) = fixture(2);

    let actions = submit(
        &mut state,
        &mut privates,
        &[
            (PlayerId::new(0), CardKind::MoveTwo),
            (PlayerId::new(1), CardKind::Buffer),
        ],
    );

    let outcome = engine
        .resolve_round(state, privates, actions, EngineRng::new(1))
        .unwrap();
    let suspended = match outcome {
        RoundOutcome::AwaitingMove(suspended) => suspended,
        RoundOutcome::Complete(_) => panic!("expected suspension"),
    };
    let valid_choice = suspended.prompt().valid_moves[0];

    let rejected = engine
        .resume(suspended, PlayerId::new(1), valid_choice)
        .unwrap_err();
    assert_eq!(
        rejected.reason,
        EngineError::WrongResponder {
            expected: PlayerId::new(0),
            responder: PlayerId::new(1),
        }
    );

    // The suspension survives the rejection and still accepts the real
    // responder.
    let suspended = rejected.suspended;
    assert_eq!(suspended.game_state().harbinger, BoardSpace::new(5, 5));
    let outcome = engine
        .resume(suspended, PlayerId::new(0), valid_choice)
        .unwrap();
    match outcome {
        RoundOutcome::Complete(snapshot) => {
            assert_eq!(snapshot.state.harbinger, valid_choice);
        }
        RoundOutcome::AwaitingMove(_) => panic!("round should complete"),
    }
}

#[test]
fn test_off_prompt_cell_is_rejected() {
    let scenario = veiled_shore();
    let engine = engine(&scenario);
    let (mut state, mut privates) = fixture(2);

    let actions = submit(
        &mut state,
        &mut privates,
        &[
            (PlayerId::new(0), CardKind::MoveTwo),
            (PlayerId::new(1), CardKind::Buffer),
        ],
    );

    let outcome = engine
        .resolve_round(state, privates, actions, EngineRng::new(1))
        .unwrap();
    let suspended = match outcome {
        RoundOutcome::AwaitingMove(suspended) => suspended,
        RoundOutcome::Complete(_) => panic!("expected suspension"),
    };

    let far_away = BoardSpace::new(12, 12);
    assert!(!suspended.prompt().valid_moves.contains(&far_away));

    let rejected = engine
        .resume(suspended, PlayerId::new(0), far_away)
        .unwrap_err();
    assert_eq!(rejected.reason, EngineError::InvalidMoveTarget(far_away));
    assert_eq!(
        rejected.suspended.game_state().harbinger,
        BoardSpace::new(5, 5)
    );
}

#[test]
fn test_resume_continues_the_queue() {
    let scenario = veiled_shore();
    let engine = engine(&scenario);
    let (mut state, mut privates) = fixture(3);

    let actions = submit(
        &mut state,
        &mut privates,
        &[
            (PlayerId::new(0), CardKind::MoveTwo),
            (PlayerId::new(1), CardKind::Charge),
            (PlayerId::new(2), CardKind::Buffer),
        ],
    );

    let outcome = engine
        .resolve_round(state, privates, actions, EngineRng::new(1))
        .unwrap();
    let suspended = match outcome {
        RoundOutcome::AwaitingMove(suspended) => suspended,
        RoundOutcome::Complete(_) => panic!("expected suspension"),
    };

    let choice = BoardSpace::new(6, 6);
    assert!(suspended.prompt().valid_moves.contains(&choice));

    let outcome = engine.resume(suspended, PlayerId::new(0), choice).unwrap();
    let snapshot = match outcome {
        RoundOutcome::Complete(snapshot) => snapshot,
        RoundOutcome::AwaitingMove(_) => panic!("round should complete"),
    };

    assert_eq!(snapshot.state.harbinger, choice);
    // Both remaining actions resolved after the resume.
    assert!(snapshot
        .state
        .game_log
        .iter()
        .any(|l| l.contains("charges the next move")));
    assert!(snapshot
        .state
        .game_log
        .iter()
        .any(|l| l.contains("bides their time")));
    assert_eq!(snapshot.state.round, 2);
}

#[test]
fn test_corner_move_still_offers_a_choice() {
    let scenario = veiled_shore();
    let engine = engine(&scenario);
    let (mut state, mut privates) = fixture(2);

    // Even pinned in a corner, a one-point move has two exits, so the
    // machine must prompt rather than auto-pick.
    state.harbinger = BoardSpace::new(1, 1);
    let actions = submit(
        &mut state,
        &mut privates,
        &[
            (PlayerId::new(0), CardKind::MoveOne),
            (PlayerId::new(1), CardKind::Buffer),
        ],
    );

    let outcome = engine
        .resolve_round(state, privates, actions, EngineRng::new(1))
        .unwrap();
    match outcome {
        RoundOutcome::AwaitingMove(suspended) => {
            assert_eq!(
                suspended.prompt().valid_moves,
                vec![BoardSpace::new(1, 2), BoardSpace::new(2, 1)]
            );
        }
        RoundOutcome::Complete(_) => panic!("two destinations must suspend"),
    }
}

#[test]
fn test_validate_response_matches_resume_behavior() {
    let scenario = veiled_shore();
    let engine = engine(&scenario);
    let (mut state, mut privates) = fixture(2);

    let actions = submit(
        &mut state,
        &mut privates,
        &[
            (PlayerId::new(0), CardKind::MoveTwo),
            (PlayerId::new(1), CardKind::Buffer),
        ],
    );

    let outcome = engine
        .resolve_round(state, privates, actions, EngineRng::new(1))
        .unwrap();
    let suspended = match outcome {
        RoundOutcome::AwaitingMove(suspended) => suspended,
        RoundOutcome::Complete(_) => panic!("expected suspension"),
    };

    let good = suspended.prompt().valid_moves[0];
    assert!(suspended.validate_response(PlayerId::new(0), good).is_ok());
    assert!(suspended
        .validate_response(PlayerId::new(1), good)
        .is_err());
    assert!(suspended
        .validate_response(PlayerId::new(0), BoardSpace::new(12, 12))
        .is_err());
}
