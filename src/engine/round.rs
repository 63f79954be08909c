//! The round-resolution state machine.
//!
//! One round is one pass through this machine: sort the submitted actions
//! by priority, drain the queue front-to-back while earlier actions bend,
//! deny, copy, or cancel later ones, then run end-of-round effects, check
//! the terminal conditions, and rotate the priority track.
//!
//! ## Suspension
//!
//! Resolution has exactly one designed suspension point: when a movement
//! card offers more than one destination, the machine cannot choose for the
//! player. It returns [`RoundOutcome::AwaitingMove`] carrying the whole
//! in-flight round; [`RoundEngine::resume`] validates the player's answer
//! against the stored prompt and re-enters the drain loop. Because the
//! suspension owns the game's state, a second resolution for the same game
//! cannot start while one is in flight.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::cards::{CardKind, CommandCard, Deck};
use crate::core::{
    BoardNpc, BoardObject, BoardSpace, EngineRng, GameState, GameStatus, PlayerId, PlayerMap,
    PrivatePlayerState, SubRole,
};
use crate::error::EngineError;
use crate::scenario::{ComplicationEffect, Scenario};

use super::end_of_round::apply_end_of_round;
use super::interaction::resolve_interaction;
use super::movement::valid_moves;
use super::victory::check_win_conditions;
use super::{award_points, EngineConfig};

/// Points the Instigator sub-role earns per cancellation card played.
const INSTIGATOR_BONUS: i64 = 5;

/// One player's committed card for the round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAction {
    pub player: PlayerId,
    pub card: CommandCard,
    /// The player's priority-track index at submission time. Fixes the sort
    /// order at round start; never re-evaluated mid-round.
    pub priority_index: usize,
}

/// A Foresight waiting for the next card to mirror.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldForesight {
    pub holder: PlayerId,
    /// Set once the single permitted copy has been spliced.
    pub copied: bool,
}

/// Ephemeral modifier state, rebuilt at every round start and discarded at
/// round end. Never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundModifiers {
    /// Move-budget delta carried by active complications.
    pub move_value: i32,
    /// Move-budget delta stacked by modifier cards; resets once a move
    /// consumes it.
    pub next_move_value: i32,
    pub deny_next: bool,
    pub inhibit_interact: bool,
    pub skip_next_move: bool,
    pub foresight: Option<HeldForesight>,
}

impl RoundModifiers {
    /// Seed a fresh round's modifiers from the active complications.
    pub(crate) fn for_round(state: &GameState) -> Self {
        let mut modifiers = Self::default();
        for complication in &state.complications {
            match complication.effect {
                ComplicationEffect::MoveDelta(delta) => modifiers.move_value += delta,
                ComplicationEffect::Stillness => modifiers.skip_next_move = true,
                ComplicationEffect::Unrest { .. } => {}
            }
        }
        modifiers
    }
}

/// An action waiting in the queue.
#[derive(Clone, Debug)]
struct QueuedAction {
    player: PlayerId,
    card: CommandCard,
}

/// Snapshot taken before an action's effects, for Rethink's restoration
/// mode. Hand and queue mutations are outside its scope.
#[derive(Clone, Debug)]
struct UndoDelta {
    harbinger: BoardSpace,
    points: Vec<i64>,
    objects: Vec<BoardObject>,
    npcs: Vec<BoardNpc>,
    modifiers: RoundModifiers,
}

impl UndoDelta {
    fn capture(
        state: &GameState,
        privates: &PlayerMap<PrivatePlayerState>,
        modifiers: &RoundModifiers,
    ) -> Self {
        Self {
            harbinger: state.harbinger,
            points: privates.iter().map(|(_, p)| p.victory_points).collect(),
            objects: state.objects.clone(),
            npcs: state.npcs.clone(),
            modifiers: modifiers.clone(),
        }
    }

    fn restore(
        self,
        state: &mut GameState,
        privates: &mut PlayerMap<PrivatePlayerState>,
        modifiers: &mut RoundModifiers,
    ) {
        state.harbinger = self.harbinger;
        state.objects = self.objects;
        state.npcs = self.npcs;
        for (idx, points) in self.points.into_iter().enumerate() {
            let player = PlayerId::new(idx as u8);
            privates[player].victory_points = points;
            state.players[player].victory_points = points;
        }
        *modifiers = self.modifiers;
    }
}

/// A fully dispatched action, kept so Rethink and Homage can see "the
/// previous action". Denied and inhibited actions are consumed without ever
/// reaching this history.
#[derive(Clone, Debug)]
struct ProcessedAction {
    player: PlayerId,
    card: CommandCard,
    undo: UndoDelta,
}

/// Everything a round carries between suspension points.
#[derive(Debug)]
struct RoundInFlight {
    state: GameState,
    privates: PlayerMap<PrivatePlayerState>,
    rng: EngineRng,
    queue: VecDeque<QueuedAction>,
    processed: Vec<ProcessedAction>,
    modifiers: RoundModifiers,
}

/// The movement card whose destination choice is outstanding.
#[derive(Debug)]
struct PendingMove {
    player: PlayerId,
    card: CommandCard,
    undo: UndoDelta,
}

/// The suspension signal routed to the acting player's session; every other
/// session should display "awaiting input".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePrompt {
    pub player: PlayerId,
    pub username: String,
    /// The precomputed destination set; the response must name one of these.
    pub valid_moves: Vec<BoardSpace>,
}

/// A round paused at its movement-choice suspension point.
///
/// Owns the entire in-flight round. Dropping it abandons the round.
#[derive(Debug)]
pub struct SuspendedRound {
    prompt: MovePrompt,
    pending: PendingMove,
    round: RoundInFlight,
}

impl SuspendedRound {
    /// The prompt to route to the acting player.
    #[must_use]
    pub fn prompt(&self) -> &MovePrompt {
        &self.prompt
    }

    /// The public state as of the suspension, for "awaiting input" views.
    #[must_use]
    pub fn game_state(&self) -> &GameState {
        &self.round.state
    }

    /// Check a response against the stored prompt without consuming the
    /// suspension.
    pub fn validate_response(
        &self,
        responder: PlayerId,
        choice: BoardSpace,
    ) -> Result<(), EngineError> {
        if responder != self.prompt.player {
            return Err(EngineError::WrongResponder {
                expected: self.prompt.player,
                responder,
            });
        }
        if !self.prompt.valid_moves.contains(&choice) {
            return Err(EngineError::InvalidMoveTarget(choice));
        }
        Ok(())
    }
}

/// A rejected resume response. Hands the suspension back so the round keeps
/// waiting; validation rejections leave it untouched.
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct ResumeRejected {
    pub reason: EngineError,
    pub suspended: SuspendedRound,
}

/// Total snapshots emitted by a completed round.
#[derive(Debug)]
pub struct RoundSnapshot {
    pub state: GameState,
    pub privates: PlayerMap<PrivatePlayerState>,
    pub rng: EngineRng,
}

/// How a resolution pass ended.
#[derive(Debug)]
pub enum RoundOutcome {
    /// The round ran to completion; persist and broadcast the snapshots.
    Complete(RoundSnapshot),
    /// The round is waiting on one player's movement choice.
    AwaitingMove(SuspendedRound),
}

/// What one dispatched action did to the flow of the round.
enum StepOutcome {
    /// Action complete; keep draining.
    Done,
    /// A movement choice is outstanding.
    Suspend(Vec<BoardSpace>),
    /// A terminal condition fired; stop dispatching.
    Terminal,
}

/// How a drain pass ended.
enum DrainStatus {
    /// Queue empty; run the round's exit steps.
    Finished,
    /// A terminal fired mid-round; remaining actions are dropped
    /// unprocessed and the exit steps are skipped.
    Halted,
    /// Waiting on a movement choice.
    Suspended(PendingMove, MovePrompt),
}

/// The per-game resolution engine.
///
/// Holds an immutable scenario reference and configuration; constructed
/// explicitly by whatever owns a game's lifecycle. Construction validates
/// the scenario once so later lookups cannot dangle.
#[derive(Clone, Debug)]
pub struct RoundEngine<'s> {
    scenario: &'s Scenario,
    config: EngineConfig,
}

impl<'s> RoundEngine<'s> {
    /// Create an engine with default configuration.
    pub fn new(scenario: &'s Scenario) -> Result<Self, EngineError> {
        Self::with_config(scenario, EngineConfig::default())
    }

    /// Create an engine with explicit configuration.
    pub fn with_config(scenario: &'s Scenario, config: EngineConfig) -> Result<Self, EngineError> {
        scenario.validate()?;
        Ok(Self { scenario, config })
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve one round from one submitted action per player.
    ///
    /// Consumes the snapshots; they come back inside the outcome. Rejects
    /// without mutation when the submissions are inconsistent with the
    /// priority track or the hands.
    pub fn resolve_round(
        &self,
        state: GameState,
        privates: PlayerMap<PrivatePlayerState>,
        actions: Vec<SubmittedAction>,
        rng: EngineRng,
    ) -> Result<RoundOutcome, EngineError> {
        if state.status != GameStatus::Active {
            return Err(EngineError::GameNotActive);
        }
        validate_submissions(&state, &privates, &actions)?;

        debug!(round = state.round, actions = actions.len(), "resolving round");

        let mut actions = actions;
        actions.sort_by_key(|a| a.priority_index);

        let mut round = RoundInFlight {
            modifiers: RoundModifiers::for_round(&state),
            state,
            privates,
            rng,
            queue: VecDeque::new(),
            processed: Vec::new(),
        };

        for action in actions {
            round.privates[action.player].take_card(action.card.id);
            round.queue.push_back(QueuedAction {
                player: action.player,
                card: action.card,
            });
        }

        let header = format!("Round {} begins.", round.state.round);
        round.state.log(header);

        match self.drain_loop(&mut round)? {
            DrainStatus::Finished => {
                self.run_exit_steps(&mut round)?;
                Ok(complete(round))
            }
            DrainStatus::Halted => Ok(complete(round)),
            DrainStatus::Suspended(pending, prompt) => Ok(RoundOutcome::AwaitingMove(
                SuspendedRound {
                    prompt,
                    pending,
                    round,
                },
            )),
        }
    }

    /// Answer an outstanding movement prompt and continue the round.
    ///
    /// Only the prompted player may respond, and only with one of the
    /// offered cells; anything else is rejected with the suspension
    /// returned untouched.
    pub fn resume(
        &self,
        suspended: SuspendedRound,
        responder: PlayerId,
        choice: BoardSpace,
    ) -> Result<RoundOutcome, ResumeRejected> {
        if let Err(reason) = suspended.validate_response(responder, choice) {
            return Err(ResumeRejected { reason, suspended });
        }

        debug!(player = %responder, %choice, "resuming round");

        let SuspendedRound {
            prompt,
            pending,
            mut round,
        } = suspended;

        let status = match self.continue_round(&mut round, &pending, choice) {
            Ok(status) => status,
            Err(reason) => {
                return Err(ResumeRejected {
                    reason,
                    suspended: SuspendedRound {
                        prompt,
                        pending,
                        round,
                    },
                })
            }
        };

        match status {
            DrainStatus::Finished => {
                if let Err(reason) = self.run_exit_steps(&mut round) {
                    return Err(ResumeRejected {
                        reason,
                        suspended: SuspendedRound {
                            prompt,
                            pending,
                            round,
                        },
                    });
                }
                Ok(complete(round))
            }
            DrainStatus::Halted => Ok(complete(round)),
            DrainStatus::Suspended(next_pending, next_prompt) => Ok(RoundOutcome::AwaitingMove(
                SuspendedRound {
                    prompt: next_prompt,
                    pending: next_pending,
                    round,
                },
            )),
        }
    }

    /// Apply the chosen destination, record the completed movement action,
    /// and keep draining.
    fn continue_round(
        &self,
        round: &mut RoundInFlight,
        pending: &PendingMove,
        choice: BoardSpace,
    ) -> Result<DrainStatus, EngineError> {
        let step = self.apply_harbinger_move(round, pending.player, choice, pending.card.kind)?;
        round.processed.push(ProcessedAction {
            player: pending.player,
            card: pending.card,
            undo: pending.undo.clone(),
        });
        match step {
            StepOutcome::Terminal => Ok(DrainStatus::Halted),
            _ => self.drain_loop(round),
        }
    }

    /// Drain the action queue to completion, suspension, or a terminal.
    fn drain_loop(&self, round: &mut RoundInFlight) -> Result<DrainStatus, EngineError> {
        loop {
            let Some(action) = round.queue.pop_front() else {
                return Ok(DrainStatus::Finished);
            };

            trace!(player = %action.player, card = %action.card, "processing action");

            // A held Foresight mirrors the very next card, exactly once:
            // splice a copy of the holder's action, carrying the just-popped
            // card, to act immediately after it.
            if let Some(held) = round.modifiers.foresight.as_mut() {
                if !held.copied {
                    held.copied = true;
                    let holder = held.holder;
                    let copy = CommandCard::new(round.state.alloc_card_id(), action.card.kind);
                    round.queue.push_front(QueuedAction {
                        player: holder,
                        card: copy,
                    });
                    let seer = round.state.username(holder).to_string();
                    round.state.log(format!(
                        "{seer}'s foresight mirrors the {} to come.",
                        action.card
                    ));
                }
            }

            if round.modifiers.deny_next {
                round.modifiers.deny_next = false;
                let actor = round.state.username(action.player).to_string();
                round.state.log(format!(
                    "{actor}'s {} is denied and comes to nothing.",
                    action.card
                ));
                continue;
            }

            if round.modifiers.inhibit_interact && action.card.kind == CardKind::Interact {
                round.modifiers.inhibit_interact = false;
                let actor = round.state.username(action.player).to_string();
                round
                    .state
                    .log(format!("{actor}'s {} is suppressed.", action.card));
                continue;
            }

            let undo = UndoDelta::capture(&round.state, &round.privates, &round.modifiers);

            match self.dispatch(round, &action)? {
                StepOutcome::Done => {
                    round.processed.push(ProcessedAction {
                        player: action.player,
                        card: action.card,
                        undo,
                    });
                }
                StepOutcome::Suspend(moves) => {
                    let prompt = MovePrompt {
                        player: action.player,
                        username: round.state.username(action.player).to_string(),
                        valid_moves: moves,
                    };
                    round.state.log(format!(
                        "{} weighs where to send the Harbinger...",
                        prompt.username
                    ));
                    debug!(
                        player = %action.player,
                        options = prompt.valid_moves.len(),
                        "round suspended for move choice"
                    );
                    return Ok(DrainStatus::Suspended(
                        PendingMove {
                            player: action.player,
                            card: action.card,
                            undo,
                        },
                        prompt,
                    ));
                }
                StepOutcome::Terminal => {
                    round.processed.push(ProcessedAction {
                        player: action.player,
                        card: action.card,
                        undo,
                    });
                    debug!(round = round.state.round, "round halted by terminal condition");
                    return Ok(DrainStatus::Halted);
                }
            }
        }
    }

    /// Card-specific effects. Exhaustive over the catalog.
    fn dispatch(
        &self,
        round: &mut RoundInFlight,
        action: &QueuedAction,
    ) -> Result<StepOutcome, EngineError> {
        let actor = round.state.username(action.player).to_string();

        match action.card.kind {
            CardKind::MoveOne | CardKind::MoveTwo | CardKind::MoveThree => {
                if round.modifiers.skip_next_move {
                    round.modifiers.skip_next_move = false;
                    round.state.log(format!(
                        "{actor} urges the Harbinger on, but it refuses to stir."
                    ));
                    return Ok(StepOutcome::Done);
                }

                let base = action.card.kind.move_points().unwrap_or(0);
                let total =
                    (base + round.modifiers.move_value + round.modifiers.next_move_value).max(0);
                round.modifiers.move_value = 0;
                round.modifiers.next_move_value = 0;

                if total == 0 {
                    round
                        .state
                        .log(format!("{actor} finds the Harbinger nowhere to move."));
                    return Ok(StepOutcome::Done);
                }

                let moves =
                    valid_moves(round.state.harbinger, total as u32, self.scenario.board_size);
                match moves.len() {
                    0 => {
                        round
                            .state
                            .log(format!("{actor} finds the Harbinger nowhere to move."));
                        Ok(StepOutcome::Done)
                    }
                    1 => {
                        self.apply_harbinger_move(round, action.player, moves[0], action.card.kind)
                    }
                    _ => Ok(StepOutcome::Suspend(moves)),
                }
            }

            CardKind::Impulse => {
                let options = round.state.harbinger.neighbors(self.scenario.board_size);
                if options.is_empty() {
                    round.state.log(format!(
                        "{actor}'s impulse finds nowhere for the Harbinger to lurch."
                    ));
                    return Ok(StepOutcome::Done);
                }
                let idx = round.rng.gen_range(0..options.len());
                self.apply_harbinger_move(round, action.player, options[idx], CardKind::Impulse)
            }

            CardKind::Hesitate => {
                round.modifiers.next_move_value -= 1;
                round
                    .state
                    .log(format!("{actor} hesitates; the next move weakens."));
                Ok(StepOutcome::Done)
            }

            CardKind::Charge => {
                round.modifiers.next_move_value += 1;
                round
                    .state
                    .log(format!("{actor} charges the next move with urgency."));
                Ok(StepOutcome::Done)
            }

            CardKind::Empower => {
                round.modifiers.next_move_value += 2;
                round
                    .state
                    .log(format!("{actor} empowers the next move greatly."));
                Ok(StepOutcome::Done)
            }

            CardKind::Degrade => {
                round.modifiers.next_move_value -= 1;
                round.state.log(format!("{actor} degrades the next move."));
                Ok(StepOutcome::Done)
            }

            CardKind::Deny => {
                round.modifiers.deny_next = true;
                round
                    .state
                    .log(format!("{actor} casts a denial over the next act."));
                self.grant_instigator_bonus(round, action.player, action.card.kind);
                Ok(StepOutcome::Done)
            }

            CardKind::Rethink => {
                match round.processed.pop() {
                    None => {
                        round.state.log(format!(
                            "{actor} broods, but there is nothing to rethink."
                        ));
                    }
                    Some(previous) => {
                        let prev_actor = round.state.username(previous.player).to_string();
                        if self.config.rethink_restores_state {
                            let ProcessedAction { card, undo, .. } = previous;
                            undo.restore(
                                &mut round.state,
                                &mut round.privates,
                                &mut round.modifiers,
                            );
                            round.state.log(format!(
                                "{actor} unmakes {prev_actor}'s {card}; the board forgets it."
                            ));
                        } else {
                            round.state.log(format!(
                                "{actor} declares {prev_actor}'s {} undone, though its mark remains.",
                                previous.card
                            ));
                        }
                    }
                }
                self.grant_instigator_bonus(round, action.player, action.card.kind);
                Ok(StepOutcome::Done)
            }

            CardKind::Homage => {
                match round.processed.last() {
                    None => {
                        round
                            .state
                            .log(format!("{actor} finds no act worth honoring."));
                    }
                    Some(previous) => {
                        let kind = previous.card.kind;
                        let copy = CommandCard::new(round.state.alloc_card_id(), kind);
                        round.queue.push_front(QueuedAction {
                            player: action.player,
                            card: copy,
                        });
                        round.state.log(format!(
                            "{actor} pays homage, repeating the {} as their own.",
                            copy
                        ));
                    }
                }
                Ok(StepOutcome::Done)
            }

            CardKind::Foresight => {
                round.modifiers.foresight = Some(HeldForesight {
                    holder: action.player,
                    copied: false,
                });
                round
                    .state
                    .log(format!("{actor} peers ahead, ready to mirror what comes."));
                Ok(StepOutcome::Done)
            }

            CardKind::Inhibit => {
                round.modifiers.inhibit_interact = true;
                round
                    .state
                    .log(format!("{actor} inhibits the next communion."));
                Ok(StepOutcome::Done)
            }

            CardKind::Interact => {
                resolve_interaction(
                    &mut round.state,
                    &mut round.privates,
                    self.scenario,
                    action.player,
                    &mut round.rng,
                )?;
                let finished = check_win_conditions(
                    &mut round.state,
                    self.scenario,
                    &self.config,
                    Some(CardKind::Interact),
                )?;
                Ok(if finished {
                    StepOutcome::Terminal
                } else {
                    StepOutcome::Done
                })
            }

            CardKind::Gamble => {
                self.grant_instigator_bonus(round, action.player, action.card.kind);

                let mut queued_players: Vec<PlayerId> = Vec::new();
                for queued in &round.queue {
                    if !queued_players.contains(&queued.player) {
                        queued_players.push(queued.player);
                    }
                }

                let mut pool: Vec<(PlayerId, CommandCard)> = Vec::new();
                for &player in &queued_players {
                    for &card in &round.privates[player].hand {
                        pool.push((player, card));
                    }
                }

                let mut redrawn = 0usize;
                for queued in round.queue.iter_mut() {
                    if pool.is_empty() {
                        break;
                    }
                    let idx = round.rng.gen_range(0..pool.len());
                    let (owner, card) = pool.swap_remove(idx);
                    round.privates[owner].take_card(card.id);
                    queued.card = card;
                    redrawn += 1;
                }

                round.state.log(format!(
                    "{actor} gambles with fate; {redrawn} committed act(s) are redrawn."
                ));
                Ok(StepOutcome::Done)
            }

            CardKind::HailMary => {
                let mut deck = Deck::shuffled(&mut round.state, &mut round.rng);
                for player in round.state.priority_track.clone() {
                    round.privates[player].hand = deck.deal(self.config.hand_size);
                }
                round.state.log(format!(
                    "{actor} throws the deck to the wind; every hand is dealt anew."
                ));
                Ok(StepOutcome::Done)
            }

            CardKind::Reload => {
                let mut deck = Deck::shuffled(&mut round.state, &mut round.rng);
                round.privates[action.player].hand = deck.deal(self.config.hand_size);

                let hand_len = round.privates[action.player].hand.len();
                if hand_len > 0 {
                    let idx = round.rng.gen_range(0..hand_len);
                    let card = round.privates[action.player].hand.remove(idx);
                    round.queue.push_front(QueuedAction {
                        player: action.player,
                        card,
                    });
                    round.state.log(format!(
                        "{actor} reloads and blindly commits a {} from the fresh hand.",
                        card
                    ));
                } else {
                    round.state.log(format!("{actor} reloads an empty hand."));
                }
                Ok(StepOutcome::Done)
            }

            CardKind::Buffer => {
                round.state.log(format!("{actor} bides their time."));
                Ok(StepOutcome::Done)
            }
        }
    }

    /// Relocate the Harbinger and re-evaluate the terminal conditions with
    /// the card that caused the move.
    fn apply_harbinger_move(
        &self,
        round: &mut RoundInFlight,
        player: PlayerId,
        destination: BoardSpace,
        trigger: CardKind,
    ) -> Result<StepOutcome, EngineError> {
        round.state.harbinger = destination;
        let actor = round.state.username(player).to_string();
        round
            .state
            .log(format!("{actor} sends the Harbinger to {destination}."));

        let finished =
            check_win_conditions(&mut round.state, self.scenario, &self.config, Some(trigger))?;
        Ok(if finished {
            StepOutcome::Terminal
        } else {
            StepOutcome::Done
        })
    }

    /// +5 VP when a cancellation card is played by an Instigator.
    fn grant_instigator_bonus(&self, round: &mut RoundInFlight, player: PlayerId, kind: CardKind) {
        if kind.is_cancellation() && round.privates[player].sub_role == SubRole::Instigator {
            award_points(
                &mut round.state,
                &mut round.privates,
                player,
                INSTIGATOR_BONUS,
            );
            let actor = round.state.username(player).to_string();
            round.state.log(format!(
                "{actor}'s instigation is rewarded (+{INSTIGATOR_BONUS} VP)."
            ));
        }
    }

    /// The round's exit steps: end-of-round effects, the terminal sweep,
    /// priority rotation, hand refills on cadence, submitted-flag reset.
    fn run_exit_steps(&self, round: &mut RoundInFlight) -> Result<(), EngineError> {
        apply_end_of_round(
            &mut round.state,
            &mut round.privates,
            self.scenario,
            &self.config,
            &mut round.rng,
        )?;

        let finished =
            check_win_conditions(&mut round.state, self.scenario, &self.config, None)?;

        if !finished {
            let completed = round.state.round;
            round.state.rotate_priority();
            round.state.round += 1;

            if self.config.refill_interval > 0 && completed % self.config.refill_interval == 0 {
                let mut deck = Deck::shuffled(&mut round.state, &mut round.rng);
                for player in round.state.priority_track.clone() {
                    round.privates[player].hand = deck.deal(self.config.hand_size);
                }
                round.state.log("The hands are gathered and dealt anew.");
            }

            for (_, summary) in round.state.players.iter_mut() {
                summary.submitted = false;
            }
        }

        debug!(round = round.state.round, finished, "round complete");
        Ok(())
    }
}

fn complete(round: RoundInFlight) -> RoundOutcome {
    RoundOutcome::Complete(RoundSnapshot {
        state: round.state,
        privates: round.privates,
        rng: round.rng,
    })
}

/// Reject inconsistent submissions before any state is touched.
fn validate_submissions(
    state: &GameState,
    privates: &PlayerMap<PrivatePlayerState>,
    actions: &[SubmittedAction],
) -> Result<(), EngineError> {
    let mut seen: rustc_hash::FxHashSet<PlayerId> = rustc_hash::FxHashSet::default();

    for action in actions {
        if !state.priority_track.contains(&action.player) {
            return Err(EngineError::PlayerNotInTrack(action.player));
        }
        if !seen.insert(action.player) {
            return Err(EngineError::DuplicateSubmission(action.player));
        }
        if !privates[action.player]
            .hand
            .iter()
            .any(|c| c.id == action.card.id)
        {
            return Err(EngineError::CardNotInHand {
                player: action.player,
                card: action.card.id,
            });
        }
    }

    for &player in &state.priority_track {
        if !seen.contains(&player) {
            return Err(EngineError::MissingSubmission(player));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActiveComplication, PlayerSummary, Role, SecretIdentity};
    use crate::scenario::{catalog::veiled_shore, ComplicationDuration};

    fn fixture(count: usize) -> (GameState, PlayerMap<PrivatePlayerState>) {
        let players = PlayerMap::new(count, |p| PlayerSummary::new(format!("p{}", p.index())));
        let track = PlayerId::all(count).collect();
        let state = GameState::new(players, track, BoardSpace::new(5, 5));
        let privates = PlayerMap::new(count, |p| {
            PrivatePlayerState::new(Role::Zealot, SubRole::Fanatic, SecretIdentity(p.0))
        });
        (state, privates)
    }

    fn give_card(
        state: &mut GameState,
        privates: &mut PlayerMap<PrivatePlayerState>,
        player: PlayerId,
        kind: CardKind,
    ) -> CommandCard {
        let card = CommandCard::new(state.alloc_card_id(), kind);
        privates[player].hand.push(card);
        card
    }

    #[test]
    fn test_modifiers_seeded_from_complications() {
        let (mut state, _) = fixture(2);
        state.complications.push(ActiveComplication {
            name: "Rising Fog".to_string(),
            effect: ComplicationEffect::MoveDelta(-1),
            remaining: ComplicationDuration::Rounds(2),
        });
        state.complications.push(ActiveComplication {
            name: "Sudden Squall".to_string(),
            effect: ComplicationEffect::Stillness,
            remaining: ComplicationDuration::Immediate,
        });

        let modifiers = RoundModifiers::for_round(&state);
        assert_eq!(modifiers.move_value, -1);
        assert!(modifiers.skip_next_move);
        assert_eq!(modifiers.next_move_value, 0);
    }

    #[test]
    fn test_validation_rejects_unknown_player() {
        let scenario = veiled_shore();
        let engine = RoundEngine::new(&scenario).unwrap();
        let (mut state, mut privates) = fixture(2);
        let card = give_card(&mut state, &mut privates, PlayerId::new(0), CardKind::Buffer);

        let actions = vec![SubmittedAction {
            player: PlayerId::new(7),
            card,
            priority_index: 0,
        }];

        let err = engine
            .resolve_round(state, privates, actions, EngineRng::new(1))
            .unwrap_err();
        assert_eq!(err, EngineError::PlayerNotInTrack(PlayerId::new(7)));
    }

    #[test]
    fn test_validation_rejects_duplicate_and_missing() {
        let scenario = veiled_shore();
        let engine = RoundEngine::new(&scenario).unwrap();

        let (mut state, mut privates) = fixture(2);
        let a = give_card(&mut state, &mut privates, PlayerId::new(0), CardKind::Buffer);
        let b = give_card(&mut state, &mut privates, PlayerId::new(0), CardKind::Charge);
        let actions = vec![
            SubmittedAction {
                player: PlayerId::new(0),
                card: a,
                priority_index: 0,
            },
            SubmittedAction {
                player: PlayerId::new(0),
                card: b,
                priority_index: 0,
            },
        ];
        let err = engine
            .resolve_round(state, privates, actions, EngineRng::new(1))
            .unwrap_err();
        assert_eq!(err, EngineError::DuplicateSubmission(PlayerId::new(0)));

        let (mut state, mut privates) = fixture(2);
        let a = give_card(&mut state, &mut privates, PlayerId::new(0), CardKind::Buffer);
        let actions = vec![SubmittedAction {
            player: PlayerId::new(0),
            card: a,
            priority_index: 0,
        }];
        let err = engine
            .resolve_round(state, privates, actions, EngineRng::new(1))
            .unwrap_err();
        assert_eq!(err, EngineError::MissingSubmission(PlayerId::new(1)));
    }

    #[test]
    fn test_validation_rejects_card_not_in_hand() {
        let scenario = veiled_shore();
        let engine = RoundEngine::new(&scenario).unwrap();
        let (mut state, privates) = fixture(1);

        let ghost = CommandCard::new(state.alloc_card_id(), CardKind::Buffer);
        let actions = vec![SubmittedAction {
            player: PlayerId::new(0),
            card: ghost,
            priority_index: 0,
        }];

        let err = engine
            .resolve_round(state, privates, actions, EngineRng::new(1))
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::CardNotInHand {
                player: PlayerId::new(0),
                card: ghost.id,
            }
        );
    }

    #[test]
    fn test_inactive_game_is_rejected() {
        let scenario = veiled_shore();
        let engine = RoundEngine::new(&scenario).unwrap();
        let (mut state, privates) = fixture(1);
        state.status = GameStatus::Finished;

        let err = engine
            .resolve_round(state, privates, Vec::new(), EngineRng::new(1))
            .unwrap_err();
        assert_eq!(err, EngineError::GameNotActive);
    }
}
