//! # harbinger-engine
//!
//! The turn-resolution engine of a multiplayer social-deduction board game.
//! Each round every player secretly commits one command card; the engine
//! resolves all committed cards in priority order, applies their
//! interacting effects (denials, copies, cancellations, randomizations),
//! moves the shared token - the Harbinger - across the grid, triggers
//! interactions with board entities, evaluates win and loss conditions, and
//! rotates priority for the next round.
//!
//! ## Design Principles
//!
//! 1. **Snapshots in, snapshots out**: the engine owns no storage and no
//!    transport. It consumes a full `GameState` plus all
//!    `PrivatePlayerState`s and emits full replacements; persistence,
//!    diffing, and broadcast belong to the caller.
//!
//! 2. **Explicit construction, no singletons**: a [`RoundEngine`] is built
//!    per game-lifecycle owner from a borrowed [`Scenario`] and an
//!    [`EngineConfig`]; construction validates the scenario once.
//!
//! 3. **Suspension as a value**: the one designed pause point - a movement
//!    card with more than one destination - is a returned
//!    [`RoundOutcome::AwaitingMove`] owning the in-flight round, not a
//!    blocked thread. At most one resolution per game can be in flight
//!    because the suspension owns the state.
//!
//! 4. **Seeded randomness**: every random act flows through an injected
//!    [`EngineRng`], so games replay deterministically under a fixed seed.
//!
//! ## Modules
//!
//! - `core`: board geometry, players, roles, state snapshots, RNG
//! - `cards`: the command-card catalog and the deck
//! - `scenario`: static scenario data and validation
//! - `engine`: setup, movement, interaction, end-of-round, victory, and the
//!   round-resolution state machine
//! - `error`: the engine error taxonomy

pub mod cards;
pub mod core;
pub mod engine;
pub mod error;
pub mod scenario;

pub use crate::cards::{CardId, CardKind, CommandCard, Deck};
pub use crate::core::{
    ActiveComplication, BoardNpc, BoardObject, BoardSpace, EngineRng, EngineRngState, GameState,
    GameStatus, PersonalGoal, PlayerId, PlayerMap, PlayerSummary, PrivatePlayerState, Role,
    SecretIdentity, SubRole,
};
pub use crate::engine::{
    setup, valid_moves, EngineConfig, MovePrompt, MovementBudget, ResumeRejected, RoundEngine,
    RoundModifiers, RoundOutcome, RoundSnapshot, SubmittedAction, SuspendedRound,
};
pub use crate::error::EngineError;
pub use crate::scenario::Scenario;
