//! Engine error taxonomy.
//!
//! Two families of failure exist:
//!
//! - **Input validation**: a submission or resume response that the engine
//!   must reject without touching state (wrong responder, off-prompt cell,
//!   player missing from the priority track).
//! - **Configuration inconsistency**: scenario data referencing locations or
//!   pools that do not exist. These indicate the scenario and the effect
//!   tables are out of sync and fail loudly rather than no-op.
//!
//! The engine never retries; retries belong to the transport collaborator.

use thiserror::Error;

use crate::cards::CardId;
use crate::core::{BoardSpace, PlayerId};

/// Unified error type for engine operations.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EngineError {
    /// An action referenced a player that is not on the priority track.
    #[error("{0} is not on the priority track")]
    PlayerNotInTrack(PlayerId),

    /// A player submitted more than one action this round.
    #[error("{0} submitted more than one action")]
    DuplicateSubmission(PlayerId),

    /// A player on the priority track submitted no action.
    #[error("no action submitted for {0}")]
    MissingSubmission(PlayerId),

    /// A submitted card is not in the submitting player's hand.
    #[error("{card} is not in {player}'s hand")]
    CardNotInHand { player: PlayerId, card: CardId },

    /// Round resolution was requested while the game is not active.
    #[error("game is not active")]
    GameNotActive,

    /// A player other than the prompted one answered a move prompt.
    #[error("not {responder}'s turn to move; awaiting {expected}")]
    WrongResponder {
        expected: PlayerId,
        responder: PlayerId,
    },

    /// A move response named a cell outside the offered destination set.
    #[error("{0} is not among the offered destinations")]
    InvalidMoveTarget(BoardSpace),

    /// Scenario data referenced a location name that does not exist.
    #[error("unknown location {0:?}")]
    MissingLocation(String),

    /// Scenario failed structural validation.
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    /// Setup was asked to seat an unsupported number of players.
    #[error("unsupported player count {0}")]
    PlayerCount(usize),

    /// Rejection sampling could not find a free cell for a board entity.
    #[error("no free cell found while placing {0:?}")]
    PlacementExhausted(String),
}
