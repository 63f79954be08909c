//! Core engine types: board geometry, players, roles, state, RNG.
//!
//! These are the value types the resolution engine operates on. Scenarios
//! configure the board; the engine never hardcodes one.

pub mod board;
pub mod player;
pub mod rng;
pub mod roles;
pub mod state;

pub use board::BoardSpace;
pub use player::{PlayerId, PlayerMap};
pub use rng::{EngineRng, EngineRngState};
pub use roles::{PersonalGoal, Role, SecretIdentity, SubRole};
pub use state::{
    ActiveComplication, BoardNpc, BoardObject, GameState, GameStatus, PlayerSummary,
    PrivatePlayerState,
};
