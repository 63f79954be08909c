//! The round-resolution engine.
//!
//! ## Modules
//!
//! - `movement`: reachable-cell calculator for movement cards
//! - `interaction`: NPC and object interaction
//! - `end_of_round`: sub-role scoring and complication lifecycle
//! - `victory`: terminal-condition evaluation
//! - `round`: the round-resolution state machine (the centerpiece)
//! - `setup`: initial state construction
//!
//! A [`RoundEngine`] is constructed explicitly per game lifecycle owner and
//! holds only an immutable scenario reference and its configuration - there
//! is no process-wide engine instance.

pub mod end_of_round;
pub mod interaction;
pub mod movement;
pub mod round;
pub mod setup;
pub mod victory;

pub use movement::{valid_moves, MovementBudget};
pub use round::{
    HeldForesight, MovePrompt, ResumeRejected, RoundEngine, RoundModifiers, RoundOutcome,
    RoundSnapshot, SubmittedAction, SuspendedRound,
};
pub use setup::setup;

use crate::core::{GameState, PlayerId, PlayerMap, PrivatePlayerState};

/// Tuning knobs and behavior flags for the resolution engine.
///
/// The two boolean flags pin down behaviors the source material left
/// ambiguous; tests target both settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Cards dealt per hand.
    pub hand_size: usize,

    /// Hands are reshuffled and re-dealt after every round whose number is a
    /// multiple of this.
    pub refill_interval: u32,

    /// Chance of spawning a complication at each end-of-round.
    pub complication_chance: f64,

    /// Cap on simultaneously active complications.
    pub max_complications: usize,

    /// When set, Rethink restores the cancelled action's snapshot (token
    /// position, scores, board entities, modifiers). When unset, the
    /// cancellation is narration only.
    pub rethink_restores_state: bool,

    /// When set, the main prophecy requires the qualifying card to be the
    /// one that completed it; when unset, reaching the end location
    /// suffices.
    pub prophecy_requires_trigger: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hand_size: 4,
            refill_interval: 3,
            complication_chance: 0.2,
            max_complications: 3,
            rethink_restores_state: false,
            prophecy_requires_trigger: true,
        }
    }
}

impl EngineConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the complication spawn chance.
    #[must_use]
    pub fn with_complication_chance(mut self, chance: f64) -> Self {
        self.complication_chance = chance;
        self
    }

    /// Enable snapshot restoration for Rethink.
    #[must_use]
    pub fn with_rethink_restore(mut self, restore: bool) -> Self {
        self.rethink_restores_state = restore;
        self
    }

    /// Set whether the prophecy needs its qualifying card.
    #[must_use]
    pub fn with_prophecy_trigger(mut self, required: bool) -> Self {
        self.prophecy_requires_trigger = required;
        self
    }
}

/// Award points to a player, mirroring the canonical private total into the
/// public summary.
pub(crate) fn award_points(
    state: &mut GameState,
    privates: &mut PlayerMap<PrivatePlayerState>,
    player: PlayerId,
    delta: i64,
) {
    privates[player].victory_points += delta;
    state.players[player].victory_points = privates[player].victory_points;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardSpace, PlayerSummary, Role, SecretIdentity, SubRole};

    #[test]
    fn test_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.hand_size, 4);
        assert_eq!(config.refill_interval, 3);
        assert!((config.complication_chance - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.max_complications, 3);
        assert!(!config.rethink_restores_state);
        assert!(config.prophecy_requires_trigger);
    }

    #[test]
    fn test_award_points_mirrors_summary() {
        let players = PlayerMap::new(2, |p| PlayerSummary::new(format!("p{}", p.index())));
        let mut state = GameState::new(
            players,
            vec![PlayerId::new(0), PlayerId::new(1)],
            BoardSpace::new(1, 1),
        );
        let mut privates = PlayerMap::new(2, |_| {
            PrivatePlayerState::new(Role::Zealot, SubRole::Fanatic, SecretIdentity(0))
        });

        award_points(&mut state, &mut privates, PlayerId::new(1), 5);
        award_points(&mut state, &mut privates, PlayerId::new(1), -2);

        assert_eq!(privates[PlayerId::new(1)].victory_points, 3);
        assert_eq!(state.players[PlayerId::new(1)].victory_points, 3);
        assert_eq!(state.players[PlayerId::new(0)].victory_points, 0);
    }
}
