//! Game state: public and private information.
//!
//! ## GameState
//!
//! The public snapshot every player sees: round counter, status, the
//! Harbinger's position, the priority track, active complications, placed
//! objects and NPCs, per-player summaries, and the append-only game log.
//!
//! ## PrivatePlayerState
//!
//! One per player, visible only to its owner: hand, role, sub-role, secret
//! identity, victory points, and an optional personal goal.
//!
//! Both are plain value snapshots; the resolution engine consumes them by
//! value and emits replacements. Persistence and broadcast belong to the
//! caller.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::board::BoardSpace;
use super::player::{PlayerId, PlayerMap};
use super::roles::{PersonalGoal, Role, SecretIdentity, SubRole};
use crate::cards::{CardId, CommandCard};
use crate::scenario::{ComplicationDuration, ComplicationEffect, NpcReaction, ObjectPower};

/// Lifecycle status of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Lobby,
    Active,
    Finished,
}

/// Public per-player summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub username: String,
    pub victory_points: i64,
    /// Whether this player has committed an action this round.
    pub submitted: bool,
}

impl PlayerSummary {
    /// Create a fresh summary.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            victory_points: 0,
            submitted: false,
        }
    }
}

/// A placed one-use object. Consumption removes it from the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardObject {
    pub name: String,
    pub position: BoardSpace,
    pub power: ObjectPower,
}

/// A placed NPC. Reusable; interaction only marks it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardNpc {
    pub name: String,
    pub position: BoardSpace,
    pub boon: NpcReaction,
    pub bane: NpcReaction,
    pub interacted: bool,
}

/// A complication currently in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveComplication {
    pub name: String,
    pub effect: ComplicationEffect,
    pub remaining: ComplicationDuration,
}

/// Public game state - observable by all players.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current round (starts at 1).
    pub round: u32,

    pub status: GameStatus,

    /// Position of the shared token.
    pub harbinger: BoardSpace,

    /// Turn-priority order. Invariant: a permutation of all player IDs,
    /// rotated by one position at each round's end.
    pub priority_track: Vec<PlayerId>,

    pub complications: Vec<ActiveComplication>,

    pub objects: Vec<BoardObject>,

    pub npcs: Vec<BoardNpc>,

    pub players: PlayerMap<PlayerSummary>,

    /// Ordered, append-only narration intended for direct display.
    pub game_log: Vector<String>,

    /// Next card id to allocate. Keeps copies unique across re-deals.
    next_card_id: u32,
}

impl GameState {
    /// Create an active game state at round 1 with an empty board.
    #[must_use]
    pub fn new(
        players: PlayerMap<PlayerSummary>,
        priority_track: Vec<PlayerId>,
        harbinger: BoardSpace,
    ) -> Self {
        debug_assert_eq!(priority_track.len(), players.player_count());

        Self {
            round: 1,
            status: GameStatus::Active,
            harbinger,
            priority_track,
            complications: Vec::new(),
            objects: Vec::new(),
            npcs: Vec::new(),
            players,
            game_log: Vector::new(),
            next_card_id: 0,
        }
    }

    /// Get the number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Append a narration line to the game log.
    pub fn log(&mut self, entry: impl Into<String>) {
        self.game_log.push_back(entry.into());
    }

    /// Allocate a fresh card id.
    pub fn alloc_card_id(&mut self) -> CardId {
        let id = CardId::new(self.next_card_id);
        self.next_card_id += 1;
        id
    }

    /// Index of the object occupying a cell, if any.
    #[must_use]
    pub fn object_at(&self, cell: BoardSpace) -> Option<usize> {
        self.objects.iter().position(|o| o.position == cell)
    }

    /// Index of the NPC occupying a cell, if any.
    #[must_use]
    pub fn npc_at(&self, cell: BoardSpace) -> Option<usize> {
        self.npcs.iter().position(|n| n.position == cell)
    }

    /// Rotate the priority track by one: the front seat moves to the back.
    pub fn rotate_priority(&mut self) {
        if !self.priority_track.is_empty() {
            let front = self.priority_track.remove(0);
            self.priority_track.push(front);
        }
    }

    /// A player's position on the priority track.
    #[must_use]
    pub fn priority_index(&self, player: PlayerId) -> Option<usize> {
        self.priority_track.iter().position(|&p| p == player)
    }

    /// Username of a player, for log narration.
    #[must_use]
    pub fn username(&self, player: PlayerId) -> &str {
        &self.players[player].username
    }
}

/// Per-player hidden state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivatePlayerState {
    pub hand: Vec<CommandCard>,
    pub role: Role,
    pub sub_role: SubRole,
    pub identity: SecretIdentity,
    /// Canonical score; mirrored into the public summary whenever awarded.
    pub victory_points: i64,
    /// Present only for the goal-bearing role/sub-role combination.
    pub goal: Option<PersonalGoal>,
}

impl PrivatePlayerState {
    /// Create a private state with an empty hand and no points.
    #[must_use]
    pub fn new(role: Role, sub_role: SubRole, identity: SecretIdentity) -> Self {
        Self {
            hand: Vec::new(),
            role,
            sub_role,
            identity,
            victory_points: 0,
            goal: None,
        }
    }

    /// Remove a card from the hand by id.
    ///
    /// Returns the card if it was present.
    pub fn take_card(&mut self, id: CardId) -> Option<CommandCard> {
        let pos = self.hand.iter().position(|c| c.id == id)?;
        Some(self.hand.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;

    fn two_player_state() -> GameState {
        let players = PlayerMap::new(2, |p| PlayerSummary::new(format!("player-{}", p.index())));
        GameState::new(
            players,
            vec![PlayerId::new(0), PlayerId::new(1)],
            BoardSpace::new(5, 5),
        )
    }

    #[test]
    fn test_new_state_defaults() {
        let state = two_player_state();
        assert_eq!(state.round, 1);
        assert_eq!(state.status, GameStatus::Active);
        assert_eq!(state.harbinger, BoardSpace::new(5, 5));
        assert!(state.complications.is_empty());
        assert!(state.game_log.is_empty());
    }

    #[test]
    fn test_log_appends_in_order() {
        let mut state = two_player_state();
        state.log("first");
        state.log("second");
        assert_eq!(state.game_log.len(), 2);
        assert_eq!(state.game_log[0], "first");
        assert_eq!(state.game_log[1], "second");
    }

    #[test]
    fn test_card_id_allocation_is_unique() {
        let mut state = two_player_state();
        let a = state.alloc_card_id();
        let b = state.alloc_card_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_rotate_priority() {
        let players = PlayerMap::new(3, |p| PlayerSummary::new(format!("p{}", p.index())));
        let mut state = GameState::new(
            players,
            vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)],
            BoardSpace::new(1, 1),
        );

        state.rotate_priority();
        assert_eq!(
            state.priority_track,
            vec![PlayerId::new(1), PlayerId::new(2), PlayerId::new(0)]
        );
        assert_eq!(state.priority_index(PlayerId::new(0)), Some(2));
    }

    #[test]
    fn test_object_and_npc_lookup() {
        let mut state = two_player_state();
        state.objects.push(BoardObject {
            name: "a drowned bell".to_string(),
            position: BoardSpace::new(2, 2),
            power: ObjectPower::Hex { points: 1 },
        });
        state.npcs.push(BoardNpc {
            name: "the Dredger".to_string(),
            position: BoardSpace::new(3, 3),
            boon: NpcReaction::Favor { points: 1 },
            bane: NpcReaction::Scorn { points: 1 },
            interacted: false,
        });

        assert_eq!(state.object_at(BoardSpace::new(2, 2)), Some(0));
        assert_eq!(state.object_at(BoardSpace::new(9, 9)), None);
        assert_eq!(state.npc_at(BoardSpace::new(3, 3)), Some(0));
        assert_eq!(state.npc_at(BoardSpace::new(2, 2)), None);
    }

    #[test]
    fn test_take_card() {
        let mut private = PrivatePlayerState::new(
            Role::Zealot,
            SubRole::Fanatic,
            SecretIdentity(0),
        );
        let mut state = two_player_state();
        let card = CommandCard::new(state.alloc_card_id(), CardKind::Buffer);
        private.hand.push(card);

        assert_eq!(private.take_card(card.id), Some(card));
        assert!(private.hand.is_empty());
        assert_eq!(private.take_card(card.id), None);
    }

    #[test]
    fn test_state_serde_round_trip() {
        let mut state = two_player_state();
        state.log("the Harbinger stirs");
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&GameStatus::Finished).unwrap();
        assert_eq!(json, "\"finished\"");
    }
}
