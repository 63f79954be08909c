//! Static scenario definitions.
//!
//! A [`Scenario`] is externally supplied and immutable for the life of a
//! game: board dimensions, the named locations, the pools of objects, NPCs,
//! complications and pilgrimage goals available for random placement, and
//! the three terminal conditions.
//!
//! Scenario data is cross-referenced by name in several places (an NPC's
//! home, a reaction's target, the doomsday site). [`Scenario::validate`]
//! checks every reference once; the engine validates at construction so a
//! broken scenario fails loudly instead of no-opping mid-game.

pub mod catalog;

use serde::{Deserialize, Serialize};

use crate::cards::CardKind;
use crate::core::BoardSpace;
use crate::error::EngineError;

/// A fixed, named point of interest. Locations never move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub position: BoardSpace,
}

/// What a board object does when consumed.
///
/// Object effects are symmetric across the table: one side of the role
/// divide gains, the other loses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectPower {
    /// Players sharing the actor's role gain `points`; everyone else loses
    /// `points`.
    Blessing { points: i64 },
    /// Players sharing the actor's role lose `points`; everyone else gains
    /// `points`.
    Hex { points: i64 },
}

/// An object available for random placement at setup. One use each.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSpec {
    pub name: String,
    pub power: ObjectPower,
}

/// One of an NPC's two configured outcomes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NpcReaction {
    /// Pull the Harbinger one step toward the named location.
    DrawToward { location: String },
    /// Push the Harbinger one step away from the named location.
    RepelFrom { location: String },
    /// Award the acting player `points`.
    Favor { points: i64 },
    /// Dock the acting player `points`.
    Scorn { points: i64 },
}

/// An NPC available for placement at setup.
///
/// NPCs with a `home` are placed on that location's cell by name lookup;
/// homeless NPCs form the pool for random placement. NPCs are reusable -
/// interaction marks them but never removes them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcSpec {
    pub name: String,
    pub home: Option<String>,
    /// Applied on a favorable outcome roll.
    pub boon: NpcReaction,
    /// Applied on an unfavorable outcome roll.
    pub bane: NpcReaction,
}

/// How long a complication stays on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplicationDuration {
    /// Lasts the single round after it appears, then expires.
    Immediate,
    /// Rounds remaining; decremented each end-of-round, expires at zero.
    Rounds(u8),
    /// Never expires.
    Permanent,
}

/// Board-wide effect a complication exerts while active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplicationEffect {
    /// Shifts every move's point budget while active.
    MoveDelta(i32),
    /// Shifts every player's victory points at each end-of-round.
    Unrest { points: i64 },
    /// The first move attempt each round fizzles.
    Stillness,
}

/// A complication available for random spawning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplicationSpec {
    pub name: String,
    pub effect: ComplicationEffect,
    pub duration: ComplicationDuration,
}

/// The main-prophecy terminal condition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prophecy {
    /// Location the prophecy names as its origin.
    pub start: String,
    /// Location the Harbinger must reach.
    pub end: String,
    /// Card that must carry the Harbinger there for the prophecy to count.
    pub card: CardKind,
}

/// The global-failure terminal condition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalFail {
    /// Location that dooms the table once the deadline has passed.
    pub location: String,
    /// Round number from which the location is fatal.
    pub deadline_round: u32,
}

/// A complete static scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub board_size: BoardSpace,
    pub harbinger_start: BoardSpace,
    pub locations: Vec<Location>,
    pub object_pool: Vec<ObjectSpec>,
    pub npc_pool: Vec<NpcSpec>,
    pub complication_pool: Vec<ComplicationSpec>,
    /// Station sequences a Pilgrim's personal goal is sampled from.
    pub goal_pool: Vec<Vec<String>>,
    /// Location name the doomsday condition watches.
    pub doomsday: String,
    pub prophecy: Prophecy,
    pub global_fail: GlobalFail,
}

impl Scenario {
    /// Look up a location by name.
    pub fn location(&self, name: &str) -> Result<&Location, EngineError> {
        self.locations
            .iter()
            .find(|l| l.name == name)
            .ok_or_else(|| EngineError::MissingLocation(name.to_string()))
    }

    /// The location occupying a cell, if any.
    #[must_use]
    pub fn location_at(&self, cell: BoardSpace) -> Option<&Location> {
        self.locations.iter().find(|l| l.position == cell)
    }

    /// Check every cross-reference and structural constraint.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.board_size.x < 2 || self.board_size.y < 2 {
            return Err(EngineError::InvalidScenario(format!(
                "board {} is too small",
                self.board_size
            )));
        }
        if !self.harbinger_start.in_bounds(self.board_size) {
            return Err(EngineError::InvalidScenario(format!(
                "harbinger start {} is off the board",
                self.harbinger_start
            )));
        }

        let mut names = rustc_hash::FxHashSet::default();
        for location in &self.locations {
            if !location.position.in_bounds(self.board_size) {
                return Err(EngineError::InvalidScenario(format!(
                    "location {:?} at {} is off the board",
                    location.name, location.position
                )));
            }
            if !names.insert(location.name.as_str()) {
                return Err(EngineError::InvalidScenario(format!(
                    "duplicate location name {:?}",
                    location.name
                )));
            }
        }

        self.location(&self.doomsday)?;
        self.location(&self.prophecy.start)?;
        self.location(&self.prophecy.end)?;
        self.location(&self.global_fail.location)?;
        if self.global_fail.deadline_round == 0 {
            return Err(EngineError::InvalidScenario(
                "global-fail deadline must be at least round 1".to_string(),
            ));
        }

        for npc in &self.npc_pool {
            if let Some(home) = &npc.home {
                self.location(home)?;
            }
            for reaction in [&npc.boon, &npc.bane] {
                match reaction {
                    NpcReaction::DrawToward { location }
                    | NpcReaction::RepelFrom { location } => {
                        self.location(location)?;
                    }
                    NpcReaction::Favor { .. } | NpcReaction::Scorn { .. } => {}
                }
            }
        }

        for stations in &self.goal_pool {
            if stations.is_empty() {
                return Err(EngineError::InvalidScenario(
                    "empty station sequence in goal pool".to_string(),
                ));
            }
            for station in stations {
                self.location(station)?;
            }
        }

        if self.goal_pool.is_empty() {
            return Err(EngineError::InvalidScenario(
                "goal pool must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
