//! Built-in scenarios.
//!
//! The engine treats scenarios as external data; this module carries one
//! complete definition as the reference consumer of the `Scenario` API and
//! as the fixture for integration tests.

use crate::cards::CardKind;
use crate::core::BoardSpace;

use super::{
    ComplicationDuration, ComplicationEffect, ComplicationSpec, GlobalFail, Location, NpcReaction,
    NpcSpec, ObjectPower, ObjectSpec, Prophecy, Scenario,
};

fn location(name: &str, x: i32, y: i32) -> Location {
    Location {
        name: name.to_string(),
        position: BoardSpace::new(x, y),
    }
}

/// "The Veiled Shore" - a 12x12 coastal scenario.
///
/// The Harbinger manifests at the Salt Market and must be kept from the
/// Sunken Gate; the prophecy ends with a communion at the Tide Altar.
#[must_use]
pub fn veiled_shore() -> Scenario {
    Scenario {
        name: "The Veiled Shore".to_string(),
        board_size: BoardSpace::new(12, 12),
        harbinger_start: BoardSpace::new(5, 5),
        locations: vec![
            location("the Sunken Gate", 1, 1),
            location("the Tide Altar", 9, 9),
            location("the Black Quay", 12, 1),
            location("the Lighthouse", 12, 12),
            location("the Salt Market", 6, 7),
            location("the Hermit's Cairn", 3, 10),
        ],
        object_pool: vec![
            ObjectSpec {
                name: "a votive candle".to_string(),
                power: ObjectPower::Blessing { points: 2 },
            },
            ObjectSpec {
                name: "a barnacled idol".to_string(),
                power: ObjectPower::Blessing { points: 3 },
            },
            ObjectSpec {
                name: "a drowned bell".to_string(),
                power: ObjectPower::Hex { points: 2 },
            },
            ObjectSpec {
                name: "a cracked compass".to_string(),
                power: ObjectPower::Hex { points: 1 },
            },
            ObjectSpec {
                name: "a skein of kelp".to_string(),
                power: ObjectPower::Blessing { points: 1 },
            },
            ObjectSpec {
                name: "a salt-crusted coin".to_string(),
                power: ObjectPower::Blessing { points: 2 },
            },
            ObjectSpec {
                name: "a gull's skull".to_string(),
                power: ObjectPower::Hex { points: 3 },
            },
            ObjectSpec {
                name: "a tangle of netting".to_string(),
                power: ObjectPower::Hex { points: 2 },
            },
        ],
        npc_pool: vec![
            NpcSpec {
                name: "the Ferryman".to_string(),
                home: Some("the Lighthouse".to_string()),
                boon: NpcReaction::DrawToward {
                    location: "the Tide Altar".to_string(),
                },
                bane: NpcReaction::DrawToward {
                    location: "the Sunken Gate".to_string(),
                },
            },
            NpcSpec {
                name: "the Anchorite".to_string(),
                home: Some("the Hermit's Cairn".to_string()),
                boon: NpcReaction::Favor { points: 2 },
                bane: NpcReaction::RepelFrom {
                    location: "the Hermit's Cairn".to_string(),
                },
            },
            NpcSpec {
                name: "the Dredger".to_string(),
                home: None,
                boon: NpcReaction::Favor { points: 3 },
                bane: NpcReaction::Scorn { points: 2 },
            },
            NpcSpec {
                name: "the Gull King".to_string(),
                home: None,
                boon: NpcReaction::RepelFrom {
                    location: "the Sunken Gate".to_string(),
                },
                bane: NpcReaction::Scorn { points: 1 },
            },
        ],
        complication_pool: vec![
            ComplicationSpec {
                name: "Rising Fog".to_string(),
                effect: ComplicationEffect::MoveDelta(-1),
                duration: ComplicationDuration::Rounds(2),
            },
            ComplicationSpec {
                name: "Spring Tide".to_string(),
                effect: ComplicationEffect::MoveDelta(1),
                duration: ComplicationDuration::Rounds(3),
            },
            ComplicationSpec {
                name: "Dread Murmurs".to_string(),
                effect: ComplicationEffect::Unrest { points: -1 },
                duration: ComplicationDuration::Rounds(2),
            },
            ComplicationSpec {
                name: "Sudden Squall".to_string(),
                effect: ComplicationEffect::Stillness,
                duration: ComplicationDuration::Immediate,
            },
            ComplicationSpec {
                name: "the Long Dusk".to_string(),
                effect: ComplicationEffect::Unrest { points: -1 },
                duration: ComplicationDuration::Permanent,
            },
        ],
        goal_pool: vec![
            vec![
                "the Salt Market".to_string(),
                "the Hermit's Cairn".to_string(),
                "the Lighthouse".to_string(),
            ],
            vec![
                "the Black Quay".to_string(),
                "the Tide Altar".to_string(),
                "the Lighthouse".to_string(),
            ],
            vec![
                "the Hermit's Cairn".to_string(),
                "the Black Quay".to_string(),
            ],
        ],
        doomsday: "the Sunken Gate".to_string(),
        prophecy: Prophecy {
            start: "the Salt Market".to_string(),
            end: "the Tide Altar".to_string(),
            card: CardKind::Interact,
        },
        global_fail: GlobalFail {
            location: "the Black Quay".to_string(),
            deadline_round: 12,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_veiled_shore_shape() {
        let scenario = veiled_shore();
        assert_eq!(scenario.board_size, BoardSpace::new(12, 12));
        assert_eq!(scenario.locations.len(), 6);
        assert_eq!(scenario.object_pool.len(), 8);
        assert_eq!(scenario.npc_pool.len(), 4);
        assert!(scenario.npc_pool.iter().filter(|n| n.home.is_some()).count() == 2);
    }
}
