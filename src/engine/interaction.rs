//! Interaction with whatever shares the Harbinger's cell.
//!
//! NPCs take precedence over objects; an empty cell is a logged no-op.
//! NPC outcomes are a fair 50/50 roll between the NPC's configured boon and
//! bane. Objects apply their symmetric role-keyed effect and are consumed -
//! one use each, removed from the board afterwards.

use tracing::debug;

use crate::core::{EngineRng, GameState, PlayerId, PlayerMap, PrivatePlayerState};
use crate::error::EngineError;
use crate::scenario::{NpcReaction, ObjectPower, Scenario};

use super::award_points;

/// Resolve an Interact at the Harbinger's current cell.
///
/// Returns `true` when the interaction relocated the Harbinger, so the
/// caller can re-evaluate terminal conditions.
pub fn resolve_interaction(
    state: &mut GameState,
    privates: &mut PlayerMap<PrivatePlayerState>,
    scenario: &Scenario,
    acting: PlayerId,
    rng: &mut EngineRng,
) -> Result<bool, EngineError> {
    let cell = state.harbinger;

    if let Some(idx) = state.npc_at(cell) {
        return resolve_npc(state, privates, scenario, acting, rng, idx);
    }

    if let Some(idx) = state.object_at(cell) {
        resolve_object(state, privates, acting, idx);
        return Ok(false);
    }

    let actor = state.username(acting).to_string();
    state.log(format!("{actor} finds nothing of note at {cell}."));
    Ok(false)
}

fn resolve_npc(
    state: &mut GameState,
    privates: &mut PlayerMap<PrivatePlayerState>,
    scenario: &Scenario,
    acting: PlayerId,
    rng: &mut EngineRng,
    idx: usize,
) -> Result<bool, EngineError> {
    let favorable = rng.gen_bool(0.5);
    let npc_name = state.npcs[idx].name.clone();
    let reaction = if favorable {
        state.npcs[idx].boon.clone()
    } else {
        state.npcs[idx].bane.clone()
    };
    state.npcs[idx].interacted = true;

    let actor = state.username(acting).to_string();
    debug!(npc = %npc_name, favorable, "resolving NPC interaction");

    let mut moved = false;
    match reaction {
        NpcReaction::DrawToward { location } => {
            let target = scenario.location(&location)?.position;
            let next = state.harbinger.step_toward(target);
            moved = next != state.harbinger;
            state.harbinger = next;
            state.log(format!(
                "{npc_name} draws the Harbinger toward {location}; it now stands at {next}."
            ));
        }
        NpcReaction::RepelFrom { location } => {
            let target = scenario.location(&location)?.position;
            let next = state.harbinger.step_away(target, scenario.board_size);
            moved = next != state.harbinger;
            state.harbinger = next;
            state.log(format!(
                "{npc_name} drives the Harbinger away from {location}; it now stands at {next}."
            ));
        }
        NpcReaction::Favor { points } => {
            award_points(state, privates, acting, points);
            state.log(format!("{npc_name} favors {actor} (+{points} VP)."));
        }
        NpcReaction::Scorn { points } => {
            award_points(state, privates, acting, -points);
            state.log(format!("{npc_name} scorns {actor} (-{points} VP)."));
        }
    }

    Ok(moved)
}

fn resolve_object(
    state: &mut GameState,
    privates: &mut PlayerMap<PrivatePlayerState>,
    acting: PlayerId,
    idx: usize,
) {
    let object = state.objects.remove(idx);
    let actor_role = privates[acting].role;
    let actor = state.username(acting).to_string();

    match object.power {
        ObjectPower::Blessing { points } => {
            for player in privates.player_ids().collect::<Vec<_>>() {
                let delta = if privates[player].role == actor_role {
                    points
                } else {
                    -points
                };
                award_points(state, privates, player, delta);
            }
            state.log(format!(
                "{actor} claims {}; fortune favors their cause.",
                object.name
            ));
        }
        ObjectPower::Hex { points } => {
            for player in privates.player_ids().collect::<Vec<_>>() {
                let delta = if privates[player].role == actor_role {
                    -points
                } else {
                    points
                };
                award_points(state, privates, player, delta);
            }
            state.log(format!(
                "{actor} disturbs {}; a hex settles on their cause.",
                object.name
            ));
        }
    }
}
