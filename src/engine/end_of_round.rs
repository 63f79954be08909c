//! End-of-round bookkeeping.
//!
//! Runs once the action queue empties, before the terminal-condition check:
//! sub-role passive scoring, Unrest drains, complication expiry, and the
//! chance of a fresh complication.

use tracing::debug;

use crate::core::{
    ActiveComplication, EngineRng, GameState, PlayerMap, PrivatePlayerState, SubRole,
};
use crate::error::EngineError;
use crate::scenario::{ComplicationDuration, ComplicationEffect, Scenario};

use super::{award_points, EngineConfig};

/// Apply all end-of-round effects in order.
pub fn apply_end_of_round(
    state: &mut GameState,
    privates: &mut PlayerMap<PrivatePlayerState>,
    scenario: &Scenario,
    config: &EngineConfig,
    rng: &mut EngineRng,
) -> Result<(), EngineError> {
    score_sub_roles(state, privates, scenario)?;
    apply_unrest(state, privates);
    expire_complications(state);
    maybe_spawn_complication(state, scenario, config, rng);
    Ok(())
}

/// Evaluate each player's sub-role trigger against the round's outcome.
///
/// The Instigator bonus is not handled here - it fires during the round,
/// the moment a cancellation card is played.
fn score_sub_roles(
    state: &mut GameState,
    privates: &mut PlayerMap<PrivatePlayerState>,
    scenario: &Scenario,
) -> Result<(), EngineError> {
    let cell = state.harbinger;
    let doomsday = scenario.location(&scenario.doomsday)?.position;
    let on_location = scenario.location_at(cell).map(|l| l.name.clone());

    for player in state.priority_track.clone() {
        let sub_role = privates[player].sub_role;
        match sub_role {
            SubRole::Instigator => {}
            SubRole::Fanatic => {
                if let Some(name) = &on_location {
                    award_points(state, privates, player, 2);
                    let actor = state.username(player).to_string();
                    state.log(format!("{actor} exults as the Harbinger rests at {name} (+2 VP)."));
                }
            }
            SubRole::Sentinel => {
                if cell.distance(doomsday) <= 1 {
                    award_points(state, privates, player, 2);
                    let actor = state.username(player).to_string();
                    state.log(format!("{actor} keeps vigil at the brink (+2 VP)."));
                }
            }
            SubRole::Purist => {
                if state.complications.is_empty() {
                    award_points(state, privates, player, 1);
                    let actor = state.username(player).to_string();
                    state.log(format!("{actor} savors the calm (+1 VP)."));
                }
            }
            SubRole::Pilgrim => {
                let reached = privates[player]
                    .goal
                    .as_ref()
                    .and_then(|goal| goal.next_station())
                    .is_some_and(|station| {
                        scenario
                            .location_at(cell)
                            .is_some_and(|l| l.name == station)
                    });
                if reached {
                    if let Some(goal) = privates[player].goal.as_mut() {
                        goal.advance();
                    }
                    award_points(state, privates, player, 3);
                    let actor = state.username(player).to_string();
                    state.log(format!("{actor}'s pilgrimage advances (+3 VP)."));
                }
            }
            SubRole::Cartographer => {
                if cell.on_rim(scenario.board_size) {
                    award_points(state, privates, player, 1);
                    let actor = state.username(player).to_string();
                    state.log(format!("{actor} charts the board's edge (+1 VP)."));
                }
            }
        }
    }

    Ok(())
}

fn apply_unrest(state: &mut GameState, privates: &mut PlayerMap<PrivatePlayerState>) {
    let drains: Vec<i64> = state
        .complications
        .iter()
        .filter_map(|c| match c.effect {
            ComplicationEffect::Unrest { points } => Some(points),
            _ => None,
        })
        .collect();

    for points in drains {
        for player in state.priority_track.clone() {
            award_points(state, privates, player, points);
        }
    }
}

/// Decrement durations and drop expired complications.
pub(crate) fn expire_complications(state: &mut GameState) {
    let mut kept = Vec::with_capacity(state.complications.len());
    for mut complication in std::mem::take(&mut state.complications) {
        match complication.remaining {
            ComplicationDuration::Immediate => {
                state
                    .game_log
                    .push_back(format!("{} passes.", complication.name));
            }
            ComplicationDuration::Rounds(n) if n <= 1 => {
                state
                    .game_log
                    .push_back(format!("{} passes.", complication.name));
            }
            ComplicationDuration::Rounds(n) => {
                complication.remaining = ComplicationDuration::Rounds(n - 1);
                kept.push(complication);
            }
            ComplicationDuration::Permanent => kept.push(complication),
        }
    }
    state.complications = kept;
}

fn maybe_spawn_complication(
    state: &mut GameState,
    scenario: &Scenario,
    config: &EngineConfig,
    rng: &mut EngineRng,
) {
    if state.complications.len() >= config.max_complications
        || scenario.complication_pool.is_empty()
        || !rng.gen_bool(config.complication_chance)
    {
        return;
    }

    let idx = rng.gen_range(0..scenario.complication_pool.len());
    let spec = &scenario.complication_pool[idx];
    debug!(name = %spec.name, "complication spawned");
    state.complications.push(ActiveComplication {
        name: spec.name.clone(),
        effect: spec.effect,
        remaining: spec.duration,
    });
    state.log(format!("A complication descends: {}.", spec.name));
}
