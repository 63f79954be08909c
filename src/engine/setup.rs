//! Initial state construction.
//!
//! Shuffles the seating into a priority track (which doubles as the
//! secret-identity assignment), samples roles and sub-roles, deals opening
//! hands from one shuffled deck, and scatters objects and NPCs over cells
//! not claimed by named locations or the Harbinger's start.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::cards::Deck;
use crate::core::{
    BoardNpc, BoardObject, BoardSpace, EngineRng, GameState, PersonalGoal, PlayerId, PlayerMap,
    PlayerSummary, PrivatePlayerState, Role, SecretIdentity, SubRole,
};
use crate::error::EngineError;
use crate::scenario::Scenario;

use super::EngineConfig;

/// How many homeless NPCs get uniformly placed.
const RANDOM_NPC_COUNT: usize = 2;

/// The possible object counts, sampled uniformly.
const OBJECT_COUNT_CHOICES: [usize; 3] = [6, 7, 8];

/// Rejection-sampling cap; placement is satisfiable by scenario design, so
/// hitting this means the scenario is overcrowded for its board.
const MAX_PLACEMENT_ATTEMPTS: usize = 1024;

/// Build the initial public and private state for a new game.
pub fn setup(
    usernames: &[String],
    scenario: &Scenario,
    config: &EngineConfig,
    rng: &mut EngineRng,
) -> Result<(GameState, PlayerMap<PrivatePlayerState>), EngineError> {
    scenario.validate()?;

    let count = usernames.len();
    if !(2..=SecretIdentity::EPITHETS.len()).contains(&count) {
        return Err(EngineError::PlayerCount(count));
    }

    debug!(players = count, scenario = %scenario.name, "setting up game");

    // Shuffled seating order becomes the priority track; identities follow
    // the same shuffle 1:1.
    let mut priority_track: Vec<PlayerId> = PlayerId::all(count).collect();
    rng.shuffle(&mut priority_track);

    let mut privates: Vec<PrivatePlayerState> = Vec::with_capacity(count);
    for player in PlayerId::all(count) {
        let role = Role::ALL[rng.gen_range(0..Role::ALL.len())];
        let sub_role = role.sub_roles()[rng.gen_range(0..2)];
        let slot = priority_track
            .iter()
            .position(|&p| p == player)
            .ok_or(EngineError::PlayerNotInTrack(player))?;

        let mut private = PrivatePlayerState::new(role, sub_role, SecretIdentity(slot as u8));
        if sub_role == SubRole::Pilgrim {
            let stations = scenario.goal_pool[rng.gen_range(0..scenario.goal_pool.len())].clone();
            private.goal = Some(PersonalGoal::new(stations));
        }
        privates.push(private);
    }
    let mut privates = PlayerMap::from_vec(privates);

    let summaries = PlayerMap::new(count, |p| PlayerSummary::new(usernames[p.index()].clone()));
    let mut state = GameState::new(summaries, priority_track.clone(), scenario.harbinger_start);

    // One shuffled deck; hands dealt sequentially in track order. Refills
    // later always rebuild the full template, so the leftover pile is not
    // kept.
    let mut deck = Deck::shuffled(&mut state, rng);
    for &player in &priority_track {
        privates[player].hand = deck.deal(config.hand_size);
    }

    let mut occupied: FxHashSet<BoardSpace> =
        scenario.locations.iter().map(|l| l.position).collect();
    occupied.insert(scenario.harbinger_start);

    place_objects(&mut state, scenario, &mut occupied, rng)?;
    place_npcs(&mut state, scenario, &mut occupied, rng)?;

    state.log(format!(
        "The board is set: {} at {}.",
        scenario.name, scenario.harbinger_start
    ));
    state.log(format!(
        "The Harbinger manifests at {}.",
        scenario.harbinger_start
    ));

    Ok((state, privates))
}

fn place_objects(
    state: &mut GameState,
    scenario: &Scenario,
    occupied: &mut FxHashSet<BoardSpace>,
    rng: &mut EngineRng,
) -> Result<(), EngineError> {
    let wanted = OBJECT_COUNT_CHOICES[rng.gen_range(0..OBJECT_COUNT_CHOICES.len())];
    let count = wanted.min(scenario.object_pool.len());

    let mut order: Vec<usize> = (0..scenario.object_pool.len()).collect();
    rng.shuffle(&mut order);

    for &idx in order.iter().take(count) {
        let spec = &scenario.object_pool[idx];
        let position = free_cell(&spec.name, scenario.board_size, occupied, rng)?;
        state.objects.push(BoardObject {
            name: spec.name.clone(),
            position,
            power: spec.power,
        });
    }

    Ok(())
}

fn place_npcs(
    state: &mut GameState,
    scenario: &Scenario,
    occupied: &mut FxHashSet<BoardSpace>,
    rng: &mut EngineRng,
) -> Result<(), EngineError> {
    let mut homeless: Vec<usize> = Vec::new();

    for (idx, spec) in scenario.npc_pool.iter().enumerate() {
        match &spec.home {
            Some(home) => {
                let position = scenario.location(home)?.position;
                state.npcs.push(BoardNpc {
                    name: spec.name.clone(),
                    position,
                    boon: spec.boon.clone(),
                    bane: spec.bane.clone(),
                    interacted: false,
                });
            }
            None => homeless.push(idx),
        }
    }

    rng.shuffle(&mut homeless);
    for &idx in homeless.iter().take(RANDOM_NPC_COUNT) {
        let spec = &scenario.npc_pool[idx];
        let position = free_cell(&spec.name, scenario.board_size, occupied, rng)?;
        state.npcs.push(BoardNpc {
            name: spec.name.clone(),
            position,
            boon: spec.boon.clone(),
            bane: spec.bane.clone(),
            interacted: false,
        });
    }

    Ok(())
}

fn free_cell(
    name: &str,
    board_size: BoardSpace,
    occupied: &mut FxHashSet<BoardSpace>,
    rng: &mut EngineRng,
) -> Result<BoardSpace, EngineError> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let cell = BoardSpace::new(
            rng.gen_range(0..board_size.x as usize) as i32 + 1,
            rng.gen_range(0..board_size.y as usize) as i32 + 1,
        );
        if occupied.insert(cell) {
            return Ok(cell);
        }
    }
    Err(EngineError::PlacementExhausted(name.to_string()))
}
