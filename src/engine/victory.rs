//! Terminal-condition evaluation.
//!
//! Three conditions, checked in fixed order with short-circuiting:
//! doomsday, main prophecy, global failure. A `Finished` status is final -
//! the evaluator refuses to look further once the game has ended, and the
//! round machine stops dispatching the moment a check fires.

use tracing::debug;

use crate::cards::CardKind;
use crate::core::{GameState, GameStatus};
use crate::error::EngineError;
use crate::scenario::Scenario;

use super::EngineConfig;

/// Evaluate the terminal conditions.
///
/// `trigger` names the card responsible for the Harbinger's current cell
/// when the check runs mid-round; it is `None` for the end-of-round sweep.
/// Returns whether the game is (now) finished.
pub fn check_win_conditions(
    state: &mut GameState,
    scenario: &Scenario,
    config: &EngineConfig,
    trigger: Option<CardKind>,
) -> Result<bool, EngineError> {
    if state.status == GameStatus::Finished {
        return Ok(true);
    }

    let cell = state.harbinger;

    if cell == scenario.location(&scenario.doomsday)?.position {
        state.status = GameStatus::Finished;
        state.log(format!(
            "The Harbinger reaches {} - doomsday falls.",
            scenario.doomsday
        ));
        debug!("terminal: doomsday");
        return Ok(true);
    }

    if cell == scenario.location(&scenario.prophecy.end)?.position {
        let qualifies = if config.prophecy_requires_trigger {
            trigger == Some(scenario.prophecy.card)
        } else {
            true
        };
        if qualifies {
            state.status = GameStatus::Finished;
            state.log(format!(
                "The prophecy of {} is fulfilled at {}.",
                scenario.prophecy.start, scenario.prophecy.end
            ));
            debug!("terminal: prophecy");
            return Ok(true);
        }
    }

    if cell == scenario.location(&scenario.global_fail.location)?.position
        && state.round >= scenario.global_fail.deadline_round
    {
        state.status = GameStatus::Finished;
        state.log(format!(
            "Round {} finds the Harbinger at {} - all is lost.",
            state.round, scenario.global_fail.location
        ));
        debug!("terminal: global failure");
        return Ok(true);
    }

    Ok(false)
}
