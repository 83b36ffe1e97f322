//! Plays a hand to the end by asking each seat's agent in turn.

use holdem_engine::game::GameState;
use holdem_engine::player::Action;
use tracing::{debug, warn};

use crate::{Agent, AgentError};

/// Upper bound on actions in one hand before the driver gives up.
pub const MAX_STEPS: usize = 1_000;

/// Drives `state` until the hand completes. `agents[i]` plays the seat at
/// table position `i`. Every agent observes every applied action, and hears
/// the winners once the hand is over.
///
/// An illegal choice stops the hand with [`AgentError::Rejected`]; the
/// state is left as it was before that action.
pub fn play_hand(state: &mut GameState, agents: &[Box<dyn Agent>]) -> Result<usize, AgentError> {
    let mut steps = 0;
    while let Some(player_id) = state.current_player() {
        if steps == MAX_STEPS {
            warn!(steps, "step limit reached");
            return Err(AgentError::StepLimit(MAX_STEPS));
        }
        let position = state
            .player(player_id)
            .map(|p| p.position())
            .ok_or(AgentError::MissingAgent(player_id))?;
        let agent = agents
            .get(position)
            .ok_or(AgentError::MissingAgent(position))?;

        let action = Action::new(player_id, agent.decide(state, player_id));
        debug!(agent = agent.name(), player_id, action = ?action.action, "agent decided");
        state
            .apply_action(action)
            .map_err(|source| AgentError::Rejected {
                agent: agent.name().to_string(),
                source,
            })?;
        for a in agents {
            a.observe_action(&action, state);
        }
        steps += 1;
    }
    if let Ok(winners) = state.winners() {
        for a in agents {
            a.hand_complete(state, winners);
        }
    }
    Ok(steps)
}
