//! # holdem-ai: Agents for the Hold'em engine
//!
//! Decision-makers that sit on top of `holdem-engine`: a common [`Agent`]
//! trait, two reference agents, a driver that plays a hand to completion and
//! a parallel Monte Carlo equity estimator.
//!
//! ## Core Components
//!
//! - [`Agent`] - Trait every decision-maker implements
//! - [`random`] - Seeded random agent with an aggression knob
//! - [`baseline`] - Rule-based agent (hand chart, evaluator, pot odds)
//! - [`driver`] - Plays a hand by asking agents in turn
//! - [`equity`] - Monte Carlo win/tie estimation across rayon workers
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_ai::{create_agent, driver::play_hand, Agent};
//! use holdem_engine::game::new_hand;
//! use holdem_engine::player::Seat;
//!
//! let agents: Vec<Box<dyn Agent>> = vec![
//!     create_agent("baseline").unwrap(),
//!     create_agent("random").unwrap(),
//! ];
//! let mut hand = new_hand(&[Seat::new(0, 1_000), Seat::new(1, 1_000)], 5, 10, 0, 42).unwrap();
//! play_hand(&mut hand, &agents).unwrap();
//! assert!(hand.is_hand_complete());
//! ```

use holdem_engine::errors::GameError;
use holdem_engine::game::{GameState, Winner};
use holdem_engine::player::{Action, PlayerAction, PlayerId};
use thiserror::Error;

pub mod baseline;
pub mod driver;
pub mod equity;
pub mod random;

/// A decision-maker for one seat.
///
/// Agents are handed a read-only view of the hand and must return one of
/// the player's legal actions; the driver rejects anything else.
///
/// # Example Implementation
///
/// ```rust
/// use holdem_ai::Agent;
/// use holdem_engine::game::GameState;
/// use holdem_engine::player::{PlayerAction, PlayerId};
///
/// struct CheckOrFold;
///
/// impl Agent for CheckOrFold {
///     fn decide(&self, state: &GameState, player_id: PlayerId) -> PlayerAction {
///         match state.to_call(player_id) {
///             Some(0) => PlayerAction::Check,
///             _ => PlayerAction::Fold,
///         }
///     }
///
///     fn name(&self) -> &str {
///         "CheckOrFold"
///     }
/// }
/// ```
pub trait Agent: Send + Sync {
    /// Chooses the next action for `player_id`, who must be on turn.
    fn decide(&self, state: &GameState, player_id: PlayerId) -> PlayerAction;

    fn name(&self) -> &str;

    /// Called after any seat's action is applied, with the state after it.
    fn observe_action(&self, _action: &Action, _state: &GameState) {}

    /// Called once when the hand is over.
    fn hand_complete(&self, _state: &GameState, _winners: &[Winner]) {}
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AgentError {
    #[error("Unknown agent type: {0}")]
    UnknownAgent(String),
    #[error("No agent seated at position {0}")]
    MissingAgent(usize),
    #[error("Agent {agent} chose an illegal action: {source}")]
    Rejected { agent: String, source: GameError },
    #[error("Hand did not finish within {0} actions")]
    StepLimit(usize),
}

/// Builds an agent by type name: `"baseline"` or `"random"`.
///
/// The random agent gets a fixed seed here; build [`random::RandomAgent`]
/// directly to choose one.
///
/// ```rust
/// use holdem_ai::{create_agent, AgentError};
///
/// assert_eq!(create_agent("baseline").unwrap().name(), "BaselineAgent");
/// assert!(matches!(create_agent("gto"), Err(AgentError::UnknownAgent(_))));
/// ```
pub fn create_agent(kind: &str) -> Result<Box<dyn Agent>, AgentError> {
    match kind {
        "baseline" => Ok(Box::new(baseline::BaselineAgent::new())),
        "random" => Ok(Box::new(random::RandomAgent::new(0, random::DEFAULT_AGGRESSION))),
        other => Err(AgentError::UnknownAgent(other.to_string())),
    }
}
