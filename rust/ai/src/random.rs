//! An agent that picks among its legal options at random.

use std::sync::Mutex;

use holdem_engine::game::GameState;
use holdem_engine::player::{PlayerAction, PlayerId};
use holdem_engine::rules::LegalAction;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::Agent;

/// Chance of betting or raising when that is legal.
pub const DEFAULT_AGGRESSION: f64 = 0.3;

/// Chance of folding when checking or calling is also possible.
const FOLD_RATE: f64 = 0.1;

/// Seeded random play, useful as a baseline opponent and for fuzzing hands.
///
/// With probability `aggression` it bets or raises (to a uniform level
/// between the bounds); otherwise it checks or calls, folding now and then.
///
/// ```rust
/// use holdem_ai::random::RandomAgent;
/// use holdem_ai::Agent;
/// use holdem_engine::game::new_hand;
/// use holdem_engine::player::Seat;
///
/// let agent = RandomAgent::new(7, 0.5);
/// let hand = new_hand(&[Seat::new(0, 500), Seat::new(1, 500)], 5, 10, 0, 1).unwrap();
/// let p = hand.current_player().unwrap();
/// let action = agent.decide(&hand, p);
/// assert!(hand.clone().apply_action(holdem_engine::player::Action::new(p, action)).is_ok());
/// ```
#[derive(Debug)]
pub struct RandomAgent {
    rng: Mutex<ChaCha20Rng>,
    aggression: f64,
}

impl RandomAgent {
    pub fn new(seed: u64, aggression: f64) -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::seed_from_u64(seed)),
            aggression: aggression.clamp(0.0, 1.0),
        }
    }

    pub fn aggression(&self) -> f64 {
        self.aggression
    }

    fn choose(&self, rng: &mut ChaCha20Rng, legal: &[LegalAction]) -> PlayerAction {
        let aggressive: Vec<LegalAction> = legal
            .iter()
            .copied()
            .filter(|a| matches!(a, LegalAction::Bet { .. } | LegalAction::Raise { .. }))
            .collect();
        if !aggressive.is_empty() && rng.random_bool(self.aggression) {
            if let Some(&a) = aggressive.choose(rng) {
                return sized(rng, a);
            }
        }

        let passive: Vec<LegalAction> = legal
            .iter()
            .copied()
            .filter(|a| !matches!(a, LegalAction::Bet { .. } | LegalAction::Raise { .. }))
            .collect();
        let staying: Vec<LegalAction> = passive
            .iter()
            .copied()
            .filter(|a| *a != LegalAction::Fold)
            .collect();
        if !staying.is_empty() && !rng.random_bool(FOLD_RATE) {
            if let Some(&a) = staying.choose(rng) {
                return sized(rng, a);
            }
        }
        passive.choose(rng).map_or(PlayerAction::Fold, |&a| sized(rng, a))
    }
}

fn sized(rng: &mut ChaCha20Rng, action: LegalAction) -> PlayerAction {
    match action {
        LegalAction::Fold => PlayerAction::Fold,
        LegalAction::Check => PlayerAction::Check,
        LegalAction::Call { .. } => PlayerAction::Call,
        LegalAction::Bet { min, max } => PlayerAction::Bet(rng.random_range(min..=max)),
        LegalAction::Raise { min, max } => PlayerAction::Raise(rng.random_range(min..=max)),
    }
}

impl Agent for RandomAgent {
    fn decide(&self, state: &GameState, player_id: PlayerId) -> PlayerAction {
        let legal = state.valid_actions(player_id);
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        self.choose(&mut rng, &legal)
    }

    fn name(&self) -> &str {
        "RandomAgent"
    }
}
