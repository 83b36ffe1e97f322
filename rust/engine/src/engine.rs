use tracing::info;

use crate::config::HandConfig;
use crate::errors::{ConfigError, GameError};
use crate::game::GameState;
use crate::logger::{HandIds, HandRecord};
use crate::player::Seat;

/// Runs a sequence of hands at one table, carrying stacks and the button
/// from hand to hand.
///
/// Hand `n` (0-based) is dealt from seed `config.seed + n`, so a session is
/// replayable from its config alone.
///
/// # Examples
///
/// ```
/// use holdem_engine::config::HandConfig;
/// use holdem_engine::engine::Engine;
/// use holdem_engine::player::{Action, PlayerAction, Seat};
///
/// let seats = vec![Seat::new(0, 1_000), Seat::new(1, 1_000)];
/// let mut engine = Engine::new(seats, HandConfig::new(5, 10, 0, 7)).unwrap();
///
/// let mut hand = engine.start_hand().unwrap();
/// // the button folds its small blind
/// hand.apply_action(Action::new(0, PlayerAction::Fold)).unwrap();
/// engine.finish_hand(&hand).unwrap();
///
/// assert_eq!(engine.seats()[0].stack, 995);
/// assert_eq!(engine.seats()[1].stack, 1_005);
/// assert_eq!(engine.button(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    seats: Vec<Seat>,
    config: HandConfig,
    hand_index: u64,
    ids: HandIds,
}

impl Engine {
    pub fn new(seats: Vec<Seat>, config: HandConfig) -> Result<Self, GameError> {
        config.validate(seats.len())?;
        Ok(Self {
            seats,
            config,
            hand_index: 0,
            ids: HandIds::today(),
        })
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn config(&self) -> &HandConfig {
        &self.config
    }

    pub fn button(&self) -> usize {
        self.config.button
    }

    /// Number of hands finished so far.
    pub fn hands_played(&self) -> u64 {
        self.hand_index
    }

    /// Deals the next hand.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidConfiguration`] once fewer than two seats have
    /// chips.
    pub fn start_hand(&self) -> Result<GameState, GameError> {
        let funded = self.funded();
        if funded < 2 {
            return Err(ConfigError::NotEnoughFundedPlayers(funded).into());
        }
        let config = HandConfig {
            seed: self.config.seed.wrapping_add(self.hand_index),
            ..self.config.clone()
        };
        GameState::new(&self.seats, &config)
    }

    /// Copies the final stacks back to the seats and moves the button to
    /// the next seat with chips. Returns the hand's record.
    ///
    /// # Errors
    ///
    /// [`GameError::HandNotComplete`] if `hand` is still being played,
    /// [`GameError::StaleHand`] if it is not the hand [`Engine::start_hand`]
    /// deals now, for instance one that was already finished.
    pub fn finish_hand(&mut self, hand: &GameState) -> Result<HandRecord, GameError> {
        if !hand.is_hand_complete() {
            return Err(GameError::HandNotComplete);
        }
        let expected = self.config.seed.wrapping_add(self.hand_index);
        if hand.seed() != expected || hand.button() != self.config.button {
            return Err(GameError::StaleHand {
                expected,
                actual: hand.seed(),
            });
        }
        for seat in &mut self.seats {
            if let Some(p) = hand.player(seat.id) {
                seat.stack = p.stack();
            }
        }
        let record = hand.record(self.ids.next_id());
        self.hand_index += 1;
        self.rotate_button();
        info!(
            hand_id = %record.hand_id,
            hands_played = self.hand_index,
            button = self.config.button,
            "hand finished"
        );
        Ok(record)
    }

    fn funded(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| s.stack > 0 && !s.sitting_out)
            .count()
    }

    fn rotate_button(&mut self) {
        let n = self.seats.len();
        let from = self.config.button;
        if let Some(next) = (1..=n)
            .map(|k| (from + k) % n)
            .find(|&i| self.seats[i].stack > 0 && !self.seats[i].sitting_out)
        {
            self.config.button = next;
        }
    }
}
