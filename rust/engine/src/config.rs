use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Most seats a hand can deal: 2 hole cards each plus 3 burns and 5 board
/// cards must fit in 52.
pub const MAX_PLAYERS: usize = 10;

/// Stakes and dealing parameters for a hand.
///
/// Every field has a default, so a TOML document only names what it
/// changes:
///
/// ```
/// use holdem_engine::config::HandConfig;
///
/// let cfg = HandConfig::from_toml_str("big_blind = 200\nsmall_blind = 100").unwrap();
/// assert_eq!(cfg.big_blind, 200);
/// assert_eq!(cfg.button, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HandConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    /// Table position of the dealer button
    pub button: usize,
    /// Deck seed; the engine adds the hand number when running a session
    pub seed: u64,
    pub max_players: usize,
}

impl Default for HandConfig {
    fn default() -> Self {
        Self {
            small_blind: 50,
            big_blind: 100,
            button: 0,
            seed: 0xA1A2_A3A4,
            max_players: MAX_PLAYERS,
        }
    }
}

impl HandConfig {
    pub fn new(small_blind: u32, big_blind: u32, button: usize, seed: u64) -> Self {
        Self {
            small_blind,
            big_blind,
            button,
            seed,
            ..Self::default()
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: HandConfig = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        if cfg.max_players > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers {
                max: MAX_PLAYERS,
                actual: cfg.max_players,
            });
        }
        Ok(cfg)
    }

    /// Checks the stakes and the seat count. Duplicate ids and funded-seat
    /// counts are checked where the seats are known.
    pub fn validate(&self, players: usize) -> Result<(), ConfigError> {
        if players < 2 {
            return Err(ConfigError::TooFewPlayers(players));
        }
        let max = self.max_players.min(MAX_PLAYERS);
        if players > max {
            return Err(ConfigError::TooManyPlayers {
                max,
                actual: players,
            });
        }
        if self.big_blind == 0 {
            return Err(ConfigError::ZeroBigBlind);
        }
        if self.small_blind > self.big_blind {
            return Err(ConfigError::SmallBlindAboveBigBlind {
                small: self.small_blind,
                big: self.big_blind,
            });
        }
        if self.button >= players {
            return Err(ConfigError::ButtonOutOfRange {
                button: self.button,
                players,
            });
        }
        Ok(())
    }
}
