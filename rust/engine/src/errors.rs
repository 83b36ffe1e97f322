use thiserror::Error;

use crate::cards::Card;
use crate::player::PlayerId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Deck exhausted: requested {requested} cards, {remaining} remaining")]
    DeckExhausted { requested: usize, remaining: usize },
    #[error("Illegal action: {0}")]
    IllegalAction(#[from] IllegalAction),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("Hand evaluation needs 5 to 7 cards, got {0}")]
    InvalidHandSize(usize),
    #[error("Duplicate card {0}")]
    DuplicateCard(Card),
    #[error("Invalid card text {0:?}")]
    InvalidCard(String),
    #[error("Hand is not complete")]
    HandNotComplete,
    #[error("Hand dealt with seed {actual} is not the current hand (seed {expected})")]
    StaleHand { expected: u64, actual: u64 },
}

/// The betting rule an action violated. The caller re-queries the legal
/// actions and retries; nothing is coerced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IllegalAction {
    #[error("Hand already complete")]
    HandAlreadyComplete,
    #[error("Unknown player {0}")]
    UnknownPlayer(PlayerId),
    #[error("It's not player {actual}'s turn (expected {expected:?})")]
    NotPlayersTurn {
        expected: Option<PlayerId>,
        actual: PlayerId,
    },
    #[error("Cannot check while facing {to_call} to call")]
    CannotCheck { to_call: u32 },
    #[error("Nothing to call")]
    NothingToCall,
    #[error("Cannot bet into an outstanding bet of {current_bet}")]
    BetNotAllowed { current_bet: u32 },
    #[error("Raising is not open to this player")]
    RaiseNotAllowed,
    #[error("No opponent is left to answer a bet or raise")]
    NoOpponentToAct,
    #[error("Invalid bet amount: {amount}, minimum: {minimum}")]
    BelowMinimum { amount: u32, minimum: u32 },
    #[error("Bet amount {amount} exceeds the {maximum} available")]
    ExceedsStack { amount: u32, maximum: u32 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("need at least 2 players, got {0}")]
    TooFewPlayers(usize),
    #[error("at most {max} players, got {actual}")]
    TooManyPlayers { max: usize, actual: usize },
    #[error("duplicate player id {0}")]
    DuplicatePlayerId(PlayerId),
    #[error("big blind must be positive")]
    ZeroBigBlind,
    #[error("small blind {small} exceeds big blind {big}")]
    SmallBlindAboveBigBlind { small: u32, big: u32 },
    #[error("button {button} out of range for {players} players")]
    ButtonOutOfRange { button: usize, players: usize },
    #[error("need at least 2 players with chips, got {0}")]
    NotEnoughFundedPlayers(usize),
    #[error("table holds {0} chips, more than a u32 pot can count")]
    ChipTotalTooLarge(u64),
    #[error("config parse error: {0}")]
    Parse(String),
}
