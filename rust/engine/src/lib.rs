//! # holdem-engine: Texas Hold'em Rules Core
//!
//! A deterministic No-Limit Texas Hold'em engine for 2 to 10 players.
//! Provides hand evaluation, betting validation, side-pot accounting and the
//! per-hand state machine, with seeded shuffling so every hand can be
//! replayed.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and text parsing
//! - [`deck`] - Seeded deck shuffling with ChaCha20 RNG
//! - [`hand`] - Hand classification and comparison
//! - [`player`] - Seats, player state and actions
//! - [`rules`] - Legal-action computation and action validation
//! - [`pot`] - Contribution ledger and main/side pot layering
//! - [`game`] - The per-hand betting state machine
//! - [`engine`] - Multi-hand sessions: stacks, button rotation, seeds
//! - [`config`] - Stakes and dealing parameters
//! - [`logger`] - Hand-result records
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::hand::{evaluate, Category};
//!
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! let rank = evaluate(&cards).unwrap();
//! assert_eq!(rank.category, Category::RoyalFlush);
//! ```
//!
//! ## Playing a Hand
//!
//! ```rust
//! use holdem_engine::player::{Action, PlayerAction, Seat};
//! use holdem_engine::{apply_action, get_current_player, get_winners, is_hand_complete, new_hand};
//!
//! let seats = [Seat::new(0, 1_000), Seat::new(1, 1_000), Seat::new(2, 1_000)];
//! let mut hand = new_hand(&seats, 10, 20, 0, 42).unwrap();
//!
//! // everyone folds to the big blind
//! while let Some(p) = get_current_player(&hand) {
//!     apply_action(&mut hand, Action::new(p, PlayerAction::Fold)).unwrap();
//! }
//! assert!(is_hand_complete(&hand));
//! let winners = get_winners(&hand).unwrap();
//! assert_eq!(winners[0].player_id, 2);
//! assert_eq!(winners[0].amount, 30);
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;

pub use errors::{ConfigError, GameError, IllegalAction};
pub use game::{
    apply_action, get_current_player, get_valid_actions, get_winners, is_hand_complete, new_hand,
    GameState, Street, Winner,
};
pub use hand::{evaluate, HandRank};
