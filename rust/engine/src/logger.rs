//! Hand-result events for downstream consumers (statistics, dashboards).
//!
//! The engine produces records; storing them is the consumer's business.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::Street;
use crate::player::{PlayerAction, PlayerId};

/// Records a single player action during a hand.
/// Associates the action with the player and the street when it occurred.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player_id: PlayerId,
    /// The betting street when this action occurred
    pub street: Street,
    pub action: PlayerAction,
}

/// Complete record of a finished hand: actions, board, and outcome.
/// Serializes to one JSON object per hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// Deck seed, enough to replay the deal
    pub seed: Option<u64>,
    /// Chronological list of all player actions
    pub actions: Vec<ActionRecord>,
    /// Community cards on the board (up to 5 cards)
    pub board: Vec<Card>,
    /// Hand result summary, e.g. "p2 wins 300"
    pub result: Option<String>,
    /// Timestamp when the record was produced (RFC3339)
    #[serde(default)]
    pub ts: Option<String>,
    /// Additional metadata (blinds, button, stacks)
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    /// Present when the hand reached showdown
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
}

/// Who won at showdown and with what.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    pub winners: Vec<PlayerId>,
    /// e.g. "split pot", "Flush, Ace high"
    #[serde(default)]
    pub notes: Option<String>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Hands out sequential hand ids for one date.
#[derive(Debug, Clone)]
pub struct HandIds {
    date: String,
    seq: u32,
}

impl HandIds {
    pub fn today() -> Self {
        Self::for_date(&Utc::now().format("%Y%m%d").to_string())
    }

    pub fn for_date(date: &str) -> Self {
        Self {
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }
}
