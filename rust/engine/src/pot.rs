//! Per-hand chip accounting and side-pot layering.
//!
//! Contributions accumulate across all streets. [`PotLedger::finalize`]
//! slices them into layers at every distinct total committed by a player
//! still in the hand, so an all-in player can only win what each opponent
//! matched.

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// One pot layer and who may win it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u32,
    /// Eligible players in table order.
    pub eligible: Vec<PlayerId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    player_id: PlayerId,
    contributed: u32,
    folded: bool,
}

/// Tracks what every player has put in this hand.
///
/// Players are kept in the order they were first registered, which the
/// game uses to keep eligibility lists in table order.
///
/// ```
/// use holdem_engine::pot::PotLedger;
///
/// let mut ledger = PotLedger::new();
/// ledger.record_contribution(0, 100);
/// ledger.record_contribution(1, 50);
/// ledger.record_contribution(2, 100);
/// let pots = ledger.finalize();
/// assert_eq!(pots[0].amount, 150);
/// assert_eq!(pots[1].amount, 100);
/// assert_eq!(pots[1].eligible, vec![0, 2]);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PotLedger {
    entries: Vec<Entry>,
    total: u32,
}

impl PotLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from per-player totals, ids being the positions.
    pub fn from_contributions<I: IntoIterator<Item = u32>>(amounts: I) -> Self {
        let mut ledger = Self::new();
        for (id, amount) in amounts.into_iter().enumerate() {
            ledger.record_contribution(id, amount);
        }
        ledger
    }

    fn entry_mut(&mut self, player_id: PlayerId) -> &mut Entry {
        let idx = match self.entries.iter().position(|e| e.player_id == player_id) {
            Some(i) => i,
            None => {
                self.entries.push(Entry {
                    player_id,
                    contributed: 0,
                    folded: false,
                });
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx]
    }

    /// Registers a player with nothing in yet, fixing their order.
    pub fn seat(&mut self, player_id: PlayerId) {
        self.entry_mut(player_id);
    }

    pub fn record_contribution(&mut self, player_id: PlayerId, amount: u32) {
        self.entry_mut(player_id).contributed += amount;
        self.total += amount;
    }

    /// Chips stay in the pot; the player stops being eligible for any layer.
    pub fn fold(&mut self, player_id: PlayerId) {
        self.entry_mut(player_id).folded = true;
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn contribution(&self, player_id: PlayerId) -> u32 {
        self.entries
            .iter()
            .find(|e| e.player_id == player_id)
            .map_or(0, |e| e.contributed)
    }

    /// Splits the contributions into a main pot followed by side pots,
    /// smallest level first.
    pub fn finalize(&self) -> Vec<Pot> {
        let mut levels: Vec<u32> = self
            .entries
            .iter()
            .filter(|e| !e.folded && e.contributed > 0)
            .map(|e| e.contributed)
            .collect();
        levels.sort_unstable();
        levels.dedup();

        if levels.is_empty() {
            if self.total == 0 {
                return Vec::new();
            }
            return vec![Pot {
                amount: self.total,
                eligible: self
                    .entries
                    .iter()
                    .filter(|e| !e.folded)
                    .map(|e| e.player_id)
                    .collect(),
            }];
        }

        let mut pots: Vec<Pot> = Vec::with_capacity(levels.len());
        let mut prev = 0u32;
        for &level in &levels {
            let amount = self
                .entries
                .iter()
                .map(|e| e.contributed.min(level) - e.contributed.min(prev))
                .sum();
            let eligible = self
                .entries
                .iter()
                .filter(|e| !e.folded && e.contributed >= level)
                .map(|e| e.player_id)
                .collect();
            pots.push(Pot { amount, eligible });
            prev = level;
        }

        // folded chips above the deepest live stack still belong to someone
        let excess: u32 = self
            .entries
            .iter()
            .map(|e| e.contributed.saturating_sub(prev))
            .sum();
        if let Some(top) = pots.last_mut() {
            top.amount += excess;
        }

        debug_assert_eq!(pots.iter().map(|p| p.amount).sum::<u32>(), self.total);
        pots
    }

    pub fn main_pot(&self) -> u32 {
        self.finalize().first().map_or(0, |p| p.amount)
    }

    pub fn side_pots(&self) -> Vec<u32> {
        self.finalize().iter().skip(1).map(|p| p.amount).collect()
    }
}
