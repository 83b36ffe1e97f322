use crate::cards::Card;
use serde::{Deserialize, Serialize};

pub type PlayerId = usize;

/// Where a player stands in the current hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// Still in the hand with chips behind
    Active,
    /// Gave up the hand; never acts again
    Folded,
    /// Whole stack committed; stays in for showdown without acting
    AllIn,
    /// Not dealt in this hand
    SittingOut,
}

/// Represents a player action during a betting round.
/// `Bet` and `Raise` carry the absolute bet level the player moves to this
/// round, not the chips added.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (only valid with nothing to call)
    Check,
    /// Call the current bet, or as much of it as the stack covers
    Call,
    /// Open the betting to the given level
    Bet(u32),
    /// Raise the current bet to the given level
    Raise(u32),
}

/// An action attributed to the player taking it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub player_id: PlayerId,
    pub action: PlayerAction,
}

impl Action {
    pub fn new(player_id: PlayerId, action: PlayerAction) -> Self {
        Self { player_id, action }
    }
}

/// Default starting stack size for each player in chips
pub const STARTING_STACK: u32 = 20_000;

/// A seat handed to [`crate::game::GameState::new`]: who sits where with how
/// many chips. Table position is the index in the seat list.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub id: PlayerId,
    pub stack: u32,
    #[serde(default)]
    pub sitting_out: bool,
}

impl Seat {
    pub fn new(id: PlayerId, stack: u32) -> Self {
        Self {
            id,
            stack,
            sitting_out: false,
        }
    }
}

/// Represents a player within one hand: chips behind, what they have put in
/// this round and this hand, and their hole cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    /// Chips behind, not yet committed
    stack: u32,
    /// Stack when the hand was dealt
    starting_stack: u32,
    /// Fixed 0-based table position
    position: usize,
    status: PlayerStatus,
    /// Chips committed in the current betting round
    round_bet: u32,
    /// Chips committed across the whole hand
    total_contribution: u32,
    hole: Vec<Card>,
}

impl Player {
    pub fn new(id: PlayerId, stack: u32, position: usize) -> Self {
        let status = if stack == 0 {
            PlayerStatus::SittingOut
        } else {
            PlayerStatus::Active
        };
        Self {
            id,
            stack,
            starting_stack: stack,
            position,
            status,
            round_bet: 0,
            total_contribution: 0,
            hole: Vec::with_capacity(2),
        }
    }

    pub(crate) fn sit_out(&mut self) {
        self.status = PlayerStatus::SittingOut;
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn starting_stack(&self) -> u32 {
        self.starting_stack
    }
    pub fn position(&self) -> usize {
        self.position
    }
    pub fn status(&self) -> PlayerStatus {
        self.status
    }
    pub fn round_bet(&self) -> u32 {
        self.round_bet
    }
    pub fn total_contribution(&self) -> u32 {
        self.total_contribution
    }
    pub fn hole_cards(&self) -> &[Card] {
        &self.hole
    }

    /// Can still take betting actions this hand.
    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Still contesting the pot (active or all-in).
    pub fn in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    pub(crate) fn give_card(&mut self, c: Card) {
        self.hole.push(c);
    }

    pub(crate) fn fold(&mut self) {
        self.status = PlayerStatus::Folded;
    }

    /// Moves `amount` from the stack into the current round. Callers clamp
    /// to the stack first; an empty stack flips the player to all-in.
    pub(crate) fn commit(&mut self, amount: u32) -> u32 {
        let amount = amount.min(self.stack);
        self.stack -= amount;
        self.round_bet += amount;
        self.total_contribution += amount;
        if self.stack == 0 && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        amount
    }

    pub(crate) fn end_round(&mut self) {
        self.round_bet = 0;
    }

    pub(crate) fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_stack_sits_out() {
        let p = Player::new(3, 0, 1);
        assert_eq!(p.status(), PlayerStatus::SittingOut);
        assert!(!p.in_hand());
    }

    #[test]
    fn committing_whole_stack_goes_all_in() {
        let mut p = Player::new(0, 150, 0);
        assert_eq!(p.commit(100), 100);
        assert_eq!(p.status(), PlayerStatus::Active);
        assert_eq!(p.commit(500), 50);
        assert_eq!(p.stack(), 0);
        assert_eq!(p.round_bet(), 150);
        assert_eq!(p.total_contribution(), 150);
        assert_eq!(p.status(), PlayerStatus::AllIn);
        p.end_round();
        assert_eq!(p.round_bet(), 0);
        assert_eq!(p.total_contribution(), 150);
    }
}
