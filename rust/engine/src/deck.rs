use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// A shuffled 52-card sequence dealt front to back without replacement.
///
/// The order is a pure function of the seed, so hands can be replayed.
///
/// ```
/// use holdem_engine::deck::Deck;
///
/// let mut a = Deck::new(42);
/// let mut b = Deck::new(42);
/// assert_eq!(a.deal(5).unwrap(), b.deal(5).unwrap());
/// assert_eq!(a.remaining(), 47);
/// ```
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
}

impl Deck {
    pub fn new(seed: u64) -> Self {
        Self::shuffled(full_deck(), seed)
    }

    /// A deck holding every card except `known`, used when sampling
    /// unseen cards around fixed hole and board cards.
    pub fn without(seed: u64, known: &[Card]) -> Self {
        let mut cards = full_deck();
        cards.retain(|c| !known.contains(c));
        Self::shuffled(cards, seed)
    }

    /// A deck that deals `cards` in the given order, for replaying a known
    /// deal.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards, position: 0 }
    }

    fn shuffled(mut cards: Vec<Card>, seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        cards.shuffle(&mut rng);
        Self { cards, position: 0 }
    }

    /// Removes and returns the next `n` cards. Leaves the deck untouched
    /// when fewer than `n` remain.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(GameError::DeckExhausted {
                requested: n,
                remaining,
            });
        }
        let out = self.cards[self.position..self.position + n].to_vec();
        self.position += n;
        Ok(out)
    }

    pub fn deal_card(&mut self) -> Result<Card, GameError> {
        let c = self
            .cards
            .get(self.position)
            .copied()
            .ok_or(GameError::DeckExhausted {
                requested: 1,
                remaining: 0,
            })?;
        self.position += 1;
        Ok(c)
    }

    pub fn burn_card(&mut self) -> Result<(), GameError> {
        self.deal_card().map(|_| ())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}
