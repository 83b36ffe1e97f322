//! Monte Carlo hand equity.
//!
//! Samples are split into fixed-size batches that run on the rayon pool.
//! Every batch owns its RNG, seeded from the caller's seed and the batch
//! index, so the estimate depends only on the inputs and not on how many
//! threads the pool has.

use std::ops::Add;

use holdem_engine::cards::Card;
use holdem_engine::config::MAX_PLAYERS;
use holdem_engine::deck::Deck;
use holdem_engine::errors::GameError;
use holdem_engine::hand::evaluate_seven;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

const BATCH: usize = 512;

/// Divisible by every possible number of players sharing a pot (1..=10).
const SHARE_UNIT: u64 = 2_520;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EquityError {
    #[error("need between 1 and {max} opponents, got {actual}")]
    Opponents { max: usize, actual: usize },
    #[error("board must hold 0, 3, 4 or 5 cards, got {0}")]
    BoardSize(usize),
    #[error("sample count must be positive")]
    NoSamples,
    #[error(transparent)]
    Cards(#[from] GameError),
}

/// Outcome counts over all samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Equity {
    pub samples: u64,
    pub wins: u64,
    pub ties: u64,
    /// Split-pot shares in units of 1 / SHARE_UNIT of a pot
    tie_units: u64,
}

impl Equity {
    pub fn win_rate(&self) -> f64 {
        self.wins as f64 / self.samples as f64
    }

    pub fn tie_rate(&self) -> f64 {
        self.ties as f64 / self.samples as f64
    }

    /// Expected share of the pot: wins plus split pots pro rata.
    pub fn equity(&self) -> f64 {
        (self.wins * SHARE_UNIT + self.tie_units) as f64 / (self.samples * SHARE_UNIT) as f64
    }
}

impl Add for Equity {
    type Output = Equity;

    fn add(self, rhs: Equity) -> Equity {
        Equity {
            samples: self.samples + rhs.samples,
            wins: self.wins + rhs.wins,
            ties: self.ties + rhs.ties,
            tie_units: self.tie_units + rhs.tie_units,
        }
    }
}

/// Estimates how often `hole` wins against `opponents` random hands, given
/// the board so far.
///
/// ```rust
/// use holdem_ai::equity::estimate_equity;
/// use holdem_engine::cards::parse_cards;
///
/// let aces = parse_cards("Ah As").unwrap();
/// let eq = estimate_equity([aces[0], aces[1]], &[], 1, 2_000, 7).unwrap();
/// assert!(eq.equity() > 0.75);
/// ```
pub fn estimate_equity(
    hole: [Card; 2],
    board: &[Card],
    opponents: usize,
    samples: usize,
    seed: u64,
) -> Result<Equity, EquityError> {
    if opponents == 0 || opponents >= MAX_PLAYERS {
        return Err(EquityError::Opponents {
            max: MAX_PLAYERS - 1,
            actual: opponents,
        });
    }
    if !matches!(board.len(), 0 | 3..=5) {
        return Err(EquityError::BoardSize(board.len()));
    }
    if samples == 0 {
        return Err(EquityError::NoSamples);
    }
    let mut known = hole.to_vec();
    known.extend_from_slice(board);
    for (i, c) in known.iter().enumerate() {
        if known[..i].contains(c) {
            return Err(GameError::DuplicateCard(*c).into());
        }
    }

    let batches = samples.div_ceil(BATCH);
    let total = (0..batches)
        .into_par_iter()
        .map(|b| {
            let n = BATCH.min(samples - b * BATCH);
            run_batch(hole, board, &known, opponents, n, seed ^ (b as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        })
        .try_reduce(Equity::default, |a, b| Ok(a + b))?;

    debug!(
        samples = total.samples,
        opponents,
        equity = total.equity(),
        "equity estimated"
    );
    Ok(total)
}

fn run_batch(
    hole: [Card; 2],
    board: &[Card],
    known: &[Card],
    opponents: usize,
    n: usize,
    seed: u64,
) -> Result<Equity, GameError> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut tally = Equity::default();
    let missing = 5 - board.len();
    for _ in 0..n {
        let mut deck = Deck::without(rng.random(), known);
        let mut full_board = [hole[0]; 5];
        full_board[..board.len()].copy_from_slice(board);
        for (slot, c) in full_board[board.len()..]
            .iter_mut()
            .zip(deck.deal(missing)?)
        {
            *slot = c;
        }

        let hero = evaluate_seven(&seven(hole, &full_board));
        let mut best_other = None;
        let mut tied = 0u32;
        for _ in 0..opponents {
            let opp = deck.deal(2)?;
            let rank = evaluate_seven(&seven([opp[0], opp[1]], &full_board));
            if best_other.map_or(true, |b| rank > b) {
                best_other = Some(rank);
            }
            if rank == hero {
                tied += 1;
            }
        }

        tally.samples += 1;
        match best_other {
            Some(b) if hero > b => tally.wins += 1,
            Some(b) if hero == b => {
                tally.ties += 1;
                tally.tie_units += SHARE_UNIT / u64::from(tied + 1);
            }
            _ => {}
        }
    }
    Ok(tally)
}

fn seven(hole: [Card; 2], board: &[Card; 5]) -> [Card; 7] {
    [hole[0], hole[1], board[0], board[1], board[2], board[3], board[4]]
}
