//! Hand strength for 5 to 7 cards.
//!
//! Classification is closed-form over rank bitmasks: the best five-card hand
//! is read directly off per-suit and per-rank masks, which gives the same
//! answer as taking the maximum over every five-card subset. Straight
//! detection and "top N ranks" extraction go through two lookup tables
//! indexed by the 13-bit rank mask, built once on first use.

use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::errors::GameError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    /// Number of meaningful entries in [`HandRank::kickers`].
    fn key_len(self) -> usize {
        match self {
            Category::FullHouse | Category::FourOfAKind => 2,
            Category::TwoPair | Category::ThreeOfAKind => 3,
            Category::OnePair => 4,
            Category::HighCard
            | Category::Straight
            | Category::Flush
            | Category::StraightFlush
            | Category::RoyalFlush => 5,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::HighCard => "High Card",
            Category::OnePair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        };
        f.write_str(name)
    }
}

/// Category plus tie-break key, most significant rank first.
///
/// The derived ordering compares `category` and then `kickers`
/// lexicographically. Unused key slots are zero. Straights list all five
/// ranks, with the wheel's Ace counted as 1.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandRank {
    pub category: Category,
    pub kickers: [u8; 5],
}

impl HandRank {
    /// The tie-break key without padding, e.g. `[high pair, low pair, kicker]`.
    pub fn key(&self) -> &[u8] {
        &self.kickers[..self.category.key_len()]
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let k = &self.kickers;
        match self.category {
            Category::RoyalFlush => write!(f, "{}", self.category),
            Category::StraightFlush | Category::Straight | Category::Flush | Category::HighCard => {
                write!(f, "{}, {} high", self.category, rank_name(k[0]))
            }
            Category::FourOfAKind | Category::ThreeOfAKind => {
                write!(f, "{}, {}", self.category, plural(k[0]))
            }
            Category::FullHouse => {
                write!(f, "{}, {} over {}", self.category, plural(k[0]), plural(k[1]))
            }
            Category::TwoPair => {
                write!(f, "{}, {} and {}", self.category, plural(k[0]), plural(k[1]))
            }
            Category::OnePair => write!(f, "{} of {}", self.category, plural(k[0])),
        }
    }
}

fn rank_name(v: u8) -> &'static str {
    match v {
        2 => "Two",
        3 => "Three",
        4 => "Four",
        5 => "Five",
        6 => "Six",
        7 => "Seven",
        8 => "Eight",
        9 => "Nine",
        10 => "Ten",
        11 => "Jack",
        12 => "Queen",
        13 => "King",
        _ => "Ace",
    }
}

fn plural(v: u8) -> String {
    match v {
        6 => "Sixes".to_string(),
        _ => format!("{}s", rank_name(v)),
    }
}

/// Evaluates the best five-card hand among `cards`.
///
/// # Errors
///
/// - [`GameError::InvalidHandSize`] unless 5 to 7 cards are given
/// - [`GameError::DuplicateCard`] when a card appears twice
///
/// ```
/// use holdem_engine::cards::parse_cards;
/// use holdem_engine::hand::{evaluate, Category};
///
/// let royal = evaluate(&parse_cards("As Ks Qs Js Ts").unwrap()).unwrap();
/// assert_eq!(royal.category, Category::RoyalFlush);
/// ```
pub fn evaluate(cards: &[Card]) -> Result<HandRank, GameError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(GameError::InvalidHandSize(cards.len()));
    }
    let mut seen = 0u64;
    for &c in cards {
        let bit = 1u64 << c.index();
        if seen & bit != 0 {
            return Err(GameError::DuplicateCard(c));
        }
        seen |= bit;
    }
    Ok(classify(cards))
}

/// Unchecked variant for hot loops where the caller owns card uniqueness.
pub fn evaluate_seven(cards: &[Card; 7]) -> HandRank {
    classify(cards)
}

pub fn compare_hands(a: &HandRank, b: &HandRank) -> Ordering {
    a.cmp(b)
}

struct Tables {
    // 0 when the mask holds no straight, else the high card (5 for the wheel)
    straight_high: Vec<u8>,
    // up to five ranks, descending, zero padded
    top_ranks: Vec<[u8; 5]>,
}

const MASKS: usize = 1 << 13;

fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let mut straight_high = vec![0u8; MASKS];
        let mut top_ranks = vec![[0u8; 5]; MASKS];
        for mask in 0..MASKS {
            straight_high[mask] = scan_straight(mask as u16);
            let mut out = [0u8; 5];
            let mut n = 0;
            for r in (2..=14u8).rev() {
                if n == 5 {
                    break;
                }
                if mask & (1 << (r - 2)) != 0 {
                    out[n] = r;
                    n += 1;
                }
            }
            top_ranks[mask] = out;
        }
        Tables {
            straight_high,
            top_ranks,
        }
    })
}

fn scan_straight(mask: u16) -> u8 {
    for high in (6..=14u8).rev() {
        let window = 0b1_1111u16 << (high - 6);
        if mask & window == window {
            return high;
        }
    }
    let wheel = bit(Rank::Ace.value()) | bit(2) | bit(3) | bit(4) | bit(5);
    if mask & wheel == wheel {
        5
    } else {
        0
    }
}

fn bit(rank: u8) -> u16 {
    1u16 << (rank - 2)
}

fn straight_key(high: u8) -> [u8; 5] {
    if high == 5 {
        [5, 4, 3, 2, 1]
    } else {
        [high, high - 1, high - 2, high - 3, high - 4]
    }
}

fn classify(cards: &[Card]) -> HandRank {
    let t = tables();
    let mut counts = [0u8; 15];
    let mut suit_masks = [0u16; 4];
    let mut rank_mask = 0u16;
    for &c in cards {
        let r = c.rank.value();
        counts[r as usize] += 1;
        suit_masks[c.suit.index()] |= bit(r);
        rank_mask |= bit(r);
    }

    let flush_mask = suit_masks
        .iter()
        .copied()
        .find(|m| m.count_ones() >= 5);

    if let Some(fm) = flush_mask {
        let high = t.straight_high[fm as usize];
        if high == 14 {
            return HandRank {
                category: Category::RoyalFlush,
                kickers: straight_key(high),
            };
        }
        if high != 0 {
            return HandRank {
                category: Category::StraightFlush,
                kickers: straight_key(high),
            };
        }
    }

    let mut quad = 0u8;
    let mut trips = [0u8; 2];
    let mut n_trips = 0;
    let mut pairs = [0u8; 3];
    let mut n_pairs = 0;
    for r in (2..=14u8).rev() {
        match counts[r as usize] {
            4 => quad = quad.max(r),
            3 if n_trips < 2 => {
                trips[n_trips] = r;
                n_trips += 1;
            }
            2 if n_pairs < 3 => {
                pairs[n_pairs] = r;
                n_pairs += 1;
            }
            _ => {}
        }
    }
    let top = |mask: u16| t.top_ranks[mask as usize];

    if quad != 0 {
        let k = top(rank_mask & !bit(quad));
        return HandRank {
            category: Category::FourOfAKind,
            kickers: [quad, k[0], 0, 0, 0],
        };
    }

    if n_trips > 0 {
        // a second set of trips plays as the pair
        let pair = trips[1].max(pairs[0]);
        if pair != 0 {
            return HandRank {
                category: Category::FullHouse,
                kickers: [trips[0], pair, 0, 0, 0],
            };
        }
    }

    if let Some(fm) = flush_mask {
        return HandRank {
            category: Category::Flush,
            kickers: top(fm),
        };
    }

    let high = t.straight_high[rank_mask as usize];
    if high != 0 {
        return HandRank {
            category: Category::Straight,
            kickers: straight_key(high),
        };
    }

    if n_trips > 0 {
        let k = top(rank_mask & !bit(trips[0]));
        return HandRank {
            category: Category::ThreeOfAKind,
            kickers: [trips[0], k[0], k[1], 0, 0],
        };
    }

    if n_pairs >= 2 {
        let k = top(rank_mask & !bit(pairs[0]) & !bit(pairs[1]));
        return HandRank {
            category: Category::TwoPair,
            kickers: [pairs[0], pairs[1], k[0], 0, 0],
        };
    }

    if n_pairs == 1 {
        let k = top(rank_mask & !bit(pairs[0]));
        return HandRank {
            category: Category::OnePair,
            kickers: [pairs[0], k[0], k[1], k[2], 0],
        };
    }

    HandRank {
        category: Category::HighCard,
        kickers: top(rank_mask),
    }
}
