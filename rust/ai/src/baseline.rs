//! Rule-based reference agent.
//!
//! Deterministic: the same hand and state always produce the same action,
//! which makes it a stable yardstick for comparing other agents.

use holdem_engine::cards::Card;
use holdem_engine::game::{GameState, Street};
use holdem_engine::hand::{evaluate, Category};
use holdem_engine::player::{PlayerAction, PlayerId};
use holdem_engine::rules::LegalAction;

use crate::Agent;

/// Simple baseline agent for testing and comparison.
///
/// # Strategy
///
/// **Preflop:** a 0-10 hand chart. Premium pairs and big suited aces raise,
/// medium hands call when cheap, weak hands check or fold.
///
/// **Postflop:** strength comes from the evaluator category of hole cards
/// plus board. Strong made hands bet or raise, one pair calls reasonable
/// prices, everything else checks or folds to a bet that the pot odds do
/// not justify.
///
/// Sizes are always clamped into the legal bounds the engine reports.
///
/// # Example
///
/// ```rust
/// use holdem_ai::baseline::BaselineAgent;
/// use holdem_ai::Agent;
/// use holdem_engine::game::new_hand;
/// use holdem_engine::player::{Action, Seat};
///
/// let agent = BaselineAgent::new();
/// assert_eq!(agent.name(), "BaselineAgent");
///
/// let mut hand = new_hand(&[Seat::new(0, 1_000), Seat::new(1, 1_000)], 5, 10, 0, 42).unwrap();
/// let p = hand.current_player().unwrap();
/// let action = agent.decide(&hand, p);
/// assert!(hand.apply_action(Action::new(p, action)).is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BaselineAgent;

impl BaselineAgent {
    pub fn new() -> Self {
        Self
    }

    /// Preflop strength on a 0-10 scale.
    ///
    /// - 9-10: AA, KK, QQ, JJ, AKs
    /// - 7-8: TT, 99, AK, AQ, KQs
    /// - 5-6: 88, 77, AJ, suited connectors
    /// - 3-4: small pairs, weak aces, loose broadways
    /// - 0-2: everything else
    fn preflop_strength(hole: [Card; 2]) -> u8 {
        let (r1, r2) = (hole[0].rank.value(), hole[1].rank.value());
        let (high, low) = (r1.max(r2), r1.min(r2));
        let suited = hole[0].suit == hole[1].suit;
        let s = |on: u8, off: u8| if suited { on } else { off };

        if r1 == r2 {
            return match high {
                13..=14 => 10,
                11..=12 => 9,
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4,
            };
        }
        match (high, low) {
            (14, 13) => s(10, 8),
            (14, 12) => s(8, 7),
            (14, 11) => s(7, 6),
            (14, 10) => s(6, 5),
            (14, _) => s(5, 4),
            (13, 12) => s(7, 6),
            (13, 11) => s(6, 5),
            (13, 10) | (12, 10) => s(5, 4),
            (12, 11) => s(6, 5),
            _ if suited && high - low <= 2 => {
                if high >= 9 {
                    5
                } else {
                    4
                }
            }
            _ if high >= 11 && low >= 9 => 4,
            _ => 2,
        }
    }

    /// Postflop strength on the same scale, from the best hand so far.
    fn postflop_strength(hole: [Card; 2], board: &[Card]) -> Option<u8> {
        let mut cards = hole.to_vec();
        cards.extend_from_slice(board);
        let rank = evaluate(&cards).ok()?;
        let base = match rank.category {
            Category::HighCard => 1,
            Category::OnePair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind | Category::StraightFlush | Category::RoyalFlush => 10,
        };
        let kicker_boost = u8::from(rank.kickers[0] >= 12);
        Some((base + kicker_boost).min(10))
    }

    /// Share of the final pot the caller puts in: `call / (pot + call)`.
    fn pot_odds(pot: u32, call: u32) -> f32 {
        if call == 0 {
            return 0.0;
        }
        call as f32 / (u64::from(pot) + u64::from(call)) as f32
    }

    /// `base + pot * num / den`, clamped into `[min, max]`.
    fn size(base: u32, pot: u32, num: u64, den: u64, min: u32, max: u32) -> u32 {
        let want = u64::from(base) + u64::from(pot) * num / den;
        want.clamp(u64::from(min), u64::from(max)) as u32
    }

    fn choose(strength: u8, legal: &[LegalAction], pot: u32) -> PlayerAction {
        let mut call = None;
        let mut can_check = false;
        let mut bet = None;
        let mut raise = None;
        for a in legal {
            match *a {
                LegalAction::Check => can_check = true,
                LegalAction::Call { amount } => call = Some(amount),
                LegalAction::Bet { min, max } => bet = Some((min, max)),
                LegalAction::Raise { min, max } => raise = Some((min, max)),
                LegalAction::Fold => {}
            }
        }

        if can_check {
            return match (strength, bet, raise) {
                (9..=10, Some((min, max)), _) => PlayerAction::Bet(Self::size(0, pot, 2, 3, min, max)),
                (7..=8, Some((min, max)), _) => PlayerAction::Bet(Self::size(0, pot, 1, 2, min, max)),
                // the big blind's option preflop
                (9..=10, None, Some((min, max))) => {
                    PlayerAction::Raise(Self::size(min, pot, 1, 2, min, max))
                }
                _ => PlayerAction::Check,
            };
        }

        let Some(to_call) = call else {
            return PlayerAction::Fold;
        };
        let odds = Self::pot_odds(pot, to_call);
        match strength {
            9..=10 => match raise {
                Some((min, max)) => PlayerAction::Raise(Self::size(min, pot, 1, 2, min, max)),
                None => PlayerAction::Call,
            },
            7..=8 => PlayerAction::Call,
            5..=6 if odds <= 0.35 => PlayerAction::Call,
            3..=4 if odds <= 0.2 => PlayerAction::Call,
            _ => PlayerAction::Fold,
        }
    }
}

impl Agent for BaselineAgent {
    fn decide(&self, state: &GameState, player_id: PlayerId) -> PlayerAction {
        let legal = state.valid_actions(player_id);
        let hole = match state.player(player_id).map(|p| p.hole_cards()) {
            Some(&[a, b]) => [a, b],
            _ => {
                return if legal.contains(&LegalAction::Check) {
                    PlayerAction::Check
                } else {
                    PlayerAction::Fold
                };
            }
        };

        let strength = if state.street() == Street::Preflop {
            Self::preflop_strength(hole)
        } else {
            Self::postflop_strength(hole, state.board())
                .unwrap_or_else(|| Self::preflop_strength(hole))
        };
        Self::choose(strength, &legal, state.pot().total())
    }

    fn name(&self) -> &str {
        "BaselineAgent"
    }
}
