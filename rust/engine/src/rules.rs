use serde::{Deserialize, Serialize};

use crate::errors::IllegalAction;
use crate::player::PlayerAction as A;

/// Everything about the betting round that decides what one player may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BettingContext {
    /// Chips behind
    pub stack: u32,
    /// Chips the player has already put in this round
    pub round_bet: u32,
    /// Highest bet level this round
    pub current_bet: u32,
    /// Smallest legal raise increment
    pub min_raise: u32,
    /// Smallest opening bet
    pub big_blind: u32,
    /// False once the player has acted on the last full bet and only short
    /// all-ins followed
    pub raise_open: bool,
    /// Some other player could still answer a bet or raise
    pub opponents_can_act: bool,
}

impl BettingContext {
    pub fn to_call(&self) -> u32 {
        self.current_bet.saturating_sub(self.round_bet)
    }

    /// The all-in bet level.
    fn max_target(&self) -> u32 {
        self.round_bet + self.stack
    }

    fn can_bet(&self) -> bool {
        self.current_bet == 0 && self.stack > 0 && self.opponents_can_act
    }

    fn can_raise(&self) -> bool {
        self.current_bet > 0
            && self.stack > self.to_call()
            && self.raise_open
            && self.opponents_can_act
    }

    fn bet_min(&self) -> u32 {
        self.round_bet + self.big_blind.min(self.stack)
    }

    fn raise_min(&self) -> u32 {
        self.current_bet
            .saturating_add(self.min_raise)
            .min(self.max_target())
    }
}

/// One entry of the legal-action set. Bet and raise bounds are absolute
/// levels; `max` is always the all-in level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegalAction {
    Fold,
    Check,
    /// `amount` is the chips the call adds, less than the bet when the stack is short.
    Call { amount: u32 },
    Bet { min: u32, max: u32 },
    Raise { min: u32, max: u32 },
}

/// An action that passed validation, with the chips it moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    Bet { to: u32, chips: u32 },
    /// `full` is false for an all-in raise smaller than the minimum increment.
    Raise { to: u32, chips: u32, full: bool },
}

impl ValidatedAction {
    pub fn chips(&self) -> u32 {
        match *self {
            ValidatedAction::Fold | ValidatedAction::Check => 0,
            ValidatedAction::Call(c) => c,
            ValidatedAction::Bet { chips, .. } | ValidatedAction::Raise { chips, .. } => chips,
        }
    }
}

/// Lists what the player described by `ctx` may do.
///
/// ```
/// use holdem_engine::rules::{legal_actions, BettingContext, LegalAction};
///
/// let ctx = BettingContext {
///     stack: 1000,
///     round_bet: 0,
///     current_bet: 100,
///     min_raise: 100,
///     big_blind: 100,
///     raise_open: true,
///     opponents_can_act: true,
/// };
/// let legal = legal_actions(&ctx);
/// assert!(legal.contains(&LegalAction::Call { amount: 100 }));
/// assert!(legal.contains(&LegalAction::Raise { min: 200, max: 1000 }));
/// assert!(!legal.contains(&LegalAction::Check));
/// ```
pub fn legal_actions(ctx: &BettingContext) -> Vec<LegalAction> {
    let mut out = vec![LegalAction::Fold];
    let to_call = ctx.to_call();
    if to_call == 0 {
        out.push(LegalAction::Check);
    } else {
        out.push(LegalAction::Call {
            amount: to_call.min(ctx.stack),
        });
    }
    if ctx.can_bet() {
        out.push(LegalAction::Bet {
            min: ctx.bet_min(),
            max: ctx.max_target(),
        });
    }
    if ctx.can_raise() {
        out.push(LegalAction::Raise {
            min: ctx.raise_min(),
            max: ctx.max_target(),
        });
    }
    out
}

/// Validates a player action against betting rules and stack size.
///
/// Converts a [`crate::player::PlayerAction`] into a [`ValidatedAction`]
/// carrying the chips it commits. Nothing is coerced: an out-of-range
/// amount is an error, not an implicit all-in.
///
/// # Errors
///
/// Returns the [`IllegalAction`] naming the violated rule:
/// - [`IllegalAction::CannotCheck`] - check while facing a bet
/// - [`IllegalAction::NothingToCall`] - call with nothing outstanding
/// - [`IllegalAction::BetNotAllowed`] - bet into an existing bet
/// - [`IllegalAction::NoOpponentToAct`] - bet or raise nobody could answer
/// - [`IllegalAction::RaiseNotAllowed`] - raise with no bet, too few chips, or betting closed
/// - [`IllegalAction::BelowMinimum`] / [`IllegalAction::ExceedsStack`] - amount out of bounds
///
/// ```
/// use holdem_engine::errors::IllegalAction;
/// use holdem_engine::player::PlayerAction;
/// use holdem_engine::rules::{validate_action, BettingContext, ValidatedAction};
///
/// let ctx = BettingContext {
///     stack: 130,
///     round_bet: 0,
///     current_bet: 100,
///     min_raise: 100,
///     big_blind: 100,
///     raise_open: true,
///     opponents_can_act: true,
/// };
/// // short all-in raise: allowed, but not a full raise
/// assert_eq!(
///     validate_action(&ctx, PlayerAction::Raise(130)),
///     Ok(ValidatedAction::Raise { to: 130, chips: 130, full: false })
/// );
/// assert_eq!(
///     validate_action(&ctx, PlayerAction::Check),
///     Err(IllegalAction::CannotCheck { to_call: 100 })
/// );
/// ```
pub fn validate_action(ctx: &BettingContext, action: A) -> Result<ValidatedAction, IllegalAction> {
    let to_call = ctx.to_call();
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(IllegalAction::CannotCheck { to_call })
            }
        }
        A::Call => {
            if to_call == 0 {
                Err(IllegalAction::NothingToCall)
            } else {
                Ok(ValidatedAction::Call(to_call.min(ctx.stack)))
            }
        }
        A::Bet(to) => {
            if ctx.current_bet > 0 {
                return Err(IllegalAction::BetNotAllowed {
                    current_bet: ctx.current_bet,
                });
            }
            if !ctx.can_bet() {
                return Err(IllegalAction::NoOpponentToAct);
            }
            check_bounds(to, ctx.bet_min(), ctx.max_target())?;
            Ok(ValidatedAction::Bet {
                to,
                chips: to - ctx.round_bet,
            })
        }
        A::Raise(to) => {
            if ctx.current_bet > 0 && ctx.stack > to_call && !ctx.opponents_can_act {
                return Err(IllegalAction::NoOpponentToAct);
            }
            if !ctx.can_raise() {
                return Err(IllegalAction::RaiseNotAllowed);
            }
            check_bounds(to, ctx.raise_min(), ctx.max_target())?;
            Ok(ValidatedAction::Raise {
                to,
                chips: to - ctx.round_bet,
                full: to - ctx.current_bet >= ctx.min_raise,
            })
        }
    }
}

fn check_bounds(amount: u32, minimum: u32, maximum: u32) -> Result<(), IllegalAction> {
    if amount > maximum {
        return Err(IllegalAction::ExceedsStack { amount, maximum });
    }
    if amount < minimum {
        return Err(IllegalAction::BelowMinimum { amount, minimum });
    }
    Ok(())
}
