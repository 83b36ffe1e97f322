use holdem_engine::errors::IllegalAction;
use holdem_engine::player::PlayerAction as A;
use holdem_engine::rules::{legal_actions, validate_action, BettingContext, LegalAction, ValidatedAction};

fn ctx(stack: u32, round_bet: u32, current_bet: u32) -> BettingContext {
    BettingContext {
        stack,
        round_bet,
        current_bet,
        min_raise: 100,
        big_blind: 100,
        raise_open: true,
        opponents_can_act: true,
    }
}

#[test]
fn bet_below_big_blind_is_rejected() {
    let err = validate_action(&ctx(10_000, 0, 0), A::Bet(50)).unwrap_err();
    assert_eq!(
        err,
        IllegalAction::BelowMinimum {
            amount: 50,
            minimum: 100
        }
    );
}

#[test]
fn bet_over_stack_is_rejected_not_coerced() {
    let err = validate_action(&ctx(50, 0, 0), A::Bet(100)).unwrap_err();
    assert_eq!(
        err,
        IllegalAction::ExceedsStack {
            amount: 100,
            maximum: 50
        }
    );
    // the all-in amount itself is a legal short bet
    assert_eq!(
        validate_action(&ctx(50, 0, 0), A::Bet(50)),
        Ok(ValidatedAction::Bet { to: 50, chips: 50 })
    );
}

#[test]
fn call_with_insufficient_stack_is_partial_call() {
    let va = validate_action(&ctx(60, 0, 100), A::Call).unwrap();
    assert_eq!(va, ValidatedAction::Call(60));
    assert!(legal_actions(&ctx(60, 0, 100)).contains(&LegalAction::Call { amount: 60 }));
}

#[test]
fn exact_call_amount_is_offered_without_raise() {
    let legal = legal_actions(&ctx(100, 0, 100));
    assert_eq!(legal, vec![LegalAction::Fold, LegalAction::Call { amount: 100 }]);
}

#[test]
fn short_raise_is_only_legal_all_in() {
    // facing 100 with 130 behind: the only raise is all in
    let c = ctx(130, 0, 100);
    assert!(legal_actions(&c).contains(&LegalAction::Raise { min: 130, max: 130 }));
    assert_eq!(
        validate_action(&c, A::Raise(120)),
        Err(IllegalAction::BelowMinimum {
            amount: 120,
            minimum: 130
        })
    );
}

#[test]
fn raise_bounds_are_absolute_levels() {
    // big blind already in, facing a raise to 300 (increment 200)
    let c = BettingContext {
        min_raise: 200,
        ..ctx(1_000, 100, 300)
    };
    assert!(legal_actions(&c).contains(&LegalAction::Raise { min: 500, max: 1_100 }));
    assert_eq!(
        validate_action(&c, A::Raise(500)),
        Ok(ValidatedAction::Raise {
            to: 500,
            chips: 400,
            full: true
        })
    );
}

#[test]
fn check_and_call_are_exclusive() {
    assert_eq!(
        validate_action(&ctx(500, 0, 0), A::Call),
        Err(IllegalAction::NothingToCall)
    );
    assert_eq!(
        validate_action(&ctx(500, 0, 100), A::Check),
        Err(IllegalAction::CannotCheck { to_call: 100 })
    );
    assert_eq!(
        validate_action(&ctx(500, 100, 100), A::Check),
        Ok(ValidatedAction::Check)
    );
}

#[test]
fn bet_into_a_bet_is_rejected() {
    assert_eq!(
        validate_action(&ctx(500, 0, 100), A::Bet(300)),
        Err(IllegalAction::BetNotAllowed { current_bet: 100 })
    );
}

#[test]
fn closed_raising_leaves_call_and_fold() {
    let c = BettingContext {
        raise_open: false,
        ..ctx(1_000, 100, 150)
    };
    assert_eq!(
        legal_actions(&c),
        vec![LegalAction::Fold, LegalAction::Call { amount: 50 }]
    );
    assert_eq!(
        validate_action(&c, A::Raise(400)),
        Err(IllegalAction::RaiseNotAllowed)
    );
}

#[test]
fn no_bet_without_opponents_to_answer() {
    let c = BettingContext {
        opponents_can_act: false,
        ..ctx(1_000, 0, 0)
    };
    assert_eq!(legal_actions(&c), vec![LegalAction::Fold, LegalAction::Check]);
    assert_eq!(validate_action(&c, A::Bet(100)), Err(IllegalAction::NoOpponentToAct));

    let facing = BettingContext {
        opponents_can_act: false,
        ..ctx(1_000, 0, 100)
    };
    assert_eq!(
        validate_action(&facing, A::Raise(200)),
        Err(IllegalAction::NoOpponentToAct)
    );
}

#[test]
fn raise_minimum_saturates_at_the_all_in_level() {
    let c = BettingContext {
        min_raise: 500_000_000,
        ..ctx(4_200_000_000, 0, 4_000_000_000)
    };
    assert_eq!(
        legal_actions(&c),
        vec![
            LegalAction::Fold,
            LegalAction::Call { amount: 4_000_000_000 },
            LegalAction::Raise {
                min: 4_200_000_000,
                max: 4_200_000_000
            },
        ]
    );
}
