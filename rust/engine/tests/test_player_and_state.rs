use std::collections::HashSet;

use holdem_engine::errors::{ConfigError, GameError};
use holdem_engine::game::{new_hand, GameState, Street};
use holdem_engine::player::{Action, PlayerAction, PlayerStatus, Seat, STARTING_STACK};
use holdem_engine::rules::LegalAction;

fn seats(n: usize, stack: u32) -> Vec<Seat> {
    (0..n).map(|i| Seat::new(i, stack)).collect()
}

#[test]
fn players_start_with_default_stack_and_two_hole_cards() {
    let gs = new_hand(&seats(4, STARTING_STACK), 50, 100, 0, 1).unwrap();
    let mut seen = HashSet::new();
    for p in gs.players() {
        assert_eq!(p.starting_stack(), 20_000);
        assert_eq!(p.hole_cards().len(), 2);
        for c in p.hole_cards() {
            assert!(seen.insert(*c));
        }
    }
    assert!(gs.board().is_empty());
    assert_eq!(gs.street(), Street::Preflop);
}

#[test]
fn blinds_post_left_of_button() {
    let gs = new_hand(&seats(4, 1_000), 50, 100, 1, 1).unwrap();
    let p = gs.players();
    assert_eq!(p[2].round_bet(), 50);
    assert_eq!(p[3].round_bet(), 100);
    assert_eq!(p[2].stack(), 950);
    assert_eq!(p[3].stack(), 900);
    assert_eq!(gs.pot().total(), 150);
    assert_eq!(gs.current_bet(), 100);
    assert_eq!(gs.min_raise(), 100);
    // under the gun is left of the big blind, wrapping
    assert_eq!(gs.current_player(), Some(0));
}

#[test]
fn heads_up_button_posts_small_blind_and_acts_first() {
    let gs = new_hand(&seats(2, 1_000), 50, 100, 1, 1).unwrap();
    assert_eq!(gs.players()[1].round_bet(), 50);
    assert_eq!(gs.players()[0].round_bet(), 100);
    assert_eq!(gs.current_player(), Some(1));
    assert_eq!(gs.to_call(1), Some(50));
}

#[test]
fn valid_actions_only_for_player_on_turn() {
    let gs = new_hand(&seats(3, 1_000), 50, 100, 0, 1).unwrap();
    assert_eq!(gs.current_player(), Some(0));
    assert_eq!(
        gs.valid_actions(0),
        vec![
            LegalAction::Fold,
            LegalAction::Call { amount: 100 },
            LegalAction::Raise { min: 200, max: 1_000 },
        ]
    );
    assert!(gs.valid_actions(1).is_empty());
    assert!(gs.valid_actions(42).is_empty());
}

#[test]
fn short_blind_goes_all_in() {
    let stacks = [Seat::new(0, 1_000), Seat::new(1, 30), Seat::new(2, 1_000)];
    let gs = new_hand(&stacks, 50, 100, 0, 1).unwrap();
    assert_eq!(gs.players()[1].round_bet(), 30);
    assert_eq!(gs.players()[1].status(), PlayerStatus::AllIn);
    assert_eq!(gs.pot().total(), 130);
}

#[test]
fn zero_stack_seats_sit_out() {
    let stacks = [Seat::new(0, 1_000), Seat::new(1, 0), Seat::new(2, 1_000)];
    let gs = new_hand(&stacks, 50, 100, 0, 1).unwrap();
    let out = &gs.players()[1];
    assert_eq!(out.status(), PlayerStatus::SittingOut);
    assert!(out.hole_cards().is_empty());
    // two live seats: heads-up blinds with the button on the small blind
    assert_eq!(gs.players()[0].round_bet(), 50);
    assert_eq!(gs.players()[2].round_bet(), 100);
}

#[test]
fn invalid_configurations_are_rejected() {
    let err = |r: Result<GameState, GameError>| match r {
        Err(GameError::InvalidConfiguration(e)) => e,
        other => panic!("expected configuration error, got {:?}", other.map(|g| g.street())),
    };
    assert_eq!(
        err(new_hand(&seats(1, 1_000), 50, 100, 0, 1)),
        ConfigError::TooFewPlayers(1)
    );
    assert_eq!(
        err(new_hand(&seats(11, 1_000), 50, 100, 0, 1)),
        ConfigError::TooManyPlayers { max: 10, actual: 11 }
    );
    assert_eq!(
        err(new_hand(&seats(3, 1_000), 50, 0, 0, 1)),
        ConfigError::ZeroBigBlind
    );
    assert_eq!(
        err(new_hand(&seats(3, 1_000), 50, 100, 3, 1)),
        ConfigError::ButtonOutOfRange { button: 3, players: 3 }
    );
    assert_eq!(
        err(new_hand(&[Seat::new(1, 500), Seat::new(1, 500)], 50, 100, 0, 1)),
        ConfigError::DuplicatePlayerId(1)
    );
    assert_eq!(
        err(new_hand(&[Seat::new(0, 500), Seat::new(1, 0)], 50, 100, 0, 1)),
        ConfigError::NotEnoughFundedPlayers(1)
    );
    assert_eq!(
        err(new_hand(
            &[Seat::new(0, 3_000_000_000), Seat::new(1, 3_000_000_000)],
            50,
            100,
            0,
            1
        )),
        ConfigError::ChipTotalTooLarge(6_000_000_000)
    );
}

#[test]
fn stacks_near_the_chip_limit_play_out() {
    let big = 2_000_000_000;
    let mut gs = new_hand(&[Seat::new(0, big), Seat::new(1, big)], 50, 100, 0, 8).unwrap();
    gs.apply_action(Action::new(0, PlayerAction::Raise(big))).unwrap();
    assert_eq!(
        gs.valid_actions(1),
        vec![LegalAction::Fold, LegalAction::Call { amount: big - 100 }]
    );
    gs.apply_action(Action::new(1, PlayerAction::Call)).unwrap();
    assert!(gs.is_hand_complete());
    assert_eq!(gs.pot().total(), 2 * big);
    let paid: u32 = gs.winners().unwrap().iter().map(|w| w.amount).sum();
    assert_eq!(paid, 2 * big);
}

#[test]
fn same_seed_deals_same_cards() {
    let a = new_hand(&seats(6, 1_000), 5, 10, 2, 99).unwrap();
    let b = new_hand(&seats(6, 1_000), 5, 10, 2, 99).unwrap();
    for (pa, pb) in a.players().iter().zip(b.players()) {
        assert_eq!(pa.hole_cards(), pb.hole_cards());
    }
}
