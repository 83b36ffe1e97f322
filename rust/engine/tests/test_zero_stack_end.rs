use holdem_engine::config::HandConfig;
use holdem_engine::engine::Engine;
use holdem_engine::errors::{ConfigError, GameError};
use holdem_engine::game::GameState;
use holdem_engine::player::{Action, PlayerAction, Seat};
use holdem_engine::rules::LegalAction;

fn shove_or_call(hand: &GameState, p: usize) -> PlayerAction {
    let legal = hand.valid_actions(p);
    legal
        .iter()
        .find_map(|l| match *l {
            LegalAction::Raise { max, .. } => Some(PlayerAction::Raise(max)),
            LegalAction::Bet { max, .. } => Some(PlayerAction::Bet(max)),
            _ => None,
        })
        .unwrap_or(if legal.contains(&LegalAction::Check) {
            PlayerAction::Check
        } else {
            PlayerAction::Call
        })
}

#[test]
fn busted_player_ends_the_session() {
    let seats = vec![Seat::new(0, 1_000), Seat::new(1, 1_000)];
    let mut eng = Engine::new(seats, HandConfig::new(50, 100, 0, 1)).unwrap();

    for _ in 0..100 {
        let mut hand = match eng.start_hand() {
            Ok(h) => h,
            Err(e) => {
                assert_eq!(
                    e,
                    GameError::InvalidConfiguration(ConfigError::NotEnoughFundedPlayers(1))
                );
                assert!(eng.seats().iter().any(|s| s.stack == 0));
                assert_eq!(eng.seats().iter().map(|s| s.stack).sum::<u32>(), 2_000);
                return;
            }
        };
        while let Some(p) = hand.current_player() {
            let a = shove_or_call(&hand, p);
            hand.apply_action(Action::new(p, a)).unwrap();
        }
        eng.finish_hand(&hand).unwrap();
    }
    panic!("nobody busted in 100 all-in hands");
}

#[test]
fn stacks_carry_between_hands() {
    let seats = vec![Seat::new(0, 500), Seat::new(1, 500), Seat::new(2, 500)];
    let mut eng = Engine::new(seats, HandConfig::new(5, 10, 0, 9)).unwrap();
    for _ in 0..5 {
        let mut hand = eng.start_hand().unwrap();
        while let Some(p) = hand.current_player() {
            hand.apply_action(Action::new(p, PlayerAction::Fold)).unwrap();
        }
        eng.finish_hand(&hand).unwrap();
        let total: u32 = eng.seats().iter().map(|s| s.stack).sum();
        assert_eq!(total, 1_500);
    }
    assert_eq!(eng.hands_played(), 5);
    // button went 0 -> 1 -> 2 -> 0 -> 1 -> 2
    assert_eq!(eng.button(), 2);
}
