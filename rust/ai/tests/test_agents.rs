use holdem_ai::baseline::BaselineAgent;
use holdem_ai::driver::play_hand;
use holdem_ai::random::RandomAgent;
use holdem_ai::{create_agent, Agent, AgentError};
use holdem_engine::config::HandConfig;
use holdem_engine::engine::Engine;
use holdem_engine::errors::{ConfigError, GameError};
use holdem_engine::player::Seat;

fn table() -> Vec<Box<dyn Agent>> {
    vec![
        Box::new(BaselineAgent::new()),
        Box::new(RandomAgent::new(1, 0.3)),
        Box::new(RandomAgent::new(2, 0.6)),
        Box::new(BaselineAgent::new()),
    ]
}

#[test]
fn create_agent_knows_both_kinds() {
    assert_eq!(create_agent("baseline").unwrap().name(), "BaselineAgent");
    assert_eq!(create_agent("random").unwrap().name(), "RandomAgent");
    assert_eq!(
        create_agent("shark").err(),
        Some(AgentError::UnknownAgent("shark".into()))
    );
}

#[test]
fn session_conserves_chips() {
    let seats: Vec<Seat> = (0..4).map(|id| Seat::new(id, 1_000)).collect();
    let mut engine = Engine::new(seats, HandConfig::new(5, 10, 0, 99)).unwrap();
    let agents = table();

    for _ in 0..150 {
        let mut hand = match engine.start_hand() {
            Ok(h) => h,
            Err(GameError::InvalidConfiguration(ConfigError::NotEnoughFundedPlayers(n))) => {
                assert!(n < 2);
                break;
            }
            Err(e) => panic!("unexpected error: {e}"),
        };
        play_hand(&mut hand, &agents).unwrap();
        assert!(hand.is_hand_complete());

        let paid: u32 = hand.winners().unwrap().iter().map(|w| w.amount).sum();
        assert_eq!(paid, hand.pot().total());

        engine.finish_hand(&hand).unwrap();
        let chips: u32 = engine.seats().iter().map(|s| s.stack).sum();
        assert_eq!(chips, 4_000);
    }
    assert!(engine.hands_played() > 0);
}

#[test]
fn same_seeds_replay_the_same_hand() {
    let seats = [Seat::new(0, 500), Seat::new(1, 500), Seat::new(2, 500)];
    let run = || {
        let agents: Vec<Box<dyn Agent>> = vec![
            Box::new(RandomAgent::new(3, 0.5)),
            Box::new(RandomAgent::new(4, 0.5)),
            Box::new(BaselineAgent::new()),
        ];
        let mut hand = holdem_engine::game::new_hand(&seats, 5, 10, 1, 21).unwrap();
        play_hand(&mut hand, &agents).unwrap();
        (hand.actions().to_vec(), hand.winners().unwrap().to_vec())
    };
    assert_eq!(run(), run());
}
