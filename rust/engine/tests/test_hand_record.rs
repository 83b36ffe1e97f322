use holdem_engine::cards::parse_cards;
use holdem_engine::game::{new_hand, Street};
use holdem_engine::logger::{format_hand_id, ActionRecord, HandIds, HandRecord, ShowdownInfo};
use holdem_engine::player::{Action, PlayerAction, Seat};

#[test]
fn hand_record_serializes_and_deserializes() {
    let rec = HandRecord {
        hand_id: "20250102-000123".to_string(),
        seed: Some(42),
        actions: vec![
            ActionRecord {
                player_id: 0,
                street: Street::Preflop,
                action: PlayerAction::Raise(300),
            },
            ActionRecord {
                player_id: 1,
                street: Street::Preflop,
                action: PlayerAction::Call,
            },
        ],
        board: parse_cards("Ah Ad Ac").unwrap(),
        result: Some("p0 wins 600".to_string()),
        ts: None,
        meta: None,
        showdown: Some(ShowdownInfo {
            winners: vec![0],
            notes: Some("Three of a Kind, Aces".into()),
        }),
    };

    let s = serde_json::to_string(&rec).expect("serialize");
    let back: HandRecord = serde_json::from_str(&s).expect("deserialize");
    assert_eq!(rec, back);
}

#[test]
fn missing_optional_fields_default() {
    let json = r#"{"hand_id":"20250102-000001","seed":null,"actions":[],"board":[],"result":null}"#;
    let rec: HandRecord = serde_json::from_str(json).unwrap();
    assert!(rec.ts.is_none());
    assert!(rec.showdown.is_none());
}

#[test]
fn id_format_is_date_and_sequence() {
    assert_eq!(format_hand_id("20251231", 42), "20251231-000042");
    let mut ids = HandIds::for_date("20250101");
    assert_eq!(ids.next_id(), "20250101-000001");
    assert_eq!(ids.next_id(), "20250101-000002");
}

#[test]
fn finished_hand_produces_record() {
    let mut gs = new_hand(&[Seat::new(0, 1_000), Seat::new(1, 1_000)], 50, 100, 0, 77).unwrap();
    gs.apply_action(Action::new(0, PlayerAction::Raise(300))).unwrap();
    gs.apply_action(Action::new(1, PlayerAction::Fold)).unwrap();

    let rec = gs.record("20250102-000009".into());
    assert_eq!(rec.seed, Some(77));
    assert_eq!(rec.actions.len(), 2);
    assert_eq!(rec.actions[1].action, PlayerAction::Fold);
    assert_eq!(rec.result.as_deref(), Some("p0 wins 400"));
    assert!(rec.showdown.is_none());
    assert!(rec.ts.is_some());
    let meta = rec.meta.unwrap();
    assert_eq!(meta["big_blind"], 100);
    assert_eq!(meta["button"], 0);
}

#[test]
fn showdown_record_names_winning_hand() {
    let mut gs = new_hand(&[Seat::new(0, 1_000), Seat::new(1, 1_000)], 50, 100, 0, 78).unwrap();
    gs.apply_action(Action::new(0, PlayerAction::Call)).unwrap();
    gs.apply_action(Action::new(1, PlayerAction::Check)).unwrap();
    for _ in 0..3 {
        gs.apply_action(Action::new(1, PlayerAction::Check)).unwrap();
        gs.apply_action(Action::new(0, PlayerAction::Check)).unwrap();
    }
    let rec = gs.record("20250102-000010".into());
    let sd = rec.showdown.expect("went to showdown");
    let winners = gs.winners().unwrap();
    assert_eq!(sd.winners, winners.iter().map(|w| w.player_id).collect::<Vec<_>>());
    let note = sd.notes.unwrap();
    let hand = winners[0].hand.unwrap().to_string();
    assert!(note.contains(&hand), "{note} should mention {hand}");
    assert_eq!(rec.board.len(), 5);
}
