use std::collections::HashSet;

use holdem_engine::cards::{full_deck, parse_cards, Card};
use holdem_engine::deck::Deck;
use holdem_engine::errors::GameError;

#[test]
fn deck_has_52_unique_cards() {
    let mut deck = Deck::new(42);
    let mut set = HashSet::new();
    for i in 0..52 {
        let c = deck.deal_card().expect("should have 52 cards");
        assert!(set.insert(c), "card {:?} duplicated at position {}", c, i);
    }
    assert_eq!(
        deck.deal_card(),
        Err(GameError::DeckExhausted {
            requested: 1,
            remaining: 0
        })
    );
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new(12345);
    let mut d2 = Deck::new(12345);
    let a: Vec<Card> = d1.deal(10).unwrap();
    let b: Vec<Card> = d2.deal(10).unwrap();
    assert_eq!(a, b, "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let a = Deck::new(1).deal(10).unwrap();
    let b = Deck::new(2).deal(10).unwrap();
    assert_ne!(
        a, b,
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn shuffle_is_not_identity() {
    let dealt = Deck::new(7).deal(52).unwrap();
    assert_ne!(dealt, full_deck());
}

#[test]
fn over_deal_fails_and_leaves_deck_intact() {
    let mut deck = Deck::new(3);
    deck.deal(50).unwrap();
    assert_eq!(
        deck.deal(3),
        Err(GameError::DeckExhausted {
            requested: 3,
            remaining: 2
        })
    );
    assert_eq!(deck.remaining(), 2);
    assert_eq!(deck.deal(2).unwrap().len(), 2);
}

#[test]
fn burn_and_deal_follow_holdem_procedure() {
    let mut deck = Deck::new(777);
    let holes = deck.deal(4).unwrap();
    deck.burn_card().unwrap();
    let flop = deck.deal(3).unwrap();
    deck.burn_card().unwrap();
    let turn = deck.deal_card().unwrap();
    deck.burn_card().unwrap();
    let river = deck.deal_card().unwrap();
    assert_eq!(deck.remaining(), 52 - 4 - 3 - 2 - 3);

    let mut set = HashSet::new();
    for c in holes.iter().chain(&flop).chain([&turn, &river]) {
        assert!(set.insert(*c));
    }
}

#[test]
fn without_excludes_known_cards() {
    let known = parse_cards("As Kd 7c").unwrap();
    let mut deck = Deck::without(9, &known);
    assert_eq!(deck.remaining(), 49);
    let rest = deck.deal(49).unwrap();
    assert!(rest.iter().all(|c| !known.contains(c)));
}

#[test]
fn from_cards_deals_in_order() {
    let cards = parse_cards("2c 3d 4h").unwrap();
    let mut deck = Deck::from_cards(cards.clone());
    assert_eq!(deck.deal(3).unwrap(), cards);
}
