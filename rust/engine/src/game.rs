//! The per-hand betting state machine.
//!
//! A [`GameState`] is built once per hand (deck shuffled, hole cards dealt,
//! blinds posted) and then moved forward only by [`GameState::apply_action`].
//! Streets advance on their own when a betting round closes; the hand ends
//! either uncontested or at showdown, after which the state is read-only.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::Card;
use crate::config::HandConfig;
use crate::deck::Deck;
use crate::errors::{ConfigError, GameError, IllegalAction};
use crate::hand::{evaluate, HandRank};
use crate::logger::{timestamp_now, ActionRecord, HandRecord, ShowdownInfo};
use crate::player::{Action, Player, PlayerId, PlayerStatus, Seat};
use crate::pot::{Pot, PotLedger};
use crate::rules::{legal_actions, validate_action, BettingContext, LegalAction, ValidatedAction};

/// Where the hand is. `Showdown` is passed through while pots are awarded;
/// a finished hand always rests in `HandComplete`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    HandComplete,
}

/// Chips a player collected when the hand ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub player_id: PlayerId,
    pub amount: u32,
    /// `None` when nobody called and the cards stayed hidden.
    pub hand: Option<HandRank>,
}

/// What one successful [`GameState::apply_action`] changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub player_id: PlayerId,
    pub applied: ValidatedAction,
    /// The actor's status afterwards
    pub status: PlayerStatus,
    pub street_before: Street,
    pub street_after: Street,
    /// Board cards dealt as a result of the betting round closing
    pub board_dealt: Vec<Card>,
    pub hand_complete: bool,
}

/// State of one hand of Texas Hold'em.
///
/// # Examples
///
/// ```
/// use holdem_engine::config::HandConfig;
/// use holdem_engine::game::{GameState, Street};
/// use holdem_engine::player::{Action, PlayerAction, Seat};
///
/// let seats = [Seat::new(0, 1_000), Seat::new(1, 1_000)];
/// let mut game = GameState::new(&seats, &HandConfig::new(5, 10, 0, 42)).unwrap();
///
/// // heads-up: the button posts the small blind and acts first preflop
/// assert_eq!(game.current_player(), Some(0));
/// game.apply_action(Action::new(0, PlayerAction::Call)).unwrap();
/// game.apply_action(Action::new(1, PlayerAction::Check)).unwrap();
/// assert_eq!(game.street(), Street::Flop);
/// assert_eq!(game.board().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct GameState {
    /// Players in table order
    players: Vec<Player>,
    board: Vec<Card>,
    deck: Deck,
    street: Street,
    button: usize,
    small_blind: u32,
    big_blind: u32,
    /// Highest bet level this round
    current_bet: u32,
    min_raise: u32,
    to_act: Option<usize>,
    /// Per seat: still owes an action this round
    needs_action: Vec<bool>,
    /// Per seat: has not acted since the last full bet or raise
    raise_open: Vec<bool>,
    /// Per seat: bet level the player last acted at this round
    acted_at: Vec<u32>,
    pot: PotLedger,
    winners: Vec<Winner>,
    actions: Vec<ActionRecord>,
    seed: u64,
    showdown: bool,
}

impl GameState {
    /// Seats the players, shuffles, deals hole cards and posts the blinds.
    ///
    /// Seats with no chips, or marked sitting out, are skipped for the hand.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidConfiguration`] for fewer than two funded seats,
    /// more than the table allows, duplicate ids, bad blinds or a button
    /// outside the table.
    pub fn new(seats: &[Seat], config: &HandConfig) -> Result<Self, GameError> {
        Self::with_deck(seats, config, Deck::new(config.seed))
    }

    /// Like [`GameState::new`] but deals from `deck` as given. Hole cards go
    /// round by round starting left of the button; each street burns one
    /// card first.
    pub fn with_deck(seats: &[Seat], config: &HandConfig, deck: Deck) -> Result<Self, GameError> {
        config.validate(seats.len())?;
        for (i, s) in seats.iter().enumerate() {
            if seats[..i].iter().any(|o| o.id == s.id) {
                return Err(ConfigError::DuplicatePlayerId(s.id).into());
            }
        }
        let chips: u64 = seats.iter().map(|s| u64::from(s.stack)).sum();
        if chips > u64::from(u32::MAX) {
            return Err(ConfigError::ChipTotalTooLarge(chips).into());
        }

        let players: Vec<Player> = seats
            .iter()
            .enumerate()
            .map(|(pos, s)| {
                let mut p = Player::new(s.id, s.stack, pos);
                if s.sitting_out {
                    p.sit_out();
                }
                p
            })
            .collect();
        let funded = players.iter().filter(|p| p.is_active()).count();
        if funded < 2 {
            return Err(ConfigError::NotEnoughFundedPlayers(funded).into());
        }

        let n = players.len();
        let mut pot = PotLedger::new();
        for p in &players {
            pot.seat(p.id());
        }

        let mut game = Self {
            players,
            board: Vec::with_capacity(5),
            deck,
            street: Street::Preflop,
            button: config.button,
            small_blind: config.small_blind,
            big_blind: config.big_blind,
            current_bet: config.big_blind,
            min_raise: config.big_blind,
            to_act: None,
            needs_action: vec![false; n],
            raise_open: vec![true; n],
            acted_at: vec![0; n],
            pot,
            winners: Vec::new(),
            actions: Vec::new(),
            seed: config.seed,
            showdown: false,
        };

        for _ in 0..2 {
            for pos in game.order_after(game.button) {
                if game.players[pos].is_active() {
                    let c = game.deck.deal_card()?;
                    game.players[pos].give_card(c);
                }
            }
        }

        let (sb, bb) = game.blind_positions();
        game.post_blind(sb, config.small_blind);
        game.post_blind(bb, config.big_blind);

        for i in 0..n {
            game.needs_action[i] = game.players[i].is_active();
        }

        info!(
            players = funded,
            button = game.button,
            small_blind = game.small_blind,
            big_blind = game.big_blind,
            seed = game.seed,
            "hand started"
        );

        if game.round_closed() {
            let mut dealt = Vec::new();
            game.close_round(&mut dealt)?;
        } else {
            game.to_act = game.first_needing_action(bb + 1);
        }
        Ok(game)
    }

    /// Positions after `from`, clockwise, ending with `from` itself.
    fn order_after(&self, from: usize) -> impl Iterator<Item = usize> {
        let n = self.players.len();
        (1..=n).map(move |k| (from + k) % n)
    }

    fn next_funded(&self, after: usize) -> usize {
        self.order_after(after)
            .find(|&i| self.players[i].status() != PlayerStatus::SittingOut)
            .unwrap_or(after)
    }

    fn blind_positions(&self) -> (usize, usize) {
        let funded = self.players.iter().filter(|p| p.is_active()).count();
        let sb = if funded == 2 && self.players[self.button].is_active() {
            // heads-up: the button posts the small blind
            self.button
        } else {
            self.next_funded(self.button)
        };
        (sb, self.next_funded(sb))
    }

    fn post_blind(&mut self, pos: usize, amount: u32) {
        let chips = self.players[pos].commit(amount);
        self.pot.record_contribution(self.players[pos].id(), chips);
    }

    fn first_needing_action(&self, start: usize) -> Option<usize> {
        let n = self.players.len();
        (0..n)
            .map(|k| (start + k) % n)
            .find(|&i| self.players[i].is_active() && self.needs_action[i])
    }

    fn in_hand_count(&self) -> usize {
        self.players.iter().filter(|p| p.in_hand()).count()
    }

    /// Closed when nobody active owes an action, or when at most one player
    /// can act and they have matched the bet.
    fn round_closed(&self) -> bool {
        let mut active = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_active());
        if active.clone().all(|(i, _)| !self.needs_action[i]) {
            return true;
        }
        active.clone().count() <= 1 && active.all(|(_, p)| p.round_bet() >= self.current_bet)
    }

    fn index_of(&self, player_id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == player_id)
    }

    fn context(&self, idx: usize) -> BettingContext {
        let p = &self.players[idx];
        BettingContext {
            stack: p.stack(),
            round_bet: p.round_bet(),
            current_bet: self.current_bet,
            min_raise: self.min_raise,
            big_blind: self.big_blind,
            raise_open: self.raise_open[idx],
            opponents_can_act: self
                .players
                .iter()
                .enumerate()
                .any(|(j, o)| j != idx && o.is_active()),
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.index_of(player_id).map(|i| &self.players[i])
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn button(&self) -> usize {
        self.button
    }
    pub fn small_blind(&self) -> u32 {
        self.small_blind
    }
    pub fn big_blind(&self) -> u32 {
        self.big_blind
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn min_raise(&self) -> u32 {
        self.min_raise
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn pot(&self) -> &PotLedger {
        &self.pot
    }
    /// Current main and side pots.
    pub fn pots(&self) -> Vec<Pot> {
        self.pot.finalize()
    }
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    pub fn is_hand_complete(&self) -> bool {
        self.street == Street::HandComplete
    }

    pub fn current_player(&self) -> Option<PlayerId> {
        self.to_act.map(|i| self.players[i].id())
    }

    /// Chips the player needs to add to stay in, before stack limits.
    pub fn to_call(&self, player_id: PlayerId) -> Option<u32> {
        self.player(player_id)
            .map(|p| self.current_bet.saturating_sub(p.round_bet()))
    }

    /// Legal actions for `player_id`; empty unless it is their turn.
    pub fn valid_actions(&self, player_id: PlayerId) -> Vec<LegalAction> {
        match self.to_act {
            Some(i) if self.players[i].id() == player_id => legal_actions(&self.context(i)),
            _ => Vec::new(),
        }
    }

    /// Payouts, available once the hand is complete. Ordered by seat,
    /// starting left of the button.
    pub fn winners(&self) -> Result<&[Winner], GameError> {
        if self.is_hand_complete() {
            Ok(&self.winners)
        } else {
            Err(GameError::HandNotComplete)
        }
    }

    /// Validates and applies one action, then advances turn and street.
    ///
    /// On error nothing changes.
    pub fn apply_action(&mut self, action: Action) -> Result<ActionOutcome, GameError> {
        let validated = self.check(action).inspect_err(|e| {
            warn!(player_id = action.player_id, action = ?action.action, error = %e, "action rejected");
        })?;
        let idx = self.to_act.ok_or(IllegalAction::HandAlreadyComplete)?;
        let street_before = self.street;
        let id = self.players[idx].id();

        self.commit(idx, validated);
        self.actions.push(ActionRecord {
            player_id: id,
            street: street_before,
            action: action.action,
        });
        debug!(
            player_id = id,
            action = ?validated,
            current_bet = self.current_bet,
            pot = self.pot.total(),
            "action applied"
        );

        let mut board_dealt = Vec::new();
        if self.in_hand_count() == 1 {
            self.award_uncontested();
        } else if self.round_closed() {
            self.close_round(&mut board_dealt)?;
        } else {
            self.to_act = self.first_needing_action(idx + 1);
        }

        Ok(ActionOutcome {
            player_id: id,
            applied: validated,
            status: self.players[idx].status(),
            street_before,
            street_after: self.street,
            board_dealt,
            hand_complete: self.is_hand_complete(),
        })
    }

    fn check(&self, action: Action) -> Result<ValidatedAction, IllegalAction> {
        if self.is_hand_complete() {
            return Err(IllegalAction::HandAlreadyComplete);
        }
        let idx = self
            .index_of(action.player_id)
            .ok_or(IllegalAction::UnknownPlayer(action.player_id))?;
        if self.to_act != Some(idx) {
            return Err(IllegalAction::NotPlayersTurn {
                expected: self.current_player(),
                actual: action.player_id,
            });
        }
        validate_action(&self.context(idx), action.action)
    }

    fn commit(&mut self, idx: usize, action: ValidatedAction) {
        let id = self.players[idx].id();
        match action {
            ValidatedAction::Fold => {
                self.players[idx].fold();
                self.pot.fold(id);
            }
            ValidatedAction::Check => {}
            ValidatedAction::Call(chips) => {
                self.players[idx].commit(chips);
                self.pot.record_contribution(id, chips);
            }
            ValidatedAction::Bet { to, chips } => {
                self.players[idx].commit(chips);
                self.pot.record_contribution(id, chips);
                // an all-in bet below the big blind leaves the increment alone
                if to >= self.big_blind {
                    self.min_raise = to;
                }
                self.raise_to(idx, to, true);
            }
            ValidatedAction::Raise { to, chips, full } => {
                self.players[idx].commit(chips);
                self.pot.record_contribution(id, chips);
                if full {
                    self.min_raise = to - self.current_bet;
                }
                self.raise_to(idx, to, full);
            }
        }
        self.needs_action[idx] = false;
        self.raise_open[idx] = false;
        self.acted_at[idx] = self.current_bet;
    }

    /// Everyone below the new level owes action; `reopen` also lets them
    /// raise again. Without `reopen`, a player gets raising back once the
    /// short raises since they last acted add up to a full increment.
    fn raise_to(&mut self, idx: usize, to: u32, reopen: bool) {
        self.current_bet = to;
        for (j, p) in self.players.iter().enumerate() {
            if j == idx || !p.is_active() {
                continue;
            }
            if p.round_bet() < to {
                self.needs_action[j] = true;
            }
            if reopen || to - self.acted_at[j].min(to) >= self.min_raise {
                self.raise_open[j] = true;
            }
        }
    }

    /// Deals the following streets until someone has to act or the hand is
    /// decided.
    fn close_round(&mut self, dealt: &mut Vec<Card>) -> Result<(), GameError> {
        loop {
            for p in &mut self.players {
                p.end_round();
            }
            self.current_bet = 0;
            self.min_raise = self.big_blind;
            let (next, cards) = match self.street {
                Street::Preflop => (Street::Flop, 3),
                Street::Flop => (Street::Turn, 1),
                Street::Turn => (Street::River, 1),
                Street::River | Street::Showdown | Street::HandComplete => {
                    return self.resolve_showdown();
                }
            };
            self.deck.burn_card()?;
            let new_cards = self.deck.deal(cards)?;
            self.board.extend_from_slice(&new_cards);
            dealt.extend_from_slice(&new_cards);
            self.street = next;
            debug!(street = ?next, board = ?self.board, "street dealt");

            for i in 0..self.players.len() {
                self.needs_action[i] = self.players[i].is_active();
                self.raise_open[i] = true;
                self.acted_at[i] = 0;
            }
            if !self.round_closed() {
                self.to_act = self.first_needing_action(self.button + 1);
                return Ok(());
            }
        }
    }

    fn award_uncontested(&mut self) {
        self.to_act = None;
        let Some(idx) = self.players.iter().position(|p| p.in_hand()) else {
            return;
        };
        let amount = self.pot.total();
        self.players[idx].add_chips(amount);
        self.winners = vec![Winner {
            player_id: self.players[idx].id(),
            amount,
            hand: None,
        }];
        self.street = Street::HandComplete;
        info!(player_id = self.players[idx].id(), amount, "hand won uncontested");
    }

    fn resolve_showdown(&mut self) -> Result<(), GameError> {
        self.street = Street::Showdown;
        self.to_act = None;
        self.showdown = true;

        let mut ranks: Vec<Option<HandRank>> = Vec::with_capacity(self.players.len());
        for p in &self.players {
            if p.in_hand() {
                let mut cards = p.hole_cards().to_vec();
                cards.extend_from_slice(&self.board);
                ranks.push(Some(evaluate(&cards)?));
            } else {
                ranks.push(None);
            }
        }

        let n = self.players.len();
        let seat_from_button = |pos: usize| (pos + n - (self.button + 1) % n) % n;
        let mut won = vec![0u32; n];
        for pot in self.pot.finalize() {
            let mut contenders: Vec<usize> = pot
                .eligible
                .iter()
                .filter_map(|&id| self.index_of(id))
                .collect();
            let Some(best) = contenders.iter().filter_map(|&i| ranks[i]).max() else {
                continue;
            };
            contenders.retain(|&i| ranks[i] == Some(best));
            contenders.sort_by_key(|&i| seat_from_button(i));

            let share = pot.amount / contenders.len() as u32;
            let odd = pot.amount % contenders.len() as u32;
            for (k, &i) in contenders.iter().enumerate() {
                won[i] += share + if k == 0 { odd } else { 0 };
            }
        }

        let mut order: Vec<usize> = (0..n).filter(|&i| won[i] > 0).collect();
        order.sort_by_key(|&i| seat_from_button(i));
        self.winners = order
            .into_iter()
            .map(|i| {
                self.players[i].add_chips(won[i]);
                Winner {
                    player_id: self.players[i].id(),
                    amount: won[i],
                    hand: ranks[i],
                }
            })
            .collect();
        self.street = Street::HandComplete;
        info!(
            winners = ?self.winners.iter().map(|w| (w.player_id, w.amount)).collect::<Vec<_>>(),
            board = ?self.board,
            "showdown resolved"
        );
        Ok(())
    }

    /// Builds the hand-result event. Meaningful once the hand is complete;
    /// before that `result` and `showdown` are empty.
    pub fn record(&self, hand_id: String) -> HandRecord {
        let result = (!self.winners.is_empty()).then(|| {
            self.winners
                .iter()
                .map(|w| format!("p{} wins {}", w.player_id, w.amount))
                .collect::<Vec<_>>()
                .join(", ")
        });
        let showdown = self.showdown.then(|| {
            let mut notes: Vec<String> = self
                .winners
                .iter()
                .filter_map(|w| w.hand.map(|h| h.to_string()))
                .collect();
            notes.dedup();
            let split = self.winners.len() > 1;
            ShowdownInfo {
                winners: self.winners.iter().map(|w| w.player_id).collect(),
                notes: match (split, notes.is_empty()) {
                    (_, true) => None,
                    (true, false) => Some(format!("split pot: {}", notes.join("; "))),
                    (false, false) => Some(notes.join("; ")),
                },
            }
        });
        HandRecord {
            hand_id,
            seed: Some(self.seed),
            actions: self.actions.clone(),
            board: self.board.clone(),
            result,
            ts: Some(timestamp_now()),
            meta: Some(serde_json::json!({
                "button": self.button,
                "small_blind": self.small_blind,
                "big_blind": self.big_blind,
                "stacks": self
                    .players
                    .iter()
                    .map(|p| (p.id(), p.starting_stack(), p.stack()))
                    .collect::<Vec<_>>(),
            })),
            showdown,
        }
    }
}

/// Starts a hand. Players take table positions in slice order.
pub fn new_hand(
    players: &[Seat],
    small_blind: u32,
    big_blind: u32,
    button_position: usize,
    seed: u64,
) -> Result<GameState, GameError> {
    GameState::new(
        players,
        &HandConfig::new(small_blind, big_blind, button_position, seed),
    )
}

pub fn get_current_player(state: &GameState) -> Option<PlayerId> {
    state.current_player()
}

pub fn get_valid_actions(state: &GameState, player_id: PlayerId) -> Vec<LegalAction> {
    state.valid_actions(player_id)
}

pub fn apply_action(state: &mut GameState, action: Action) -> Result<ActionOutcome, GameError> {
    state.apply_action(action)
}

pub fn is_hand_complete(state: &GameState) -> bool {
    state.is_hand_complete()
}

pub fn get_winners(state: &GameState) -> Result<&[Winner], GameError> {
    state.winners()
}

