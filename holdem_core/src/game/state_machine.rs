//! Hand state machine implementation.
//!
//! A hand moves through `PreFlop -> Flop -> Turn -> River -> Showdown ->
//! Complete`, leaving early for `Showdown` once no more betting is possible
//! and for `Complete` once only one participant hasn't folded. Each state is
//! a [`Hand<T>`] wrapping the shared [`HandData`]; [`HandState`] is the enum
//! over all of them that callers hold on to.

use enum_dispatch::enum_dispatch;
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    betting::{BettingRound, RoundPoll},
    constants::{BOARD_SIZE, cards_needed},
    entities::{
        Action, ActionSummary, Blinds, Card, Chips, Deck, FinalBalance, HandStatus, Participant,
        Phase, SeatIndex, Street, Turn,
    },
    errors::{ConfigError, HandError},
    functional,
    ledger::Ledger,
    pot::{self, Contribution, Distribution, Payout, PotLayer},
    settings::HandSettings,
    states::{self, Betting, Complete, Flop, PreFlop, River, Showdown, Stage},
};

/// How a finished hand paid out.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Outcome {
    pub payouts: Vec<Payout>,
    pub pots: Vec<PotLayer>,
    /// Final balance per seat.
    pub balances: Vec<FinalBalance>,
    pub unallocated: Chips,
    /// Whether the hand went to showdown.
    pub contested: bool,
}

/// Mutable hand data shared across all states.
#[derive(Clone, Debug)]
pub struct HandData {
    pub(crate) ledger: Ledger,
    /// The whole board is drawn with the hole cards and revealed street by
    /// street.
    board: [Card; BOARD_SIZE],
    revealed: usize,
    blinds: Blinds,
    small_blind_seat: SeatIndex,
}

impl HandData {
    fn deal(settings: HandSettings, mut deck: Deck) -> Result<Self, ConfigError> {
        let num_players = settings.num_players();
        let needed = cards_needed(num_players);
        let available = deck.remaining();
        if available < needed {
            return Err(ConfigError::DeckTooSmall { needed, available });
        }
        let mut draw = || {
            deck.deal_card()
                .ok_or(ConfigError::DeckTooSmall { needed, available })
        };

        let mut participants = Vec::with_capacity(num_players);
        for (seat, entry) in settings.seats.iter().enumerate() {
            let cards = [draw()?, draw()?];
            participants.push(Participant::new(entry.id, seat, entry.balance, cards));
        }
        let board = [draw()?, draw()?, draw()?, draw()?, draw()?];

        Ok(Self {
            ledger: Ledger::new(participants),
            board,
            revealed: 0,
            blinds: settings.blinds,
            small_blind_seat: settings.small_blind_seat,
        })
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[must_use]
    pub fn board(&self) -> &[Card] {
        &self.board[..self.revealed]
    }

    #[must_use]
    pub const fn blinds(&self) -> Blinds {
        self.blinds
    }

    #[must_use]
    pub const fn small_blind_seat(&self) -> SeatIndex {
        self.small_blind_seat
    }

    #[must_use]
    pub fn big_blind_seat(&self) -> SeatIndex {
        self.ledger.next_seat(self.small_blind_seat)
    }

    fn balances(&self) -> Vec<FinalBalance> {
        self.ledger
            .iter()
            .map(|p| FinalBalance {
                id: p.id,
                balance: p.balance,
            })
            .collect()
    }
}

/// Read-only queries that work in every phase.
#[enum_dispatch]
pub trait HandView {
    fn phase(&self) -> Phase;

    /// Snapshot of the hand. Never has side effects.
    #[must_use]
    fn status(&self) -> HandStatus;
}

/// A hand with data and logic for running it from blinds to payout.
#[derive(Clone, Debug)]
pub struct Hand<T> {
    pub data: HandData,
    pub state: T,
}

impl<T: Stage> HandView for Hand<T> {
    fn phase(&self) -> Phase {
        T::PHASE
    }

    fn status(&self) -> HandStatus {
        let current_bet = self.state.round().map_or_else(
            || self.data.ledger.highest_commitment(),
            BettingRound::current_bet,
        );
        HandStatus {
            phase: T::PHASE,
            round: T::PHASE.round_index(),
            board: self.data.board().to_vec(),
            current_bet,
            pot: self.data.ledger.pot(),
            participants: self.data.ledger.views(None),
        }
    }
}

impl Hand<PreFlop> {
    /// Posts the blinds and opens pre-flop betting two seats after the small
    /// blind, which heads-up is the small blind itself.
    fn start(mut data: HandData) -> HandState {
        let Blinds { small, big } = data.blinds;
        let small_blind_seat = data.small_blind_seat;
        let big_blind_seat = data.big_blind_seat();
        let small_put = data.ledger.post_blind(small_blind_seat, small);
        let big_put = data.ledger.post_blind(big_blind_seat, big);
        debug!(
            "blinds {}: seat {small_blind_seat} posts ${small_put}, seat {big_blind_seat} posts ${big_put}",
            data.blinds
        );

        let current_bet = small_put.max(big_put);
        let start = data.ledger.next_seat(big_blind_seat);
        open_street(data, Street::PreFlop, current_bet, start)
    }
}

impl<T: Betting> Hand<T> {
    fn poll(&self) -> RoundPoll {
        match self.state.round() {
            Some(round) => round.poll(&self.data.ledger),
            None => RoundPoll::Completed(None),
        }
    }

    fn act(&mut self, turn: Turn, action: Action) -> Result<ActionSummary, HandError> {
        let Self { data, state } = self;
        let summary = state.round_mut().apply(&mut data.ledger, turn, action)?;
        Ok(summary)
    }

    fn is_finished(&self) -> bool {
        self.state.round().is_none_or(BettingRound::is_finished)
    }

    /// Decides where the hand goes once this street's betting is done.
    fn conclude(self) -> HandState {
        let Self { data, state } = self;
        let round = state.into_round();
        if data.ledger.num_active() <= 1 {
            return Hand::<Complete>::uncontested(data).into();
        }
        if data.ledger.num_uncapped() <= 1 {
            debug!("no more betting possible after the {}", T::STREET);
            return Hand::<Showdown>::reveal(data).into();
        }
        match T::STREET.next() {
            Some(street) => {
                let start = data.small_blind_seat;
                open_street(data, street, round.current_bet(), start)
            }
            None => Hand::<Showdown>::reveal(data).into(),
        }
    }
}

/// Reveals the board for `street` and opens its betting with action
/// starting at `start`.
fn open_street(
    mut data: HandData,
    street: Street,
    current_bet: Chips,
    start: SeatIndex,
) -> HandState {
    data.revealed = street.revealed();
    debug!("{street}: board {}", format_cards(data.board()));
    let round = BettingRound::open(street, current_bet, data.blinds.big, start, &data.ledger);
    match street {
        Street::PreFlop => Hand {
            data,
            state: PreFlop::from_round(round),
        }
        .into(),
        Street::Flop => Hand {
            data,
            state: Flop::from_round(round),
        }
        .into(),
        Street::Turn => Hand {
            data,
            state: states::Turn::from_round(round),
        }
        .into(),
        Street::River => Hand {
            data,
            state: River::from_round(round),
        }
        .into(),
    }
}

fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl Hand<Showdown> {
    /// Deals out the rest of the board and shows every remaining hand.
    fn reveal(mut data: HandData) -> Self {
        data.revealed = BOARD_SIZE;
        let seats: Vec<SeatIndex> = data
            .ledger
            .iter()
            .filter(|p| !p.folded)
            .map(|p| p.seat)
            .collect();
        let holes: Vec<[Card; 2]> = seats
            .iter()
            .map(|&seat| data.ledger.participant(seat).cards)
            .collect();
        let mut strengths = vec![None; data.ledger.len()];
        for (&seat, strength) in seats
            .iter()
            .zip(functional::strengths(&data.board, &holes))
        {
            data.ledger.show(seat);
            debug!(
                "{} shows {} with {}",
                data.ledger.participant(seat).id,
                format_cards(&data.ledger.participant(seat).cards),
                strength.rank
            );
            strengths[seat] = Some(strength);
        }
        Self {
            data,
            state: Showdown { strengths },
        }
    }
}

impl From<Hand<Showdown>> for Hand<Complete> {
    fn from(value: Hand<Showdown>) -> Self {
        let Hand { data, state } = value;
        let contributions: Vec<Contribution> = data
            .ledger
            .iter()
            .map(|p| Contribution {
                id: p.id,
                committed: p.committed,
                strength: state.strengths[p.seat],
            })
            .collect();
        let distribution = pot::distribute(&contributions);
        Self::settle(data, distribution, true)
    }
}

impl Hand<Complete> {
    fn uncontested(data: HandData) -> Self {
        let total = data.ledger.pot();
        let distribution = data
            .ledger
            .iter()
            .find(|p| !p.folded)
            .map(|p| pot::award_uncontested(p.id, total))
            .unwrap_or_default();
        Self::settle(data, distribution, false)
    }

    fn settle(mut data: HandData, distribution: Distribution, contested: bool) -> Self {
        for payout in &distribution.payouts {
            data.ledger.credit(payout.id, payout.amount);
        }
        info!(
            "hand complete: ${} pot paid in {} payout(s){}",
            data.ledger.pot(),
            distribution.payouts.len(),
            if contested { " at showdown" } else { " uncontested" }
        );
        let outcome = Outcome {
            balances: data.balances(),
            payouts: distribution.payouts,
            pots: distribution.pots,
            unallocated: distribution.unallocated,
            contested,
        };
        Self {
            data,
            state: Complete { outcome },
        }
    }
}

/// Every phase a hand can be in.
#[enum_dispatch(HandView)]
#[derive(Clone, Debug)]
pub enum HandState {
    PreFlop(Hand<PreFlop>),
    Flop(Hand<Flop>),
    Turn(Hand<states::Turn>),
    River(Hand<River>),
    Showdown(Hand<Showdown>),
    Complete(Hand<Complete>),
}

impl HandState {
    /// Validates `settings`, shuffles a fresh deck, deals and posts blinds.
    pub fn new<R: Rng + ?Sized>(settings: HandSettings, rng: &mut R) -> Result<Self, HandError> {
        Self::with_deck(settings, Deck::shuffled(rng))
    }

    /// Like [`HandState::new`] but deals from `deck` as given: two cards
    /// per seat in seat order, then the five board cards.
    pub fn with_deck(settings: HandSettings, deck: Deck) -> Result<Self, HandError> {
        settings.validate()?;
        let data = HandData::deal(settings, deck)?;
        Ok(Hand::<PreFlop>::start(data))
    }

    #[must_use]
    pub fn data(&self) -> &HandData {
        match self {
            Self::PreFlop(hand) => &hand.data,
            Self::Flop(hand) => &hand.data,
            Self::Turn(hand) => &hand.data,
            Self::River(hand) => &hand.data,
            Self::Showdown(hand) => &hand.data,
            Self::Complete(hand) => &hand.data,
        }
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.data().ledger
    }

    /// The betting round in progress, if this is a street of betting.
    #[must_use]
    pub fn round(&self) -> Option<&BettingRound> {
        match self {
            Self::PreFlop(hand) => hand.state.round(),
            Self::Flop(hand) => hand.state.round(),
            Self::Turn(hand) => hand.state.round(),
            Self::River(hand) => hand.state.round(),
            Self::Showdown(_) | Self::Complete(_) => None,
        }
    }

    /// The pending decision, or the last action of a finished street.
    pub fn poll(&self) -> Result<RoundPoll, HandError> {
        match self {
            Self::PreFlop(hand) => Ok(hand.poll()),
            Self::Flop(hand) => Ok(hand.poll()),
            Self::Turn(hand) => Ok(hand.poll()),
            Self::River(hand) => Ok(hand.poll()),
            Self::Showdown(_) | Self::Complete(_) => Err(HandError::NoRoundInProgress),
        }
    }

    /// Resumes the round with the acting participant's decision. `turn`
    /// must come from the decision point being answered.
    pub fn act(&mut self, turn: Turn, action: Action) -> Result<ActionSummary, HandError> {
        match self {
            Self::PreFlop(hand) => hand.act(turn, action),
            Self::Flop(hand) => hand.act(turn, action),
            Self::Turn(hand) => hand.act(turn, action),
            Self::River(hand) => hand.act(turn, action),
            Self::Showdown(_) | Self::Complete(_) => Err(HandError::NoRoundInProgress),
        }
    }

    /// Moves to the next phase if the current one is done, and stays put
    /// while a decision is pending.
    #[must_use]
    pub fn step(self) -> Self {
        match self {
            Self::PreFlop(hand) if hand.is_finished() => hand.conclude(),
            Self::Flop(hand) if hand.is_finished() => hand.conclude(),
            Self::Turn(hand) if hand.is_finished() => hand.conclude(),
            Self::River(hand) if hand.is_finished() => hand.conclude(),
            Self::Showdown(hand) => Self::Complete(hand.into()),
            other => other,
        }
    }

    /// Steps until someone has to decide or the hand is complete.
    #[must_use]
    pub fn advance(self) -> Self {
        let mut hand = self;
        loop {
            if hand.is_complete() || matches!(hand.poll(), Ok(RoundPoll::Suspended(_))) {
                return hand;
            }
            hand = hand.step();
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    pub fn outcome(&self) -> Result<&Outcome, HandError> {
        match self {
            Self::Complete(hand) => Ok(&hand.state.outcome),
            _ => Err(HandError::NotComplete),
        }
    }

    pub fn winners(&self) -> Result<&[Payout], HandError> {
        Ok(&self.outcome()?.payouts)
    }

    pub fn final_balances(&self) -> Result<&[FinalBalance], HandError> {
        Ok(&self.outcome()?.balances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::{ParticipantId, Rank, Suit};

    fn card(value: u8, suit: Suit) -> Card {
        Card(value, suit)
    }

    /// Deck dealing `holes` in seat order and then `board`, followed by the
    /// remaining cards.
    fn stacked(holes: &[[Card; 2]], board: [Card; 5]) -> Deck {
        let mut cards: Vec<Card> = holes.iter().flatten().copied().collect();
        cards.extend(board);
        let rest: Vec<Card> = (0..52)
            .filter_map(Card::from_index)
            .filter(|c| !cards.contains(c))
            .collect();
        cards.extend(rest);
        Deck::stacked(cards).unwrap()
    }

    fn settings(stacks: &[Chips]) -> HandSettings {
        let mut builder = HandSettings::builder().blinds(5, 10);
        for (i, &stack) in stacks.iter().enumerate() {
            builder = builder.seat(i as u32 + 1, stack);
        }
        builder.build().unwrap()
    }

    fn decide(hand: &mut HandState, action: Action) -> ActionSummary {
        let Ok(RoundPoll::Suspended(point)) = hand.poll() else {
            panic!("no decision pending");
        };
        hand.act(point.turn, action).unwrap()
    }

    fn royal_board() -> [Card; 5] {
        [
            card(12, Suit::Spade),
            card(11, Suit::Spade),
            card(10, Suit::Spade),
            card(3, Suit::Heart),
            card(1, Suit::Club),
        ]
    }

    #[test]
    fn test_deal_posts_blinds() {
        let deck = stacked(
            &[
                [card(9, Suit::Spade), card(8, Suit::Spade)],
                [card(0, Suit::Heart), card(5, Suit::Diamond)],
                [card(4, Suit::Club), card(4, Suit::Diamond)],
            ],
            royal_board(),
        );
        let hand = HandState::with_deck(settings(&[100, 100, 100]), deck).unwrap();
        assert_eq!(hand.phase(), Phase::PreFlop);

        let status = hand.status();
        assert!(status.board.is_empty());
        assert_eq!(status.pot, 15);
        assert_eq!(status.current_bet, 10);
        assert_eq!(status.participants[0].committed, 5);
        assert_eq!(status.participants[1].committed, 10);
        assert!(status.participants.iter().all(|p| p.cards.is_none()));

        // Three-handed, the seat after the big blind acts first.
        let Ok(RoundPoll::Suspended(point)) = hand.poll() else {
            panic!("expected a decision");
        };
        assert_eq!(point.actor.seat, 2);
        assert_eq!(
            point.actor.cards,
            Some([card(4, Suit::Club), card(4, Suit::Diamond)])
        );
    }

    #[test]
    fn test_short_blind_is_capped() {
        let hand = HandState::with_deck(settings(&[100, 4]), Deck::default()).unwrap();
        let status = hand.status();
        assert_eq!(status.participants[1].committed, 4);
        assert!(status.participants[1].capped);
        assert_eq!(status.current_bet, 5);
    }

    #[test]
    fn test_heads_up_fold_ends_without_board() {
        let mut hand = HandState::with_deck(settings(&[100, 100]), Deck::default()).unwrap();
        let summary = decide(&mut hand, Action::Fold);
        assert_eq!(summary.id, ParticipantId(1));

        assert_eq!(hand.poll(), Ok(RoundPoll::Completed(Some(summary))));
        let hand = hand.advance();
        assert!(hand.is_complete());
        assert!(hand.status().board.is_empty());

        let outcome = hand.outcome().unwrap();
        assert!(!outcome.contested);
        assert_eq!(outcome.payouts.len(), 1);
        assert_eq!(outcome.payouts[0].id, ParticipantId(2));
        assert_eq!(outcome.payouts[0].amount, 15);
        assert_eq!(outcome.payouts[0].strength, None);
        assert_eq!(
            hand.final_balances().unwrap(),
            &[
                FinalBalance {
                    id: ParticipantId(1),
                    balance: 95
                },
                FinalBalance {
                    id: ParticipantId(2),
                    balance: 105
                }
            ]
        );
    }

    #[test]
    fn test_checked_down_hand_reaches_showdown() {
        let deck = stacked(
            &[
                [card(9, Suit::Spade), card(8, Suit::Spade)],
                [card(0, Suit::Heart), card(5, Suit::Diamond)],
            ],
            royal_board(),
        );
        let mut hand = HandState::with_deck(settings(&[100, 100]), deck).unwrap();
        assert_eq!(hand.winners(), Err(HandError::NotComplete));

        decide(&mut hand, Action::Call);
        decide(&mut hand, Action::Call);
        let mut phases = vec![hand.phase()];
        hand = hand.step();
        while !hand.is_complete() {
            phases.push(hand.phase());
            if matches!(hand.poll(), Ok(RoundPoll::Suspended(_))) {
                decide(&mut hand, Action::Call);
            } else {
                hand = hand.step();
            }
        }
        phases.dedup();
        assert_eq!(
            phases,
            vec![
                Phase::PreFlop,
                Phase::Flop,
                Phase::Turn,
                Phase::River,
                Phase::Showdown
            ]
        );

        let outcome = hand.outcome().unwrap();
        assert!(outcome.contested);
        assert_eq!(outcome.payouts[0].id, ParticipantId(1));
        assert_eq!(
            outcome.payouts[0].strength.map(|s| s.rank),
            Some(Rank::StraightFlush)
        );
        assert_eq!(hand.status().board.len(), 5);
        assert!(hand.status().participants.iter().all(|p| p.cards.is_some()));
        assert_eq!(hand.ledger().total_chips(), 200);
    }

    #[test]
    fn test_all_in_runs_out_the_board() {
        let mut hand = HandState::with_deck(settings(&[50, 200]), Deck::default()).unwrap();
        decide(&mut hand, Action::AllIn);
        decide(&mut hand, Action::Call);
        let hand = hand.advance();
        assert!(hand.is_complete());
        assert_eq!(hand.status().board.len(), 5);
        let total: Chips = hand.final_balances().unwrap().iter().map(|b| b.balance).sum();
        assert_eq!(total + hand.outcome().unwrap().unallocated, 250);
    }

    #[test]
    fn test_table_at_chip_limit_plays_out() {
        let settings = HandSettings::builder()
            .blinds(5, 10)
            .seat(1, Chips::MAX - 100)
            .seat(2, 100)
            .build()
            .unwrap();
        let mut hand = HandState::with_deck(settings, Deck::default()).unwrap();
        decide(&mut hand, Action::Call);
        decide(&mut hand, Action::AllIn);
        decide(&mut hand, Action::Call);
        assert_eq!(hand.status().pot, 200);
        assert_eq!(hand.ledger().total_chips(), Chips::MAX);

        let hand = hand.advance();
        assert!(hand.is_complete());
        let total: Chips = hand.final_balances().unwrap().iter().map(|b| b.balance).sum();
        assert_eq!(total + hand.outcome().unwrap().unallocated, Chips::MAX);
    }

    #[test]
    fn test_streets_open_at_their_first_seat() {
        let settings = HandSettings::builder()
            .blinds(5, 10)
            .seat(1, 100)
            .seat(2, 100)
            .seat(3, 100)
            .small_blind_seat(1)
            .build()
            .unwrap();
        let mut hand = HandState::with_deck(settings, Deck::default()).unwrap();

        // Pre-flop starts after the big blind in seat 2.
        let Ok(RoundPoll::Suspended(point)) = hand.poll() else {
            panic!("expected a decision");
        };
        assert_eq!(point.turn.street, Street::PreFlop);
        assert_eq!(point.actor.seat, 0);
        for _ in 0..3 {
            decide(&mut hand, Action::Call);
        }

        // Later streets start at the small blind.
        let hand = hand.advance();
        let Ok(RoundPoll::Suspended(point)) = hand.poll() else {
            panic!("expected a decision");
        };
        assert_eq!(point.turn.street, Street::Flop);
        assert_eq!(point.actor.seat, 1);
        assert_eq!(point.options.call, Some(0));
        assert_eq!(hand.status().board.len(), 3);
    }

    #[test]
    fn test_act_outside_betting_is_rejected() {
        let mut hand = HandState::with_deck(settings(&[100, 100]), Deck::default()).unwrap();
        let turn = hand.round().unwrap().turn();
        hand.act(turn, Action::Fold).unwrap();
        let mut hand = hand.advance();
        assert_eq!(
            hand.act(turn, Action::Call),
            Err(HandError::NoRoundInProgress)
        );
        assert_eq!(hand.poll(), Err(HandError::NoRoundInProgress));
    }

    #[test]
    fn test_step_waits_for_pending_decision() {
        let hand = HandState::with_deck(settings(&[100, 100]), Deck::default()).unwrap();
        let before = hand.status();
        let hand = hand.step();
        assert_eq!(hand.phase(), Phase::PreFlop);
        assert_eq!(hand.status(), before);
    }

    #[test]
    fn test_deck_too_small() {
        let deck = Deck::stacked((0..8).filter_map(Card::from_index).collect()).unwrap();
        let err = HandState::with_deck(settings(&[100, 100]), deck).unwrap_err();
        assert_eq!(
            err,
            HandError::Config(ConfigError::DeckTooSmall {
                needed: 9,
                available: 8
            })
        );
    }
}
