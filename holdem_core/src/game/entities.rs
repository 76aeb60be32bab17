use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

use super::{
    constants::{DECK_SIZE, NUM_VALUES},
    errors::{ActionError, ConfigError},
};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Club, Self::Diamond, Self::Heart, Self::Spade];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Diamond => "♦",
            Self::Heart => "♥",
            Self::Spade => "♠",
        };
        write!(f, "{repr}")
    }
}

/// Card value, from 0 (a two) up to 12 (an ace).
pub type Value = u8;

/// A card is a value (two=0u8 ... ace=12u8) and a suit.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub Value, pub Suit);

impl Card {
    /// Maps a deck index in `0..52` onto a card; the value is `index / 4`
    /// and the suit is `index % 4`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= DECK_SIZE {
            return None;
        }
        Some(Self((index / 4) as Value, Suit::ALL[index % 4]))
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.0 as usize * 4 + self.1.index()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            9 => write!(f, "J")?,
            10 => write!(f, "Q")?,
            11 => write!(f, "K")?,
            12 => write!(f, "A")?,
            v => write!(f, "{}", u16::from(v) + 2)?,
        }
        write!(f, "{}", self.1)
    }
}

/// Deck of cards dealt from the top.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    deck_idx: usize,
}

impl Deck {
    /// A full 52-card deck in a random order.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.cards.shuffle(rng);
        deck
    }

    /// A deck that deals exactly the given cards in order. Useful when the
    /// caller already owns a shuffled deal or wants a reproducible one.
    pub fn stacked(cards: Vec<Card>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::with_capacity(cards.len());
        for card in &cards {
            if card.0 >= NUM_VALUES {
                return Err(ConfigError::InvalidCard(*card));
            }
            if !seen.insert(*card) {
                return Err(ConfigError::DuplicateCard(*card));
            }
        }
        Ok(Self { cards, deck_idx: 0 })
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        let card = self.cards.get(self.deck_idx).copied()?;
        self.deck_idx += 1;
        Some(card)
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.deck_idx
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = (0..DECK_SIZE).filter_map(Card::from_index).collect();
        Self { cards, deck_idx: 0 }
    }
}

/// Type alias for whole chips. Stacks, blinds and bets are all counted in
/// whole chips.
pub type Chips = u32;

/// Type alias for seat positions during the hand.
pub type SeatIndex = usize;

/// Identity of a participant, assigned by whoever seats them.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ParticipantId(pub u32);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0)
    }
}

impl From<u32> for ParticipantId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Blinds {
    pub small: Chips,
    pub big: Chips,
}

impl fmt::Display for Blinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}/{}", self.small, self.big)
    }
}

/// Hand categories, weakest first.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Rank {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HighCard => "high card",
            Self::OnePair => "one pair",
            Self::TwoPair => "two pair",
            Self::ThreeOfAKind => "three of a kind",
            Self::Straight => "straight",
            Self::Flush => "flush",
            Self::FullHouse => "full house",
            Self::FourOfAKind => "four of a kind",
            Self::StraightFlush => "straight flush",
        };
        write!(f, "{repr}")
    }
}

/// Comparable strength of a best five-card hand. The category dominates;
/// `value` breaks ties within a category and holds the kickers as base-13
/// digits, most significant first.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct HandStrength {
    pub rank: Rank,
    pub value: u32,
}

impl fmt::Display for HandStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.rank, self.value)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Action {
    AllIn,
    /// Matches the current bet. Calling nothing is a check.
    Call,
    Fold,
    /// Raises the current bet by the given amount.
    Raise(Chips),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::AllIn => write!(f, "all-in"),
            Self::Call => write!(f, "call"),
            Self::Fold => write!(f, "fold"),
            Self::Raise(amount) => write!(f, "raise by ${amount}"),
        }
    }
}

/// Inclusive bounds on how much the current bet may be raised by.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RaiseWindow {
    pub min: Chips,
    pub max: Chips,
}

impl RaiseWindow {
    #[must_use]
    pub const fn contains(&self, amount: Chips) -> bool {
        self.min <= amount && amount <= self.max
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ActionChoice {
    AllIn,
    Call(Chips),
    Fold,
    Raise(RaiseWindow),
}

impl fmt::Display for ActionChoice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::AllIn => write!(f, "all-in"),
            Self::Call(0) => write!(f, "check"),
            Self::Call(amount) => write!(f, "call (== ${amount})"),
            Self::Fold => write!(f, "fold"),
            Self::Raise(RaiseWindow { min, max }) => write!(f, "raise (${min}..=${max})"),
        }
    }
}

/// Legal options for the acting participant. Fold is always available;
/// the rest are present only when legal.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ActionChoices {
    pub fold: bool,
    pub all_in: bool,
    /// Amount needed to call, if calling is allowed.
    pub call: Option<Chips>,
    pub raise: Option<RaiseWindow>,
}

impl Default for ActionChoices {
    fn default() -> Self {
        Self {
            fold: true,
            all_in: false,
            call: None,
            raise: None,
        }
    }
}

impl ActionChoices {
    /// Checks an action against these options, including the raise bounds.
    pub fn permits(&self, action: &Action) -> Result<(), ActionError> {
        let available = match action {
            Action::AllIn => self.all_in,
            Action::Call => self.call.is_some(),
            Action::Fold => self.fold,
            Action::Raise(amount) => {
                let Some(window) = self.raise else {
                    return Err(ActionError::Unavailable { action: *action });
                };
                if !window.contains(*amount) {
                    return Err(ActionError::RaiseOutOfRange {
                        amount: *amount,
                        min: window.min,
                        max: window.max,
                    });
                }
                true
            }
        };
        if available {
            Ok(())
        } else {
            Err(ActionError::Unavailable { action: *action })
        }
    }

    #[must_use]
    pub fn choices(&self) -> Vec<ActionChoice> {
        let mut choices = Vec::with_capacity(4);
        if self.fold {
            choices.push(ActionChoice::Fold);
        }
        if let Some(amount) = self.call {
            choices.push(ActionChoice::Call(amount));
        }
        if let Some(window) = self.raise {
            choices.push(ActionChoice::Raise(window));
        }
        if self.all_in {
            choices.push(ActionChoice::AllIn);
        }
        choices
    }
}

impl fmt::Display for ActionChoices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let choices = self.choices();
        let num_options = choices.len();
        let repr = choices
            .iter()
            .enumerate()
            .map(|(i, action_choice)| {
                let repr = action_choice.to_string();
                match i {
                    0 if num_options == 1 => repr,
                    0 if num_options == 2 => format!("{repr} "),
                    0 if num_options >= 3 => format!("{repr}, "),
                    i if i == num_options - 1 && num_options != 1 => format!("or {repr}"),
                    _ => format!("{repr}, "),
                }
            })
            .collect::<String>();
        write!(f, "{repr}")
    }
}

/// Effect of one applied action.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ActionSummary {
    pub id: ParticipantId,
    pub action: Action,
    /// Chips moved from the stack into the pot by this action.
    pub put: Chips,
    pub balance: Chips,
}

impl fmt::Display for ActionSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let verb = match self.action {
            Action::AllIn => "goes all-in".to_string(),
            Action::Call if self.put == 0 => "checks".to_string(),
            Action::Call => "calls".to_string(),
            Action::Fold => "folds".to_string(),
            Action::Raise(amount) => format!("raises by ${amount}"),
        };
        write!(
            f,
            "{} {verb}, puts ${} in and has ${} left",
            self.id, self.put, self.balance
        )
    }
}

/// The four betting rounds of a hand.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Street {
    PreFlop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// Community cards visible while this street is bet.
    #[must_use]
    pub const fn revealed(self) -> usize {
        match self {
            Self::PreFlop => 0,
            Self::Flop => 3,
            Self::Turn => 4,
            Self::River => 5,
        }
    }

    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::PreFlop => Some(Self::Flop),
            Self::Flop => Some(Self::Turn),
            Self::Turn => Some(Self::River),
            Self::River => None,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::PreFlop => "pre-flop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
        };
        write!(f, "{repr}")
    }
}

/// Where a hand is in its lifecycle.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Phase {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
    Complete,
}

impl Phase {
    /// Index of the betting round; showdown and completion count as round 4.
    #[must_use]
    pub const fn round_index(self) -> usize {
        match self {
            Self::PreFlop => 0,
            Self::Flop => 1,
            Self::Turn => 2,
            Self::River => 3,
            Self::Showdown | Self::Complete => 4,
        }
    }
}

impl From<Street> for Phase {
    fn from(value: Street) -> Self {
        match value {
            Street::PreFlop => Self::PreFlop,
            Street::Flop => Self::Flop,
            Street::Turn => Self::Turn,
            Street::River => Self::River,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::PreFlop => "pre-flop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
            Self::Showdown => "showdown",
            Self::Complete => "complete",
        };
        write!(f, "{repr}")
    }
}

/// Token identifying one decision point. Resuming a round requires the
/// token of the decision currently pending.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Turn {
    pub street: Street,
    pub seq: usize,
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}#{}", self.street, self.seq)
    }
}

/// A participant's entry in the hand's ledger.
#[derive(Clone, Debug)]
pub struct Participant {
    pub id: ParticipantId,
    pub seat: SeatIndex,
    pub balance: Chips,
    /// Chips put into the pot during this hand.
    pub committed: Chips,
    pub cards: [Card; 2],
    pub folded: bool,
    /// All-in, or matched the most anyone else can still put in.
    pub capped: bool,
    pub showing: bool,
}

impl Participant {
    #[must_use]
    pub fn new(id: ParticipantId, seat: SeatIndex, balance: Chips, cards: [Card; 2]) -> Self {
        Self {
            id,
            seat,
            balance,
            committed: 0,
            cards,
            folded: false,
            capped: false,
            showing: false,
        }
    }

    /// Everything this participant brought into the hand.
    #[must_use]
    pub const fn stake(&self) -> Chips {
        self.balance + self.committed
    }

    #[must_use]
    pub fn view(&self, reveal: bool) -> ParticipantView {
        ParticipantView {
            id: self.id,
            seat: self.seat,
            balance: self.balance,
            committed: self.committed,
            folded: self.folded,
            capped: self.capped,
            cards: (reveal || self.showing).then_some(self.cards),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ParticipantView {
    pub id: ParticipantId,
    pub seat: SeatIndex,
    pub balance: Chips,
    pub committed: Chips,
    pub folded: bool,
    pub capped: bool,
    /// Hole cards, only present for the acting participant or after they
    /// were shown down.
    pub cards: Option<[Card; 2]>,
}

impl fmt::Display for ParticipantView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (seat {}): ${} behind, ${} in",
            self.id, self.seat, self.balance, self.committed
        )?;
        if self.folded {
            write!(f, ", folded")?;
        } else if self.capped {
            write!(f, ", capped")?;
        }
        if let Some([a, b]) = self.cards {
            write!(f, " [{a} {b}]")?;
        }
        Ok(())
    }
}

/// Read-only snapshot of a hand.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct HandStatus {
    pub phase: Phase,
    pub round: usize,
    pub board: Vec<Card>,
    pub current_bet: Chips,
    pub pot: Chips,
    pub participants: Vec<ParticipantView>,
}

/// What the acting participant is asked to decide on.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DecisionPoint {
    pub turn: Turn,
    pub actor: ParticipantView,
    pub current_bet: Chips,
    pub options: ActionChoices,
    /// Previous action this round; `None` on the round's first decision.
    pub previous: Option<ActionSummary>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FinalBalance {
    pub id: ParticipantId,
    pub balance: Chips,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    // === Card Tests ===

    #[test]
    fn test_card_from_index() {
        assert_eq!(Card::from_index(0), Some(Card(0, Suit::Club)));
        assert_eq!(Card::from_index(7), Some(Card(1, Suit::Spade)));
        assert_eq!(Card::from_index(51), Some(Card(12, Suit::Spade)));
        assert_eq!(Card::from_index(52), None);
    }

    #[test]
    fn test_card_index_inverts_from_index() {
        for i in 0..DECK_SIZE {
            let card = Card::from_index(i).unwrap();
            assert_eq!(card.index(), i);
        }
    }

    #[test]
    fn test_card_display() {
        assert_eq!(Card(0, Suit::Heart).to_string(), "2♥");
        assert_eq!(Card(8, Suit::Club).to_string(), "10♣");
        assert_eq!(Card(9, Suit::Diamond).to_string(), "J♦");
        assert_eq!(Card(12, Suit::Spade).to_string(), "A♠");
    }

    // === Deck Tests ===

    #[test]
    fn test_deck_default_has_every_card_once() {
        let mut deck = Deck::default();
        let mut seen = HashSet::new();
        while let Some(card) = deck.deal_card() {
            assert!(seen.insert(card));
        }
        assert_eq!(seen.len(), DECK_SIZE);
        assert_eq!(deck.remaining(), 0);
    }

    #[test]
    fn test_deck_shuffled_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut deck = Deck::shuffled(&mut rng);
        assert_eq!(deck.remaining(), DECK_SIZE);
        let mut seen = HashSet::new();
        while let Some(card) = deck.deal_card() {
            assert!(seen.insert(card));
        }
        assert_eq!(seen.len(), DECK_SIZE);
    }

    #[test]
    fn test_deck_stacked_rejects_duplicates() {
        let cards = vec![Card(3, Suit::Club), Card(4, Suit::Club), Card(3, Suit::Club)];
        let err = Deck::stacked(cards).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateCard(Card(3, Suit::Club)));
    }

    #[test]
    fn test_deck_stacked_deals_in_order() {
        let mut deck = Deck::stacked(vec![Card(5, Suit::Heart), Card(1, Suit::Spade)]).unwrap();
        assert_eq!(deck.deal_card(), Some(Card(5, Suit::Heart)));
        assert_eq!(deck.deal_card(), Some(Card(1, Suit::Spade)));
        assert_eq!(deck.deal_card(), None);
    }

    // === Rank Tests ===

    #[test]
    fn test_rank_ordering() {
        assert!(Rank::HighCard < Rank::OnePair);
        assert!(Rank::OnePair < Rank::TwoPair);
        assert!(Rank::TwoPair < Rank::ThreeOfAKind);
        assert!(Rank::ThreeOfAKind < Rank::Straight);
        assert!(Rank::Straight < Rank::Flush);
        assert!(Rank::Flush < Rank::FullHouse);
        assert!(Rank::FullHouse < Rank::FourOfAKind);
        assert!(Rank::FourOfAKind < Rank::StraightFlush);
    }

    #[test]
    fn test_strength_rank_dominates_value() {
        let two_pair = HandStrength {
            rank: Rank::TwoPair,
            value: 0,
        };
        let one_pair = HandStrength {
            rank: Rank::OnePair,
            value: u32::MAX,
        };
        assert!(two_pair > one_pair);
    }

    // === ActionChoices Tests ===

    #[test]
    fn test_action_choices_permits() {
        let choices = ActionChoices {
            fold: true,
            all_in: true,
            call: Some(20),
            raise: Some(RaiseWindow { min: 20, max: 80 }),
        };
        assert!(choices.permits(&Action::Fold).is_ok());
        assert!(choices.permits(&Action::Call).is_ok());
        assert!(choices.permits(&Action::AllIn).is_ok());
        assert!(choices.permits(&Action::Raise(20)).is_ok());
        assert!(choices.permits(&Action::Raise(80)).is_ok());
        assert_eq!(
            choices.permits(&Action::Raise(81)),
            Err(ActionError::RaiseOutOfRange {
                amount: 81,
                min: 20,
                max: 80
            })
        );
    }

    #[test]
    fn test_action_choices_rejects_missing_options() {
        let choices = ActionChoices::default();
        assert!(choices.permits(&Action::Fold).is_ok());
        assert_eq!(
            choices.permits(&Action::Call),
            Err(ActionError::Unavailable {
                action: Action::Call
            })
        );
        assert_eq!(
            choices.permits(&Action::Raise(10)),
            Err(ActionError::Unavailable {
                action: Action::Raise(10)
            })
        );
        assert!(choices.permits(&Action::AllIn).is_err());
    }

    #[test]
    fn test_action_choices_display() {
        let choices = ActionChoices {
            fold: true,
            all_in: false,
            call: Some(0),
            raise: Some(RaiseWindow { min: 10, max: 190 }),
        };
        assert_eq!(choices.to_string(), "fold, check, or raise ($10..=$190)");

        let choices = ActionChoices {
            all_in: true,
            ..ActionChoices::default()
        };
        assert_eq!(choices.to_string(), "fold or all-in");
        assert_eq!(ActionChoices::default().to_string(), "fold");
    }

    #[test]
    fn test_action_summary_display() {
        let summary = ActionSummary {
            id: ParticipantId(3),
            action: Action::Call,
            put: 0,
            balance: 90,
        };
        assert_eq!(
            summary.to_string(),
            "player 3 checks, puts $0 in and has $90 left"
        );
        let summary = ActionSummary {
            action: Action::Raise(20),
            put: 30,
            balance: 60,
            ..summary
        };
        assert_eq!(
            summary.to_string(),
            "player 3 raises by $20, puts $30 in and has $60 left"
        );
    }

    // === Street/Phase Tests ===

    #[test]
    fn test_street_reveals() {
        assert_eq!(Street::PreFlop.revealed(), 0);
        assert_eq!(Street::Flop.revealed(), 3);
        assert_eq!(Street::Turn.revealed(), 4);
        assert_eq!(Street::River.revealed(), 5);
        assert_eq!(Street::River.next(), None);
        assert_eq!(Street::PreFlop.next(), Some(Street::Flop));
    }

    #[test]
    fn test_phase_round_index() {
        assert_eq!(Phase::from(Street::Turn).round_index(), 2);
        assert_eq!(Phase::Showdown.round_index(), 4);
        assert_eq!(Phase::Complete.round_index(), 4);
    }

    // === Participant Tests ===

    #[test]
    fn test_participant_view_hides_cards() {
        let mut participant = Participant::new(
            ParticipantId(4),
            1,
            100,
            [Card(12, Suit::Heart), Card(11, Suit::Heart)],
        );
        assert_eq!(participant.view(false).cards, None);
        assert!(participant.view(true).cards.is_some());
        participant.showing = true;
        assert!(participant.view(false).cards.is_some());
    }

    #[test]
    fn test_participant_view_display() {
        let mut participant =
            Participant::new(ParticipantId(2), 0, 90, [Card(0, Suit::Club), Card(1, Suit::Club)]);
        participant.committed = 10;
        participant.capped = true;
        assert_eq!(
            participant.view(false).to_string(),
            "player 2 (seat 0): $90 behind, $10 in, capped"
        );
        assert_eq!(participant.stake(), 100);
    }
}
