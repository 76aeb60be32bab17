//! Decision sources for the acting participant.

use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::VecDeque;

use crate::game::{
    entities::{Action, Card, DecisionPoint, HandStatus, Rank},
    functional::eval,
};

// === Hand Strength Base Values ===
// These represent the baseline strength for each poker hand rank

/// Hand strength for high card (weakest hand: 10%)
const STRENGTH_HIGH_CARD: f32 = 0.1;

/// Hand strength for one pair (25% = beats high card)
const STRENGTH_ONE_PAIR: f32 = 0.25;

const STRENGTH_TWO_PAIR: f32 = 0.40;

const STRENGTH_THREE_OF_A_KIND: f32 = 0.55;

const STRENGTH_STRAIGHT: f32 = 0.70;

const STRENGTH_FLUSH: f32 = 0.75;

const STRENGTH_FULL_HOUSE: f32 = 0.85;

const STRENGTH_FOUR_OF_A_KIND: f32 = 0.95;

/// Hand strength for straight flush (99% = nearly unbeatable)
const STRENGTH_STRAIGHT_FLUSH: f32 = 0.99;

/// Anything that can answer a decision point: a bot, a script, or a
/// front-end relaying a human's choice.
pub trait Decide {
    /// Picks an action for `point`. Returning an action that isn't among
    /// `point.options` gets the decider asked again, a bounded number of
    /// times.
    fn decide(&mut self, point: &DecisionPoint, status: &HandStatus) -> Action;
}

/// Thresholds for [`RandomBot`].
///
/// All threshold values are hand strength floats in range [0.0, 1.0].
/// Higher threshold = more conservative (tighter play).
#[derive(Clone, Debug)]
pub struct DecisionConfig {
    /// Hand strength below this = fold unless checking is free.
    pub fold_threshold: f32,
    /// Hand strength at or above this = consider raising.
    pub raise_threshold: f32,
    /// Chance of raising the minimum with a hand below the fold threshold.
    pub bluff_frequency: f32,
    /// Chance of calling with a medium-strength hand.
    pub call_probability: f32,
    /// Chance of raising with a strong hand instead of calling.
    pub raise_probability: f32,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            fold_threshold: 0.12,
            raise_threshold: 0.28,
            bluff_frequency: 0.05,
            call_probability: 0.6,
            raise_probability: 0.5,
        }
    }
}

/// Estimates how good `cards` plus `board` are, from 0.0 to 1.0.
#[must_use]
pub fn estimate_strength(cards: &[Card], board: &[Card]) -> f32 {
    if cards.is_empty() {
        return 0.0;
    }
    let mut all_cards = Vec::with_capacity(cards.len() + board.len());
    all_cards.extend_from_slice(cards);
    all_cards.extend_from_slice(board);

    let base_strength = match eval(&all_cards).rank {
        Rank::HighCard => STRENGTH_HIGH_CARD,
        Rank::OnePair => STRENGTH_ONE_PAIR,
        Rank::TwoPair => STRENGTH_TWO_PAIR,
        Rank::ThreeOfAKind => STRENGTH_THREE_OF_A_KIND,
        Rank::Straight => STRENGTH_STRAIGHT,
        Rank::Flush => STRENGTH_FLUSH,
        Rank::FullHouse => STRENGTH_FULL_HOUSE,
        Rank::FourOfAKind => STRENGTH_FOUR_OF_A_KIND,
        Rank::StraightFlush => STRENGTH_STRAIGHT_FLUSH,
    };

    // High hole cards nudge the estimate within a rank.
    let max_value = cards.iter().map(|c| c.0).max().unwrap_or(0);
    let kicker_bonus = (f32::from(max_value) / 12.0) * 0.1;
    (base_strength + kicker_bonus).min(1.0)
}

/// Strength-weighted random play among the legal options.
#[derive(Debug)]
pub struct RandomBot {
    rng: StdRng,
    config: DecisionConfig,
}

impl RandomBot {
    /// Bot whose choices are reproducible for a given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, DecisionConfig::default())
    }

    #[must_use]
    pub fn with_config(seed: u64, config: DecisionConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            config,
        }
    }

    fn chance(&mut self, p: f32) -> bool {
        self.rng.random_bool(f64::from(p.clamp(0.0, 1.0)))
    }
}

impl Default for RandomBot {
    fn default() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            config: DecisionConfig::default(),
        }
    }
}

impl Decide for RandomBot {
    fn decide(&mut self, point: &DecisionPoint, status: &HandStatus) -> Action {
        let options = point.options;
        let cards = point.actor.cards.map_or_else(Vec::new, Vec::from);
        let strength = estimate_strength(&cards, &status.board);
        let can_check = options.call == Some(0);

        if strength < self.config.fold_threshold {
            if can_check {
                return Action::Call;
            }
            return match options.raise {
                Some(window) if self.chance(self.config.bluff_frequency) => {
                    Action::Raise(window.min)
                }
                _ => Action::Fold,
            };
        }

        if strength < self.config.raise_threshold {
            if can_check {
                return Action::Call;
            }
            if self.chance(self.config.call_probability) {
                if options.call.is_some() {
                    return Action::Call;
                }
                if options.all_in {
                    return Action::AllIn;
                }
            }
            return Action::Fold;
        }

        if let Some(window) = options.raise {
            if self.chance(self.config.raise_probability) {
                return Action::Raise(self.rng.random_range(window.min..=window.max));
            }
        }
        if options.call.is_some() {
            Action::Call
        } else if options.all_in {
            Action::AllIn
        } else {
            Action::Fold
        }
    }
}

/// Checks or calls whenever it can, and goes all-in when that's the only
/// way to stay in.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassiveBot;

impl Decide for PassiveBot {
    fn decide(&mut self, point: &DecisionPoint, _status: &HandStatus) -> Action {
        if point.options.call.is_some() {
            Action::Call
        } else if point.options.all_in {
            Action::AllIn
        } else {
            Action::Fold
        }
    }
}

/// Replays a fixed list of actions, then folds.
#[derive(Clone, Debug, Default)]
pub struct Scripted {
    actions: VecDeque<Action>,
}

impl Scripted {
    #[must_use]
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.actions.len()
    }
}

impl Decide for Scripted {
    fn decide(&mut self, _point: &DecisionPoint, _status: &HandStatus) -> Action {
        self.actions.pop_front().unwrap_or(Action::Fold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::{
        ActionChoices, Chips, ParticipantId, ParticipantView, Phase, RaiseWindow, Street, Suit,
        Turn,
    };

    fn point(cards: [Card; 2], options: ActionChoices) -> DecisionPoint {
        DecisionPoint {
            turn: Turn {
                street: Street::PreFlop,
                seq: 0,
            },
            actor: ParticipantView {
                id: ParticipantId(1),
                seat: 0,
                balance: 90,
                committed: 10,
                folded: false,
                capped: false,
                cards: Some(cards),
            },
            current_bet: 20,
            options,
            previous: None,
        }
    }

    fn status(board: Vec<Card>, pot: Chips) -> HandStatus {
        HandStatus {
            phase: Phase::PreFlop,
            round: 0,
            board,
            current_bet: 20,
            pot,
            participants: Vec::new(),
        }
    }

    fn facing_bet() -> ActionChoices {
        ActionChoices {
            fold: true,
            all_in: true,
            call: Some(10),
            raise: Some(RaiseWindow { min: 10, max: 80 }),
        }
    }

    #[test]
    fn test_estimate_strength_orders_ranks() {
        let board = [
            Card(12, Suit::Heart),
            Card(12, Suit::Club),
            Card(3, Suit::Spade),
        ];
        let trips = estimate_strength(&[Card(12, Suit::Spade), Card(0, Suit::Club)], &board);
        let pair = estimate_strength(&[Card(5, Suit::Spade), Card(0, Suit::Club)], &board);
        assert!(trips > pair);
        assert_eq!(estimate_strength(&[], &board), 0.0);
    }

    #[test]
    fn test_random_bot_only_picks_legal_actions() {
        let mut bot = RandomBot::new(42);
        let hands = [
            [Card(12, Suit::Spade), Card(12, Suit::Heart)],
            [Card(5, Suit::Club), Card(0, Suit::Diamond)],
            [Card(9, Suit::Club), Card(8, Suit::Club)],
        ];
        for cards in hands {
            for _ in 0..200 {
                let point = point(cards, facing_bet());
                let action = bot.decide(&point, &status(Vec::new(), 30));
                assert!(point.options.permits(&action).is_ok(), "{action:?}");
            }
        }
    }

    #[test]
    fn test_random_bot_is_reproducible() {
        let cards = [Card(12, Suit::Spade), Card(11, Suit::Spade)];
        let mut a = RandomBot::new(7);
        let mut b = RandomBot::new(7);
        for _ in 0..50 {
            let point = point(cards, facing_bet());
            let status = status(Vec::new(), 30);
            assert_eq!(a.decide(&point, &status), b.decide(&point, &status));
        }
    }

    #[test]
    fn test_random_bot_checks_weak_hand_when_free() {
        let mut bot = RandomBot::new(3);
        let options = ActionChoices {
            call: Some(0),
            ..facing_bet()
        };
        let point = point([Card(5, Suit::Club), Card(0, Suit::Diamond)], options);
        for _ in 0..20 {
            assert_eq!(bot.decide(&point, &status(Vec::new(), 30)), Action::Call);
        }
    }

    #[test]
    fn test_passive_bot() {
        let mut bot = PassiveBot;
        let cards = [Card(0, Suit::Club), Card(1, Suit::Club)];
        assert_eq!(
            bot.decide(&point(cards, facing_bet()), &status(Vec::new(), 30)),
            Action::Call
        );
        let short = ActionChoices {
            all_in: true,
            ..ActionChoices::default()
        };
        assert_eq!(
            bot.decide(&point(cards, short), &status(Vec::new(), 30)),
            Action::AllIn
        );
    }

    #[test]
    fn test_scripted_replays_then_folds() {
        let mut bot = Scripted::new([Action::Raise(20), Action::Call]);
        let cards = [Card(0, Suit::Club), Card(1, Suit::Club)];
        let point = point(cards, facing_bet());
        let status = status(Vec::new(), 30);
        assert_eq!(bot.decide(&point, &status), Action::Raise(20));
        assert_eq!(bot.remaining(), 1);
        assert_eq!(bot.decide(&point, &status), Action::Call);
        assert_eq!(bot.decide(&point, &status), Action::Fold);
    }
}
