//! Hand evaluation.
//!
//! Cards are tallied by value and by suit; the best five-card hand is read
//! off the tallies. At showdown the board is tallied once and each
//! participant's hole cards are added and removed again, so the shared part
//! of the work is never repeated.

use super::{
    constants::NUM_VALUES,
    entities::{Card, HandStrength, Rank, Value},
};

const ACE: Value = NUM_VALUES - 1;

/// Ace, two, three, four and five.
const WHEEL: u16 = (1 << ACE) | 0b1111;

const FIVE_IN_A_ROW: u16 = 0b1_1111;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Tally {
    counts: [u8; NUM_VALUES as usize],
    /// One bit per value present, per suit.
    suits: [u16; 4],
}

impl Tally {
    #[must_use]
    pub fn new(cards: &[Card]) -> Self {
        let mut tally = Self::default();
        for card in cards {
            tally.add(*card);
        }
        tally
    }

    pub fn add(&mut self, card: Card) {
        self.counts[usize::from(card.0)] += 1;
        self.suits[card.1.index()] |= 1 << card.0;
    }

    pub fn remove(&mut self, card: Card) {
        let count = &mut self.counts[usize::from(card.0)];
        *count = count.saturating_sub(1);
        self.suits[card.1.index()] &= !(1 << card.0);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.iter().map(|&c| usize::from(c)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn values_present(&self) -> u16 {
        self.suits.iter().fold(0, |acc, mask| acc | mask)
    }

    /// Values present, best first, skipping the excluded ones.
    fn kickers(&self, exclude: &[Value], n: usize) -> Vec<Value> {
        (0..NUM_VALUES)
            .rev()
            .filter(|v| self.counts[usize::from(*v)] > 0 && !exclude.contains(v))
            .take(n)
            .collect()
    }

    /// Strength of the best five-card hand among the tallied cards.
    #[must_use]
    pub fn strength(&self) -> HandStrength {
        let flush = self.suits.iter().copied().find(|mask| mask.count_ones() >= 5);
        if let Some(value) = flush.and_then(straight) {
            return HandStrength {
                rank: Rank::StraightFlush,
                value,
            };
        }

        // (count, value), most copies first, then highest value.
        let mut groups: Vec<(u8, Value)> = (0..NUM_VALUES)
            .filter(|v| self.counts[usize::from(*v)] > 0)
            .map(|v| (self.counts[usize::from(v)], v))
            .collect();
        groups.sort_unstable_by(|a, b| b.cmp(a));
        let (count1, top) = groups.first().copied().unwrap_or((0, 0));
        let (count2, second) = groups.get(1).copied().unwrap_or((0, 0));

        if count1 == 4 {
            let digits: Vec<Value> = [top].into_iter().chain(self.kickers(&[top], 1)).collect();
            return encode(Rank::FourOfAKind, &digits, 2);
        }
        if count1 == 3 && count2 >= 2 {
            return encode(Rank::FullHouse, &[top, second], 2);
        }
        if let Some(mask) = flush {
            let digits: Vec<Value> = (0..NUM_VALUES)
                .rev()
                .filter(|v| mask & (1 << v) != 0)
                .take(5)
                .collect();
            return encode(Rank::Flush, &digits, 5);
        }
        if let Some(value) = straight(self.values_present()) {
            return HandStrength {
                rank: Rank::Straight,
                value,
            };
        }
        if count1 == 3 {
            let digits: Vec<Value> = [top].into_iter().chain(self.kickers(&[top], 2)).collect();
            return encode(Rank::ThreeOfAKind, &digits, 3);
        }
        if count1 == 2 && count2 == 2 {
            let digits: Vec<Value> = [top, second]
                .into_iter()
                .chain(self.kickers(&[top, second], 1))
                .collect();
            return encode(Rank::TwoPair, &digits, 3);
        }
        if count1 == 2 {
            let digits: Vec<Value> = [top].into_iter().chain(self.kickers(&[top], 3)).collect();
            return encode(Rank::OnePair, &digits, 4);
        }
        let digits = self.kickers(&[], 5);
        encode(Rank::HighCard, &digits, 5)
    }
}

/// Value of the lowest card of the best straight in `mask`, counting the ace
/// low: the wheel is 0, six-high is 1, broadway is 9.
fn straight(mask: u16) -> Option<u32> {
    for high in (4..NUM_VALUES).rev() {
        let run = FIVE_IN_A_ROW << (high - 4);
        if mask & run == run {
            return Some(u32::from(high - 4) + 1);
        }
    }
    (mask & WHEEL == WHEEL).then_some(0)
}

/// Packs `width` base-13 digits into a single comparable value. Missing
/// digits count as zero so partial hands still compare.
fn encode(rank: Rank, digits: &[Value], width: usize) -> HandStrength {
    let value = (0..width).fold(0u32, |acc, i| {
        acc * u32::from(NUM_VALUES) + u32::from(digits.get(i).copied().unwrap_or(0))
    });
    HandStrength { rank, value }
}

/// Evaluates any set of cards (two through seven).
#[must_use]
pub fn eval(cards: &[Card]) -> HandStrength {
    Tally::new(cards).strength()
}

/// Evaluates each pair of hole cards against a shared board.
#[must_use]
pub fn strengths(board: &[Card], holes: &[[Card; 2]]) -> Vec<HandStrength> {
    let mut tally = Tally::new(board);
    holes
        .iter()
        .map(|hole| {
            for card in hole {
                tally.add(*card);
            }
            let strength = tally.strength();
            for card in hole {
                tally.remove(*card);
            }
            strength
        })
        .collect()
}

/// Indices of the strongest hands, in ascending order.
#[must_use]
pub fn argmax(strengths: &[HandStrength]) -> Vec<usize> {
    let Some(best) = strengths.iter().max() else {
        return Vec::new();
    };
    strengths
        .iter()
        .enumerate()
        .filter(|(_, strength)| *strength == best)
        .map(|(i, _)| i)
        .collect()
}
