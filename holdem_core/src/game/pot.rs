//! Splitting the pot into layers and paying each layer to its best hands.

use log::warn;
use serde::{Deserialize, Serialize};

use super::entities::{Chips, HandStrength, ParticipantId};

/// What one participant put in, and what they hold if they're still in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Contribution {
    pub id: ParticipantId,
    pub committed: Chips,
    /// `None` for participants that folded.
    pub strength: Option<HandStrength>,
}

/// One main or side pot. The main pot has index 0.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PotLayer {
    pub index: usize,
    pub floor: Chips,
    pub ceiling: Chips,
    pub amount: Chips,
    pub eligible: Vec<ParticipantId>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Payout {
    pub id: ParticipantId,
    pub pot: usize,
    pub amount: Chips,
    /// `None` when the pot was won without a showdown.
    pub strength: Option<HandStrength>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Distribution {
    pub payouts: Vec<Payout>,
    pub pots: Vec<PotLayer>,
    /// Odd chips left over from splits that don't divide evenly.
    pub unallocated: Chips,
}

impl Distribution {
    /// Sum of everything paid out.
    #[must_use]
    pub fn paid(&self) -> Chips {
        self.payouts.iter().map(|p| p.amount).sum()
    }
}

/// Cuts the pot at every distinct commitment of a participant still in the
/// hand. Folded chips feed the layers they reach but their owners are never
/// eligible; anything committed above the top level goes into the top layer.
#[must_use]
pub fn layers(contributions: &[Contribution]) -> Vec<PotLayer> {
    let mut levels: Vec<Chips> = contributions
        .iter()
        .filter(|c| c.strength.is_some() && c.committed > 0)
        .map(|c| c.committed)
        .collect();
    levels.sort_unstable();
    levels.dedup();
    let Some(&top) = levels.last() else {
        return Vec::new();
    };

    let mut floor = 0;
    let mut pots = Vec::with_capacity(levels.len());
    for (index, &ceiling) in levels.iter().enumerate() {
        let mut amount: Chips = contributions
            .iter()
            .map(|c| c.committed.min(ceiling) - c.committed.min(floor))
            .sum();
        if ceiling == top {
            amount += contributions
                .iter()
                .map(|c| c.committed.saturating_sub(top))
                .sum::<Chips>();
        }
        let eligible = contributions
            .iter()
            .filter(|c| c.strength.is_some() && c.committed >= ceiling)
            .map(|c| c.id)
            .collect();
        pots.push(PotLayer {
            index,
            floor,
            ceiling,
            amount,
            eligible,
        });
        floor = ceiling;
    }
    pots
}

/// Pays every layer to its best eligible hands, splitting ties evenly.
/// Payouts come ordered by pot, then by the order of `contributions`.
#[must_use]
pub fn distribute(contributions: &[Contribution]) -> Distribution {
    let pots = layers(contributions);
    let mut payouts = Vec::new();
    let mut unallocated = 0;

    for pot in &pots {
        let best = contributions
            .iter()
            .filter(|c| pot.eligible.contains(&c.id))
            .filter_map(|c| c.strength)
            .max();
        let winners: Vec<&Contribution> = contributions
            .iter()
            .filter(|c| pot.eligible.contains(&c.id) && c.strength.is_some() && c.strength == best)
            .collect();
        if winners.is_empty() {
            unallocated += pot.amount;
            continue;
        }

        let num_winners = winners.len() as Chips;
        let share = pot.amount / num_winners;
        let remainder = pot.amount % num_winners;
        if remainder > 0 {
            warn!(
                "pot {} of ${} splits {} ways, ${remainder} left unallocated",
                pot.index, pot.amount, num_winners
            );
            unallocated += remainder;
        }
        if share > 0 {
            payouts.extend(winners.iter().map(|c| Payout {
                id: c.id,
                pot: pot.index,
                amount: share,
                strength: c.strength,
            }));
        }
    }

    Distribution {
        payouts,
        pots,
        unallocated,
    }
}

/// Everyone else folded, so `id` takes the whole pot without showing.
#[must_use]
pub fn award_uncontested(id: ParticipantId, total: Chips) -> Distribution {
    Distribution {
        payouts: vec![Payout {
            id,
            pot: 0,
            amount: total,
            strength: None,
        }],
        pots: vec![PotLayer {
            index: 0,
            floor: 0,
            ceiling: total,
            amount: total,
            eligible: vec![id],
        }],
        unallocated: 0,
    }
}
