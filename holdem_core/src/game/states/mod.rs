//! Hand state definitions for the hand FSM.
//!
//! Each state represents one phase of a single hand. The four betting
//! states carry the round being played on that street.

use crate::game::{
    betting::BettingRound,
    entities::{HandStrength, Phase, Street},
    state_machine::Outcome,
};

/// Phase-level facts every state knows about itself.
pub trait Stage {
    const PHASE: Phase;

    fn round(&self) -> Option<&BettingRound> {
        None
    }
}

/// A state that is a street of betting.
pub trait Betting: Stage + Sized {
    const STREET: Street;

    fn from_round(round: BettingRound) -> Self;
    fn round_mut(&mut self) -> &mut BettingRound;
    fn into_round(self) -> BettingRound;
}

macro_rules! betting_state {
    ($(#[$meta:meta])* $name:ident, $street:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name {
            pub(crate) round: BettingRound,
        }

        impl Stage for $name {
            const PHASE: Phase = Phase::$street;

            fn round(&self) -> Option<&BettingRound> {
                Some(&self.round)
            }
        }

        impl Betting for $name {
            const STREET: Street = Street::$street;

            fn from_round(round: BettingRound) -> Self {
                Self { round }
            }

            fn round_mut(&mut self) -> &mut BettingRound {
                &mut self.round
            }

            fn into_round(self) -> BettingRound {
                self.round
            }
        }
    };
}

betting_state!(
    /// Blinds are in and hole cards dealt; no community cards showing.
    PreFlop,
    PreFlop
);
betting_state!(
    /// Three community cards showing.
    Flop,
    Flop
);
betting_state!(
    /// Four community cards showing.
    Turn,
    Turn
);
betting_state!(
    /// All five community cards showing; last street of betting.
    River,
    River
);

/// Betting is over with more than one participant left. The whole board
/// is out and every remaining hand is shown.
#[derive(Clone, Debug)]
pub struct Showdown {
    /// Strength per seat; `None` for seats that folded.
    pub(crate) strengths: Vec<Option<HandStrength>>,
}

impl Stage for Showdown {
    const PHASE: Phase = Phase::Showdown;
}

/// Chips have been paid out.
#[derive(Clone, Debug)]
pub struct Complete {
    pub(crate) outcome: Outcome,
}

impl Stage for Complete {
    const PHASE: Phase = Phase::Complete;
}
