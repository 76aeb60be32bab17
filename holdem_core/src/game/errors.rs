//! Error types for hand construction and play.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::{Action, Card, Chips, ParticipantId, SeatIndex, Turn};

/// Problems with the inputs a hand is built from. These are raised before
/// any card is dealt.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum ConfigError {
    #[error("need at least {min} participants, got {count}")]
    NotEnoughPlayers { count: usize, min: usize },
    #[error("at most {max} participants can be dealt in, got {count}")]
    TooManyPlayers { count: usize, max: usize },
    #[error("blinds must be positive")]
    NonPositiveBlind,
    #[error("blinds were never set")]
    MissingBlinds,
    #[error("small blind ${small} must be less than big blind ${big}")]
    BlindsOutOfOrder { small: Chips, big: Chips },
    #[error("deck has {available} cards but the deal needs {needed}")]
    DeckTooSmall { needed: usize, available: usize },
    #[error("deck contains {0} more than once")]
    DuplicateCard(Card),
    #[error("{0} is not a card")]
    InvalidCard(Card),
    #[error("nobody can cover the ${big_blind} big blind")]
    NoBigBlindCover { big_blind: Chips },
    #[error("small blind seat {seat} is out of range for {count} seats")]
    SeatOutOfRange { seat: SeatIndex, count: usize },
    #[error("{0} is seated more than once")]
    DuplicateParticipant(ParticipantId),
    #[error("{0} has no chips")]
    EmptyStack(ParticipantId),
    #[error("stacks add up to more than ${max} chips")]
    ChipsOverflow { max: Chips },
}

/// Protocol violations while resuming a betting round. The round is left
/// exactly as it was before the offending submission.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum ActionError {
    #[error("{action} is not an available option")]
    Unavailable { action: Action },
    #[error("raise of ${amount} is outside ${min}..=${max}")]
    RaiseOutOfRange { amount: Chips, min: Chips, max: Chips },
    #[error("betting round is already finished")]
    RoundFinished,
    #[error("stale decision: expected {expected}, got {got}")]
    StaleTurn { expected: Turn, got: Turn },
}

#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum HandError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error("hand is not complete yet")]
    NotComplete,
    #[error("no betting round is in progress")]
    NoRoundInProgress,
    #[error("nobody decides for {0}")]
    MissingDecider(ParticipantId),
}
