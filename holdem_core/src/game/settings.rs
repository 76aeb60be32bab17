//! Validated inputs for dealing a hand.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{
    constants::{DECK_SIZE, MAX_PLAYERS, MIN_PLAYERS, cards_needed},
    entities::{Blinds, Chips, ParticipantId, SeatIndex},
    errors::ConfigError,
};

/// A participant and the stack they bring to the hand.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Seat {
    pub id: ParticipantId,
    pub balance: Chips,
}

/// Everything needed to deal a hand except the cards.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct HandSettings {
    pub seats: Vec<Seat>,
    pub blinds: Blinds,
    pub small_blind_seat: SeatIndex,
}

impl HandSettings {
    pub fn new(
        seats: Vec<Seat>,
        blinds: Blinds,
        small_blind_seat: SeatIndex,
    ) -> Result<Self, ConfigError> {
        let settings = Self {
            seats,
            blinds,
            small_blind_seat,
        };
        settings.validate()?;
        Ok(settings)
    }

    #[must_use]
    pub fn builder() -> HandSettingsBuilder {
        HandSettingsBuilder::default()
    }

    #[must_use]
    pub fn num_players(&self) -> usize {
        self.seats.len()
    }

    /// Checks the settings can be dealt. Settings that arrive through serde
    /// skip the constructor, so hands re-validate before dealing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let count = self.seats.len();
        if count < MIN_PLAYERS {
            return Err(ConfigError::NotEnoughPlayers {
                count,
                min: MIN_PLAYERS,
            });
        }
        if count > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers {
                count,
                max: MAX_PLAYERS,
            });
        }

        let Blinds { small, big } = self.blinds;
        if small == 0 || big == 0 {
            return Err(ConfigError::NonPositiveBlind);
        }
        if small >= big {
            return Err(ConfigError::BlindsOutOfOrder { small, big });
        }

        let needed = cards_needed(count);
        if needed > DECK_SIZE {
            return Err(ConfigError::DeckTooSmall {
                needed,
                available: DECK_SIZE,
            });
        }

        if self.small_blind_seat >= count {
            return Err(ConfigError::SeatOutOfRange {
                seat: self.small_blind_seat,
                count,
            });
        }

        let mut ids = HashSet::with_capacity(count);
        for seat in &self.seats {
            if !ids.insert(seat.id) {
                return Err(ConfigError::DuplicateParticipant(seat.id));
            }
            if seat.balance == 0 {
                return Err(ConfigError::EmptyStack(seat.id));
            }
        }

        // Pots and payouts are sums of stacks.
        self.seats
            .iter()
            .try_fold(0, |total: Chips, seat| total.checked_add(seat.balance))
            .ok_or(ConfigError::ChipsOverflow { max: Chips::MAX })?;

        if self.seats.iter().all(|seat| seat.balance < big) {
            return Err(ConfigError::NoBigBlindCover { big_blind: big });
        }
        Ok(())
    }
}

/// Fluent construction of [`HandSettings`]. Nothing is checked until
/// [`HandSettingsBuilder::build`].
#[derive(Clone, Debug, Default)]
pub struct HandSettingsBuilder {
    seats: Vec<Seat>,
    blinds: Option<Blinds>,
    small_blind_seat: SeatIndex,
}

impl HandSettingsBuilder {
    #[must_use]
    pub fn blinds(mut self, small: Chips, big: Chips) -> Self {
        self.blinds = Some(Blinds { small, big });
        self
    }

    /// Seats the next participant clockwise.
    #[must_use]
    pub fn seat(mut self, id: u32, balance: Chips) -> Self {
        self.seats.push(Seat {
            id: ParticipantId(id),
            balance,
        });
        self
    }

    #[must_use]
    pub fn seats(mut self, seats: impl IntoIterator<Item = Seat>) -> Self {
        self.seats.extend(seats);
        self
    }

    #[must_use]
    pub fn small_blind_seat(mut self, seat: SeatIndex) -> Self {
        self.small_blind_seat = seat;
        self
    }

    pub fn build(self) -> Result<HandSettings, ConfigError> {
        let blinds = self.blinds.ok_or(ConfigError::MissingBlinds)?;
        HandSettings::new(self.seats, blinds, self.small_blind_seat)
    }
}
