//! One street of betting as a pollable state machine.
//!
//! A [`BettingRound`] never owns chips. It borrows the hand's [`Ledger`]
//! for each poll and each applied action, and keeps only the round-scoped
//! numbers (current bet, last full raise, anchor and acting seat) between
//! suspension points.

use log::{debug, warn};

use super::{
    entities::{
        Action, ActionChoices, ActionSummary, Chips, DecisionPoint, RaiseWindow, SeatIndex,
        Street, Turn,
    },
    errors::ActionError,
    ledger::Ledger,
};

/// Result of polling a round: either someone has to decide, or the round
/// is over and carries the summary of its last action.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RoundPoll {
    Suspended(DecisionPoint),
    Completed(Option<ActionSummary>),
}

#[derive(Clone, Debug)]
pub struct BettingRound {
    street: Street,
    current_bet: Chips,
    last_full_raise: Chips,
    /// Seat the action has to come back to before the round closes.
    anchor: SeatIndex,
    acting: Option<SeatIndex>,
    seq: usize,
    last: Option<ActionSummary>,
}

impl BettingRound {
    /// Opens a round with action starting at `start`. The round is already
    /// finished if nobody there or after owes a decision.
    #[must_use]
    pub fn open(
        street: Street,
        current_bet: Chips,
        min_raise: Chips,
        start: SeatIndex,
        ledger: &Ledger,
    ) -> Self {
        let mut round = Self {
            street,
            current_bet,
            last_full_raise: min_raise,
            anchor: start,
            acting: None,
            seq: 0,
            last: None,
        };
        if ledger.num_active() > 1 {
            round.seek(start, true, ledger);
        }
        debug!(
            "{street} betting opens at ${current_bet}, {}",
            match round.acting {
                Some(seat) => format!("seat {seat} to act"),
                None => "nobody to act".to_string(),
            }
        );
        round
    }

    #[must_use]
    pub const fn street(&self) -> Street {
        self.street
    }

    #[must_use]
    pub const fn current_bet(&self) -> Chips {
        self.current_bet
    }

    #[must_use]
    pub const fn last_full_raise(&self) -> Chips {
        self.last_full_raise
    }

    #[must_use]
    pub const fn anchor(&self) -> SeatIndex {
        self.anchor
    }

    #[must_use]
    pub const fn acting(&self) -> Option<SeatIndex> {
        self.acting
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.acting.is_none()
    }

    /// Token of the pending decision.
    #[must_use]
    pub const fn turn(&self) -> Turn {
        Turn {
            street: self.street,
            seq: self.seq,
        }
    }

    #[must_use]
    pub fn last_action(&self) -> Option<&ActionSummary> {
        self.last.as_ref()
    }

    /// Side-effect free; polling twice without acting in between returns
    /// the same thing.
    #[must_use]
    pub fn poll(&self, ledger: &Ledger) -> RoundPoll {
        match self.acting {
            Some(seat) => RoundPoll::Suspended(DecisionPoint {
                turn: self.turn(),
                actor: ledger.participant(seat).view(true),
                current_bet: self.current_bet,
                options: self.options_for(seat, ledger),
                previous: self.last.clone(),
            }),
            None => RoundPoll::Completed(self.last.clone()),
        }
    }

    /// Legal options for the participant in `seat` against the current bet.
    #[must_use]
    pub fn options_for(&self, seat: SeatIndex, ledger: &Ledger) -> ActionChoices {
        let participant = ledger.participant(seat);
        let (highest, second) = ledger.top_stakes();
        let to_call = self.current_bet.saturating_sub(participant.committed);
        let only_richest = participant.stake() == highest && highest > second;

        let mut options = ActionChoices {
            all_in: !only_richest || participant.balance <= to_call,
            ..ActionChoices::default()
        };
        if participant.balance <= to_call {
            return options;
        }

        options.call = Some(to_call);
        if only_richest {
            // Nobody can match more than the second-largest stake.
            if self.current_bet < second {
                let max = second - self.current_bet;
                options.raise = Some(RaiseWindow {
                    min: self.last_full_raise.min(max),
                    max,
                });
            }
        } else if self.last_full_raise < participant.balance - to_call {
            options.raise = Some(RaiseWindow {
                min: self.last_full_raise,
                max: participant.balance - to_call,
            });
        }
        options
    }

    /// Applies the acting participant's decision. `turn` must be the token
    /// of the pending decision. A rejected action leaves both the round and
    /// the ledger untouched.
    pub fn apply(
        &mut self,
        ledger: &mut Ledger,
        turn: Turn,
        action: Action,
    ) -> Result<ActionSummary, ActionError> {
        let seat = self.validate(ledger, turn, action).inspect_err(|error| {
            warn!("rejected {action} at {turn}: {error}");
        })?;

        let participant = ledger.participant(seat);
        let id = participant.id;
        let balance = participant.balance;
        let to_call = self.current_bet.saturating_sub(participant.committed);
        let (highest, second) = ledger.top_stakes();
        let only_richest = participant.stake() == highest && highest > second;

        let mut finished = false;
        let put = match action {
            Action::Fold => {
                ledger.fold(seat);
                finished = ledger.num_active() <= 1;
                0
            }
            Action::AllIn => {
                let put = ledger.commit(seat, balance);
                let committed = ledger.participant(seat).committed;
                if committed > self.current_bet {
                    let by = committed - self.current_bet;
                    self.current_bet = committed;
                    self.anchor = seat;
                    self.last_full_raise = self.last_full_raise.max(by);
                }
                ledger.cap(seat);
                put
            }
            Action::Call => {
                let put = ledger.commit(seat, to_call);
                if ledger.participant(seat).committed == second {
                    ledger.cap(seat);
                }
                put
            }
            Action::Raise(amount) => {
                let put = ledger.commit(seat, to_call + amount);
                self.current_bet += amount;
                if amount >= self.last_full_raise {
                    self.last_full_raise = amount;
                }
                self.anchor = seat;
                let participant = ledger.participant(seat);
                if participant.balance == 0 || (only_richest && participant.committed == second) {
                    ledger.cap(seat);
                }
                put
            }
        };

        let summary = ActionSummary {
            id,
            action,
            put,
            balance: ledger.participant(seat).balance,
        };
        debug!("{}: {summary}", self.turn());
        self.last = Some(summary.clone());
        self.seq += 1;
        if finished {
            self.acting = None;
        } else {
            self.seek(ledger.next_seat(seat), false, ledger);
        }
        Ok(summary)
    }

    fn validate(
        &self,
        ledger: &Ledger,
        turn: Turn,
        action: Action,
    ) -> Result<SeatIndex, ActionError> {
        let Some(seat) = self.acting else {
            return Err(ActionError::RoundFinished);
        };
        let expected = self.turn();
        if turn != expected {
            return Err(ActionError::StaleTurn {
                expected,
                got: turn,
            });
        }
        self.options_for(seat, ledger).permits(&action)?;
        Ok(seat)
    }

    /// Moves the action to the first seat from `seat` onward that owes a
    /// decision, stopping when it comes back around to the anchor.
    fn seek(&mut self, mut seat: SeatIndex, mut fresh: bool, ledger: &Ledger) {
        for _ in 0..=ledger.len() {
            if !fresh && seat == self.anchor {
                break;
            }
            fresh = false;
            if ledger.owes_action(seat, self.current_bet) {
                self.acting = Some(seat);
                return;
            }
            seat = ledger.next_seat(seat);
        }
        self.acting = None;
    }
}
