//! Per-hand record of every participant's chips and status.

use super::entities::{Chips, Participant, ParticipantId, ParticipantView, SeatIndex};

#[derive(Clone, Debug)]
pub struct Ledger {
    participants: Vec<Participant>,
    num_folded: usize,
    num_capped: usize,
}

impl Ledger {
    #[must_use]
    pub fn new(participants: Vec<Participant>) -> Self {
        let num_capped = participants.iter().filter(|p| p.capped).count();
        let num_folded = participants.iter().filter(|p| p.folded).count();
        Self {
            participants,
            num_folded,
            num_capped,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// # Panics
    ///
    /// Panics if `seat` is not a seat of this hand.
    #[must_use]
    pub fn participant(&self, seat: SeatIndex) -> &Participant {
        &self.participants[seat]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    #[must_use]
    pub fn num_folded(&self) -> usize {
        self.num_folded
    }

    #[must_use]
    pub fn num_capped(&self) -> usize {
        self.num_capped
    }

    /// Participants that haven't folded.
    #[must_use]
    pub fn num_active(&self) -> usize {
        self.len() - self.num_folded
    }

    /// Participants that haven't folded and can still be asked for chips.
    #[must_use]
    pub fn num_uncapped(&self) -> usize {
        self.participants
            .iter()
            .filter(|p| !p.folded && !p.capped)
            .count()
    }

    /// Largest and second-largest total stake among participants that
    /// haven't folded. The two are equal when the top stake is shared.
    #[must_use]
    pub fn top_stakes(&self) -> (Chips, Chips) {
        self.participants
            .iter()
            .filter(|p| !p.folded)
            .map(Participant::stake)
            .fold((0, 0), |(first, second), stake| {
                if stake > first {
                    (stake, first)
                } else if stake > second {
                    (first, stake)
                } else {
                    (first, second)
                }
            })
    }

    /// Total chips committed by everyone this hand.
    #[must_use]
    pub fn pot(&self) -> Chips {
        self.participants.iter().map(|p| p.committed).sum()
    }

    /// Everything on the table: stacks plus the pot.
    #[must_use]
    pub fn total_chips(&self) -> Chips {
        self.participants.iter().map(Participant::stake).sum()
    }

    #[must_use]
    pub fn highest_commitment(&self) -> Chips {
        self.participants
            .iter()
            .map(|p| p.committed)
            .max()
            .unwrap_or(0)
    }

    /// Whether the participant in `seat` still has a decision to make
    /// against `current_bet`. Folded and capped participants never do; the
    /// last uncapped participant doesn't either once they owe nothing,
    /// since nobody is left to bet against.
    #[must_use]
    pub fn owes_action(&self, seat: SeatIndex, current_bet: Chips) -> bool {
        let participant = &self.participants[seat];
        if participant.folded || participant.capped {
            return false;
        }
        !(self.num_uncapped() == 1 && participant.committed >= current_bet)
    }

    /// Seat of the next participant clockwise from `seat`.
    #[must_use]
    pub fn next_seat(&self, seat: SeatIndex) -> SeatIndex {
        (seat + 1) % self.len()
    }

    /// Moves up to `amount` from the stack into the pot and returns what
    /// was actually moved.
    pub(crate) fn commit(&mut self, seat: SeatIndex, amount: Chips) -> Chips {
        let participant = &mut self.participants[seat];
        let put = amount.min(participant.balance);
        participant.balance -= put;
        participant.committed += put;
        put
    }

    /// Posts a forced bet. A poster left with nothing behind is capped.
    pub(crate) fn post_blind(&mut self, seat: SeatIndex, amount: Chips) -> Chips {
        let put = self.commit(seat, amount);
        if self.participants[seat].balance == 0 {
            self.cap(seat);
        }
        put
    }

    pub(crate) fn fold(&mut self, seat: SeatIndex) {
        let participant = &mut self.participants[seat];
        if !participant.folded {
            participant.folded = true;
            self.num_folded += 1;
        }
    }

    pub(crate) fn cap(&mut self, seat: SeatIndex) {
        let participant = &mut self.participants[seat];
        if !participant.capped {
            participant.capped = true;
            self.num_capped += 1;
        }
    }

    pub(crate) fn show(&mut self, seat: SeatIndex) {
        self.participants[seat].showing = true;
    }

    /// Pays out chips won from the pot.
    pub(crate) fn credit(&mut self, id: ParticipantId, amount: Chips) {
        if let Some(participant) = self.participants.iter_mut().find(|p| p.id == id) {
            participant.balance += amount;
        }
    }

    /// Public views of every seat, with `reveal` showing that seat's cards.
    #[must_use]
    pub fn views(&self, reveal: Option<SeatIndex>) -> Vec<ParticipantView> {
        self.participants
            .iter()
            .map(|p| p.view(reveal == Some(p.seat)))
            .collect()
    }
}
