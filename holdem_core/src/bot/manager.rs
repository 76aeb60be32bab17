//! Drives a hand to completion with one decider per participant.

use log::warn;
use std::collections::HashMap;

use super::{decision::Decide, observer::HandObserver};
use crate::game::{
    HandState, HandView, RoundPoll,
    constants::MAX_DECISION_ATTEMPTS,
    entities::{ActionSummary, DecisionPoint, ParticipantId, Phase},
    errors::HandError,
};

/// Hand runner holding who decides for whom.
pub struct HandManager {
    deciders: HashMap<ParticipantId, Box<dyn Decide>>,
    max_attempts: usize,
}

impl Default for HandManager {
    fn default() -> Self {
        Self::new()
    }
}

impl HandManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            deciders: HashMap::new(),
            max_attempts: MAX_DECISION_ATTEMPTS,
        }
    }

    /// How many illegal actions in a row a decider gets before the hand is
    /// abandoned. Never less than one attempt.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Assigns `decider` to participant `id`, replacing any previous one.
    pub fn seat(&mut self, id: ParticipantId, decider: impl Decide + 'static) -> &mut Self {
        self.deciders.insert(id, Box::new(decider));
        self
    }

    #[must_use]
    pub fn num_deciders(&self) -> usize {
        self.deciders.len()
    }

    /// Plays `hand` until it's complete, asking the acting participant's
    /// decider at every decision point.
    ///
    /// # Errors
    ///
    /// Fails if nobody decides for the acting participant, or if their
    /// decider keeps submitting illegal actions.
    pub fn play(
        &mut self,
        mut hand: HandState,
        observer: &mut dyn HandObserver,
    ) -> Result<HandState, HandError> {
        let mut round_started: Option<Phase> = None;
        loop {
            if let Ok(outcome) = hand.outcome() {
                observer.on_hand_end(outcome);
                return Ok(hand);
            }

            let phase = hand.phase();
            if hand.round().is_some() && round_started != Some(phase) {
                observer.on_round_start(&hand.status());
                round_started = Some(phase);
            }

            match hand.poll() {
                Ok(RoundPoll::Suspended(point)) => {
                    observer.on_turn(&point);
                    let summary = self.resolve(&mut hand, &point)?;
                    observer.on_action(&summary);
                }
                Ok(RoundPoll::Completed(last)) => {
                    observer.on_round_end(&hand.status(), last.as_ref());
                    hand = hand.step();
                }
                Err(_) => hand = hand.step(),
            }
        }
    }

    /// Gets a legal action for `point` out of the acting participant's
    /// decider and applies it.
    fn resolve(
        &mut self,
        hand: &mut HandState,
        point: &DecisionPoint,
    ) -> Result<ActionSummary, HandError> {
        let id = point.actor.id;
        let decider = self
            .deciders
            .get_mut(&id)
            .ok_or(HandError::MissingDecider(id))?;
        let status = hand.status();

        let mut attempts = 1;
        loop {
            let action = decider.decide(point, &status);
            match hand.act(point.turn, action) {
                Ok(summary) => return Ok(summary),
                Err(HandError::Action(error)) if attempts < self.max_attempts => {
                    warn!("{id} tried {action} ({error}), asking again");
                    attempts += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
