//! Lifecycle callbacks fired while a hand is driven to completion.

use log::{debug, info};

use crate::game::{
    entities::{ActionSummary, DecisionPoint, HandStatus},
    state_machine::Outcome,
};

/// Hooks into the hand runner. Every method defaults to doing nothing, so
/// implementors only override what they care about.
pub trait HandObserver {
    fn on_round_start(&mut self, _status: &HandStatus) {}

    fn on_turn(&mut self, _point: &DecisionPoint) {}

    fn on_action(&mut self, _summary: &ActionSummary) {}

    fn on_round_end(&mut self, _status: &HandStatus, _last: Option<&ActionSummary>) {}

    fn on_hand_end(&mut self, _outcome: &Outcome) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl HandObserver for Silent {}

/// Reports the hand through the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl HandObserver for LogObserver {
    fn on_round_start(&mut self, status: &HandStatus) {
        let board = status
            .board
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        info!("{} (pot ${}): [{board}]", status.phase, status.pot);
    }

    fn on_turn(&mut self, point: &DecisionPoint) {
        debug!("{} to act: {}", point.actor, point.options);
    }

    fn on_action(&mut self, summary: &ActionSummary) {
        info!("{summary}");
    }

    fn on_round_end(&mut self, status: &HandStatus, last: Option<&ActionSummary>) {
        match last {
            Some(summary) => debug!("{} closed by {}", status.phase, summary.id),
            None => debug!("{} closed without action", status.phase),
        }
    }

    fn on_hand_end(&mut self, outcome: &Outcome) {
        for payout in &outcome.payouts {
            match payout.strength {
                Some(strength) => info!(
                    "{} won ${} from pot {} with {}",
                    payout.id, payout.amount, payout.pot, strength.rank
                ),
                None => info!("{} won ${} uncontested", payout.id, payout.amount),
            }
        }
    }
}
