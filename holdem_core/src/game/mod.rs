//! Single-hand poker engine: FSM, betting, evaluation and payouts.
//!
//! This module provides:
//! - A type-safe finite state machine over the six phases of a hand
//! - The betting round engine and its legal-action computation
//! - Seven-card hand evaluation and layered pot distribution

// Submodules
pub mod betting;
pub mod constants;
pub mod entities;
pub mod errors;
pub mod functional;
pub mod ledger;
pub mod pot;
pub mod settings;
pub mod state_machine;
pub mod states;

pub use betting::{BettingRound, RoundPoll};
pub use errors::{ActionError, ConfigError, HandError};
pub use ledger::Ledger;
pub use pot::{Distribution, Payout, PotLayer};
pub use settings::{HandSettings, HandSettingsBuilder, Seat};
pub use state_machine::{Hand, HandData, HandState, HandView, Outcome};
