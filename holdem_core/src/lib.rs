//! # Holdem Core
//!
//! Resolution of a single hand of no-limit Texas Hold'em using a type-safe
//! finite state machine (FSM) design.
//!
//! The library posts blinds, runs up to four betting rounds with legal
//! actions computed under unequal stacks, evaluates hands at showdown and
//! splits the pot, side pots included, among the winners. It never decides
//! for anyone: each betting round suspends at a decision point and resumes
//! with one submitted action.
//!
//! ## Architecture
//!
//! A hand moves through six phases (states):
//!
//! - **PreFlop**: Blinds posted, hole cards dealt, first betting round
//! - **Flop/Turn/River**: Community cards revealed and bet on
//! - **Showdown**: Remaining hands shown and evaluated
//! - **Complete**: Pots paid out, final balances available
//!
//! ## Core Modules
//!
//! - [`game`]: Hand state machine, betting engine, evaluator and pots
//! - [`bot`]: Decision sources and a runner that drives hands to completion
//!
//! ## Example
//!
//! ```
//! use holdem_core::{HandSettings, HandState, HandView, entities::Phase};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let settings = HandSettings::builder()
//!     .blinds(5, 10)
//!     .seat(1, 100)
//!     .seat(2, 100)
//!     .build()
//!     .unwrap();
//! let mut rng = StdRng::seed_from_u64(1);
//! let hand = HandState::new(settings, &mut rng).unwrap();
//! assert_eq!(hand.phase(), Phase::PreFlop);
//! ```

/// Decision sources and the hand runner.
pub mod bot;

/// Core hand logic, entities, and state machine.
pub mod game;
pub use game::{
    ActionError, ConfigError, HandError, HandSettings, HandSettingsBuilder, HandState, HandView,
    Outcome, RoundPoll,
    constants::{self, MAX_PLAYERS, MIN_PLAYERS},
    entities, functional,
};
