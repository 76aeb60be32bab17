//! Bot module providing decision sources and a runner for whole hands.
//!
//! This module implements:
//! - `Decide`: anything that can answer a decision point
//! - `RandomBot`: strength-weighted random play, reproducible from a seed
//! - `PassiveBot` and `Scripted`: fixed behaviors for tests and demos
//! - `HandManager`: drives a hand from blinds to payout
//! - `HandObserver`: lifecycle callbacks fired by the runner
//!
//! ## Example
//!
//! ```
//! use holdem_core::{
//!     HandSettings, HandState,
//!     bot::{HandManager, LogObserver, PassiveBot, RandomBot},
//!     entities::ParticipantId,
//! };
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let settings = HandSettings::builder()
//!     .blinds(5, 10)
//!     .seat(1, 200)
//!     .seat(2, 200)
//!     .build()
//!     .unwrap();
//! let mut rng = StdRng::seed_from_u64(9);
//! let hand = HandState::new(settings, &mut rng).unwrap();
//!
//! let mut manager = HandManager::new();
//! manager.seat(ParticipantId(1), RandomBot::new(1));
//! manager.seat(ParticipantId(2), PassiveBot);
//! let hand = manager.play(hand, &mut LogObserver).unwrap();
//! assert!(hand.is_complete());
//! ```

pub mod decision;
pub mod manager;
pub mod observer;

pub use decision::{Decide, DecisionConfig, PassiveBot, RandomBot, Scripted, estimate_strength};
pub use manager::HandManager;
pub use observer::{HandObserver, LogObserver, Silent};
