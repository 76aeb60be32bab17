//! Simulation configuration.
//!
//! Every setting comes from a CLI flag, then its environment variable, then
//! a default.

use holdem_core::{
    ConfigError, HandSettings,
    entities::{Chips, SeatIndex},
};

pub const DEFAULT_STACKS: &str = "1000,1000,1000,1000";
pub const DEFAULT_BLINDS: &str = "10/20";

/// Raw settings as given on the command line. Anything missing is looked up
/// in the environment by [`SimArgs::or_env`].
#[derive(Clone, Debug, Default)]
pub struct SimArgs {
    pub stacks: Option<String>,
    pub blinds: Option<String>,
    pub small_blind_seat: Option<String>,
    pub seed: Option<String>,
}

impl SimArgs {
    /// Fills in unset values from `HOLDEM_STACKS`, `HOLDEM_BLINDS`,
    /// `HOLDEM_SMALL_BLIND_SEAT` and `HOLDEM_SEED`.
    #[must_use]
    pub fn or_env(self) -> Self {
        Self {
            stacks: self.stacks.or_else(|| std::env::var("HOLDEM_STACKS").ok()),
            blinds: self.blinds.or_else(|| std::env::var("HOLDEM_BLINDS").ok()),
            small_blind_seat: self
                .small_blind_seat
                .or_else(|| std::env::var("HOLDEM_SMALL_BLIND_SEAT").ok()),
            seed: self.seed.or_else(|| std::env::var("HOLDEM_SEED").ok()),
        }
    }
}

/// Complete simulation configuration
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SimConfig {
    /// Starting stack per seat, in seat order
    pub stacks: Vec<Chips>,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub small_blind_seat: SeatIndex,
    /// Seed for the deck and the bots; random when unset
    pub seed: Option<u64>,
}

impl SimConfig {
    /// Parses `args`, using defaults for anything still unset.
    ///
    /// # Errors
    ///
    /// Returns error if a value is present but malformed
    pub fn from_args(args: SimArgs) -> Result<Self, SimConfigError> {
        let stacks = parse_stacks(args.stacks.as_deref().unwrap_or(DEFAULT_STACKS))?;
        let (small_blind, big_blind) =
            parse_blinds(args.blinds.as_deref().unwrap_or(DEFAULT_BLINDS))?;
        let small_blind_seat = args
            .small_blind_seat
            .as_deref()
            .map(|value| parse_value("HOLDEM_SMALL_BLIND_SEAT", value))
            .transpose()?
            .unwrap_or(0);
        let seed = args
            .seed
            .as_deref()
            .map(|value| parse_value("HOLDEM_SEED", value))
            .transpose()?;

        Ok(Self {
            stacks,
            small_blind,
            big_blind,
            small_blind_seat,
            seed,
        })
    }

    /// Seats participants 1, 2, ... in order with the configured stacks.
    pub fn settings(&self) -> Result<HandSettings, ConfigError> {
        self.stacks
            .iter()
            .enumerate()
            .fold(HandSettings::builder(), |builder, (i, &stack)| {
                builder.seat(i as u32 + 1, stack)
            })
            .blinds(self.small_blind, self.big_blind)
            .small_blind_seat(self.small_blind_seat)
            .build()
    }
}

/// Configuration error types
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum SimConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn parse_value<T>(var: &str, value: &str) -> Result<T, SimConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| SimConfigError::Invalid {
        var: var.to_string(),
        reason: format!("{value:?}: {e}"),
    })
}

/// Comma-separated stacks, e.g. `100,300,300`.
fn parse_stacks(value: &str) -> Result<Vec<Chips>, SimConfigError> {
    value
        .split(',')
        .map(|stack| parse_value("HOLDEM_STACKS", stack))
        .collect()
}

/// Small and big blind separated by a slash, e.g. `5/10`.
fn parse_blinds(value: &str) -> Result<(Chips, Chips), SimConfigError> {
    let Some((small, big)) = value.split_once('/') else {
        return Err(SimConfigError::Invalid {
            var: "HOLDEM_BLINDS".to_string(),
            reason: format!("{value:?}: expected SMALL/BIG"),
        });
    };
    Ok((
        parse_value("HOLDEM_BLINDS", small)?,
        parse_value("HOLDEM_BLINDS", big)?,
    ))
}
