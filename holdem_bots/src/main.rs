//! Plays a single hand of no-limit Hold'em between bots.
//!
//! Each seat gets a seeded random bot; the hand is driven to completion and
//! the outcome printed as text or JSON.

mod config;

use anyhow::Error;
use ctrlc::set_handler;
use holdem_core::{
    HandState, HandView,
    bot::{HandManager, LogObserver, RandomBot},
};
use log::info;
use pico_args::Arguments;
use rand::{Rng, SeedableRng, rngs::StdRng};

use config::{SimArgs, SimConfig};

const HELP: &str = "\
Play one hand of no-limit Hold'em between bots

USAGE:
  holdem_bots [OPTIONS]

OPTIONS:
  --stacks     LIST        Comma-separated starting stacks  [default: env HOLDEM_STACKS or 1000,1000,1000,1000]
  --blinds     SB/BB       Small and big blind              [default: env HOLDEM_BLINDS or 10/20]
  --sb-seat    N           Seat posting the small blind     [default: env HOLDEM_SMALL_BLIND_SEAT or 0]
  --seed       N           Seed for the deck and the bots   [default: env HOLDEM_SEED or random]

FLAGS:
  --json                   Print the outcome as JSON
  -h, --help               Print help information

ENVIRONMENT:
  RUST_LOG                 Log level (e.g., info, debug)
";

fn main() -> Result<(), Error> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let json = pargs.contains("--json");
    let args = SimArgs {
        stacks: pargs.opt_value_from_str("--stacks")?,
        blinds: pargs.opt_value_from_str("--blinds")?,
        small_blind_seat: pargs.opt_value_from_str("--sb-seat")?,
        seed: pargs.opt_value_from_str("--seed")?,
    }
    .or_env();
    let config = SimConfig::from_args(args)?;

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();

    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let settings = config.settings()?;
    info!(
        "Dealing {} seats at {}/{} with seed {seed}",
        settings.num_players(),
        config.small_blind,
        config.big_blind
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let mut manager = HandManager::new();
    for seat in &settings.seats {
        manager.seat(seat.id, RandomBot::new(rng.random()));
    }
    let hand = HandState::new(settings, &mut rng)?;
    let hand = manager.play(hand, &mut LogObserver)?;

    if json {
        println!("{}", serde_json::to_string_pretty(hand.outcome()?)?);
    } else {
        print_summary(&hand)?;
    }
    Ok(())
}

fn print_summary(hand: &HandState) -> Result<(), Error> {
    let status = hand.status();
    let outcome = hand.outcome()?;

    let board = status
        .board
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    println!("Board: [{board}]");
    for participant in &status.participants {
        println!("  {participant}");
    }
    for payout in &outcome.payouts {
        match payout.strength {
            Some(strength) => println!(
                "{} wins ${} from pot {} with {}",
                payout.id, payout.amount, payout.pot, strength.rank
            ),
            None => println!("{} wins ${} uncontested", payout.id, payout.amount),
        }
    }
    if outcome.unallocated > 0 {
        println!("${} left unallocated", outcome.unallocated);
    }
    Ok(())
}
