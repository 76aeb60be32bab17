/// Fewest participants a hand can be dealt to.
pub const MIN_PLAYERS: usize = 2;

/// Most participants a hand can be dealt to.
pub const MAX_PLAYERS: usize = 9;

pub const DECK_SIZE: usize = 52;

/// Number of community cards on a complete board.
pub const BOARD_SIZE: usize = 5;

pub const HOLE_CARDS: usize = 2;

/// Number of distinct card values (`2` through `A`).
pub const NUM_VALUES: u8 = 13;

/// How many times the hand runner re-prompts a decider that keeps
/// submitting illegal actions before giving up on the hand.
pub const MAX_DECISION_ATTEMPTS: usize = 3;

/// Cards needed to deal a hand to `num_players` participants.
#[must_use]
pub const fn cards_needed(num_players: usize) -> usize {
    BOARD_SIZE + HOLE_CARDS * num_players
}
