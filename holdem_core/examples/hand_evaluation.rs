//! Hand Evaluation Example
//!
//! Demonstrates how to use the hand evaluation functions to compare poker hands.

use holdem_core::entities::{Card, Suit};
use holdem_core::functional::{argmax, eval, strengths};

fn show(cards: &[Card]) -> String {
    cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() {
    println!("=== Poker Hand Evaluation Example ===\n");

    // Example 1: Evaluate a single hand
    println!("Example 1: Evaluating a 7-card hand");
    let hand = [
        Card(12, Suit::Heart), // Ace of Hearts
        Card(11, Suit::Heart), // King of Hearts
        Card(10, Suit::Heart), // Queen of Hearts
        Card(9, Suit::Heart),  // Jack of Hearts
        Card(8, Suit::Heart),  // Ten of Hearts
        Card(7, Suit::Spade),  // Nine of Spades
        Card(0, Suit::Club),   // Two of Clubs
    ];
    println!("Hand: {}", show(&hand));
    println!("Best 5-card hand: {}\n", eval(&hand));

    // Example 2: Compare two hands on the same board
    println!("Example 2: Comparing hole cards on a shared board");
    let board = [
        Card(8, Suit::Club),
        Card(7, Suit::Diamond),
        Card(0, Suit::Spade),
        Card(4, Suit::Heart),
        Card(2, Suit::Club),
    ];
    let holes = [
        [Card(12, Suit::Spade), Card(12, Suit::Heart)], // Pair of Aces
        [Card(11, Suit::Spade), Card(11, Suit::Heart)], // Pair of Kings
    ];
    println!("Board: {}", show(&board));
    let scores = strengths(&board, &holes);
    for (hole, score) in holes.iter().zip(&scores) {
        println!("  {} -> {score}", show(hole));
    }
    for winner in argmax(&scores) {
        println!("Winner: {}\n", show(&holes[winner]));
    }

    // Example 3: Ties split the pot
    println!("Example 3: The board plays for both");
    let board = [
        Card(12, Suit::Spade),
        Card(11, Suit::Spade),
        Card(10, Suit::Spade),
        Card(9, Suit::Spade),
        Card(8, Suit::Spade),
    ];
    let holes = [
        [Card(0, Suit::Club), Card(1, Suit::Diamond)],
        [Card(0, Suit::Heart), Card(1, Suit::Heart)],
    ];
    let winners = argmax(&strengths(&board, &holes));
    println!("Board: {}", show(&board));
    println!("{} hands share the pot", winners.len());
}
