use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use holdem_core::{
    HandSettings, HandState,
    bot::{HandManager, PassiveBot, RandomBot, Silent},
    entities::{Card, ParticipantId, Suit},
    functional::{argmax, eval, strengths},
};
use rand::{SeedableRng, rngs::StdRng};

fn settings(n_players: usize) -> HandSettings {
    let mut builder = HandSettings::builder().blinds(10, 20);
    for i in 0..n_players {
        builder = builder.seat(i as u32, 1000);
    }
    builder.build().unwrap()
}

/// Benchmark hand evaluation with 2 cards (pocket cards)
fn bench_hand_eval_2_cards(c: &mut Criterion) {
    let cards = vec![Card(12, Suit::Spade), Card(11, Suit::Spade)];

    c.bench_function("hand_eval_2_cards", |b| {
        b.iter(|| eval(&cards));
    });
}

/// Benchmark hand evaluation with 7 cards (full hand + board)
fn bench_hand_eval_7_cards(c: &mut Criterion) {
    let cards = vec![
        Card(12, Suit::Spade),
        Card(11, Suit::Spade),
        Card(10, Suit::Spade),
        Card(9, Suit::Spade),
        Card(8, Suit::Spade),
        Card(0, Suit::Heart),
        Card(1, Suit::Diamond),
    ];

    c.bench_function("hand_eval_7_cards", |b| {
        b.iter(|| eval(&cards));
    });
}

/// Benchmark showdown evaluation of nine hands against one board, shared
/// board tally versus evaluating every seven cards from scratch
fn bench_showdown(c: &mut Criterion) {
    let deck: Vec<Card> = (0..52).filter_map(Card::from_index).collect();
    let board = &deck[34..39];
    let holes: Vec<[Card; 2]> = deck[..18].chunks(2).map(|c| [c[0], c[1]]).collect();

    let mut group = c.benchmark_group("showdown_9_hands");
    group.bench_function("shared_board", |b| {
        b.iter(|| argmax(&strengths(board, &holes)));
    });
    group.bench_function("from_scratch", |b| {
        b.iter(|| {
            let scores: Vec<_> = holes
                .iter()
                .map(|hole| {
                    let mut cards = board.to_vec();
                    cards.extend_from_slice(hole);
                    eval(&cards)
                })
                .collect();
            argmax(&scores)
        });
    });
    group.finish();
}

/// Benchmark whole hands with different player counts
fn bench_full_hand(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_hand");

    for n_players in [2, 6, 9] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{n_players}_players_passive")),
            &n_players,
            |b, &n| {
                let mut rng = StdRng::seed_from_u64(0);
                b.iter_batched(
                    || HandState::new(settings(n), &mut rng).unwrap(),
                    |hand| {
                        let mut manager = HandManager::new();
                        for i in 0..n {
                            manager.seat(ParticipantId(i as u32), PassiveBot);
                        }
                        manager.play(hand, &mut Silent).unwrap()
                    },
                    BatchSize::SmallInput,
                );
            },
        );
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{n_players}_players_random")),
            &n_players,
            |b, &n| {
                let mut rng = StdRng::seed_from_u64(0);
                b.iter_batched(
                    || HandState::new(settings(n), &mut rng).unwrap(),
                    |hand| {
                        let mut manager = HandManager::new();
                        for i in 0..n {
                            manager.seat(ParticipantId(i as u32), RandomBot::new(i as u64));
                        }
                        manager.play(hand, &mut Silent).unwrap()
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(
    hand_evaluation,
    bench_hand_eval_2_cards,
    bench_hand_eval_7_cards,
    bench_showdown,
);

criterion_group!(hand_operations, bench_full_hand);

criterion_main!(hand_evaluation, hand_operations);
