use std::hint::black_box;

use blackjack_rs::cards::parse_cards;
use blackjack_rs::game::{Game, Phase};
use blackjack_rs::hand::evaluate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_evaluate(c: &mut Criterion) {
    let pair = parse_cards("Ah Kd").unwrap();
    let aces = parse_cards("Ah As Ad 9c 7s").unwrap();

    let mut g = c.benchmark_group("evaluate");
    g.bench_with_input(BenchmarkId::new("two_cards", "A,K"), &pair, |b, input| {
        b.iter(|| evaluate(black_box(input)))
    });
    g.bench_with_input(BenchmarkId::new("demotions", "A,A,A,9,7"), &aces, |b, input| {
        b.iter(|| evaluate(black_box(input)))
    });
    g.finish();
}

fn bench_round(c: &mut Criterion) {
    let mut game = Game::seeded(42);
    c.bench_function("round_stand_on_17", |b| {
        b.iter(|| {
            game.place_bet(10, 1000).unwrap();
            game.start_round().unwrap();
            while game.phase() == Phase::Playing {
                if game.player_hand().total() < 17 {
                    game.hit().unwrap();
                } else {
                    game.stand().unwrap();
                }
            }
            let outcome = black_box(game.result());
            game.reset();
            outcome
        })
    });
}

criterion_group!(benches, bench_evaluate, bench_round);
criterion_main!(benches);
