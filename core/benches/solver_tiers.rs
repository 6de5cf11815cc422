use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sweeper_core::*;

/// Plays one full game on a fresh session, the solver making every move after the first click.
fn play(difficulty: Difficulty, seed: u64) -> GameStatus {
    let settings = Settings {
        difficulty,
        ..Default::default()
    };
    let mut session = GameSession::new(settings, seed).unwrap();
    session.reveal((5, 5)).unwrap();
    while !session.status().is_finished() {
        match session.solver_turn().unwrap() {
            Some(turn) if turn.action() != Action::None => {}
            _ => break,
        }
    }
    session.status()
}

fn bench_full_games(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver_full_game");
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{difficulty:?}")),
            &difficulty,
            |b, &difficulty| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    play(black_box(difficulty), seed)
                });
            },
        );
    }
    group.finish();
}

fn bench_single_decision(c: &mut Criterion) {
    let settings = Settings::default();
    let mut session = GameSession::new(settings, 11).unwrap();
    session.reveal((5, 5)).unwrap();
    let board = session.board().unwrap().clone();
    let mut solver = Solver::new(0);

    c.bench_function("hard_decide_after_opening", |b| {
        b.iter(|| solver.decide(black_box(&board), Difficulty::Hard))
    });
}

criterion_group!(benches, bench_full_games, bench_single_decision);
criterion_main!(benches);
