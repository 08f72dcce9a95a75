use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use play_2048::engine::{count_empty, has_moves, highest_tile, reduce_line, Board, Move};
use play_2048::session::GameSession;
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

fn corpus() -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut boards = Vec::new();
    // Empty and two-tile starts
    boards.push(Board::EMPTY);
    let mut b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    boards.push(b);
    // Derive a variety of densities deterministically
    for i in 0..40 {
        let out = b.apply(Move::ALL[i % 4]);
        if out.changed {
            b = out.board.with_random_tile(&mut rng);
        }
        boards.push(b);
    }
    boards
}

fn bench_reduce(c: &mut Criterion) {
    let lines = [[2, 2, 2, 2], [0, 2, 0, 2], [4, 2, 2, 4], [2, 4, 8, 16], [0, 0, 0, 0]];
    c.bench_function("line/reduce", |bch| {
        bch.iter(|| {
            let mut acc = 0u64;
            for &line in &lines {
                acc = acc.wrapping_add(reduce_line(black_box(line)).1);
            }
            black_box(acc)
        })
    });
}

fn bench_apply(c: &mut Criterion) {
    let boards = corpus();
    for dir in Move::ALL {
        c.bench_function(&format!("apply/{dir}"), |bch| {
            bch.iter(|| {
                let mut acc = 0u64;
                for &bd in &boards {
                    acc = acc.wrapping_add(bd.apply(dir).score_delta);
                }
                black_box(acc)
            })
        });
    }
}

fn bench_spawn_and_session(c: &mut Criterion) {
    c.bench_function("board/with_random_tile", |bch| {
        bch.iter_batched(
            || (Board::EMPTY, StdRng::seed_from_u64(7)),
            |(mut bd, mut rng)| {
                for _ in 0..16 {
                    bd = bd.with_random_tile(&mut rng);
                }
                black_box(bd)
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("session/cycle_until_game_over", |bch| {
        bch.iter_batched(
            || GameSession::new(StdRng::seed_from_u64(9)),
            |mut session| {
                let mut step = 0;
                while !session.is_game_over() {
                    let _ = session.play(Move::ALL[step % 4]);
                    step += 1;
                }
                black_box(session.score())
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_queries(c: &mut Criterion) {
    let boards = corpus();
    c.bench_function("query/has_moves", |bch| {
        bch.iter(|| boards.iter().filter(|&&bd| has_moves(bd)).count())
    });
    c.bench_function("query/count_empty", |bch| {
        bch.iter(|| boards.iter().map(|&bd| count_empty(bd)).sum::<usize>())
    });
    c.bench_function("query/highest_tile", |bch| {
        bch.iter(|| boards.iter().map(|&bd| highest_tile(bd)).max())
    });
}

criterion_group!(engine_ops, bench_reduce, bench_apply, bench_spawn_and_session, bench_queries);
criterion_main!(engine_ops);
