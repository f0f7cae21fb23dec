use criterion::{black_box, criterion_group, criterion_main, Criterion};

use morris::{codec, Coord, GameState, Player};

fn c(x: usize, y: usize) -> Coord {
    Coord::new(x, y)
}

/// A full placing phase ending in a mill and a capture.
fn play_opening() -> GameState {
    let mut game = GameState::with_first_player(Player::Blue);
    for (slot, at) in [
        (0, c(0, 0)),
        (11, c(6, 6)),
        (1, c(0, 3)),
        (10, c(6, 3)),
        (2, c(0, 6)),
    ] {
        game.play_tray(slot);
        game.play_board(at);
    }
    game.play_board(c(6, 3));
    game
}

/// A moving-phase position with mills available to both selection sweeps.
fn moving_position() -> GameState {
    let mut game = GameState::sandbox_with_first_player(Player::Blue);
    for at in [c(0, 0), c(0, 3), c(3, 6), c(2, 2), c(2, 3)] {
        game.cycle_board(at);
    }
    for at in [c(6, 0), c(6, 3), c(4, 2), c(4, 3)] {
        game.cycle_board(at);
        game.cycle_board(at);
    }
    game.end_customization();
    game
}

fn bench_opening(criterion: &mut Criterion) {
    criterion.bench_function("placing_opening_with_mill", |b| {
        b.iter(|| black_box(play_opening()))
    });
}

fn bench_selection_sweep(criterion: &mut Criterion) {
    let game = moving_position();
    criterion.bench_function("select_and_deselect", |b| {
        b.iter(|| {
            let mut g = game.clone();
            g.play_board(black_box(c(3, 6)));
            g.play_board(black_box(c(3, 6)));
            black_box(g)
        })
    });
}

fn bench_codec_round_trip(criterion: &mut Criterion) {
    let game = play_opening();
    criterion.bench_function("codec_round_trip", |b| {
        b.iter(|| {
            let mut buf = Vec::new();
            codec::save(black_box(&game), &mut buf).unwrap();
            black_box(codec::load(buf.as_slice()).unwrap())
        })
    });
}

criterion_group!(
    benches,
    bench_opening,
    bench_selection_sweep,
    bench_codec_round_trip
);
criterion_main!(benches);
