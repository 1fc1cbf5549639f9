use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use draughts_engine::board::{Board, Player};
use draughts_engine::eval::evaluate;
use draughts_engine::movegen::legal_moves;
use draughts_engine::protocol::parse_fen;
use draughts_engine::search::{
    alpha_beta, minimax, MoveSelector, SearchConfig, SCORE_MAX, SCORE_MIN,
};

/// A middlegame with kings on both sides and captures in the air.
const MIDDLEGAME_FEN: &str = "W:W27,28,32,33,34,37,38,39,K45,46:B12,13,14,17,18,19,22,23,K6";

fn bench_evaluate(c: &mut Criterion) {
    let board = Board::starting();
    c.bench_function("evaluate_start", |b| {
        b.iter(|| evaluate(black_box(&board), black_box(Player::White)))
    });
}

fn bench_legal_moves(c: &mut Criterion) {
    let start = Board::starting();
    let (middle, side) = parse_fen(MIDDLEGAME_FEN).unwrap();
    c.bench_function("legal_moves_start", |b| {
        b.iter(|| legal_moves(black_box(&start), black_box(Player::White)))
    });
    c.bench_function("legal_moves_middlegame", |b| {
        b.iter(|| legal_moves(black_box(&middle), black_box(side)))
    });
}

fn bench_tree_search(c: &mut Criterion) {
    let board = Board::starting();
    let first = legal_moves(&board, Player::White)[0].clone();

    let mut group = c.benchmark_group("tree_search");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));
    group.bench_function("minimax_depth_4", |b| {
        b.iter(|| minimax(black_box(&first), &board, 4, Player::Black, Player::White))
    });
    group.bench_function("alpha_beta_depth_4", |b| {
        b.iter(|| {
            alpha_beta(
                black_box(&first),
                &board,
                4,
                SCORE_MIN,
                SCORE_MAX,
                Player::Black,
                Player::White,
            )
        })
    });
    group.finish();
}

fn bench_select(c: &mut Criterion) {
    let (board, side) = parse_fen(MIDDLEGAME_FEN).unwrap();

    let mut group = c.benchmark_group("select");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(15));
    for (name, config) in [
        ("alpha_beta_depth_5", SearchConfig::alpha_beta()),
        ("alpha_beta_depth_5_parallel", SearchConfig::alpha_beta().with_parallel(true)),
        ("minimax_depth_4", SearchConfig::minimax()),
    ] {
        let mut selector = MoveSelector::seeded(config, 1);
        group.bench_function(name, |b| b.iter(|| selector.select(black_box(&board), side)));
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_evaluate,
    bench_legal_moves,
    bench_tree_search,
    bench_select,
);
criterion_main!(benches);
