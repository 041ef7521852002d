use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use haunted_core::*;

fn classic_generation(c: &mut Criterion) {
    let config = GameConfig::classic();

    c.bench_function("generate classic", |b| {
        let mut generator = RandomMinefieldGenerator::new(0);
        b.iter(|| generator.generate(black_box(&config), black_box((12, 8))))
    });
}

fn classic_first_reveal(c: &mut Criterion) {
    let config = GameConfig::classic();

    c.bench_function("first reveal classic", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            let mut game = Game::new(config, seed).unwrap();
            black_box(game.reveal(black_box((12, 8))))
        })
    });
}

fn classic_board_flood(c: &mut Criterion) {
    let size = GameConfig::CLASSIC_SIZE;
    let config = GameConfig::new(size, 1).with_safe_radius(1);
    let generator = PresetMinefieldGenerator::from_mine_coords(size, &[(23, 15)]).unwrap();

    c.bench_function("flood fill classic", |b| {
        b.iter(|| {
            let mut engine = MinefieldEngine::new(config, generator.clone()).unwrap();
            black_box(engine.reveal(black_box((0, 0))))
        })
    });
}

fn empty_board_flood(c: &mut Criterion) {
    let size = (Coord::MAX, Coord::MAX);
    let config = GameConfig::new(size, 1).with_safe_radius(1);
    let generator = PresetMinefieldGenerator::from_mine_coords(size, &[(0, 0)]).unwrap();

    c.bench_function("flood fill 255x255", |b| {
        b.iter(|| {
            let mut engine = MinefieldEngine::new(config, generator.clone()).unwrap();
            black_box(engine.reveal(black_box((200, 200))))
        })
    });
}

criterion_group!(
    benches,
    classic_generation,
    classic_first_reveal,
    classic_board_flood,
    empty_board_flood
);
criterion_main!(benches);
