use rust_cosmic::core::GameConfig;
use rust_cosmic::game::GameBuilder;
use rust_cosmic::strategy::BasicStrategy;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(2));
    targets =
        playing_full_game_3p,
        playing_full_game_6p,
        cloning_mid_game_state,
}

fn game(players: usize, seed: u64) -> rust_cosmic::Game {
    let mut builder = GameBuilder::new(GameConfig::new(players).with_max_turns(60))
        .seed(seed)
        .random_powers();
    for seat in 0..players {
        builder = builder.strategy(seat as u8, BasicStrategy::new());
    }
    builder.build().unwrap()
}

fn playing_full_game_3p(c: &mut criterion::Criterion) {
    c.bench_function("play a seeded 3-player game", |b| {
        b.iter(|| game(3, 42).run().unwrap())
    });
}

fn playing_full_game_6p(c: &mut criterion::Criterion) {
    c.bench_function("play a seeded 6-player game", |b| {
        b.iter(|| game(6, 42).run().unwrap())
    });
}

fn cloning_mid_game_state(c: &mut criterion::Criterion) {
    let mut game = game(5, 7);
    for _ in 0..10 {
        if game.play_turn().unwrap().is_some() {
            break;
        }
    }
    c.bench_function("clone a mid-game state", |b| {
        b.iter(|| criterion::black_box(game.state().clone()))
    });
}
