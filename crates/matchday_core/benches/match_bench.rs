use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use matchday_core::engine::{simulate_chunk, MatchSession, MinuteContext, SimulationConfig, TickOutcome};
use matchday_core::models::{Match, MatchStats, Player, Position, Team};
use matchday_core::tactics::{Mentality, TacticalInstructions};

fn squad_team(id: &str, rating: u8) -> Team {
    let shape = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Defender,
        Position::Defender,
        Position::Defender,
        Position::Midfielder,
        Position::Midfielder,
        Position::Midfielder,
        Position::Attacker,
        Position::Attacker,
        Position::Attacker,
    ];
    let players = (0..18)
        .map(|i| Player::new(format!("{id}-{i}"), format!("{id} {i}"), shape[i % shape.len()], rating))
        .collect();
    Team::new(id, id, id, players, TacticalInstructions::default()).expect("valid bench squad")
}

fn bench_full_session(c: &mut Criterion) {
    let (home, away) = (squad_team("h", 74), squad_team("a", 70));

    c.bench_function("full_session", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            let (mut home, mut away) = (home.clone(), away.clone());
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut session =
                MatchSession::new(Match::scheduled("bench", "h", "a", 1), SimulationConfig::default());
            loop {
                match session.tick(&mut home, &mut away, &mut rng).expect("tick") {
                    TickOutcome::HalfTime => {
                        session.start_second_half(&mut home, &mut away, None).expect("second half")
                    }
                    TickOutcome::FullTime(report) => break black_box(report),
                    _ => {}
                }
            }
        })
    });
}

fn bench_chunk(c: &mut Criterion) {
    let (home, away) = (squad_team("h", 74), squad_team("a", 70));
    let ctx = MinuteContext::new(&home, &away, Mentality::Balanced, Mentality::Balanced);
    let stats = MatchStats::new();

    c.bench_function("chunk_1_90", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        b.iter(|| black_box(simulate_chunk(&stats, &ctx, 1, 90, &mut rng)))
    });
}

criterion_group!(benches, bench_full_session, bench_chunk);
criterion_main!(benches);
