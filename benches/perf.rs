use criterion::{Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

use striker_scout::candidates::{CandidateCriteria, select_candidates};
use striker_scout::pipeline::analyze;
use striker_scout::ranking::{SHORTLIST_SIZE, top_n};
use striker_scout::season_dataset::PlayerSeasonRow;
use striker_scout::transfers::merge_transfers;

const SQUADS: [&str; 8] = [
    "Brentford",
    "Bologna",
    "Lens",
    "Girona",
    "Freiburg",
    "Inter",
    "Porto",
    "Ajax",
];
const POSITIONS: [&str; 4] = ["FW", "FW,MF", "MF", "DF"];

/// A season table of `players` names, roughly one in ten split across two clubs.
fn synthetic_rows(players: usize, seed: u64) -> Vec<PlayerSeasonRow> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(players + players / 10);
    for idx in 0..players {
        let segments = if rng.gen_range(0..10) == 0 { 2 } else { 1 };
        for _ in 0..segments {
            let shots = rng.gen_range(0..110);
            rows.push(PlayerSeasonRow {
                player: format!("Player {idx:05}"),
                nation: "eng ENG".to_string(),
                position: POSITIONS[rng.gen_range(0..POSITIONS.len())].to_string(),
                age: Some(rng.gen_range(17..36)),
                squad: SQUADS[rng.gen_range(0..SQUADS.len())].to_string(),
                comp: "League".to_string(),
                minutes: rng.gen_range(0..3400),
                goals: rng.gen_range(0..28),
                shots,
                shots_on_target: rng.gen_range(0..=shots),
                avg_shot_distance: Some(rng.gen_range(8.0..25.0)),
                xg: rng.gen_range(0.0..25.0),
                ..PlayerSeasonRow::default()
            });
        }
    }
    rows
}

fn bench_merge(c: &mut Criterion) {
    let rows = synthetic_rows(3_000, 7);
    c.bench_function("merge_transfers_3k", |b| {
        b.iter(|| {
            let merged = merge_transfers(black_box(&rows));
            black_box(merged.len());
        })
    });
}

fn bench_select_and_rank(c: &mut Criterion) {
    let merged = merge_transfers(&synthetic_rows(3_000, 11));
    let criteria = CandidateCriteria::default();
    c.bench_function("select_rank_top5_3k", |b| {
        b.iter(|| {
            let pool = select_candidates(black_box(&merged), &criteria);
            black_box(top_n(&pool, SHORTLIST_SIZE));
        })
    });
}

fn bench_full_analysis(c: &mut Criterion) {
    let rows = synthetic_rows(3_000, 13);
    c.bench_function("analyze_3k", |b| {
        b.iter(|| {
            let run = analyze(black_box(rows.clone()));
            black_box(run.market_pool.len());
        })
    });
}

criterion_group!(benches, bench_merge, bench_select_and_rank, bench_full_analysis);
criterion_main!(benches);
