use std::fs;
use std::path::PathBuf;

use striker_scout::candidates::{CandidateCriteria, select_candidates};
use striker_scout::metrics::StrikerMetrics;
use striker_scout::pipeline::{analyze, load_and_analyze};
use striker_scout::ranking::{SHORTLIST_SIZE, rank_candidates, top_n};
use striker_scout::season_dataset::{DatasetError, load_season_rows};
use striker_scout::transfers::merge_transfers;

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn names<'a>(pool: impl IntoIterator<Item = &'a striker_scout::metrics::ScoredCandidate>) -> Vec<&'a str> {
    pool.into_iter().map(|c| c.name()).collect()
}

#[test]
fn loads_fixture_with_extra_and_duplicate_columns() {
    let rows = load_season_rows(&fixture_path("players_sample.csv")).expect("fixture should load");
    assert_eq!(rows.len(), 16);

    let bruno = rows.iter().find(|r| r.player == "Bruno Striker").unwrap();
    assert_eq!(bruno.minutes, 2700);
    assert_eq!(bruno.goals, 20, "first Gls column wins");
    assert_eq!(bruno.age, Some(22));

    let ivan = rows.iter().find(|r| r.player == "Ivan NoAge").unwrap();
    assert_eq!(ivan.age, None);

    let leo = rows.iter().find(|r| r.player == "Leo Zero").unwrap();
    assert_eq!(leo.sot_pct, None);
    assert_eq!(leo.avg_shot_distance, None);
    assert_eq!(rows[0].age, Some(24));
}

#[test]
fn transfer_rows_merge_into_one_player() {
    let rows = load_season_rows(&fixture_path("players_sample.csv")).unwrap();
    let merged = merge_transfers(&rows);
    assert_eq!(merged.len(), 14);

    let a = merged.iter().find(|p| p.player == "Player A").unwrap();
    assert_eq!(a.rows_merged, 2);
    assert_eq!(a.minutes, 1350);
    assert_eq!(a.goals, 11);
    assert_eq!(a.shots, 50);
    assert_eq!(a.shots_on_target, 21);
    assert_eq!(a.non_penalty_goals, 10);
    assert!((a.xg - 9.0).abs() < 1e-9);
    assert_eq!(a.squad, "ClubX → ClubY");
    assert_eq!(a.comp, "Premier League → La Liga");
    assert_eq!(a.nineties, 15.0);
    assert!((a.goals_per_90 - 0.7333).abs() < 1e-3);
    assert_eq!(a.sot_pct, 42.0);
    assert!((a.avg_shot_distance.unwrap() - 13.8).abs() < 1e-9);
    assert_eq!(a.age, Some(24), "first row's age wins");

    let per_row_minutes: u32 = rows
        .iter()
        .filter(|r| r.player == "Dario Loan")
        .map(|r| r.minutes)
        .sum();
    let dario = merged.iter().find(|p| p.player == "Dario Loan").unwrap();
    assert_eq!(dario.minutes, per_row_minutes);
    assert_eq!(dario.squad, "Inter → Genoa");
}

#[test]
fn derived_fields_follow_totals() {
    let rows = load_season_rows(&fixture_path("players_sample.csv")).unwrap();
    for p in merge_transfers(&rows) {
        assert_eq!(p.nineties, f64::from(p.minutes) / 90.0, "{}", p.player);
        let m = StrikerMetrics::from_player(&p);
        if p.nineties > 0.0 {
            assert_eq!(m.goals_per_90, f64::from(p.goals) / p.nineties);
        } else {
            assert_eq!(m.goals_per_90, 0.0);
        }
        assert!(m.conversion_rate.is_finite());
        assert!(m.shot_quality.is_finite());
    }
}

#[test]
fn zero_shot_player_scores_without_error() {
    let rows = load_season_rows(&fixture_path("players_sample.csv")).unwrap();
    let merged = merge_transfers(&rows);
    let leo = merged.iter().find(|p| p.player == "Leo Zero").unwrap();
    let m = StrikerMetrics::from_player(leo);
    assert_eq!(m.conversion_rate, 0.0);
    assert_eq!(m.shot_quality, 0.0);
    assert_eq!(leo.sot_pct, 0.0);
}

#[test]
fn shortlist_excludes_clubs_and_breaks_ties_by_name() {
    let run = load_and_analyze(&fixture_path("players_sample.csv")).unwrap();

    assert_eq!(
        names(run.shortlist()),
        vec!["Player A", "Bruno Striker", "Jon Twin", "Kai Twin", "Nuno Pro"]
    );
    assert_eq!(
        names(&run.market_pool),
        vec![
            "Player A",
            "Carlos Madrid",
            "Bruno Striker",
            "Dario Loan",
            "Jon Twin",
            "Kai Twin",
            "Nuno Pro",
        ]
    );
    assert!((run.shortlist()[0].suitability - 8.02).abs() < 1e-9);
}

#[test]
fn excluded_club_in_history_removes_player() {
    let run = load_and_analyze(&fixture_path("players_sample.csv")).unwrap();
    // Dario also played for Genoa, but Inter is in his history.
    assert!(run.shortlist_pool.iter().all(|c| c.name() != "Dario Loan"));
    assert!(run.shortlist_pool.iter().all(|c| c.name() != "Carlos Madrid"));
    assert!(run.market_pool.iter().any(|c| c.name() == "Dario Loan"));
}

#[test]
fn thresholds_reject_edge_cases() {
    let run = load_and_analyze(&fixture_path("players_sample.csv")).unwrap();
    for rejected in ["Ezio Veteran", "Felix Mid", "Gino Sub", "Hugo Low", "Ivan NoAge", "Oscar Edge"] {
        assert!(
            run.market_pool.iter().all(|c| c.name() != rejected),
            "{rejected} should not be a candidate"
        );
    }
}

#[test]
fn raising_min_goals_never_grows_the_pool() {
    let rows = load_season_rows(&fixture_path("players_sample.csv")).unwrap();
    let merged = merge_transfers(&rows);
    let mut previous = usize::MAX;
    for min_goals in 0..=25 {
        let criteria = CandidateCriteria {
            min_goals,
            ..CandidateCriteria::whole_market()
        };
        let size = select_candidates(&merged, &criteria).len();
        assert!(size <= previous, "pool grew at min_goals={min_goals}");
        previous = size;
    }
    assert_eq!(previous, 0);
}

#[test]
fn ranking_is_repeatable() {
    let rows = load_season_rows(&fixture_path("players_sample.csv")).unwrap();
    let first = analyze(rows.clone());
    let second = analyze(rows);
    assert_eq!(first.shortlist(), second.shortlist());

    let pool = select_candidates(&first.merged, &CandidateCriteria::whole_market());
    let mut reversed = pool.clone();
    reversed.reverse();
    assert_eq!(top_n(&pool, SHORTLIST_SIZE), top_n(&reversed, SHORTLIST_SIZE));
    assert_eq!(rank_candidates(&pool), first.market_pool);
}

#[test]
fn missing_input_file_is_reported() {
    let err = load_season_rows(&fixture_path("does_not_exist.csv")).unwrap_err();
    assert!(matches!(err, DatasetError::InputNotFound { .. }));
    assert!(err.to_string().contains("input file not found"));

    let err = load_and_analyze(&fixture_path("does_not_exist.csv")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DatasetError>(),
        Some(DatasetError::InputNotFound { .. })
    ));
}

#[test]
fn missing_column_is_named() {
    let err = load_season_rows(&fixture_path("players_missing_column.csv")).unwrap_err();
    assert!(matches!(err, DatasetError::MissingColumn { column: "xAG" }));
    assert_eq!(err.to_string(), "missing required column: xAG");
}

#[test]
fn non_numeric_count_is_rejected() {
    let sample = fs::read_to_string(fixture_path("players_sample.csv")).unwrap();
    let header = sample.lines().next().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(
        &path,
        format!(
            "{header}\n1,Bad Row,eng ENG,FW,ClubX,Premier League,24,2000,10,lots,10.0,6,2,5,1,1,5.0,1.5,20,15,30,12,40.0,15.0,6\n"
        ),
    )
    .unwrap();

    let err = load_season_rows(&path).unwrap_err();
    match err {
        DatasetError::InvalidValue { line, column, value } => {
            assert_eq!(line, 2);
            assert_eq!(column, "Min");
            assert_eq!(value, "lots");
        }
        other => panic!("unexpected error: {other}"),
    }
}
