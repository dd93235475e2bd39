use std::cmp::Ordering;

use crate::metrics::ScoredCandidate;

pub const SHORTLIST_SIZE: usize = 5;
pub const BAR_CHART_SIZE: usize = 10;

/// Score descending; equal scores fall back to player name ascending.
pub fn compare_candidates(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.suitability
        .total_cmp(&a.suitability)
        .then_with(|| a.name().cmp(b.name()))
}

pub fn rank_candidates(pool: &[ScoredCandidate]) -> Vec<ScoredCandidate> {
    let mut ranked = pool.to_vec();
    ranked.sort_by(compare_candidates);
    ranked
}

pub fn top_n(pool: &[ScoredCandidate], n: usize) -> Vec<ScoredCandidate> {
    let mut ranked = rank_candidates(pool);
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::season_dataset::PlayerSeasonRow;
    use crate::transfers::merge_transfers;

    fn candidates(players: &[(&str, u32)]) -> Vec<ScoredCandidate> {
        let rows: Vec<PlayerSeasonRow> = players
            .iter()
            .map(|(name, goals)| PlayerSeasonRow {
                player: name.to_string(),
                minutes: 1800,
                goals: *goals,
                shots: 50,
                xg: 8.0,
                ..PlayerSeasonRow::default()
            })
            .collect();
        merge_transfers(&rows)
            .into_iter()
            .map(ScoredCandidate::score)
            .collect()
    }

    #[test]
    fn orders_by_score_descending() {
        let pool = candidates(&[("Low", 10), ("High", 20), ("Mid", 15)]);
        let ranked = rank_candidates(&pool);
        let names: Vec<&str> = ranked.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["High", "Mid", "Low"]);
    }

    #[test]
    fn ties_break_by_name() {
        let mut pool = candidates(&[("Carla", 12), ("Abel", 12), ("Bruno", 12)]);
        pool.reverse();
        let ranked = rank_candidates(&pool);
        let names: Vec<&str> = ranked.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Abel", "Bruno", "Carla"]);
    }

    #[test]
    fn top_n_truncates_and_is_repeatable() {
        let pool = candidates(&[("A", 10), ("B", 11), ("C", 12), ("D", 13), ("E", 14), ("F", 15)]);
        let first = top_n(&pool, SHORTLIST_SIZE);
        let second = top_n(&pool, SHORTLIST_SIZE);
        assert_eq!(first.len(), 5);
        assert_eq!(first, second);
        assert_eq!(first[0].name(), "F");
        assert!(top_n(&pool, 0).is_empty());
        assert_eq!(top_n(&pool, 50).len(), 6);
    }
}
