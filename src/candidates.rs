use log::info;

use crate::metrics::ScoredCandidate;
use crate::transfers::MergedPlayer;

pub const UNLIKELY_TO_SELL: [&str; 8] = [
    "Barcelona",
    "Real Madrid",
    "Bayern Munich",
    "Paris S-G",
    "Manchester City",
    "Liverpool",
    "Inter",
    "Atletico Madrid",
];

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateCriteria {
    pub position_marker: String,
    pub min_nineties: f64,
    /// Exclusive upper bound.
    pub max_age: u32,
    pub min_goals: u32,
    pub excluded_clubs: Vec<String>,
}

impl Default for CandidateCriteria {
    fn default() -> Self {
        Self {
            position_marker: "FW".to_string(),
            min_nineties: 15.0,
            max_age: 28,
            min_goals: 10,
            excluded_clubs: UNLIKELY_TO_SELL.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl CandidateCriteria {
    pub fn whole_market() -> Self {
        Self {
            excluded_clubs: Vec::new(),
            ..Self::default()
        }
    }

    pub fn excludes_squad(&self, squad_history: &str) -> bool {
        self.excluded_clubs
            .iter()
            .any(|club| squad_history.contains(club.as_str()))
    }

    pub fn is_eligible(&self, p: &MergedPlayer) -> bool {
        let young_enough = p.age.is_some_and(|age| age < self.max_age);
        p.position.contains(self.position_marker.as_str())
            && p.nineties >= self.min_nineties
            && young_enough
            && !self.excludes_squad(&p.squad)
            && p.goals >= self.min_goals
    }
}

pub fn select_candidates(players: &[MergedPlayer], criteria: &CandidateCriteria) -> Vec<ScoredCandidate> {
    let pool: Vec<ScoredCandidate> = players
        .iter()
        .filter(|p| criteria.is_eligible(p))
        .cloned()
        .map(ScoredCandidate::score)
        .collect();
    info!(
        "{} of {} players pass the candidate filter ({} excluded clubs)",
        pool.len(),
        players.len(),
        criteria.excluded_clubs.len()
    );
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::season_dataset::PlayerSeasonRow;
    use crate::transfers::merge_transfers;

    fn forward(name: &str, squad: &str, age: u32, minutes: u32, goals: u32) -> PlayerSeasonRow {
        PlayerSeasonRow {
            player: name.to_string(),
            position: "FW".to_string(),
            squad: squad.to_string(),
            age: Some(age),
            minutes,
            goals,
            shots: goals * 4,
            ..PlayerSeasonRow::default()
        }
    }

    fn names(pool: &[ScoredCandidate]) -> Vec<&str> {
        pool.iter().map(|c| c.name()).collect()
    }

    #[test]
    fn each_threshold_removes_players() {
        let mut mid = forward("Midfielder", "Brentford", 24, 2000, 12);
        mid.position = "MF".to_string();
        let rows = vec![
            forward("Eligible", "Brentford", 24, 2000, 12),
            mid,
            forward("Too Old", "Brentford", 28, 2000, 12),
            forward("Bench", "Brentford", 24, 1349, 12),
            forward("Few Goals", "Brentford", 24, 2000, 9),
            forward("Big Club", "Liverpool", 24, 2000, 12),
        ];
        let pool = select_candidates(&merge_transfers(&rows), &CandidateCriteria::default());
        assert_eq!(names(&pool), vec!["Eligible"]);
    }

    #[test]
    fn missing_age_is_never_eligible() {
        let mut row = forward("Ageless", "Brentford", 24, 2000, 12);
        row.age = None;
        let merged = merge_transfers(&[row]);
        assert!(!CandidateCriteria::default().is_eligible(&merged[0]));
    }

    #[test]
    fn exclusion_matches_any_club_in_history() {
        let rows = vec![
            forward("Mover", "Brentford", 24, 1000, 6),
            forward("Mover", "Inter", 24, 1000, 6),
        ];
        let merged = merge_transfers(&rows);
        assert!(select_candidates(&merged, &CandidateCriteria::default()).is_empty());
        assert_eq!(
            names(&select_candidates(&merged, &CandidateCriteria::whole_market())),
            vec!["Mover"]
        );
    }

    #[test]
    fn exclusion_is_substring_based() {
        // "Inter" is contained in "Internacional"; accepted imprecision.
        let merged = merge_transfers(&[forward("Striker", "Internacional", 24, 2000, 12)]);
        assert!(select_candidates(&merged, &CandidateCriteria::default()).is_empty());
    }
}
