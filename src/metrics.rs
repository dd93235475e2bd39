use serde::Serialize;

use crate::transfers::MergedPlayer;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub goals_per_90: f64,
    pub conversion: f64,
    pub shots_per_90: f64,
    pub shot_quality: f64,
}

pub const SCORE_WEIGHTS: ScoreWeights = ScoreWeights {
    goals_per_90: 5.0,
    conversion: 3.0,
    shots_per_90: 1.0,
    shot_quality: 2.0,
};

pub const VALUE_PER_GOAL: f64 = 3_000_000.0;
pub const VALUE_PER_NINETY: f64 = 200_000.0;

/// `num / den`, or 0 when the denominator is zero or the result is not finite.
pub fn safe_ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        return 0.0;
    }
    let v = num / den;
    if v.is_finite() { v } else { 0.0 }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StrikerMetrics {
    pub goals_per_90: f64,
    pub shots_per_90: f64,
    pub conversion_rate: f64,
    pub shot_quality: f64,
}

impl StrikerMetrics {
    pub fn from_player(p: &MergedPlayer) -> Self {
        let goals = f64::from(p.goals);
        let shots = f64::from(p.shots);
        Self {
            goals_per_90: safe_ratio(goals, p.nineties),
            shots_per_90: safe_ratio(shots, p.nineties),
            conversion_rate: safe_ratio(goals, shots),
            shot_quality: safe_ratio(p.xg, shots),
        }
    }

    pub fn suitability(&self, w: &ScoreWeights) -> f64 {
        self.goals_per_90 * w.goals_per_90
            + self.conversion_rate * w.conversion
            + self.shots_per_90 * w.shots_per_90
            + self.shot_quality * w.shot_quality
    }
}

pub fn estimated_market_value(p: &MergedPlayer) -> f64 {
    f64::from(p.goals) * VALUE_PER_GOAL + p.nineties * VALUE_PER_NINETY
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub player: MergedPlayer,
    pub metrics: StrikerMetrics,
    pub suitability: f64,
    pub market_value: f64,
}

impl ScoredCandidate {
    pub fn score(player: MergedPlayer) -> Self {
        let metrics = StrikerMetrics::from_player(&player);
        let suitability = metrics.suitability(&SCORE_WEIGHTS);
        let market_value = estimated_market_value(&player);
        Self {
            player,
            metrics,
            suitability,
            market_value,
        }
    }

    pub fn name(&self) -> &str {
        &self.player.player
    }

    pub fn goals_minus_xg(&self) -> f64 {
        f64::from(self.player.goals) - self.player.xg
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Goals,
    ExpectedGoals,
    GoalsPer90,
    ShotsPer90,
    ShotAccuracy,
    Suitability,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Goals,
        Metric::ExpectedGoals,
        Metric::GoalsPer90,
        Metric::ShotsPer90,
        Metric::ShotAccuracy,
        Metric::Suitability,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Metric::Goals => "Gls",
            Metric::ExpectedGoals => "xG",
            Metric::GoalsPer90 => "Goals_per_90",
            Metric::ShotsPer90 => "Shots_per_90",
            Metric::ShotAccuracy => "SoT%",
            Metric::Suitability => "Suitability_Score",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Goals => "Goals",
            Metric::ExpectedGoals => "Expected Goals (xG)",
            Metric::GoalsPer90 => "Goals per 90",
            Metric::ShotsPer90 => "Shots per 90",
            Metric::ShotAccuracy => "Shot Accuracy (%)",
            Metric::Suitability => "Suitability Score",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Metric::Goals => "goals",
            Metric::ExpectedGoals => "xg",
            Metric::GoalsPer90 => "goals_per_90",
            Metric::ShotsPer90 => "shots_per_90",
            Metric::ShotAccuracy => "sot_pct",
            Metric::Suitability => "suitability_score",
        }
    }

    pub fn value(self, c: &ScoredCandidate) -> f64 {
        match self {
            Metric::Goals => f64::from(c.player.goals),
            Metric::ExpectedGoals => c.player.xg,
            Metric::GoalsPer90 => c.metrics.goals_per_90,
            Metric::ShotsPer90 => c.metrics.shots_per_90,
            Metric::ShotAccuracy => c.player.sot_pct,
            Metric::Suitability => c.suitability,
        }
    }

    pub fn column_values(self, pool: &[ScoredCandidate]) -> Vec<f64> {
        pool.iter().map(|c| self.value(c)).collect()
    }
}
