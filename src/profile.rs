use std::fmt;

use crate::candidates::CandidateCriteria;
use crate::metrics::ScoredCandidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finishing {
    Elite,
    VeryGood,
    Good,
    Average,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotVolume {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxPresence {
    Strong,
    Moderate,
    Limited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Excellent,
    Good,
    Average,
}

impl Finishing {
    pub fn from_goals_per_90(v: f64) -> Self {
        if v > 0.7 {
            Self::Elite
        } else if v > 0.5 {
            Self::VeryGood
        } else if v > 0.3 {
            Self::Good
        } else {
            Self::Average
        }
    }
}

impl ShotVolume {
    pub fn from_shots_per_90(v: f64) -> Self {
        if v > 3.5 {
            Self::High
        } else if v > 2.5 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl BoxPresence {
    pub fn from_shots_per_90(v: f64) -> Self {
        if v > 3.0 {
            Self::Strong
        } else if v > 2.0 {
            Self::Moderate
        } else {
            Self::Limited
        }
    }
}

impl Conversion {
    pub fn from_rate(v: f64) -> Self {
        if v > 0.2 {
            Self::Excellent
        } else if v > 0.15 {
            Self::Good
        } else {
            Self::Average
        }
    }
}

impl fmt::Display for Finishing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Elite => "Elite",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::Average => "Average",
        })
    }
}

impl fmt::Display for ShotVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        })
    }
}

impl fmt::Display for BoxPresence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Strong => "Strong",
            Self::Moderate => "Moderate",
            Self::Limited => "Limited",
        })
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrikerProfile {
    pub finishing: Finishing,
    pub shot_volume: ShotVolume,
    pub box_presence: BoxPresence,
    pub conversion: Conversion,
}

impl StrikerProfile {
    pub fn of(c: &ScoredCandidate) -> Self {
        Self {
            finishing: Finishing::from_goals_per_90(c.metrics.goals_per_90),
            shot_volume: ShotVolume::from_shots_per_90(c.metrics.shots_per_90),
            box_presence: BoxPresence::from_shots_per_90(c.metrics.shots_per_90),
            conversion: Conversion::from_rate(c.metrics.conversion_rate),
        }
    }
}

fn rule(out: &mut String, ch: char, width: usize) {
    out.extend(std::iter::repeat_n(ch, width));
    out.push('\n');
}

fn opt_age(age: Option<u32>) -> String {
    age.map(|a| a.to_string()).unwrap_or_else(|| "?".to_string())
}

pub fn render_shortlist(top: &[ScoredCandidate], criteria: &CandidateCriteria) -> String {
    let mut out = String::new();
    out.push_str("\nTop Goalscoring Strikers Available:\n");
    rule(&mut out, '-', 100);
    out.push_str(&format!(
        "Player Analysis (Minimum {:.0} matches, {}+ goals, combined stats for transfers):\n",
        criteria.min_nineties, criteria.min_goals
    ));
    rule(&mut out, '-', 100);

    if top.is_empty() {
        out.push_str("\nNo players matched the search criteria.\n");
    }

    for c in top {
        let p = &c.player;
        let profile = StrikerProfile::of(c);
        out.push_str(&format!("\nPlayer: {}\n", p.player));
        out.push_str(&format!("Age: {}\n", opt_age(p.age)));
        out.push_str(&format!("Nationality: {}\n", p.nation));
        out.push_str(&format!("Current Team(s): {}\n", p.squad));

        out.push_str("\nGoalscoring Metrics:\n");
        out.push_str(&format!("Goals: {} ({:.2} per 90)\n", p.goals, c.metrics.goals_per_90));
        out.push_str(&format!("Non-Penalty Goals: {}\n", p.non_penalty_goals));
        out.push_str(&format!(
            "Penalties Scored: {} from {} attempts\n",
            p.penalties_scored, p.penalty_attempts
        ));
        out.push_str(&format!("Shot Accuracy: {:.1}%\n", p.sot_pct));
        out.push_str(&format!("Shots per 90: {:.2}\n", c.metrics.shots_per_90));
        out.push_str(&format!("Goals per Shot: {:.3}\n", c.metrics.conversion_rate));

        out.push_str("\nChance Quality:\n");
        out.push_str(&format!("Expected Goals: {:.2}\n", p.xg));
        out.push_str(&format!("Goals vs xG: {:.2}\n", c.goals_minus_xg()));

        out.push_str("\nPlaying Time:\n");
        out.push_str(&format!("Minutes: {}\n", p.minutes));
        out.push_str(&format!("Complete 90s: {:.1}\n", p.nineties));

        out.push_str("\nStriker Profile:\n");
        out.push_str(&format!("Finishing: {}\n", profile.finishing));
        out.push_str(&format!("Shot Volume: {}\n", profile.shot_volume));
        out.push_str(&format!("Penalty Box Presence: {}\n", profile.box_presence));
        out.push_str(&format!("Conversion Rate: {}\n", profile.conversion));

        out.push_str(&format!("\nEstimated Value: €{:.1}M\n", c.market_value / 1_000_000.0));
        out.push_str(&format!("Suitability Score: {:.2}\n", c.suitability));
        rule(&mut out, '-', 50);
    }

    out.push_str(&render_rationale());
    out.push_str(&render_criteria(criteria));
    out
}

fn render_rationale() -> String {
    let mut out = String::new();
    out.push_str("\nWhy These Strikers Would Suit:\n");
    rule(&mut out, '-', 100);
    out.push_str("1. Proven goalscoring record in top leagues\n");
    out.push_str("2. High shot volume and good conversion rates\n");
    out.push_str("3. Regular starters with consistent minutes\n");
    out.push_str("4. Age profile allows for future development\n");
    out.push_str("5. Playing for clubs that might be willing to sell\n");
    out
}

pub fn render_criteria(criteria: &CandidateCriteria) -> String {
    let mut out = String::new();
    out.push_str("\nSummary of Search Criteria:\n");
    rule(&mut out, '-', 100);
    out.push_str(&format!(
        "1. Age: Under {} (players who can develop and keep resale value)\n",
        criteria.max_age
    ));
    out.push_str(&format!(
        "2. Experience: Minimum {:.0} full matches played this season\n",
        criteria.min_nineties
    ));
    out.push_str(&format!("3. Position: {}\n", criteria.position_marker));
    out.push_str(&format!("4. Output: at least {} goals\n", criteria.min_goals));
    if !criteria.excluded_clubs.is_empty() {
        out.push_str(&format!("5. Excluded clubs: {}\n", criteria.excluded_clubs.join(", ")));
    }
    out.push_str("Key Metrics Weighted:\n");
    out.push_str("   - Goal scoring efficiency\n");
    out.push_str("   - Shot conversion rate\n");
    out.push_str("   - Shot volume\n");
    out.push_str("   - Shot quality\n");
    out
}

pub fn render_visual_summary(top: &[ScoredCandidate]) -> String {
    let mut out = String::new();
    out.push_str("\nStriker Analysis Summary:\n");
    rule(&mut out, '=', 50);
    out.push_str(&format!("\nTop {} Strikers by Suitability Score:\n", top.len()));
    for c in top {
        let p = &c.player;
        out.push_str(&format!("\n{} (Age: {})\n", p.player, opt_age(p.age)));
        out.push_str(&format!("Current Team: {}\n", p.squad));
        out.push_str(&format!("Goals: {} (xG: {:.2})\n", p.goals, p.xg));
        out.push_str(&format!("Goals per 90: {:.2}\n", c.metrics.goals_per_90));
        out.push_str(&format!("Shot Accuracy: {:.1}%\n", p.sot_pct));
        out.push_str(&format!("Suitability Score: {:.2}\n", c.suitability));
    }

    out.push_str("\nKey Insights:\n");
    out.push_str("1. Goals vs xG Analysis:\n");
    out.push_str("   - Players above the diagonal line are outperforming their expected goals\n");
    out.push_str("   - Players below the line are underperforming their expected goals\n");
    out.push_str("\n2. Shot Quality Metrics:\n");
    out.push_str("   - Higher correlation between Goals per 90 and xG indicates consistent finishing\n");
    out.push_str("   - Shot accuracy (SoT%) shows how clinical the strikers are\n");
    out.push_str("\n3. Performance Profile:\n");
    out.push_str("   - Radar charts show balance across the key metrics\n");
    out.push_str("   - Larger areas indicate more well-rounded strikers\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finishing_bands_are_strict() {
        assert_eq!(Finishing::from_goals_per_90(0.71), Finishing::Elite);
        assert_eq!(Finishing::from_goals_per_90(0.7), Finishing::VeryGood);
        assert_eq!(Finishing::from_goals_per_90(0.5), Finishing::Good);
        assert_eq!(Finishing::from_goals_per_90(0.3), Finishing::Average);
        assert_eq!(Finishing::VeryGood.to_string(), "Very Good");
    }

    #[test]
    fn shot_bands() {
        assert_eq!(ShotVolume::from_shots_per_90(3.6), ShotVolume::High);
        assert_eq!(ShotVolume::from_shots_per_90(3.0), ShotVolume::Medium);
        assert_eq!(ShotVolume::from_shots_per_90(2.5), ShotVolume::Low);
        assert_eq!(BoxPresence::from_shots_per_90(3.0), BoxPresence::Moderate);
        assert_eq!(BoxPresence::from_shots_per_90(3.01), BoxPresence::Strong);
        assert_eq!(BoxPresence::from_shots_per_90(1.0), BoxPresence::Limited);
    }

    #[test]
    fn conversion_bands() {
        assert_eq!(Conversion::from_rate(0.25), Conversion::Excellent);
        assert_eq!(Conversion::from_rate(0.2), Conversion::Good);
        assert_eq!(Conversion::from_rate(0.1), Conversion::Average);
    }

    #[test]
    fn empty_shortlist_still_lists_criteria() {
        let text = render_shortlist(&[], &CandidateCriteria::default());
        assert!(text.contains("No players matched"));
        assert!(text.contains("Excluded clubs: Barcelona"));
        assert!(text.contains("Under 28"));
    }
}
