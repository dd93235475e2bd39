use std::collections::BTreeMap;

use log::{debug, info};
use serde::Serialize;

use crate::metrics::safe_ratio;
use crate::season_dataset::PlayerSeasonRow;

pub const TRANSFER_SEPARATOR: &str = " → ";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedPlayer {
    pub player: String,
    pub nation: String,
    pub position: String,
    pub age: Option<u32>,
    pub squad: String,
    pub comp: String,
    pub rows_merged: usize,
    pub minutes: u32,
    pub goals: u32,
    pub assists: u32,
    pub shots: u32,
    pub shots_on_target: u32,
    pub progressive_carries: u32,
    pub progressive_passes: u32,
    pub xg: f64,
    pub xag: f64,
    pub non_penalty_goals: u32,
    pub penalties_scored: u32,
    pub penalty_attempts: u32,
    pub nineties: f64,
    pub goals_per_90: f64,
    pub shots_per_90: f64,
    pub sot_pct: f64,
    pub avg_shot_distance: Option<f64>,
}

impl MergedPlayer {
    pub fn squads(&self) -> impl Iterator<Item = &str> {
        self.squad.split(TRANSFER_SEPARATOR)
    }

    pub fn transferred(&self) -> bool {
        self.rows_merged > 1
    }
}

#[derive(Debug, Default)]
struct Accumulator {
    nation: Option<String>,
    position: Option<String>,
    age: Option<u32>,
    squads: Vec<String>,
    comps: Vec<String>,
    rows: usize,
    minutes: u32,
    goals: u32,
    assists: u32,
    shots: u32,
    shots_on_target: u32,
    progressive_carries: u32,
    progressive_passes: u32,
    xg: f64,
    xag: f64,
    non_penalty_goals: u32,
    penalties_scored: u32,
    penalty_attempts: u32,
    weighted_distance: f64,
    distance_shots: u32,
}

impl Accumulator {
    fn push(&mut self, row: &PlayerSeasonRow) {
        first_non_empty(&mut self.nation, &row.nation);
        first_non_empty(&mut self.position, &row.position);
        if self.age.is_none() {
            self.age = row.age;
        }
        self.squads.push(row.squad.clone());
        self.comps.push(row.comp.clone());
        self.rows += 1;

        self.minutes = self.minutes.saturating_add(row.minutes);
        self.goals = self.goals.saturating_add(row.goals);
        self.assists = self.assists.saturating_add(row.assists);
        self.shots = self.shots.saturating_add(row.shots);
        self.shots_on_target = self.shots_on_target.saturating_add(row.shots_on_target);
        self.progressive_carries = self.progressive_carries.saturating_add(row.progressive_carries);
        self.progressive_passes = self.progressive_passes.saturating_add(row.progressive_passes);
        self.xg += row.xg;
        self.xag += row.xag;
        self.non_penalty_goals = self.non_penalty_goals.saturating_add(row.non_penalty_goals);
        self.penalties_scored = self.penalties_scored.saturating_add(row.penalties_scored);
        self.penalty_attempts = self.penalty_attempts.saturating_add(row.penalty_attempts);

        if let Some(dist) = row.avg_shot_distance.filter(|_| row.shots > 0) {
            self.weighted_distance += dist * f64::from(row.shots);
            self.distance_shots = self.distance_shots.saturating_add(row.shots);
        }
    }

    fn finish(self, player: String) -> MergedPlayer {
        let nineties = f64::from(self.minutes) / 90.0;
        let goals = f64::from(self.goals);
        let shots = f64::from(self.shots);
        let sot_pct = safe_ratio(f64::from(self.shots_on_target), shots) * 100.0;
        let avg_shot_distance = (self.distance_shots > 0)
            .then(|| self.weighted_distance / f64::from(self.distance_shots));

        MergedPlayer {
            player,
            nation: self.nation.unwrap_or_default(),
            position: self.position.unwrap_or_default(),
            age: self.age,
            squad: self.squads.join(TRANSFER_SEPARATOR),
            comp: self.comps.join(TRANSFER_SEPARATOR),
            rows_merged: self.rows,
            minutes: self.minutes,
            goals: self.goals,
            assists: self.assists,
            shots: self.shots,
            shots_on_target: self.shots_on_target,
            progressive_carries: self.progressive_carries,
            progressive_passes: self.progressive_passes,
            xg: self.xg,
            xag: self.xag,
            non_penalty_goals: self.non_penalty_goals,
            penalties_scored: self.penalties_scored,
            penalty_attempts: self.penalty_attempts,
            nineties,
            goals_per_90: safe_ratio(goals, nineties),
            shots_per_90: safe_ratio(shots, nineties),
            sot_pct: (sot_pct * 10.0).round() / 10.0,
            avg_shot_distance,
        }
    }
}

fn first_non_empty(slot: &mut Option<String>, value: &str) {
    if slot.is_none() && !value.trim().is_empty() {
        *slot = Some(value.to_string());
    }
}

/// Collapses the rows of players who moved mid-season into one entry each.
///
/// Counting stats are summed, age/position/nation come from the first row that
/// has them, and rates are recomputed from the totals. Output is sorted by name.
pub fn merge_transfers(rows: &[PlayerSeasonRow]) -> Vec<MergedPlayer> {
    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();
    for row in rows {
        groups.entry(row.player.as_str()).or_default().push(row);
    }

    let merged: Vec<MergedPlayer> = groups
        .into_iter()
        .map(|(name, acc)| acc.finish(name.to_string()))
        .collect();

    let transfers = merged.iter().filter(|p| p.transferred()).count();
    debug!("{transfers} players appear for more than one squad");
    info!("merged {} rows into {} players", rows.len(), merged.len());
    merged
}
