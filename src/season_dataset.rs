use std::path::{Path, PathBuf};

use csv::StringRecord;
use log::{debug, info};

pub const DEFAULT_DATASET_PATH: &str = "data/players_data-2024_2025.csv";

pub const REQUIRED_COLUMNS: [&str; 20] = [
    "Player", "Nation", "Pos", "Age", "Squad", "Comp", "Min", "Gls", "Ast", "Sh", "SoT", "SoT%",
    "Dist", "PrgC", "PrgP", "xG", "xAG", "G-PK", "PK", "PKatt",
];

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("missing required column: {column}")]
    MissingColumn { column: &'static str },

    #[error("csv error in {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("line {line}: invalid {column} value '{value}'")]
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerSeasonRow {
    pub player: String,
    pub nation: String,
    pub position: String,
    pub age: Option<u32>,
    pub squad: String,
    pub comp: String,
    pub minutes: u32,
    pub goals: u32,
    pub assists: u32,
    pub shots: u32,
    pub shots_on_target: u32,
    pub sot_pct: Option<f64>,
    pub avg_shot_distance: Option<f64>,
    pub progressive_carries: u32,
    pub progressive_passes: u32,
    pub xg: f64,
    pub xag: f64,
    pub non_penalty_goals: u32,
    pub penalties_scored: u32,
    pub penalty_attempts: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Player,
    Nation,
    Pos,
    Age,
    Squad,
    Comp,
    Min,
    Gls,
    Ast,
    Sh,
    SoT,
    SoTPct,
    Dist,
    PrgC,
    PrgP,
    Xg,
    Xag,
    NonPenaltyGoals,
    Pk,
    PkAtt,
}

impl Column {
    pub fn name(self) -> &'static str {
        REQUIRED_COLUMNS[self as usize]
    }
}

#[derive(Debug, Clone)]
pub struct ColumnIndex {
    positions: [usize; REQUIRED_COLUMNS.len()],
}

impl ColumnIndex {
    /// Resolves every required column; the first occurrence of a duplicated header wins.
    pub fn resolve(headers: &StringRecord) -> Result<Self, DatasetError> {
        let mut positions = [0usize; REQUIRED_COLUMNS.len()];
        for (slot, column) in REQUIRED_COLUMNS.into_iter().enumerate() {
            let Some(pos) = headers.iter().position(|h| h.trim() == column) else {
                return Err(DatasetError::MissingColumn { column });
            };
            positions[slot] = pos;
        }
        Ok(Self { positions })
    }

    fn cell<'r>(&self, record: &'r StringRecord, column: Column) -> &'r str {
        record.get(self.positions[column as usize]).unwrap_or("").trim()
    }
}

pub fn load_season_rows(path: &Path) -> Result<Vec<PlayerSeasonRow>, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    let csv_err = |source| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();
    let columns = ColumnIndex::resolve(&headers)?;
    debug!("resolved {} required columns in {}", REQUIRED_COLUMNS.len(), path.display());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        rows.push(parse_row(&record, &columns)?);
    }

    info!("read {} season rows from {}", rows.len(), path.display());
    Ok(rows)
}

pub fn parse_row(record: &StringRecord, columns: &ColumnIndex) -> Result<PlayerSeasonRow, DatasetError> {
    let line = record.position().map(|p| p.line()).unwrap_or_default();
    let text = |column: Column| columns.cell(record, column).to_string();
    let count = |column: Column| {
        let raw = columns.cell(record, column);
        parse_count(raw).ok_or_else(|| invalid(line, column, raw))
    };
    let decimal = |column: Column| {
        let raw = columns.cell(record, column);
        parse_decimal(raw)
            .map(|v| v.unwrap_or(0.0))
            .ok_or_else(|| invalid(line, column, raw))
    };
    let rate = |column: Column| {
        let raw = columns.cell(record, column);
        parse_decimal(raw).ok_or_else(|| invalid(line, column, raw))
    };

    let age_raw = columns.cell(record, Column::Age);
    let age = parse_age(age_raw).ok_or_else(|| invalid(line, Column::Age, age_raw))?;

    Ok(PlayerSeasonRow {
        player: text(Column::Player),
        nation: text(Column::Nation),
        position: text(Column::Pos),
        age,
        squad: text(Column::Squad),
        comp: text(Column::Comp),
        minutes: count(Column::Min)?,
        goals: count(Column::Gls)?,
        assists: count(Column::Ast)?,
        shots: count(Column::Sh)?,
        shots_on_target: count(Column::SoT)?,
        sot_pct: rate(Column::SoTPct)?,
        avg_shot_distance: rate(Column::Dist)?,
        progressive_carries: count(Column::PrgC)?,
        progressive_passes: count(Column::PrgP)?,
        xg: decimal(Column::Xg)?,
        xag: decimal(Column::Xag)?,
        non_penalty_goals: count(Column::NonPenaltyGoals)?,
        penalties_scored: count(Column::Pk)?,
        penalty_attempts: count(Column::PkAtt)?,
    })
}

fn invalid(line: u64, column: Column, raw: &str) -> DatasetError {
    DatasetError::InvalidValue {
        line,
        column: column.name(),
        value: raw.to_string(),
    }
}

fn is_blank(raw: &str) -> bool {
    let s = raw.trim();
    s.is_empty() || s == "-"
}

fn parse_decimal(raw: &str) -> Option<Option<f64>> {
    if is_blank(raw) {
        return Some(None);
    }
    let cleaned = raw.trim().trim_end_matches('%').replace(',', "");
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite()).map(Some)
}

fn parse_count(raw: &str) -> Option<u32> {
    let value = parse_decimal(raw)?.unwrap_or(0.0);
    if value < 0.0 || value.round() > f64::from(u32::MAX) {
        return None;
    }
    Some(value.round() as u32)
}

/// Accepts `24`, `24.0` and the years-days form `24-123`.
fn parse_age(raw: &str) -> Option<Option<u32>> {
    if is_blank(raw) {
        return Some(None);
    }
    let years = raw.trim().split('-').next().unwrap_or_default();
    years
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| Some(v.trunc() as u32))
}
