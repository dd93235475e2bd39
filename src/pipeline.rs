use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::candidates::{CandidateCriteria, select_candidates};
use crate::charts;
use crate::config::RunConfig;
use crate::manifest::{RunManifest, save_manifest};
use crate::metrics::ScoredCandidate;
use crate::profile;
use crate::ranking::{SHORTLIST_SIZE, rank_candidates};
use crate::render_context::{ChartTheme, RenderContext};
use crate::season_dataset::{PlayerSeasonRow, load_season_rows};
use crate::table_export::export_summary_tables;
use crate::transfers::{MergedPlayer, merge_transfers};
use crate::workbook_export::export_workbook;

#[derive(Debug, Clone)]
pub struct ScoutingRun {
    pub rows: Vec<PlayerSeasonRow>,
    pub merged: Vec<MergedPlayer>,
    pub shortlist_criteria: CandidateCriteria,
    pub shortlist_pool: Vec<ScoredCandidate>,
    pub market_pool: Vec<ScoredCandidate>,
}

impl ScoutingRun {
    pub fn shortlist(&self) -> &[ScoredCandidate] {
        top_slice(&self.shortlist_pool, SHORTLIST_SIZE)
    }

    pub fn market_top(&self) -> &[ScoredCandidate] {
        top_slice(&self.market_pool, SHORTLIST_SIZE)
    }

    pub fn shortlist_report(&self) -> String {
        profile::render_shortlist(self.shortlist(), &self.shortlist_criteria)
    }

    pub fn visual_summary(&self) -> String {
        profile::render_visual_summary(self.market_top())
    }
}

fn top_slice(pool: &[ScoredCandidate], n: usize) -> &[ScoredCandidate] {
    &pool[..pool.len().min(n)]
}

pub fn analyze(rows: Vec<PlayerSeasonRow>) -> ScoutingRun {
    let merged = merge_transfers(&rows);
    let shortlist_criteria = CandidateCriteria::default();
    let shortlist_pool = rank_candidates(&select_candidates(&merged, &shortlist_criteria));
    let market_pool = rank_candidates(&select_candidates(&merged, &CandidateCriteria::whole_market()));
    ScoutingRun {
        rows,
        merged,
        shortlist_criteria,
        shortlist_pool,
        market_pool,
    }
}

pub fn load_and_analyze(data_path: &Path) -> Result<ScoutingRun> {
    let rows = load_season_rows(data_path)
        .with_context(|| format!("load season table {}", data_path.display()))?;
    Ok(analyze(rows))
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run: ScoutingRun,
    pub artifacts: Vec<PathBuf>,
    pub manifest_path: PathBuf,
}

pub fn write_artifacts(run: &ScoutingRun, cfg: &RunConfig) -> Result<(Vec<PathBuf>, PathBuf)> {
    let mut ctx = RenderContext::create(&cfg.output_dir, ChartTheme::default())?;

    charts::render_all(&mut ctx, &run.rows, cfg.preview_rows, &run.market_pool)?;
    export_summary_tables(&mut ctx, &run.market_pool)?;
    export_workbook(&mut ctx, &run.market_pool, run.shortlist(), &run.merged)?;

    let mut manifest = RunManifest::new(&cfg.data_path, run.rows.len(), run.merged.len())
        .with_shortlist(run.shortlist());
    manifest.shortlist_pool = run.shortlist_pool.len();
    manifest.market_pool = run.market_pool.len();
    manifest.artifacts = ctx.artifact_names();
    let manifest_path = save_manifest(ctx.output_dir(), &manifest)?;

    Ok((ctx.written().to_vec(), manifest_path))
}

pub fn run(cfg: &RunConfig) -> Result<RunSummary> {
    let run = load_and_analyze(&cfg.data_path)?;
    let (artifacts, manifest_path) = write_artifacts(&run, cfg)?;
    info!(
        "{} artifacts written to {}",
        artifacts.len(),
        cfg.output_dir.display()
    );
    Ok(RunSummary {
        run,
        artifacts,
        manifest_path,
    })
}
