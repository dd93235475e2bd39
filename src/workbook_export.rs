use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::metrics::ScoredCandidate;
use crate::render_context::RenderContext;
use crate::table_export::{SUMMARY_HEADERS, SummaryRow, summary_rows};
use crate::transfers::MergedPlayer;

pub const WORKBOOK_NAME: &str = "striker_analysis.xlsx";

const MERGED_HEADERS: [&str; 14] = [
    "Player",
    "Nation",
    "Pos",
    "Age",
    "Squad",
    "Comp",
    "Rows",
    "Min",
    "90s",
    "Gls",
    "Sh",
    "SoT",
    "SoT%",
    "xG",
];

enum Cell {
    Text(String),
    Number(f64),
    Blank,
}

fn summary_cells(row: &SummaryRow) -> Vec<Cell> {
    vec![
        Cell::Text(row.player.clone()),
        row.age.map_or(Cell::Blank, |a| Cell::Number(f64::from(a))),
        Cell::Number(f64::from(row.goals)),
        Cell::Number(row.xg),
        Cell::Number(row.goals_per_90),
        Cell::Number(row.shots_per_90),
        Cell::Number(row.sot_pct),
        Cell::Number(row.suitability),
    ]
}

fn merged_cells(p: &MergedPlayer) -> Vec<Cell> {
    vec![
        Cell::Text(p.player.clone()),
        Cell::Text(p.nation.clone()),
        Cell::Text(p.position.clone()),
        p.age.map_or(Cell::Blank, |a| Cell::Number(f64::from(a))),
        Cell::Text(p.squad.clone()),
        Cell::Text(p.comp.clone()),
        Cell::Number(p.rows_merged as f64),
        Cell::Number(f64::from(p.minutes)),
        Cell::Number(p.nineties),
        Cell::Number(f64::from(p.goals)),
        Cell::Number(f64::from(p.shots)),
        Cell::Number(f64::from(p.shots_on_target)),
        Cell::Number(p.sot_pct),
        Cell::Number(p.xg),
    ]
}

fn write_rows(worksheet: &mut Worksheet, headers: &[&str], rows: &[Vec<Cell>]) -> Result<()> {
    let bold = Format::new().set_bold();
    for (col_idx, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col_idx as u16, *header, &bold)
            .with_context(|| format!("write header {header}"))?;
    }
    for (idx, row) in rows.iter().enumerate() {
        let row_idx = idx as u32 + 1;
        for (col_idx, cell) in row.iter().enumerate() {
            let col = col_idx as u16;
            let written = match cell {
                Cell::Text(value) => worksheet.write_string(row_idx, col, value.as_str()),
                Cell::Number(value) => worksheet.write_number(row_idx, col, *value),
                Cell::Blank => continue,
            };
            written.with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}

pub fn export_workbook(
    ctx: &mut RenderContext,
    market_ranked: &[ScoredCandidate],
    shortlist: &[ScoredCandidate],
    merged: &[MergedPlayer],
) -> Result<()> {
    let summary: Vec<Vec<Cell>> = summary_rows(market_ranked).iter().map(summary_cells).collect();
    let short: Vec<Vec<Cell>> = summary_rows(shortlist).iter().map(summary_cells).collect();
    let players: Vec<Vec<Cell>> = merged.iter().map(merged_cells).collect();

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Summary")?;
        write_rows(sheet, &SUMMARY_HEADERS, &summary)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Shortlist")?;
        write_rows(sheet, &SUMMARY_HEADERS, &short)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Merged")?;
        write_rows(sheet, &MERGED_HEADERS, &players)?;
    }

    let path = ctx.artifact_path(WORKBOOK_NAME);
    workbook
        .save(&path)
        .with_context(|| format!("write workbook {}", path.display()))?;
    ctx.record(path);
    Ok(())
}
