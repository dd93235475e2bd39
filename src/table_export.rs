use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::metrics::ScoredCandidate;
use crate::render_context::RenderContext;

pub const SUMMARY_STEM: &str = "striker_summary_stats";

pub const SUMMARY_HEADERS: [&str; 8] = [
    "Player",
    "Age",
    "Gls",
    "xG",
    "Goals_per_90",
    "Shots_per_90",
    "SoT%",
    "Suitability_Score",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Age")]
    pub age: Option<u32>,
    #[serde(rename = "Gls")]
    pub goals: u32,
    #[serde(rename = "xG")]
    pub xg: f64,
    #[serde(rename = "Goals_per_90")]
    pub goals_per_90: f64,
    #[serde(rename = "Shots_per_90")]
    pub shots_per_90: f64,
    #[serde(rename = "SoT%")]
    pub sot_pct: f64,
    #[serde(rename = "Suitability_Score")]
    pub suitability: f64,
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl SummaryRow {
    pub fn from_candidate(c: &ScoredCandidate) -> Self {
        Self {
            player: c.player.player.clone(),
            age: c.player.age,
            goals: c.player.goals,
            xg: round2(c.player.xg),
            goals_per_90: round2(c.metrics.goals_per_90),
            shots_per_90: round2(c.metrics.shots_per_90),
            sot_pct: round2(c.player.sot_pct),
            suitability: round2(c.suitability),
        }
    }

    pub fn cells(&self) -> [String; 8] {
        [
            self.player.clone(),
            self.age.map(|a| a.to_string()).unwrap_or_default(),
            self.goals.to_string(),
            self.xg.to_string(),
            self.goals_per_90.to_string(),
            self.shots_per_90.to_string(),
            self.sot_pct.to_string(),
            self.suitability.to_string(),
        ]
    }
}

pub fn summary_rows(ranked: &[ScoredCandidate]) -> Vec<SummaryRow> {
    ranked.iter().map(SummaryRow::from_candidate).collect()
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|")
}

pub fn to_html(rows: &[SummaryRow]) -> String {
    let mut out = String::from("<table border=\"1\" class=\"dataframe\">\n  <thead>\n    <tr>\n");
    for h in SUMMARY_HEADERS {
        out.push_str(&format!("      <th>{}</th>\n", escape_html(h)));
    }
    out.push_str("    </tr>\n  </thead>\n  <tbody>\n");
    for row in rows {
        out.push_str("    <tr>\n");
        for cell in row.cells() {
            out.push_str(&format!("      <td>{}</td>\n", escape_html(&cell)));
        }
        out.push_str("    </tr>\n");
    }
    out.push_str("  </tbody>\n</table>\n");
    out
}

pub fn to_markdown(rows: &[SummaryRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!("| {} |\n", SUMMARY_HEADERS.join(" | ")));
    out.push_str(&format!("|{}\n", ":---|".repeat(SUMMARY_HEADERS.len())));
    for row in rows {
        let cells: Vec<String> = row.cells().iter().map(|c| escape_markdown(c)).collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    out
}

pub fn write_csv(path: &Path, rows: &[SummaryRow]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    if rows.is_empty() {
        writer.write_record(SUMMARY_HEADERS)?;
    }
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("write row for {}", row.player))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

pub fn export_summary_tables(ctx: &mut RenderContext, ranked: &[ScoredCandidate]) -> Result<()> {
    let rows = summary_rows(ranked);

    let csv_path = ctx.artifact_path(&format!("{SUMMARY_STEM}.csv"));
    write_csv(&csv_path, &rows)?;
    ctx.record(csv_path);

    let html_path = ctx.artifact_path(&format!("{SUMMARY_STEM}.html"));
    fs::write(&html_path, to_html(&rows))
        .with_context(|| format!("write {}", html_path.display()))?;
    ctx.record(html_path);

    let md_path = ctx.artifact_path(&format!("{SUMMARY_STEM}.md"));
    fs::write(&md_path, to_markdown(&rows))
        .with_context(|| format!("write {}", md_path.display()))?;
    ctx.record(md_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str) -> SummaryRow {
        SummaryRow {
            player: name.to_string(),
            age: Some(23),
            goals: 12,
            xg: 10.46,
            goals_per_90: 0.8,
            shots_per_90: 3.33,
            sot_pct: 42.0,
            suitability: 9.5,
        }
    }

    #[test]
    fn rounding_is_two_decimals() {
        assert_eq!(round2(0.73333), 0.73);
        assert_eq!(round2(9.999), 10.0);
    }

    #[test]
    fn html_cells_are_escaped() {
        let html = to_html(&[row("A & <B>")]);
        assert!(html.contains("<td>A &amp; &lt;B&gt;</td>"));
        assert!(html.contains("<th>SoT%</th>"));
        assert!(!html.contains("A & <B>"));
    }

    #[test]
    fn markdown_pipes_are_escaped() {
        let md = to_markdown(&[row("Left|Right")]);
        let lines: Vec<&str> = md.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("| Player | Age | Gls"));
        assert!(lines[2].contains("Left\\|Right"));
    }

    #[test]
    fn missing_age_is_blank() {
        let mut r = row("X");
        r.age = None;
        assert_eq!(r.cells()[1], "");
    }
}
