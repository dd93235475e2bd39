use std::f64::consts::PI;
use std::ops::Range;

use anyhow::{Context, Result};
use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::metrics::{Metric, ScoredCandidate, safe_ratio};
use crate::ranking::{BAR_CHART_SIZE, SHORTLIST_SIZE};
use crate::render_context::{ChartTheme, RenderContext};
use crate::season_dataset::PlayerSeasonRow;
use crate::stats;

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

const HIST_BINS: usize = 12;

pub const PAIRPLOT_METRICS: [Metric; 4] = [
    Metric::GoalsPer90,
    Metric::ShotsPer90,
    Metric::ShotAccuracy,
    Metric::ExpectedGoals,
];

pub const HEATMAP_METRICS: [Metric; 5] = [
    Metric::GoalsPer90,
    Metric::ShotsPer90,
    Metric::ShotAccuracy,
    Metric::Goals,
    Metric::ExpectedGoals,
];

pub const COMPARISON_METRICS: [Metric; 4] = [
    Metric::GoalsPer90,
    Metric::ShotsPer90,
    Metric::ShotAccuracy,
    Metric::ExpectedGoals,
];

pub const RADAR_AXES: [&str; 5] = [
    "Goals per 90",
    "Conversion Rate",
    "Shot Volume",
    "Shot Quality",
    "Minutes Played",
];

/// Renders the full chart catalogue for one candidate pool.
///
/// `pool` should already be ranked; the radar, scatter labels and comparison
/// use its first five entries.
pub fn render_all(
    ctx: &mut RenderContext,
    rows: &[PlayerSeasonRow],
    preview_rows: usize,
    pool: &[ScoredCandidate],
) -> Result<()> {
    let top = &pool[..pool.len().min(SHORTLIST_SIZE)];

    render_raw_preview(ctx, rows, preview_rows)?;
    for metric in Metric::ALL {
        render_histogram(ctx, pool, metric)?;
        render_box_plot(ctx, pool, metric)?;
        render_top_bars(ctx, pool, metric)?;
    }
    render_pairplot(ctx, pool)?;
    render_radar(ctx, top)?;
    render_goals_vs_xg(ctx, pool, top)?;
    render_correlation_heatmap(ctx, pool)?;
    render_performance_comparison(ctx, top)?;
    Ok(())
}

fn render_svg(
    ctx: &mut RenderContext,
    file_name: &str,
    size: (u32, u32),
    draw: impl FnOnce(&Area<'_>, &ChartTheme) -> Result<()>,
) -> Result<()> {
    let path = ctx.artifact_path(file_name);
    {
        let root = SVGBackend::new(&path, size).into_drawing_area();
        draw(&root, &ctx.theme).with_context(|| format!("draw chart {file_name}"))?;
        root.present()
            .with_context(|| format!("write chart {}", path.display()))?;
    }
    ctx.record(path);
    Ok(())
}

fn anchored<'a>(font: (&'a str, u32), color: &'a RGBColor, h: HPos, v: VPos) -> TextStyle<'a> {
    TextStyle::from(font).pos(Pos::new(h, v)).color(color)
}

fn padded(bounds: Option<(f64, f64)>, from_zero: bool) -> Range<f64> {
    let (lo, hi) = bounds.unwrap_or((0.0, 1.0));
    let lo = if from_zero { lo.min(0.0) } else { lo };
    let span = hi - lo;
    if span.abs() < 1e-9 {
        return (lo - 1.0)..(hi + 1.0);
    }
    let pad = span * 0.08;
    let start = if from_zero && lo >= 0.0 { lo } else { lo - pad };
    start..(hi + pad)
}

fn short_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let mut out: String = name.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn category_index(v: f64, len: usize) -> Option<usize> {
    let idx = v.round();
    if (v - idx).abs() > 1e-6 || idx < 0.0 || idx >= len as f64 {
        return None;
    }
    Some(idx as usize)
}

pub fn heatmap_matrix(pool: &[ScoredCandidate]) -> Vec<Vec<f64>> {
    let columns: Vec<Vec<f64>> = HEATMAP_METRICS.iter().map(|m| m.column_values(pool)).collect();
    stats::correlation_matrix(&columns)
}

fn lerp_color(stops: &[(u8, u8, u8)], t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let segments = stops.len().saturating_sub(1).max(1);
    let pos = t * segments as f64;
    let idx = (pos.floor() as usize).min(segments - 1).min(stops.len().saturating_sub(1));
    let next = (idx + 1).min(stops.len() - 1);
    let frac = pos - idx as f64;
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * frac).round() as u8;
    let (a, b) = (stops[idx], stops[next]);
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

pub fn sequential_color(t: f64) -> RGBColor {
    lerp_color(
        &[(68, 1, 84), (59, 82, 139), (33, 145, 140), (94, 201, 98), (253, 231, 37)],
        t,
    )
}

pub fn diverging_color(v: f64) -> RGBColor {
    lerp_color(&[(33, 102, 172), (247, 247, 247), (178, 24, 43)], (v + 1.0) / 2.0)
}

pub fn render_raw_preview(ctx: &mut RenderContext, rows: &[PlayerSeasonRow], n: usize) -> Result<()> {
    let header = [
        ("Player", 200),
        ("Nation", 80),
        ("Pos", 70),
        ("Age", 50),
        ("Squad", 170),
        ("Comp", 150),
        ("Min", 70),
        ("Gls", 50),
        ("Ast", 50),
        ("Sh", 50),
        ("SoT", 50),
        ("xG", 60),
    ];
    let shown = &rows[..rows.len().min(n)];
    let row_h = 32;
    let margin = 20;
    let width: i32 = header.iter().map(|(_, w)| *w).sum::<i32>() + margin * 2;
    let height = row_h * (shown.len() as i32 + 2) + margin * 2;

    render_svg(ctx, "preview_raw_rows.svg", (width as u32, height as u32), |root, theme| {
        root.fill(&WHITE)?;
        let title = anchored(theme.title_font(), &theme.ink, HPos::Left, VPos::Top);
        root.draw(&Text::new(
            format!("First {} rows of the input table", shown.len()),
            (margin, margin / 2),
            title,
        ))?;

        let top = margin + row_h;
        root.draw(&Rectangle::new(
            [(margin, top), (width - margin, top + row_h)],
            theme.series_color(0).mix(0.25).filled(),
        ))?;
        for r in (1..shown.len()).step_by(2) {
            let y0 = top + row_h * (r as i32 + 1);
            root.draw(&Rectangle::new(
                [(margin, y0), (width - margin, y0 + row_h)],
                theme.background.mix(0.5).filled(),
            ))?;
        }

        let cell = anchored(theme.label_font(), &theme.ink, HPos::Left, VPos::Center);
        let mut x = margin;
        for (col, (name, w)) in header.iter().enumerate() {
            root.draw(&Text::new(name.to_string(), (x + 6, top + row_h / 2), cell.clone()))?;
            for (r, row) in shown.iter().enumerate() {
                let y = top + row_h * (r as i32 + 1) + row_h / 2;
                root.draw(&Text::new(preview_cell(row, col), (x + 6, y), cell.clone()))?;
            }
            x += w;
        }
        Ok(())
    })
}

fn preview_cell(row: &PlayerSeasonRow, col: usize) -> String {
    match col {
        0 => short_name(&row.player, 22),
        1 => row.nation.clone(),
        2 => row.position.clone(),
        3 => row.age.map(|a| a.to_string()).unwrap_or_default(),
        4 => short_name(&row.squad, 18),
        5 => short_name(&row.comp, 16),
        6 => row.minutes.to_string(),
        7 => row.goals.to_string(),
        8 => row.assists.to_string(),
        9 => row.shots.to_string(),
        10 => row.shots_on_target.to_string(),
        _ => format!("{:.1}", row.xg),
    }
}

pub fn render_histogram(ctx: &mut RenderContext, pool: &[ScoredCandidate], metric: Metric) -> Result<()> {
    let values = metric.column_values(pool);
    let size = ctx.theme.size;
    render_svg(ctx, &format!("hist_{}.svg", metric.slug()), size, |root, theme| {
        root.fill(&theme.background)?;
        let title = format!("Distribution of {}", metric.label());
        draw_histogram(theme, root, &values, &title, metric.label(), 0, true)
    })
}

fn draw_histogram(
    theme: &ChartTheme,
    area: &Area<'_>,
    values: &[f64],
    title: &str,
    x_desc: &str,
    color_idx: usize,
    full_size: bool,
) -> Result<()> {
    let h = stats::histogram(values, HIST_BINS);
    let x_end = h.start + h.width * h.counts.len() as f64;
    let y_max = (f64::from(h.max_count()).max(1.0)) * 1.15;
    let color = theme.series_color(color_idx);

    let mut builder = ChartBuilder::on(area);
    builder.margin(if full_size { 20 } else { 6 });
    if full_size {
        builder
            .caption(title, theme.title_font())
            .x_label_area_size(50)
            .y_label_area_size(60);
    } else {
        builder.x_label_area_size(22).y_label_area_size(34);
    }
    let mut chart = builder.build_cartesian_2d(h.start..x_end, 0f64..y_max)?;

    let mut mesh = chart.configure_mesh();
    mesh.light_line_style(theme.grid.stroke_width(1))
        .bold_line_style(theme.grid.stroke_width(2))
        .label_style((theme.font_family, if full_size { theme.label_size } else { 10 }));
    if full_size {
        mesh.x_desc(x_desc).y_desc("Players");
    } else {
        mesh.x_labels(3).y_labels(3);
    }
    mesh.draw()?;

    chart.draw_series(h.counts.iter().enumerate().map(|(i, count)| {
        let (lo, hi) = h.bin_range(i);
        Rectangle::new([(lo, 0.0), (hi, f64::from(*count))], color.mix(0.75).filled())
    }))?;
    Ok(())
}

pub fn render_box_plot(ctx: &mut RenderContext, pool: &[ScoredCandidate], metric: Metric) -> Result<()> {
    let values = metric.column_values(pool);
    let summary = stats::five_number_summary(&values);
    let y_range = padded(summary.map(|s| (s.min, s.max)), false);

    render_svg(ctx, &format!("box_{}.svg", metric.slug()), (700, 800), |root, theme| {
        root.fill(&theme.background)?;
        let mut chart = ChartBuilder::on(root)
            .caption(format!("{} spread", metric.label()), theme.title_font())
            .margin(20)
            .x_label_area_size(20)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..1f64, y_range)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .light_line_style(theme.grid.stroke_width(1))
            .bold_line_style(theme.grid.stroke_width(2))
            .x_label_formatter(&|_| String::new())
            .y_desc(metric.label())
            .label_style(theme.label_font())
            .draw()?;

        let Some(s) = summary else {
            return Ok(());
        };
        let color = theme.series_color(1);
        chart.draw_series(std::iter::once(Rectangle::new(
            [(0.3, s.q1), (0.7, s.q3)],
            color.mix(0.6).filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(0.3, s.q1), (0.7, s.q3)],
            theme.ink.stroke_width(1),
        )))?;
        let strokes = vec![
            vec![(0.3, s.median), (0.7, s.median)],
            vec![(0.5, s.q3), (0.5, s.max)],
            vec![(0.5, s.q1), (0.5, s.min)],
            vec![(0.42, s.max), (0.58, s.max)],
            vec![(0.42, s.min), (0.58, s.min)],
        ];
        chart.draw_series(
            strokes
                .into_iter()
                .map(|pts| PathElement::new(pts, theme.ink.stroke_width(2))),
        )?;
        // Individual players as a deterministic strip beside the box.
        chart.draw_series(values.iter().enumerate().map(|(i, v)| {
            let x = 0.78 + 0.12 * ((i * 37 % 100) as f64 / 100.0);
            Circle::new((x, *v), 3, theme.ink.mix(0.5).filled())
        }))?;
        Ok(())
    })
}

pub fn render_top_bars(ctx: &mut RenderContext, pool: &[ScoredCandidate], metric: Metric) -> Result<()> {
    let mut ordered: Vec<(&str, f64)> = pool.iter().map(|c| (c.name(), metric.value(c))).collect();
    ordered.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ordered.truncate(BAR_CHART_SIZE);

    let n = ordered.len().max(1) as f64;
    let x_max = ordered.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let x_max = if x_max > 0.0 { x_max * 1.25 } else { 1.0 };
    let size = ctx.theme.size;

    render_svg(ctx, &format!("top10_{}.svg", metric.slug()), size, |root, theme| {
        root.fill(&theme.background)?;
        let mut chart = ChartBuilder::on(root)
            .caption(format!("Top {} by {}", ordered.len(), metric.label()), theme.title_font())
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(20)
            .build_cartesian_2d(0f64..x_max, 0f64..n)?;
        chart
            .configure_mesh()
            .disable_y_mesh()
            .light_line_style(theme.grid.stroke_width(1))
            .bold_line_style(theme.grid.stroke_width(2))
            .y_label_formatter(&|_| String::new())
            .x_desc(metric.label())
            .label_style(theme.label_font())
            .draw()?;

        let color = theme.series_color(0);
        chart.draw_series(ordered.iter().enumerate().map(|(i, (_, v))| {
            let y = n - i as f64;
            Rectangle::new([(0.0, y - 0.85), (*v, y - 0.15)], color.mix(0.8).filled())
        }))?;
        let label = anchored(theme.label_font(), &theme.ink, HPos::Left, VPos::Center);
        chart.draw_series(ordered.iter().enumerate().map(|(i, (name, v))| {
            let y = n - i as f64 - 0.5;
            Text::new(format!("{name}  {v:.2}"), (x_max * 0.01, y), label.clone())
        }))?;
        Ok(())
    })
}

pub fn render_pairplot(ctx: &mut RenderContext, pool: &[ScoredCandidate]) -> Result<()> {
    let k = PAIRPLOT_METRICS.len();
    let columns: Vec<Vec<f64>> = PAIRPLOT_METRICS.iter().map(|m| m.column_values(pool)).collect();
    let size = ctx.theme.square_size;

    render_svg(ctx, "pairplot.svg", size, |root, theme| {
        root.fill(&theme.background)?;
        let root = root.titled("Pairwise relationships of striker metrics", theme.title_font())?;
        let cells = root.split_evenly((k, k));

        for (idx, area) in cells.iter().enumerate() {
            let (row, col) = (idx / k, idx % k);
            if row == col {
                draw_histogram(theme, area, &columns[row], "", "", row, false)?;
                area.draw(&Text::new(
                    PAIRPLOT_METRICS[row].column(),
                    (45, 10),
                    anchored((theme.font_family, 11), &theme.ink, HPos::Left, VPos::Top),
                ))?;
                continue;
            }

            let x_range = padded(stats::bounds(&columns[col]), false);
            let y_range = padded(stats::bounds(&columns[row]), false);
            let mut chart = ChartBuilder::on(area)
                .margin(6)
                .x_label_area_size(22)
                .y_label_area_size(34)
                .build_cartesian_2d(x_range, y_range)?;
            chart
                .configure_mesh()
                .light_line_style(theme.grid.stroke_width(1))
                .bold_line_style(theme.grid.stroke_width(1))
                .x_labels(3)
                .y_labels(3)
                .label_style((theme.font_family, 10))
                .draw()?;
            let color = theme.series_color(0);
            chart.draw_series(
                columns[col]
                    .iter()
                    .zip(&columns[row])
                    .map(|(x, y)| Circle::new((*x, *y), 3, color.mix(0.6).filled())),
            )?;
        }
        Ok(())
    })
}

pub fn radar_values(top: &[ScoredCandidate]) -> Vec<[f64; 5]> {
    let axes: [Vec<f64>; 5] = [
        top.iter().map(|c| c.metrics.goals_per_90).collect(),
        top.iter()
            .map(|c| safe_ratio(f64::from(c.player.goals), f64::from(c.player.shots)))
            .collect(),
        top.iter().map(|c| c.metrics.shots_per_90).collect(),
        top.iter()
            .map(|c| safe_ratio(c.player.xg, f64::from(c.player.shots)))
            .collect(),
        top.iter().map(|c| c.player.nineties).collect(),
    ];
    let normalized: Vec<Vec<f64>> = axes.iter().map(|a| stats::normalize_by_max(a)).collect();
    (0..top.len())
        .map(|i| std::array::from_fn(|axis| normalized[axis][i]))
        .collect()
}

pub fn render_radar(ctx: &mut RenderContext, top: &[ScoredCandidate]) -> Result<()> {
    let (w, h) = ctx.theme.square_size;
    let center = (f64::from(w) / 2.0, f64::from(h) / 2.0 + 40.0);
    let radius = f64::from(w.min(h)) * 0.33;
    let n = RADAR_AXES.len();
    let point = |axis: usize, r: f64| -> (i32, i32) {
        let angle = -PI / 2.0 + axis as f64 * 2.0 * PI / n as f64;
        (
            (center.0 + r * radius * angle.cos()).round() as i32,
            (center.1 + r * radius * angle.sin()).round() as i32,
        )
    };

    render_svg(ctx, "radar_chart.svg", (w, h), |root, theme| {
        root.fill(&WHITE)?;
        root.draw(&Text::new(
            "Top 5 Strikers Performance Profile",
            (w as i32 / 2, 30),
            anchored(theme.title_font(), &theme.ink, HPos::Center, VPos::Top),
        ))?;

        let grid = RGBColor(200, 200, 200).stroke_width(1);
        let grey = RGBColor(128, 128, 128);
        let small = anchored((theme.font_family, 11), &grey, HPos::Left, VPos::Center);
        for ring in [0.2, 0.4, 0.6, 0.8, 1.0] {
            let mut pts: Vec<(i32, i32)> = (0..n).map(|a| point(a, ring)).collect();
            pts.push(pts[0]);
            root.draw(&PathElement::new(pts, grid))?;
            let (x, y) = point(0, ring);
            root.draw(&Text::new(format!("{ring:.1}"), (x + 4, y), small.clone()))?;
        }
        let axis_label = anchored(theme.label_font(), &theme.ink, HPos::Center, VPos::Center);
        for (a, name) in RADAR_AXES.iter().enumerate() {
            root.draw(&PathElement::new(vec![point(a, 0.0), point(a, 1.0)], grid))?;
            root.draw(&Text::new(name.to_string(), point(a, 1.15), axis_label.clone()))?;
        }

        let legend = anchored(theme.label_font(), &theme.ink, HPos::Left, VPos::Center);
        for (i, (c, values)) in top.iter().zip(radar_values(top)).enumerate() {
            let color = theme.series_color(i);
            let pts: Vec<(i32, i32)> = values.iter().enumerate().map(|(a, v)| point(a, *v)).collect();
            root.draw(&Polygon::new(pts.clone(), color.mix(0.25).filled()))?;
            let mut outline = pts;
            outline.push(outline[0]);
            root.draw(&PathElement::new(outline, color.stroke_width(2)))?;

            let y = 90 + i as i32 * 24;
            root.draw(&Rectangle::new([(20, y - 7), (34, y + 7)], color.filled()))?;
            root.draw(&Text::new(c.name().to_string(), (42, y), legend.clone()))?;
        }
        Ok(())
    })
}

pub fn render_goals_vs_xg(
    ctx: &mut RenderContext,
    pool: &[ScoredCandidate],
    top: &[ScoredCandidate],
) -> Result<()> {
    let (w, h) = ctx.theme.size;
    let max_val = pool
        .iter()
        .map(|c| c.player.xg.max(f64::from(c.player.goals)))
        .fold(0.0_f64, f64::max);
    let axis_max = if max_val > 0.0 { max_val * 1.1 } else { 1.0 };
    let gp90 = Metric::GoalsPer90.column_values(pool);
    let (lo, hi) = stats::bounds(&gp90).unwrap_or((0.0, 1.0));
    let shade = |v: f64| sequential_color(safe_ratio(v - lo, hi - lo));

    render_svg(ctx, "goals_xg_scatter.svg", (w, h), |root, theme| {
        root.fill(&theme.background)?;
        let (plot_area, bar_area) = root.split_horizontally(w as i32 - 130);

        let mut chart = ChartBuilder::on(&plot_area)
            .caption("Goals vs Expected Goals Analysis", theme.title_font())
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..axis_max, 0f64..axis_max)?;
        chart
            .configure_mesh()
            .light_line_style(theme.grid.stroke_width(1))
            .bold_line_style(theme.grid.stroke_width(2))
            .x_desc("Expected Goals (xG)")
            .y_desc("Actual Goals")
            .label_style(theme.label_font())
            .draw()?;

        chart.draw_series(LineSeries::new(
            vec![(0.0, 0.0), (max_val, max_val)],
            RGBColor(128, 128, 128).mix(0.6).stroke_width(2),
        ))?;
        chart.draw_series(pool.iter().map(|c| {
            let size = ((c.player.nineties * 10.0).sqrt() * 0.9).clamp(3.0, 30.0) as i32;
            Circle::new(
                (c.player.xg, f64::from(c.player.goals)),
                size,
                shade(c.metrics.goals_per_90).mix(0.6).filled(),
            )
        }))?;
        let note = anchored((theme.font_family, 12), &theme.ink, HPos::Left, VPos::Bottom);
        let offset = axis_max * 0.008;
        chart.draw_series(top.iter().map(|c| {
            Text::new(
                c.name().to_string(),
                (c.player.xg + offset, f64::from(c.player.goals) + offset),
                note.clone(),
            )
        }))?;

        // Colour bar for goals per 90.
        let steps = 50;
        let (top_y, bottom_y) = (80, h as i32 - 80);
        let step_h = f64::from(bottom_y - top_y) / f64::from(steps);
        for s in 0..steps {
            let t = 1.0 - (f64::from(s) + 0.5) / f64::from(steps);
            let y0 = top_y + (f64::from(s) * step_h) as i32;
            let y1 = top_y + (f64::from(s + 1) * step_h).ceil() as i32;
            bar_area.draw(&Rectangle::new([(20, y0), (45, y1)], sequential_color(t).filled()))?;
        }
        let tick = anchored((theme.font_family, 12), &theme.ink, HPos::Left, VPos::Center);
        bar_area.draw(&Text::new(format!("{hi:.2}"), (50, top_y), tick.clone()))?;
        bar_area.draw(&Text::new(format!("{lo:.2}"), (50, bottom_y), tick.clone()))?;
        bar_area.draw(&Text::new("Goals per 90", (10, top_y - 30), tick))?;
        Ok(())
    })
}

pub fn render_correlation_heatmap(ctx: &mut RenderContext, pool: &[ScoredCandidate]) -> Result<()> {
    let matrix = heatmap_matrix(pool);
    let k = HEATMAP_METRICS.len();
    let kf = k as f64;
    debug!("correlation matrix over {} players: {:?}", pool.len(), matrix);
    let size = ctx.theme.square_size;

    let cells: Vec<(usize, usize, f64)> = matrix
        .iter()
        .enumerate()
        .flat_map(|(i, row)| row.iter().enumerate().map(move |(j, v)| (i, j, *v)))
        .collect();
    let column_name = |v: f64| {
        category_index(v, k)
            .map(|idx| HEATMAP_METRICS[idx].column().to_string())
            .unwrap_or_default()
    };

    render_svg(ctx, "shot_quality_heatmap.svg", size, |root, theme| {
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(root)
            .caption("Correlation Matrix of Shot Quality Metrics", theme.title_font())
            .margin(30)
            .x_label_area_size(60)
            .y_label_area_size(130)
            .build_cartesian_2d(-0.5..kf - 0.5, -0.5..kf - 0.5)?;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(k)
            .y_labels(k)
            .x_label_formatter(&|v| column_name(*v))
            .y_label_formatter(&|v| column_name(kf - 1.0 - *v))
            .label_style(theme.label_font())
            .draw()?;

        chart.draw_series(cells.iter().map(|(i, j, v)| {
            let (x, y) = (*j as f64, kf - 1.0 - *i as f64);
            Rectangle::new([(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)], diverging_color(*v).filled())
        }))?;
        let text = anchored(theme.label_font(), &theme.ink, HPos::Center, VPos::Center);
        chart.draw_series(cells.iter().map(|(i, j, v)| {
            let (x, y) = (*j as f64, kf - 1.0 - *i as f64);
            Text::new(format!("{v:.2}"), (x, y), text.clone())
        }))?;
        Ok(())
    })
}

pub fn render_performance_comparison(ctx: &mut RenderContext, top: &[ScoredCandidate]) -> Result<()> {
    let players = top.len().max(1);
    let pf = players as f64;
    let names: Vec<String> = top.iter().map(|c| short_name(c.name(), 18)).collect();
    let y_max = top
        .iter()
        .flat_map(|c| COMPARISON_METRICS.iter().map(move |m| m.value(c)))
        .fold(0.0_f64, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.15 } else { 1.0 };
    let size = ctx.theme.size;

    render_svg(ctx, "performance_comparison.svg", size, |root, theme| {
        root.fill(&theme.background)?;
        let mut chart = ChartBuilder::on(root)
            .caption("Performance Metrics Comparison", theme.title_font())
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5..pf - 0.5, 0f64..y_max)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(players)
            .light_line_style(theme.grid.stroke_width(1))
            .bold_line_style(theme.grid.stroke_width(2))
            .x_label_formatter(&|v| {
                category_index(*v, players)
                    .and_then(|idx| names.get(idx).cloned())
                    .unwrap_or_default()
            })
            .y_desc("Value")
            .label_style(theme.label_font())
            .draw()?;

        let group = 0.8;
        let bar = group / COMPARISON_METRICS.len() as f64;
        for (m_idx, metric) in COMPARISON_METRICS.iter().enumerate() {
            let color = theme.series_color(m_idx);
            chart
                .draw_series(top.iter().enumerate().map(|(p_idx, c)| {
                    let x0 = p_idx as f64 - group / 2.0 + bar * m_idx as f64;
                    Rectangle::new([(x0, 0.0), (x0 + bar, metric.value(c))], color.filled())
                }))?
                .label(metric.column())
                .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled()));
        }
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.85).filled())
            .border_style(theme.ink.stroke_width(1))
            .label_font(theme.label_font())
            .draw()?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::season_dataset::PlayerSeasonRow;
    use crate::transfers::merge_transfers;

    fn scored(players: &[(&str, u32, u32, u32, f64)]) -> Vec<ScoredCandidate> {
        let rows: Vec<PlayerSeasonRow> = players
            .iter()
            .map(|(name, minutes, goals, shots, xg)| PlayerSeasonRow {
                player: name.to_string(),
                minutes: *minutes,
                goals: *goals,
                shots: *shots,
                xg: *xg,
                ..PlayerSeasonRow::default()
            })
            .collect();
        merge_transfers(&rows).into_iter().map(ScoredCandidate::score).collect()
    }

    #[test]
    fn radar_axes_scale_by_group_maximum() {
        let top = scored(&[("A", 1800, 20, 40, 8.0), ("B", 900, 5, 0, 0.0)]);
        let values = radar_values(&top);
        assert_eq!(values, vec![[1.0, 1.0, 1.0, 1.0, 1.0], [0.5, 0.0, 0.0, 0.0, 0.5]]);
    }

    #[test]
    fn radar_axis_with_zero_maximum_is_zero() {
        let top = scored(&[("A", 1800, 0, 0, 0.0), ("B", 900, 0, 0, 0.0)]);
        for v in radar_values(&top) {
            assert_eq!(&v[..4], &[0.0, 0.0, 0.0, 0.0]);
        }
        assert!(radar_values(&[]).is_empty());
    }

    #[test]
    fn heatmap_correlates_known_columns() {
        let pool = scored(&[
            ("A", 1800, 10, 40, 5.0),
            ("B", 1800, 20, 50, 10.0),
            ("C", 1800, 30, 70, 15.0),
        ]);
        let m = heatmap_matrix(&pool);
        assert_eq!(m.len(), HEATMAP_METRICS.len());
        // Goals_per_90, Shots_per_90, SoT%, Gls, xG
        assert!((m[0][0] - 1.0).abs() < 1e-9);
        assert!((m[0][3] - 1.0).abs() < 1e-9);
        assert!((m[3][4] - 1.0).abs() < 1e-9);
        assert_eq!(m[1][4], m[4][1]);
        // No shots on target anywhere: SoT% has no variance.
        assert_eq!(m[2][2], 0.0);
        assert_eq!(m[2][3], 0.0);
    }

    #[test]
    fn category_ticks_only_on_whole_slots() {
        assert_eq!(category_index(2.0, 5), Some(2));
        assert_eq!(category_index(0.5, 5), None);
        assert_eq!(category_index(5.0, 5), None);
        assert_eq!(category_index(-1.0, 5), None);
    }

    #[test]
    fn padded_never_returns_empty_range() {
        let r = padded(Some((2.0, 2.0)), false);
        assert!(r.end > r.start);
        let r = padded(None, true);
        assert_eq!(r.start, 0.0);
        assert!(r.end > 1.0);
    }

    #[test]
    fn colour_scales_hit_their_end_stops() {
        assert_eq!(diverging_color(-1.0), RGBColor(33, 102, 172));
        assert_eq!(diverging_color(1.0), RGBColor(178, 24, 43));
        assert_eq!(diverging_color(0.0), RGBColor(247, 247, 247));
        assert_eq!(sequential_color(0.0), RGBColor(68, 1, 84));
        assert_eq!(sequential_color(1.0), RGBColor(253, 231, 37));
        assert_eq!(sequential_color(f64::NAN), RGBColor(68, 1, 84));
    }

    #[test]
    fn short_names_are_truncated() {
        assert_eq!(short_name("Abc", 5), "Abc");
        assert_eq!(short_name("Abcdefgh", 5), "Abcd…");
    }
}
