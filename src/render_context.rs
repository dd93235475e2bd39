use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plotters::style::RGBColor;

pub const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Clone)]
pub struct ChartTheme {
    pub font_family: &'static str,
    pub title_size: u32,
    pub label_size: u32,
    pub size: (u32, u32),
    pub square_size: (u32, u32),
    pub background: RGBColor,
    pub ink: RGBColor,
    pub grid: RGBColor,
    pub series: Vec<RGBColor>,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            font_family: "sans-serif",
            title_size: 24,
            label_size: 14,
            size: (1200, 800),
            square_size: (1000, 1000),
            background: RGBColor(234, 234, 242),
            ink: RGBColor(40, 40, 40),
            grid: RGBColor(255, 255, 255),
            series: vec![
                RGBColor(76, 114, 176),
                RGBColor(221, 132, 82),
                RGBColor(85, 168, 104),
                RGBColor(196, 78, 82),
                RGBColor(129, 114, 179),
                RGBColor(147, 120, 96),
                RGBColor(218, 139, 195),
                RGBColor(140, 140, 140),
                RGBColor(204, 185, 116),
                RGBColor(100, 181, 205),
            ],
        }
    }
}

impl ChartTheme {
    pub fn series_color(&self, idx: usize) -> RGBColor {
        if self.series.is_empty() {
            return self.ink;
        }
        self.series[idx % self.series.len()]
    }

    pub fn title_font(&self) -> (&'static str, u32) {
        (self.font_family, self.title_size)
    }

    pub fn label_font(&self) -> (&'static str, u32) {
        (self.font_family, self.label_size)
    }
}

#[derive(Debug, Clone)]
pub struct RenderContext {
    output_dir: PathBuf,
    pub theme: ChartTheme,
    written: Vec<PathBuf>,
}

impl RenderContext {
    pub fn create(output_dir: &Path, theme: ChartTheme) -> Result<Self> {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("create output directory {}", output_dir.display()))?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            theme,
            written: Vec::new(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn artifact_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    pub fn record(&mut self, path: PathBuf) {
        log::info!("wrote {}", path.display());
        self.written.push(path);
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn artifact_names(&self) -> Vec<String> {
        self.written
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }
}
