use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use crate::render_context::DEFAULT_OUTPUT_DIR;
use crate::season_dataset::DEFAULT_DATASET_PATH;

pub const DEFAULT_PREVIEW_ROWS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub data_path: PathBuf,
    pub output_dir: PathBuf,
    pub preview_rows: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATASET_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl RunConfig {
    pub fn from_env_args() -> Result<Self> {
        let args = std::env::args().skip(1).collect::<Vec<_>>();
        Self::from_args(&args)
    }

    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut cfg = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag, Some(value.to_string())),
                None => (arg.as_str(), None),
            };
            if !["--data", "--out", "--preview"].contains(&flag) {
                bail!("unknown argument {arg}");
            }
            let value = match inline {
                Some(value) => value,
                None => iter
                    .next()
                    .with_context(|| format!("{flag} needs a value"))?
                    .clone(),
            };
            let value = value.trim();
            if value.is_empty() {
                bail!("{flag} needs a value");
            }
            match flag {
                "--data" => cfg.data_path = PathBuf::from(value),
                "--out" => cfg.output_dir = PathBuf::from(value),
                _ => {
                    cfg.preview_rows = value
                        .parse()
                        .with_context(|| format!("invalid --preview value {value:?}"))?;
                }
            }
        }
        Ok(cfg)
    }
}
