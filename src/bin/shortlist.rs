use anyhow::Result;
use env_logger::{Builder, Env, Target};

use striker_scout::config::RunConfig;
use striker_scout::pipeline;

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stderr)
        .init();

    let cfg = RunConfig::from_env_args()?;
    let run = pipeline::load_and_analyze(&cfg.data_path)?;
    print!("{}", run.shortlist_report());
    Ok(())
}
