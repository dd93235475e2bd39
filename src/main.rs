use anyhow::Result;
use env_logger::{Builder, Env, Target};

use striker_scout::config::RunConfig;
use striker_scout::pipeline;

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stderr)
        .init();

    let cfg = RunConfig::from_env_args()?;
    let summary = pipeline::run(&cfg)?;

    print!("{}", summary.run.shortlist_report());
    print!("{}", summary.run.visual_summary());
    println!(
        "\nVisualizations and tables saved to {} ({} files, manifest {})",
        cfg.output_dir.display(),
        summary.artifacts.len(),
        summary.manifest_path.display()
    );
    Ok(())
}
