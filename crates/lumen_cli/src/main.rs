use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

mod args;
mod description;
mod output;

use args::Args;
use description::SceneDescription;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let description = match &args.scene {
        Some(path) => SceneDescription::load(path)?,
        None => SceneDescription::demo(),
    };

    let config = description.render_config(&args);
    let (width, height) = (config.width, config.height);

    let start = Instant::now();
    let scene = description.build(config)?;
    log::info!("Scene built with {} objects in {:?}", scene.len(), start.elapsed());

    let progress = if args.no_progress {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(scene.progress().total as u64)
    };
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {percent:>3}% {pos}/{len} px")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let pixels = scene
        .render_with_progress(|p| progress.set_position(p.done as u64))
        .context("Render failed")?;
    progress.finish_and_clear();

    output::save_image(&args.output, width, height, &pixels)?;
    log::info!("Saved {}", args.output.display());

    Ok(())
}
