use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use lottie_player::{
    FileDecoder, Frame, HeadlessHost, PlaybackController, PlaybackState, PlayerConfig,
};

/// Play an animation headlessly and optionally dump the presented frame.
#[derive(Debug, Parser)]
#[command(name = "lottie-player", version, about)]
struct Args {
    /// Animation file (overrides the config file's path)
    path: Option<PathBuf>,
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output width, 0 = animation width
    #[arg(long)]
    width: Option<u32>,
    /// Output height, 0 = animation height
    #[arg(long)]
    height: Option<u32>,
    #[arg(long = "loop")]
    looping: bool,
    #[arg(long)]
    clear_on_end: bool,
    /// Number of ticks to run
    #[arg(long, default_value_t = 60)]
    ticks: u32,
    /// Seek before ticking
    #[arg(long)]
    seek_ms: Option<u64>,
    /// Write the presented frame to a PNG
    #[arg(long)]
    out: Option<PathBuf>,
    /// Write the presented frame as raw BGRA bytes, as a host would upload it
    #[arg(long)]
    raw_out: Option<PathBuf>,
}

fn build_config(args: &Args) -> Result<PlayerConfig> {
    let mut config = match &args.config {
        Some(path) => PlayerConfig::from_json_file(path)?,
        None => PlayerConfig::default(),
    };
    if let Some(path) = &args.path {
        config.source_path = path.to_string_lossy().into_owned();
    }
    if let Some(width) = args.width {
        config.requested_width = width;
    }
    if let Some(height) = args.height {
        config.requested_height = height;
    }
    config.looping |= args.looping;
    config.clear_on_end |= args.clear_on_end;
    Ok(config.sanitized())
}

fn write_frame(frame: &Frame<'_>, png: Option<&Path>, raw: Option<&Path>) -> Result<()> {
    if let Some(out) = png {
        let image = frame
            .to_rgba_image()
            .context("Pixel buffer does not match its dimensions")?;
        image
            .save(out)
            .with_context(|| format!("Failed to write {}", out.display()))?;
        log::info!("Wrote {}x{} frame to {}", frame.width, frame.height, out.display());
    }
    if let Some(out) = raw {
        std::fs::write(out, frame.to_bgra_bytes())
            .with_context(|| format!("Failed to write {}", out.display()))?;
        log::info!(
            "Wrote {}x{} BGRA frame ({} bytes per row) to {}",
            frame.width,
            frame.height,
            frame.stride(),
            out.display()
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;
    if !config.has_source() {
        anyhow::bail!("No animation file given");
    }

    let source = config.source_path.clone();
    let mut controller = PlaybackController::create(config, FileDecoder, HeadlessHost::new());
    if controller.get_state() == PlaybackState::None {
        anyhow::bail!("Failed to open animation {source}");
    }

    if let Some(ms) = args.seek_ms {
        controller.set_time_ms(ms);
    }

    let mut ticks = 0;
    while ticks < args.ticks && controller.get_state() != PlaybackState::Ended {
        controller.tick();
        ticks += 1;
    }

    log::info!(
        "{} after {} ticks: frame {}/{}, {}ms of {}ms",
        controller.get_state(),
        ticks,
        controller.current_frame(),
        controller.total_frames(),
        controller.get_time_ms(),
        controller.get_duration_ms()
    );

    if args.out.is_some() || args.raw_out.is_some() {
        match controller.render_if_visible() {
            Some(frame) => write_frame(&frame, args.out.as_deref(), args.raw_out.as_deref())?,
            None => log::warn!("Nothing to present, no frame written"),
        }
    }

    controller.destroy();
    Ok(())
}
