//! BSB command-line tool
//!
//! Fetches crowd-sourced segments for a video, prints the timeline and
//! preview marks, and can drive the full attach/tick/detach path against a
//! simulated playback clock.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use bsb_common::config::Options;
use bsb_common::ids::av_to_bv;
use bsb_common::time::format_range;
use bsb_common::Segment;
use bsb_engine::policy::ActionPolicy;
use bsb_engine::preview::preview_marks;
use bsb_engine::sim::{ConsolePresentation, SimPlayer};
use bsb_engine::{MetadataClient, PlayerControls, SegmentTracker, VideoAttachment};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for bsb
#[derive(Parser, Debug)]
#[command(name = "bsb")]
#[command(about = "Segment-skipping engine for crowd-sourced video metadata")]
#[command(version)]
struct Args {
    /// Video identifier (BV id)
    #[arg(long, env = "BSB_VIDEO_ID")]
    video_id: Option<String>,

    /// Numeric AV id, converted to a BV id locally
    #[arg(long, conflicts_with = "video_id")]
    av_id: Option<u64>,

    /// Stream cid, if known
    #[arg(long)]
    cid: Option<String>,

    /// Config file path (falls back to BSB_CONFIG, then the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Drive a simulated playback clock through the fetched segments
    #[arg(long)]
    simulate: bool,

    /// Simulation clock step in seconds
    #[arg(long, default_value = "0.25")]
    step: f64,

    /// Assumed video duration in seconds (simulation and preview marks)
    #[arg(long, default_value = "600")]
    duration: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bsb=info,bsb_engine=info,bsb_common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let options = Options::load(args.config.as_ref()).context("failed to load configuration")?;

    let video_id = match (&args.video_id, args.av_id) {
        (Some(video_id), _) => video_id.clone(),
        (None, Some(av_id)) => {
            let Some(bv) = av_to_bv(av_id) else {
                bail!("AV id {} is outside the valid id space", av_id);
            };
            info!(av_id, bv_id = %bv, "converted AV id");
            bv
        }
        (None, None) => bail!("either --video-id or --av-id is required"),
    };

    let client =
        MetadataClient::new(&options.api).context("failed to create metadata client")?;
    let segments = client.fetch_segments(&video_id, args.cid.as_deref()).await;

    if segments.is_empty() {
        info!(video_id = %video_id, "no segments for this video");
        return Ok(());
    }

    println!("segments for {}:", video_id);
    for segment in &segments {
        println!(
            "  {}  {}  {}",
            segment.id,
            segment.category.display_name(),
            format_range(segment.range.start, segment.range.end)
        );
    }

    println!("preview marks:");
    for mark in preview_marks(&segments, Some(args.duration)) {
        println!(
            "  {:>5.1}% +{:>5.1}%  {}  {}",
            mark.left_frac * 100.0,
            mark.width_frac * 100.0,
            mark.color,
            mark.tooltip
        );
    }

    if args.simulate {
        run_simulation(segments, &options, args.step, args.duration);
    }

    Ok(())
}

/// Drive the full attach → tick → detach path against a scripted clock
fn run_simulation(segments: Vec<Segment>, options: &Options, step: f64, duration: f64) {
    info!(step, duration, "starting playback simulation");

    let player = SimPlayer::new(duration);
    // Clones share state, so this clock view advances the attached player
    let mut clock = player.clone();

    let tracker = SegmentTracker::new(
        segments,
        ActionPolicy::from_options(options),
        options.tracker.clone(),
    );
    let handle = VideoAttachment::attach(player, ConsolePresentation::new(), tracker);

    while clock.position() < duration {
        handle.on_time_update();
        clock.advance(step);
    }
    handle.on_time_update();
    handle.detach();

    info!("simulation finished");
}
