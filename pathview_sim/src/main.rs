//! PathView playback harness CLI
//!
//! Replays a track (loaded from JSON or generated from a seed) through the
//! simplifier and animator, and optionally through the measure tool.

use clap::Parser;
use pathview_core::{DistanceMetric, Point, Track};
use pathview_env::{PathViewContext, TokioContext};
use pathview_sim::{
    run_measure, synthetic_track, MeasureResult, PlaybackExport, PlaybackResult, PlaybackRunner,
    SimConfig, SimContext, SimError,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// PathView route playback harness
#[derive(Parser, Debug)]
#[command(name = "pathview-sim")]
#[command(about = "Simplify and replay GPS tracks deterministically", long_about = None)]
struct Args {
    /// Track JSON to play (a list of {lat, lon} or {name, points}); omit for a synthetic track
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Seed for the synthetic track (0 = random from time)
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Points in the synthetic track
    #[arg(short = 'n', long, default_value = "2000")]
    points: usize,

    /// Start of the synthetic track, as "LAT,LON"
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    start: Option<Point>,

    /// Metres between synthetic track samples
    #[arg(long, default_value = "5.0")]
    step: f64,

    /// Simplification tolerance in degrees
    #[arg(short, long, default_value = "5e-5")]
    epsilon: f64,

    /// Play on the wall clock instead of the virtual clock
    #[arg(long)]
    realtime: bool,

    /// Give up if playback runs longer than this
    #[arg(long, default_value = "3600")]
    budget_secs: u64,

    /// Replay the first N track points as measure clicks, then undo once
    #[arg(short, long, default_value = "0")]
    measure: usize,

    /// Distance metric for measuring (haversine, geodesic)
    #[arg(long, default_value = "haversine")]
    metric: DistanceMetric,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON output for scripting
    #[arg(long)]
    json: bool,

    /// Export playback frames to a JSON file
    #[arg(long)]
    export: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> SimConfig {
        let mut config = SimConfig {
            seed: self.seed,
            synthetic_points: self.points,
            max_playback: Duration::from_secs(self.budget_secs),
            measure_clicks: self.measure,
            step_m: self.step,
            metric: self.metric,
            ..SimConfig::default()
        };
        if let Some(start) = self.start {
            config.start = start;
        }
        config.animator.epsilon = self.epsilon;
        config
    }
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("Expected LAT,LON, got {:?}", s))?;
    let lat = lat.trim().parse::<f64>().map_err(|e| format!("Bad latitude: {}", e))?;
    let lon = lon.trim().parse::<f64>().map_err(|e| format!("Bad longitude: {}", e))?;
    Ok(Point::new(lat, lon))
}

fn load_track(args: &Args, config: &SimConfig) -> Result<Track, SimError> {
    match &args.input {
        Some(path) => {
            info!("Loading track from {}", path.display());
            Ok(Track::from_path(path)?)
        }
        None => synthetic_track(config),
    }
}

async fn play<Ctx: PathViewContext>(
    context: Arc<Ctx>,
    config: &SimConfig,
    track: &Track,
) -> Result<PlaybackResult, SimError> {
    PlaybackRunner::new(context, config.clone())
        .run_playback(track)
        .await
}

async fn run(args: &Args, config: &SimConfig) -> Result<(PlaybackResult, Option<MeasureResult>), SimError> {
    let track = load_track(args, config)?;

    let playback = if args.realtime {
        play(TokioContext::shared(), config, &track).await?
    } else {
        play(SimContext::shared(), config, &track).await?
    };

    let measure = (config.measure_clicks > 0).then(|| run_measure(&track, config));

    if let Some(path) = &args.export {
        let mut export = PlaybackExport::from_playback(&playback, config);
        export.finalize(measure.as_ref().and_then(|m| m.readouts.last().cloned()));
        export.write_to_file(path)?;
        info!("Exported {} frames to {}", export.frames.len(), path.display());
    }

    Ok((playback, measure))
}

fn report(args: &Args, config: &SimConfig, playback: &PlaybackResult, measure: Option<&MeasureResult>) {
    if args.json {
        let summary = serde_json::json!({
            "track": playback.track_name,
            "seed": config.seed,
            "epsilon": config.animator.epsilon,
            "input_points": playback.input_points,
            "simplified_points": playback.simplified.len(),
            "reduction": playback.reduction(),
            "frames": playback.frames,
            "elapsed_ms": playback.elapsed.as_millis() as u64,
            "fit": playback.fit,
            "measure": measure.map(|m| serde_json::json!({
                "label": m.final_label(),
                "total_m": m.total_m,
                "recomputed_m": m.recomputed_m,
                "undone": m.undone,
            })),
        });
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to encode summary: {}", e),
        }
        return;
    }

    info!(
        "✓ {}: {} → {} points ({:.1}% dropped), {} frames in {:.2}s",
        playback.track_name.as_deref().unwrap_or("track"),
        playback.input_points,
        playback.simplified.len(),
        playback.reduction() * 100.0,
        playback.frames,
        playback.elapsed.as_secs_f64()
    );
    if let Some(fit) = &playback.fit {
        let center = fit.bounds.center();
        info!("  View centred on ({:.5}, {:.5})", center.lat, center.lon);
    }
    if let Some(m) = measure {
        info!(
            "  {} after undo (recomputed {:.2} m)",
            m.final_label(),
            m.recomputed_m
        );
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    if !args.json {
        info!("PathView playback harness v{}", env!("CARGO_PKG_VERSION"));
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }

    let mut config = args.config();
    if config.seed == 0 {
        config.seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(1);
    }

    match run(&args, &config).await {
        Ok((playback, measure)) => report(&args, &config, &playback, measure.as_ref()),
        Err(e) => {
            error!("✗ {}", e);
            std::process::exit(1);
        }
    }
}
