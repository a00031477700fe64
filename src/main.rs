//! Replay recorded hand-tracking traces through the gesture control pipeline.

use anyhow::{Context, Result};
use clap::Parser;
use gesture_flow::{
    config::Config,
    controller::{ControlSnapshot, GestureController},
    landmark_filter::LandmarkFilter,
    session::Session,
    sink::LogSink,
    trace::{replay, Trace, TraceEvent},
};
use log::{info, warn};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Trace file to replay (YAML)
    #[arg(short, long, required_unless_present = "write_config")]
    trace: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Write the effective configuration to this path and exit
    #[arg(long)]
    write_config: Option<String>,

    /// Replay on a worker thread with wall-clock pacing
    #[arg(long)]
    realtime: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    // Load configuration if provided
    let config = match &args.config {
        Some(config_path) => {
            info!("Loading configuration from: {}", config_path);
            Config::from_file(config_path).unwrap_or_else(|e| {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            })
        }
        None => Config::default(),
    };

    if let Some(path) = &args.write_config {
        config
            .to_file(path)
            .with_context(|| format!("writing configuration to {path}"))?;
        info!("Configuration written to {}", path);
        return Ok(());
    }

    let Some(trace_path) = &args.trace else {
        anyhow::bail!("--trace is required");
    };
    let trace = Trace::from_file(trace_path).with_context(|| format!("loading trace {trace_path}"))?;
    info!("Replaying {} events over {:?}", trace.events.len(), trace.duration());

    // Give a trailing no-hands timer the chance to fire
    let settle = config.control.no_hands_delay() + Duration::from_millis(100);

    let snapshot = if args.realtime {
        replay_realtime(&trace, config, settle)?
    } else {
        let mut filter = LandmarkFilter::new(config.filter.clone());
        let mut controller = GestureController::new(config.control.clone(), Box::new(LogSink));
        let summary = replay(&trace, &mut filter, &mut controller, Instant::now(), settle);
        info!("Replayed {} frames and {} intents", summary.frames, summary.intents);
        controller.snapshot()
    };

    print_snapshot(&snapshot);
    Ok(())
}

fn replay_realtime(trace: &Trace, config: Config, settle: Duration) -> Result<ControlSnapshot> {
    let session = Session::spawn(config, Box::new(LogSink))?;
    let start = Instant::now();

    for event in &trace.events {
        thread::sleep((start + event.at()).saturating_duration_since(Instant::now()));
        match event {
            TraceEvent::Frame { hands, .. } => session.submit_frame(hands.clone())?,
            TraceEvent::Intent { intent, .. } => session.send_intent(intent.clone())?,
        }
    }

    thread::sleep(settle);
    let snapshot = session.snapshot();
    session.shutdown()?;
    Ok(snapshot)
}

fn print_snapshot(snapshot: &ControlSnapshot) {
    println!("Track:        {}", snapshot.track_title.as_deref().unwrap_or("(none)"));
    println!("Phase:        {:?}", snapshot.phase);
    println!("Playing:      {}", snapshot.is_playing);
    println!("Pitch:        {:+.1} cents", snapshot.current_pitch);
    println!("Speed:        {:.3}x", snapshot.current_speed);
    println!("Sensitivity:  {}", snapshot.sensitivity);
    println!("Smoothing:    {:.2}", snapshot.smoothing);
    println!("No-hands:     {:.1}s", snapshot.no_hands_delay_secs);
}
