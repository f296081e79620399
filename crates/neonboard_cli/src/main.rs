//! Headless dashboard session runner.
//!
//! # Responsibility
//! - Run a deterministic session over virtual time.
//! - Print the final store snapshot as pretty JSON plus engine counters.

use clap::Parser;
use log::info;
use neonboard_core::animation::{seeded_rng, Clock, ManualClock};
use neonboard_core::effects::surface::Point;
use neonboard_core::{
    default_log_level, init_logging, DashboardConfig, DashboardRuntime, EffectsConfig,
};
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_SEED: u64 = 7;

#[derive(Parser, Debug)]
#[command(name = "neonboard")]
#[command(about = "Run a headless Neonboard dashboard session")]
struct Args {
    /// RNG seed; overrides the seed in the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Virtual seconds to simulate
    #[arg(long, default_value = "60")]
    seconds: u64,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long)]
    log_dir: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("neonboard: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), String> {
    if let Some(log_dir) = &args.log_dir {
        init_logging(default_log_level(), log_dir).map_err(|err| err.to_string())?;
    }

    let config = match &args.config {
        Some(path) => DashboardConfig::load(path).map_err(|err| err.to_string())?,
        None => DashboardConfig::default(),
    };
    let seed = args.seed.or(config.seed).unwrap_or(DEFAULT_SEED);
    let effects = EffectsConfig::default();
    let center = Point::new(effects.viewport.width / 2.0, effects.viewport.height / 2.0);

    let clock = ManualClock::new();
    let mut runtime = DashboardRuntime::start(&config, effects, &clock, seeded_rng(seed))
        .map_err(|err| err.to_string())?;

    let end_ms = args.seconds.saturating_mul(1_000);
    let step_ms = config.frame_interval_ms;
    let midpoint_ms = end_ms / 2;
    let mut poked = false;
    while clock.now_ms() < end_ms {
        clock.set(clock.now_ms().saturating_add(step_ms).min(end_ms));
        runtime.advance();
        if !poked && clock.now_ms() >= midpoint_ms {
            runtime.pointer_move(center);
            runtime.hover_brand(true);
            runtime.click_brand();
            runtime.hover_brand(false);
            poked = true;
        }
    }
    runtime.shutdown();
    info!("event=cli_done module=cli status=ok seed={seed} virtual_ms={end_ms}");

    let snapshot = serde_json::to_string_pretty(runtime.store().state())
        .map_err(|err| format!("failed to serialize snapshot: {err}"))?;
    println!("{snapshot}");

    let summary = runtime.summary();
    println!("neonboard_core version={}", neonboard_core::core_version());
    println!(
        "seed={seed} virtual_ms={} theme={}",
        summary.now_ms,
        runtime.store().ui_settings().theme.as_str()
    );
    println!(
        "frames={} stats_updates={} notifications_enqueued={}",
        summary.frames, summary.stats_updates, summary.notifications_enqueued
    );
    println!(
        "particle_respawns={} live_particles={} glitch_cycles={} brand_text={:?}",
        summary.particle_respawns,
        summary.live_particles,
        summary.glitch_cycles,
        summary.brand_text
    );
    Ok(())
}
