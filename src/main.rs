//! Pixel Perfect Validator
//!
//! Without arguments, plays a scripted run through the live loop, records it,
//! validates the replay and submits the score.
//!
//! With `validate <replay.json> <level.json> <time> <jumps>`, validates a
//! submitted replay and prints the result JSON.
//!
//! `PIXEL_PERFECT_THRESHOLDS` may point at a JSON file overriding the
//! validation thresholds.

use std::env;
use std::fs;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use pixel_perfect::{
    TICK_RATE, VERSION,
    game::{
        level::{Block, Level},
        input::InputFlags,
        session::{Clock, LiveRun, RunPhase, SteppedClock, SystemClock},
    },
    replay::{ReplayLog, ReplayValidator, SubmissionGate, SubmissionLimits, ValidationThresholds},
};

const THRESHOLDS_ENV: &str = "PIXEL_PERFECT_THRESHOLDS";
const VALIDATE_USAGE: &str = "validate <replay.json> <level.json> <time> <jumps>";

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Pixel Perfect v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    let thresholds = load_thresholds()?;
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        None => demo_run(thresholds),
        Some("validate") => validate_files(&args[1..], thresholds),
        Some(other) => bail!(
            "Unknown command '{}'. Usage: pixel-perfect [{}]",
            other,
            VALIDATE_USAGE
        ),
    }
}

fn load_thresholds() -> Result<ValidationThresholds> {
    let Ok(path) = env::var(THRESHOLDS_ENV) else {
        return Ok(ValidationThresholds::default());
    };

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read thresholds file {}", path))?;
    let thresholds = ValidationThresholds::from_json(&raw)
        .with_context(|| format!("Invalid thresholds in {}", path))?;
    info!("Loaded validation thresholds from {}", path);
    Ok(thresholds)
}

/// Validate replay and level files against a claim.
fn validate_files(args: &[String], thresholds: ValidationThresholds) -> Result<()> {
    let [replay_path, level_path, time, jumps] = args else {
        bail!("Usage: pixel-perfect {}", VALIDATE_USAGE);
    };

    let payload = fs::read_to_string(replay_path)
        .with_context(|| format!("Failed to read replay {}", replay_path))?;
    let level_json = fs::read_to_string(level_path)
        .with_context(|| format!("Failed to read level {}", level_path))?;
    let level = Level::from_json(&level_json)
        .with_context(|| format!("Invalid level {}", level_path))?;
    let time: f64 = time.parse().with_context(|| format!("Invalid time '{}'", time))?;
    let jumps: u32 = jumps.parse().with_context(|| format!("Invalid jump count '{}'", jumps))?;

    let validator = ReplayValidator::new(thresholds).with_spawn(level.spawn_point());
    let result = validator.validate_json(&payload, &level.blocks, time, jumps);

    if result.is_valid {
        info!("Replay valid");
    } else {
        warn!("Replay rejected with {} errors", result.errors.len());
    }

    println!("{}", result.to_json()?);
    Ok(())
}

/// Demo level: floor, a low step, a goal post.
fn demo_level() -> Level {
    Level::new(
        "demo",
        vec![
            Block::solid(0.0, 350.0, 500.0, 10.0),
            Block::solid(320.0, 335.0, 40.0, 15.0),
            Block::end(460.0, 290.0, 10.0, 60.0),
        ],
    )
}

/// Scripted input: walk right, hopping twice along the way.
fn demo_input(tick: u32) -> InputFlags {
    let mut input = InputFlags::with_direction(false, tick >= 30);
    if tick == 10 || tick == 45 {
        input.jump_held = true;
        input.jump_pressed = true;
    }
    input
}

fn demo_run(thresholds: ValidationThresholds) -> Result<()> {
    info!("=== Starting Demo Run ===");

    let level = demo_level();
    let mut clock = SteppedClock::new(SystemClock.now_ms());
    let mut run = LiveRun::start(0, level.clone(), &clock);

    let max_ticks = 60 * TICK_RATE;
    for tick in 0..max_ticks {
        run.frame(&demo_input(tick), &clock);
        clock.advance();
        if run.phase() != RunPhase::Running {
            break;
        }
    }

    let actor = run.simulation().actor;
    info!(
        "Run ended: {:?} at tick {} ({:.2}, {:.2}), {} jumps",
        run.phase(),
        run.simulation().tick,
        actor.x,
        actor.y,
        run.jumps()
    );
    if run.phase() != RunPhase::Completed {
        bail!("Demo run did not reach the goal");
    }

    let claim = run.claim("demo-player")?;
    let replay = ReplayLog::parse(&claim.replay)?;
    info!(
        "Replay: {} inputs, {}ms, {} bytes binary",
        replay.inputs.len(),
        replay.duration,
        replay.to_bytes()?.len()
    );

    // Verify determinism by re-simulating twice
    info!("=== Verifying Determinism ===");
    let validator = ReplayValidator::new(thresholds).with_spawn(level.spawn_point());
    let first = validator.resimulate(&replay, &level.blocks);
    let second = validator.resimulate(&replay, &level.blocks);
    info!("Trajectory hash: {}", hex::encode(first.trajectory_hash));
    if first.trajectory_hash == second.trajectory_hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
    } else {
        warn!("DETERMINISM FAILURE: Hashes differ!");
    }

    let result = validator.validate(&replay, &level.blocks, claim.time, claim.jumps);
    info!("Validation: {}", result.to_json()?);

    info!("=== Submitting Score ===");
    let gate = SubmissionGate::new(thresholds, SubmissionLimits::default());
    let record = gate.review(&claim, &level, SystemClock.now_ms())?;
    info!(
        "Score record: level {} in {:.2}s, {} jumps, hash {}",
        record.level_index, record.time, record.jumps, record.security_hash
    );

    Ok(())
}
