//! Bouncefield headless driver
//!
//! Builds a world from config, feeds it scripted gravity input and reports
//! what happened. Drawing and live keyboard input belong to a front end.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use bouncefield::SimConfig;
use bouncefield::consts::MAX_SUBSTEPS;
use bouncefield::pacing::FrameClock;
use bouncefield::schedule::GravitySchedule;
use bouncefield::sim::{TickStats, World, tick};

#[derive(Parser, Debug)]
#[command(version, about = "Bouncing balls under switchable gravity")]
struct Args {
    /// JSON config file (missing fields use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the config seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Ticks to simulate (defaults to the schedule length, or 10 seconds)
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Gravity schedule, e.g. "down:120,left:60,none:30"
    #[arg(short, long)]
    gravity: Option<String>,

    /// Pace ticks at the configured tick rate instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Most ticks run per frame when catching up in real time
    #[arg(long, default_value_t = MAX_SUBSTEPS)]
    max_substeps: u32,

    /// Write the final snapshot as JSON
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn log_summary(world: &World, stats: &TickStats) {
    let momentum = world.momentum();
    log::info!(
        "tick {:>6}: gravity {:?}, momentum ({:.1}, {:.1}), energy {:.1}, collisions {}, obstacle hits {}, wall bounces {}",
        world.tick_count(),
        world.gravity_direction(),
        momentum.x,
        momentum.y,
        world.kinetic_energy(),
        stats.body_collisions,
        stats.obstacle_contacts,
        stats.boundary_bounces,
    );
}

/// Run until `total_ticks`; with a clock, ticks are paced to wall time
fn run(
    world: &mut World,
    schedule: &GravitySchedule,
    total_ticks: u64,
    mut clock: Option<FrameClock>,
) {
    let report_every = world.config().tick_rate as u64;
    let mut window = TickStats::default();
    let mut last_frame = Instant::now();

    while world.tick_count() < total_ticks {
        let ticks = match clock.as_mut() {
            Some(clock) => {
                std::thread::sleep(clock.tick_duration());
                let now = Instant::now();
                let dt = now.duration_since(last_frame).as_secs_f32();
                last_frame = now;
                clock.advance(dt) as u64
            }
            None => 1,
        };

        for _ in 0..ticks.min(total_ticks - world.tick_count()) {
            let input = schedule.input_at(world.tick_count());
            window += tick(world, &input);

            if world.tick_count() % report_every == 0 {
                log_summary(world, &window);
                window = TickStats::default();
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let schedule = match &args.gravity {
        Some(script) => GravitySchedule::parse(script).context("invalid gravity schedule")?,
        None => GravitySchedule::default(),
    };

    let total_ticks = args.ticks.unwrap_or_else(|| {
        if schedule.is_empty() {
            10 * config.tick_rate as u64
        } else {
            schedule.len()
        }
    });

    log::info!("Bouncefield starting: {} ticks", total_ticks);
    let mut world = World::new(config).context("failed to build world")?;

    let started = Instant::now();
    let clock = args.realtime.then(|| {
        FrameClock::new(world.config().tick_rate).with_max_substeps(args.max_substeps)
    });
    run(&mut world, &schedule, total_ticks, clock);
    log::info!(
        "Simulated {} ticks in {:.2?}",
        world.tick_count(),
        started.elapsed()
    );

    if let Some(path) = &args.snapshot {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &world.snapshot())
            .context("failed to write snapshot")?;
        log::info!("Snapshot written to {}", path.display());
    }

    Ok(())
}
