//! Gravity Balls headless runner
//!
//! Spawns a row of balls, runs the fixed-step simulation and logs what
//! happened. Useful for tuning a config without a window.

use std::process::ExitCode;

use gravity_balls::SimConfig;
use gravity_balls::consts::STEPS_PER_SECOND;
use gravity_balls::render::extract_instances;
use gravity_balls::sim::{StepStats, World};

const USAGE: &str =
    "usage: gravity-balls [--config PATH] [--seed N] [--balls N] [--steps N] [--dump]";

#[derive(Debug)]
struct Args {
    config: Option<String>,
    seed: u64,
    balls: usize,
    steps: u64,
    dump: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            config: None,
            seed: 1,
            balls: 20,
            steps: 600,
            dump: false,
        }
    }
}

fn parse_args(mut it: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut args = Args::default();
    while let Some(flag) = it.next() {
        match flag.as_str() {
            "--config" => args.config = Some(value(&mut it, &flag)?),
            "--seed" => args.seed = number(&mut it, &flag)?,
            "--balls" => args.balls = number(&mut it, &flag)?,
            "--steps" => args.steps = number(&mut it, &flag)?,
            "--dump" => args.dump = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            other => return Err(format!("unknown argument `{}`\n{}", other, USAGE)),
        }
    }
    Ok(args)
}

fn value(it: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    it.next().ok_or_else(|| format!("{} needs a value", flag))
}

fn number<T: std::str::FromStr>(
    it: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<T, String> {
    let raw = value(it, flag)?;
    raw.parse()
        .map_err(|_| format!("{} expects a number, got `{}`", flag, raw))
}

fn accumulate(total: &mut StepStats, s: &StepStats) {
    total.integrated += s.integrated;
    total.boundary_hits += s.boundary_hits;
    total.pairs_tested += s.pairs_tested;
    total.contacts += s.contacts;
    total.resolved += s.resolved;
    total.separating += s.separating;
    total.coincident += s.coincident;
}

fn run(args: Args) -> Result<(), gravity_balls::SimError> {
    let config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    let width = config.world.width;
    let mut world = World::new(config, args.seed)?;
    log::info!("World initialized with seed: {}", args.seed);

    // Spread spawns across the width, like clicking along the top edge
    let mut spawned = 0;
    for i in 0..args.balls {
        let x = width * (i as f32 + 0.5) / args.balls as f32;
        if world.spawn(x).is_none() {
            log::warn!(
                "Pool full after {} balls, ignoring the remaining {}",
                spawned,
                args.balls - spawned
            );
            break;
        }
        spawned += 1;
    }

    let mut window = StepStats::default();
    for n in 1..=args.steps {
        let stats = world.step();
        accumulate(&mut window, &stats);
        if n % STEPS_PER_SECOND as u64 == 0 {
            log::info!(
                "t={}s energy={:.1} bounces={} contacts={} coincident={}",
                n / STEPS_PER_SECOND as u64,
                world.kinetic_energy(),
                window.boundary_hits,
                window.contacts,
                window.coincident
            );
            window = StepStats::default();
        }
    }

    let instances = extract_instances(&world);
    log::info!(
        "Done: {} steps, {} balls drawn, energy {:.1}",
        world.steps(),
        instances.len(),
        world.kinetic_energy()
    );

    if args.dump {
        println!("{}", world.to_json()?);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Gravity Balls (headless) starting...");

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
