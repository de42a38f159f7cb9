use clap::Parser;
use drive_core::{DriveConfig, DriveSession, Easing, CRUISE_VELOCITY};

/// Step the drive simulation headlessly at a fixed frame delta.
#[derive(Parser, Debug)]
#[command(name = "drive-native", version, about)]
struct Args {
    /// Number of frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// Frame delta in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Seed for archetype and spawn-interval sampling
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Traffic capacity override
    #[arg(long)]
    max_live: Option<usize>,

    /// Cruise velocity override
    #[arg(long)]
    cruise: Option<f32>,

    /// Ease with the real frame delta instead of the fixed nominal step
    #[arg(long)]
    delta_time_easing: bool,

    /// Pause window as `start..end` frame indices
    #[arg(long, value_parser = parse_window)]
    pause: Option<(u64, u64)>,

    /// Log a summary every N frames
    #[arg(long, default_value_t = 60)]
    report_every: u64,
}

fn parse_window(s: &str) -> Result<(u64, u64), String> {
    let (a, b) = s
        .split_once("..")
        .ok_or_else(|| format!("expected start..end, got {s:?}"))?;
    let start: u64 = a.trim().parse().map_err(|e| format!("bad start: {e}"))?;
    let end: u64 = b.trim().parse().map_err(|e| format!("bad end: {e}"))?;
    if start > end {
        return Err(format!("window start {start} is after end {end}"));
    }
    Ok((start, end))
}

fn build_config(args: &Args) -> DriveConfig {
    let mut config = DriveConfig::default();
    if let Some(n) = args.max_live {
        config.traffic.max_live = n;
    }
    config.world.cruise_velocity = args.cruise.unwrap_or(CRUISE_VELOCITY);
    if args.delta_time_easing {
        config.world.easing = Easing::DeltaTime;
    }
    config
}

#[derive(Default)]
struct Totals {
    spawned: u64,
    retired: u64,
    wraps: u64,
    peak_live: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = build_config(&args);
    let mut session = DriveSession::new(config, args.seed)?;
    log::info!(
        "[native] simulating {} frames at dt={:.4}s seed={}",
        args.frames,
        args.dt,
        args.seed
    );

    let mut totals = Totals::default();
    let mut now = 0.0_f64;
    let mut prev_offset = session.world().offset;
    for frame in 0..args.frames {
        let playing = match args.pause {
            Some((start, end)) => !(start..end).contains(&frame),
            None => true,
        };
        now += args.dt as f64;
        let snap = session.frame(args.dt, now, playing);
        let offset = snap.offset;
        let live = snap.vehicles.len();

        if playing {
            let report = session.last_report();
            totals.spawned += report.spawned.is_some() as u64;
            totals.retired += report.retired.len() as u64;
        }
        if offset < prev_offset {
            totals.wraps += 1;
        }
        prev_offset = offset;
        totals.peak_live = totals.peak_live.max(live);

        if args.report_every > 0 && frame % args.report_every == 0 {
            let w = session.world();
            log::info!(
                "[native] t={:>7.2}s offset={:>7.2} v={:>6.2} live={} playing={}",
                now,
                w.offset,
                w.velocity,
                live,
                playing
            );
        }
    }

    log::info!(
        "[native] done: spawned={} retired={} wraps={} peak_live={}/{}",
        totals.spawned,
        totals.retired,
        totals.wraps,
        totals.peak_live,
        session.traffic().capacity()
    );
    Ok(())
}
