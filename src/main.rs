//! Trapline entry point
//!
//! Native builds run a headless demo: the autopilot plays through the
//! built-in levels and every restart/advance is logged.
//!
//! Usage: `trapline [start_level] [max_ticks] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Trapline (native) starting...");

    let mut args = std::env::args().skip(1);
    let start_level = parse_arg(args.next(), "start_level", 1u32);
    let max_ticks = parse_arg(args.next(), "max_ticks", 20_000u64);
    let seed = parse_arg(args.next(), "seed", 42u64);

    if let Err(e) = run(start_level, max_ticks, seed) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_arg<T>(arg: Option<String>, name: &str, default: T) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    match arg {
        None => default,
        Some(s) => s.parse().unwrap_or_else(|_| {
            log::warn!("Invalid {name} {s:?}, using {default}");
            default
        }),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run(start_level: u32, max_ticks: u64, seed: u64) -> trapline::LevelResult<()> {
    use trapline::{Autopilot, LevelCatalog, Progress, Session, SessionEvent, Tuning};

    let catalog = LevelCatalog::builtin()?;
    let progress = Progress::load(catalog.len());
    let mut session = Session::new(catalog, Tuning::default(), progress, start_level)?;
    let mut bot = Autopilot::new(seed);

    let mut ticks = 0;
    while ticks < max_ticks {
        let input = bot.next_input(session.state());
        ticks += 1;
        match session.step(&input)? {
            SessionEvent::Running => {}
            SessionEvent::Restarted { level, deaths } => {
                log::info!("[tick {ticks}] level {level} restarted (deaths: {deaths})");
            }
            SessionEvent::Advanced { from, to } => {
                log::info!("[tick {ticks}] level {from} cleared, on to level {to}");
            }
            SessionEvent::Finished => {
                log::info!("[tick {ticks}] all levels cleared");
                break;
            }
        }
    }

    let catalog = session.catalog();
    println!("\nRun summary (seed {seed}, {ticks} ticks)");
    for level in 1..=catalog.len() {
        println!(
            "  level {:>2}: {:<9} deaths {}",
            level,
            if session.progress().is_completed(level) { "cleared" } else { "-" },
            session.deaths(level)
        );
    }
    println!(
        "  {} / {} cleared, {} deaths total",
        session.progress().completed_count(),
        catalog.len(),
        session.total_deaths()
    );
    Ok(())
}
