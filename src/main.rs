mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::{bail, Context};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, DisableFocusChange, EnableFocusChange, Event},
    terminal, ExecutableCommand,
};
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use circlebear_revolution::entities::Arrow;
use circlebear_revolution::map;
use circlebear_revolution::scheduler::{Scheduler, SystemClock};
use circlebear_revolution::session::{Driver, Session};
use circlebear_revolution::GameConfig;

use display::TerminalDisplay;

/// Four-lane arrow rhythm game for the terminal.
#[derive(Debug, Parser)]
#[command(name = "circlebear", version)]
struct Cli {
    /// Chart file (`.cbm`) with one `column::y` record per line.
    map: Option<PathBuf>,

    /// Play a random chart of this many arrows instead of a file.
    #[arg(long, value_name = "ARROWS", conflicts_with = "map")]
    random: Option<usize>,

    /// Seed for `--random`; a fresh seed is drawn when omitted.
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Simulation ticks per second.
    #[arg(long, default_value_t = circlebear_revolution::config::TICKS_PER_SECOND,
          value_parser = clap::value_parser!(u32).range(1..=1000))]
    tps: u32,

    /// Write log output here instead of stderr.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn init_logging(log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    // The terminal is in raw mode while playing, so stderr only gets warnings
    // by default.  A log file gets the full lifecycle.
    let default_level = if log_file.is_some() {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(default_level).parse_default_env();

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn load_chart(cli: &Cli, config: &GameConfig) -> anyhow::Result<Vec<Arrow>> {
    if let Some(count) = cli.random {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!("generating random chart of {count} arrows");
        return Ok(map::generate(&mut rng, count, config));
    }
    let Some(path) = &cli.map else {
        bail!("no chart given: pass a .cbm file or --random <ARROWS>");
    };
    let arrows = map::load_arrows(path, config.tile_size)?;
    Ok(arrows)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let config = GameConfig {
        ticks_per_second: cli.tps,
        ..GameConfig::default()
    };
    let chart = load_chart(&cli, &config)?;
    info!("starting with {} arrows at {} tps", chart.len(), config.ticks_per_second);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    let result = play(&mut out, chart, &config);

    // Always restore the terminal, whatever part of setup succeeded
    let _ = out.execute(DisableFocusChange);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let session = result?;
    let board = session.scoreboard();
    println!(
        "Final score: {}  (hits {}, missed {}, best combo {})",
        board.total, board.hits, board.missed, board.best_combo
    );
    Ok(())
}

fn play(out: &mut impl Write, chart: Vec<Arrow>, config: &GameConfig) -> anyhow::Result<Session> {
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    // Focus reports let the loop pause while the terminal is in the background.
    if out.execute(EnableFocusChange).is_err() {
        info!("terminal does not report focus changes");
    }

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    run(chart, config, rx)
}

fn run(
    chart: Vec<Arrow>,
    config: &GameConfig,
    rx: mpsc::Receiver<Event>,
) -> anyhow::Result<Session> {
    let (width, height) = terminal::size()?;
    let display = TerminalDisplay::new(BufWriter::new(stdout()), width, height);

    let scheduler = Scheduler::new(config);
    let session = Session::new(chart, config);
    let mut driver = Driver::new(session, rx, display, scheduler.handle());

    let stats = scheduler
        .run(&mut SystemClock::new(), &mut driver)
        .context("game loop failed")?;
    info!(
        "{} frames rendered, deepest catch-up burst {}",
        stats.frames, stats.max_skips
    );
    Ok(driver.into_session())
}
