mod app;
mod config;
mod dataset;
mod driver;
mod render;
mod scale;
mod scene;
mod theme;
mod timer;
mod transition;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use config::VisConfig;
use dataset::{RandomShuffler, Shuffler};
use driver::Driver;
use scene::Host;
use timer::CycleEvent;

/// Redraw cadence while a transition may be running
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(name = "shufflevis")]
#[command(version)]
#[command(about = "Shuffles a row of circles with animated transitions")]
struct Args {
    /// Print the scene as an SVG document and exit
    #[arg(long, conflicts_with = "json")]
    svg: bool,

    /// Print the scene as JSON and exit
    #[arg(long)]
    json: bool,

    /// Run this many shuffle cycles before printing (--svg/--json)
    #[arg(long, default_value_t = 0)]
    cycles: u32,

    /// Seed the shuffle for reproducible orderings
    #[arg(long)]
    seed: Option<u64>,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; stderr keeps stdout clean for --svg/--json
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => VisConfig::load_from(path)
            .with_context(|| format!("Invalid config {}", path.display()))?,
        None => VisConfig::load(),
    };

    let shuffler: Box<dyn Shuffler> = match args.seed {
        Some(seed) => Box::new(RandomShuffler::seeded(seed)),
        None => Box::new(RandomShuffler::from_entropy()),
    };

    if args.svg || args.json {
        return print_snapshot(config, shuffler, args.cycles, args.json);
    }

    run_tui(config, shuffler).await
}

/// Headless mode: run cycles to completion and print the settled scene
fn print_snapshot(
    config: VisConfig,
    shuffler: Box<dyn Shuffler>,
    cycles: u32,
    as_json: bool,
) -> Result<()> {
    let class = config.selector.trim_start_matches('.').to_string();
    let interval = config.cycle_interval();
    let mut driver = Driver::initialize(Host::single(&class), config, shuffler)?;

    // Time is simulated so the output doesn't wait on the interval
    let mut now = Instant::now();
    for _ in 0..cycles {
        now += interval;
        driver.cycle(now);
    }
    let settled = now + driver.transition();

    for surface in driver.surfaces() {
        let output = if as_json {
            render::json::to_json(surface, settled)?
        } else {
            render::svg::to_svg(surface, settled)
        };
        print!("{}", output);
        if as_json {
            println!();
        }
    }
    Ok(())
}

async fn run_tui(config: VisConfig, shuffler: Box<dyn Shuffler>) -> Result<()> {
    let (cycle_tx, cycle_rx) = mpsc::channel(8);
    let mut app = App::new(config, shuffler, cycle_tx)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, cycle_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    mut cycle_rx: mpsc::Receiver<CycleEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(FRAME_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Err(e) = app.handle_key(key) {
                        app.status_message = Some(format!("Error: {}", e));
                    }
                }
            }
        }
        if app.exit {
            return Ok(());
        }

        while let Ok(event) = cycle_rx.try_recv() {
            app.on_cycle(event, Instant::now());
        }

        // Let the timer task run between frames
        tokio::task::yield_now().await;
    }
}
