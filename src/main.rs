use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use huematch::{
    app::{App, Control, TICK_RATE_MS},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    evaluator::MatchRule,
    gesture::Smoothing,
    logging,
    runtime::{CrosstermEventSource, FixedTicker, PointerTracker, Runner},
    session::{SessionConfig, SessionController},
    timer::{Clock, MonotonicClock},
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::info;

/// drag the swatch until its color matches the target before the clock runs out
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A color-matching game: drag (or use the arrow keys) to shift hue and brightness until your swatch matches the target, then submit before the countdown ends. Faster matches score more."
)]
pub struct Cli {
    /// seconds per attempt
    #[clap(short = 's', long)]
    timer_secs: Option<u32>,

    /// attempts per game
    #[clap(short = 'a', long)]
    max_attempts: Option<u32>,

    /// largest distance still counted as a match
    #[clap(short = 't', long)]
    tolerance: Option<f64>,

    /// what your color is compared against
    #[clap(short = 'r', long, value_enum)]
    match_rule: Option<MatchRule>,

    /// how drag motion is applied to the swatch
    #[clap(long, value_enum)]
    smoothing: Option<Smoothing>,

    /// seed for reproducible target colors
    #[clap(long)]
    seed: Option<u64>,

    /// write the effective settings to the config file
    #[clap(long)]
    save_config: bool,

    /// log file (default: ~/.local/state/huematch/huematch.log)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Flags win over the stored config.
    fn apply_to(&self, config: &mut Config) {
        if let Some(secs) = self.timer_secs {
            config.timer_secs = secs;
        }
        if let Some(attempts) = self.max_attempts {
            config.max_attempts = attempts;
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
        if let Some(rule) = self.match_rule {
            config.match_rule = rule;
        }
        if let Some(smoothing) = self.smoothing {
            config.smoothing = smoothing;
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn build_app(cli: &Cli, config: &Config) -> Result<App, huematch::GameError> {
    let session = SessionController::with_clock(
        SessionConfig::from(config),
        MonotonicClock::new(),
        cli.rng(),
    )?;
    let pointer = PointerTracker::new(config.cell_width_px, config.cell_height_px);
    Ok(App::new(session, pointer))
}

/// The game still runs without a log; stderr is free until raw mode starts.
fn start_logging(path: &Path) -> bool {
    match logging::init_file_logging(path) {
        Ok(()) => true,
        Err(err) => {
            eprintln!("huematch: logging disabled ({}): {err}", path.display());
            false
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        start_logging(&path);
    }

    let store = FileConfigStore::new();
    let mut config = store.load();
    cli.apply_to(&mut config);

    let mut app = match build_app(&cli, &config) {
        Ok(app) => app,
        Err(err) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, err.to_string()).exit();
        }
    };

    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "config saved");
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(?config, "game started");
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!(score = app.session.score(), "game closed");
    result
}

fn start_tui<B: Backend, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App<C>,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    loop {
        terminal.draw(|f| ui(app, f))?;

        if app.handle_event(runner.step()) == Control::Quit {
            break;
        }
    }

    Ok(())
}

fn ui<C: Clock>(app: &App<C>, f: &mut Frame) {
    f.render_widget(app, f.area());
}
