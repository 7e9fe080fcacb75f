mod ui;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use dinorun::core::constants::FRAME_INTERVAL_MS;
use dinorun::{Command, GameConfig, RunnerGame, Session};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use ui::runner_scene::render_runner_scene;

/// Without key release reporting, a duck ends this long after the last repeat.
const DUCK_RELEASE_TIMEOUT: Duration = Duration::from_millis(150);
/// How long a cue message stays in the status bar.
const STATUS_DURATION: Duration = Duration::from_secs(2);

struct CliOptions {
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    log_path: Option<PathBuf>,
}

enum Action {
    Quit,
    Continue,
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    if let Some(path) = &options.log_path {
        let file = File::create(path)?;
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }

    let config = GameConfig::resolve(options.config_path.as_deref())?;
    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    log::info!(
        "starting dinorun {} (seed: {:?})",
        env!("CARGO_PKG_VERSION"),
        options.seed
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let key_releases = supports_keyboard_enhancement().unwrap_or(false);
    if key_releases {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_game(&mut terminal, config, rng, key_releases);

    // Restore terminal even if the loop failed
    if key_releases {
        terminal.backend_mut().execute(PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let session = result?;
    println!(
        "Thanks for playing! Runs: {}  Best: {:05}",
        session.runs_completed, session.high_score.value
    );
    Ok(())
}

fn run_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: GameConfig,
    mut rng: StdRng,
    key_releases: bool,
) -> io::Result<Session> {
    let mut game = RunnerGame::new(config);
    let mut session = Session::new();
    let frame_interval = Duration::from_secs_f64(FRAME_INTERVAL_MS / 1000.0);

    let mut last_frame = Instant::now();
    let mut last_duck_key: Option<Instant> = None;
    let mut status: Option<(String, Instant)> = None;

    loop {
        let status_text = status
            .as_ref()
            .filter(|(_, at)| at.elapsed() < STATUS_DURATION)
            .map(|(text, _)| text.as_str());
        terminal.draw(|frame| {
            let area = frame.size();
            render_runner_scene(frame, area, &game, &session, status_text);
        })?;

        // Handle input until the next frame is due
        let mut timeout = frame_interval.saturating_sub(last_frame.elapsed());
        while event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if let Action::Quit = handle_key(&mut game, key, &mut last_duck_key) {
                    return Ok(session);
                }
            }
            timeout = Duration::ZERO;
        }

        if !key_releases {
            if let Some(at) = last_duck_key {
                if at.elapsed() >= DUCK_RELEASE_TIMEOUT {
                    game.push_command(Command::DuckRelease);
                    last_duck_key = None;
                }
            }
        }

        let now = Instant::now();
        let dt_ms = now.duration_since(last_frame).as_secs_f64() * 1000.0;
        last_frame = now;

        for event in dinorun::runner::tick(&mut game, &mut session, dt_ms, &mut rng) {
            if let Some(message) = event.message() {
                status = Some((message, now));
            }
        }
    }
}

fn handle_key(
    game: &mut RunnerGame,
    key: KeyEvent,
    last_duck_key: &mut Option<Instant>,
) -> Action {
    if key.kind == KeyEventKind::Release {
        if key.code == KeyCode::Down {
            game.push_command(Command::DuckRelease);
            *last_duck_key = None;
        }
        return Action::Continue;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Action::Quit,
        KeyCode::Char(' ') | KeyCode::Up => {
            if key.kind == KeyEventKind::Press {
                game.push_command(Command::Jump);
            }
        }
        KeyCode::Down => {
            if last_duck_key.is_none() {
                game.push_command(Command::DuckPress);
            }
            *last_duck_key = Some(Instant::now());
        }
        KeyCode::Char('r') | KeyCode::Char('R') => game.push_command(Command::Restart),
        KeyCode::Enter => game.push_command(Command::Accept),
        _ => {}
    }
    Action::Continue
}

fn parse_args(args: &[String]) -> CliOptions {
    let mut options = CliOptions {
        config_path: None,
        seed: None,
        log_path: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    options.config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    options.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--log" => {
                if i + 1 < args.len() {
                    options.log_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--version" | "-V" => {
                println!("dinorun {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'dinorun --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    options
}

fn print_help() {
    println!("Dino Run - Terminal Endless Runner\n");
    println!("Usage: dinorun [OPTIONS]\n");
    println!("Options:");
    println!("  -c, --config <PATH>  Game config JSON (default: ~/.dinorun/config.json)");
    println!("  -s, --seed <N>       Seed the obstacle generator");
    println!("  --log <PATH>         Write logs to a file (filter with RUST_LOG)");
    println!("  -V, --version        Show version information");
    println!("  -h, --help           Show this help message\n");
    println!("Controls:");
    println!("  Space/Up  Jump (also starts the game)");
    println!("  Down      Duck");
    println!("  Enter/R   Restart after a crash");
    println!("  Esc/Q     Quit");
}
