use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use gridsnake::config::{HISTORY_DISPLAY_LIMIT, THEME_CLASSIC};
use gridsnake::input::{self, Command, UiInput};
use gridsnake::renderer;
use gridsnake::round::{Phase, RoundController};
use gridsnake::store::{JsonScoreStore, ScoreStore};
use gridsnake::ui::hud::HudInfo;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Seed the RNG for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Disable the pause capability.
    #[arg(long = "no-pause")]
    no_pause: bool,

    /// Disable the persistent score history.
    #[arg(long = "no-store")]
    no_store: bool,

    /// Override the score history file location.
    #[arg(long)]
    scores: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    install_panic_hook();

    let mut terminal = setup_terminal()?;
    let result = run(&cli, &mut terminal);
    cleanup_terminal()?;
    result
}

fn run(cli: &Cli, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    let store: Option<Box<dyn ScoreStore>> = if cli.no_store {
        None
    } else {
        match &cli.scores {
            Some(path) => Some(Box::new(JsonScoreStore::at_path(path.clone()))),
            None => Some(Box::new(JsonScoreStore::new())),
        }
    };

    let mut controller = match cli.seed {
        Some(seed) => RoundController::with_seed(seed, store, !cli.no_pause),
        None => RoundController::new(store, !cli.no_pause),
    };

    let mut top_scores = controller.top_scores(HISTORY_DISPLAY_LIMIT);
    let mut last_phase = controller.phase();
    let mut last_frame = Instant::now();

    loop {
        let snapshot = controller.snapshot();
        let high_score = top_scores.first().map_or(0, |entry| entry.score);
        terminal.draw(|frame| {
            renderer::render(
                frame,
                &snapshot,
                &HudInfo {
                    high_score,
                    top_scores: &top_scores,
                    theme: &THEME_CLASSIC,
                    store_enabled: controller.has_store(),
                },
            )
        })?;

        // Polling doubles as the frame sleep.
        if let Some(ui_input) = input::poll_ui_input(Duration::from_millis(16))? {
            match ui_input {
                UiInput::Quit => break,
                UiInput::Confirm => {
                    if controller.phase() == Phase::Ended {
                        controller.handle_command(Command::Reset);
                    }
                }
                UiInput::ClearScores => {
                    controller.clear_scores();
                    top_scores = controller.top_scores(HISTORY_DISPLAY_LIMIT);
                }
                UiInput::Command(command) => controller.handle_command(command),
            }
        }

        let delta = last_frame.elapsed();
        last_frame = Instant::now();
        controller.advance_time(u64::try_from(delta.as_millis()).unwrap_or(0));

        // Refresh the history once per round end so the game-over screen
        // shows the just-persisted score.
        let phase = controller.phase();
        if phase != last_phase {
            if phase == Phase::Ended {
                top_scores = controller.top_scores(HISTORY_DISPLAY_LIMIT);
            }
            last_phase = phase;
        }
    }

    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn cleanup_terminal() -> io::Result<()> {
    disable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)?;

    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal_after_panic();
        default_hook(panic_info);
    }));
}

fn restore_terminal_after_panic() {
    let _ = disable_raw_mode();

    let mut stdout = io::stdout();
    let _ = execute!(stdout, Show, LeaveAlternateScreen);
}
