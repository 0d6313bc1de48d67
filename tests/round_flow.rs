use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand::rngs::StdRng;

use gridsnake::board::Cell;
use gridsnake::config::{COUNTDOWN_GO_HOLD_MS, COUNTDOWN_STEP_MS, START_CELL, TICK_INTERVAL_MS};
use gridsnake::food::Food;
use gridsnake::input::{Command, Direction};
use gridsnake::round::{Phase, RoundController};
use gridsnake::snake::SnakeState;
use gridsnake::store::{JsonScoreStore, ScoreStore};

/// Advances in 50 ms slices so re-armed timers fire on schedule, the way
/// a frontend frame loop feeds time in.
fn advance_by(controller: &mut RoundController, total_ms: u64) {
    let mut remaining = total_ms;
    while remaining > 0 {
        let slice = remaining.min(50);
        controller.advance_time(slice);
        remaining -= slice;
    }
}

fn run_countdown(controller: &mut RoundController) {
    advance_by(controller, 3 * COUNTDOWN_STEP_MS + COUNTDOWN_GO_HOLD_MS);
}

#[test]
fn countdown_then_stepwise_food_and_wall_collision() {
    let mut controller = RoundController::with_seed(42, None, true);
    assert_eq!(controller.phase(), Phase::Countdown);
    assert_eq!(controller.snake.head(), START_CELL);
    assert_eq!(controller.snake.heading(), None);

    run_countdown(&mut controller);
    assert_eq!(controller.phase(), Phase::Playing);
    assert_eq!(controller.snake.heading(), Some(Direction::Right));

    let mut scenario_rng = StdRng::seed_from_u64(9);
    controller.snake = SnakeState::new(Cell { x: 4, y: 5 });
    controller.snake.set_heading(Direction::Right);
    controller.food = Food::at(&mut scenario_rng, Cell { x: 6, y: 5 });

    advance_by(&mut controller, TICK_INTERVAL_MS);
    assert_eq!(controller.snake.head(), Cell { x: 5, y: 5 });
    assert_eq!(controller.score, 0);

    advance_by(&mut controller, TICK_INTERVAL_MS);
    assert_eq!(controller.snake.head(), Cell { x: 6, y: 5 });
    assert_eq!(controller.score, 1);
    assert_eq!(controller.snake.len(), 2);
    assert!(!controller.snake.occupies(controller.food.cell));

    // Park the food far away so the run for the wall stays a pure move.
    controller.food = Food::at(&mut scenario_rng, Cell { x: 15, y: 15 });
    controller.handle_command(Command::Direction(Direction::Up));

    // y = 5 -> 0, then one more step into the wall.
    advance_by(&mut controller, 5 * TICK_INTERVAL_MS);
    assert_eq!(controller.snake.head(), Cell { x: 6, y: 0 });
    assert_eq!(controller.phase(), Phase::Playing);

    advance_by(&mut controller, TICK_INTERVAL_MS);
    assert_eq!(controller.phase(), Phase::Ended);
    assert_eq!(controller.score, 1);
}

#[test]
fn pause_freezes_the_round_until_toggled_back() {
    let mut controller = RoundController::with_seed(5, None, true);
    run_countdown(&mut controller);

    let mut scenario_rng = StdRng::seed_from_u64(5);
    controller.snake = SnakeState::new(Cell { x: 5, y: 5 });
    controller.snake.set_heading(Direction::Right);
    controller.food = Food::at(&mut scenario_rng, Cell { x: 15, y: 15 });

    controller.handle_command(Command::TogglePause);
    assert_eq!(controller.phase(), Phase::Paused);

    advance_by(&mut controller, 2000);
    assert_eq!(controller.snake.head(), Cell { x: 5, y: 5 });
    assert_eq!(controller.score, 0);

    controller.handle_command(Command::TogglePause);
    advance_by(&mut controller, TICK_INTERVAL_MS);
    assert_eq!(controller.snake.head(), Cell { x: 6, y: 5 });
}

#[test]
fn ended_round_persists_score_and_reset_starts_over() {
    let path = unique_test_path("persist");
    let store = JsonScoreStore::at_path(path.clone());

    let mut controller = RoundController::with_seed(7, Some(Box::new(store)), true);
    run_countdown(&mut controller);

    let mut scenario_rng = StdRng::seed_from_u64(7);
    controller.snake = SnakeState::new(Cell { x: 18, y: 10 });
    controller.snake.set_heading(Direction::Right);
    controller.food = Food::at(&mut scenario_rng, Cell { x: 19, y: 10 });

    // Eat at (19,10), then run into the wall.
    advance_by(&mut controller, 2 * TICK_INTERVAL_MS);
    assert_eq!(controller.phase(), Phase::Ended);
    assert_eq!(controller.score, 1);

    let readback = JsonScoreStore::at_path(path.clone());
    let top = readback.top_n(5).expect("score file should be readable");
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].score, 1);

    controller.handle_command(Command::Reset);
    assert_eq!(controller.phase(), Phase::Countdown);
    assert_eq!(controller.score, 0);
    assert_eq!(controller.snake.len(), 1);
    assert_eq!(controller.snake.head(), START_CELL);

    run_countdown(&mut controller);
    assert_eq!(controller.phase(), Phase::Playing);

    cleanup_test_path(&path);
}

fn unique_test_path(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time should be after epoch")
        .as_nanos();

    std::env::temp_dir()
        .join("gridsnake-flow-tests")
        .join(format!("{label}-{nanos}.json"))
}

fn cleanup_test_path(path: &PathBuf) {
    let _ = fs::remove_file(path);
    if let Some(parent) = path.parent() {
        let _ = fs::remove_dir(parent);
    }
}
