use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Cell;
use crate::config::{
    COUNTDOWN_GO_HOLD_MS, COUNTDOWN_START, COUNTDOWN_STEP_MS, START_CELL, TICK_INTERVAL_MS,
};
use crate::food::{Food, SpawnError};
use crate::input::{Command, Direction};
use crate::scheduler::{Scheduler, TimerHandle};
use crate::snake::{AdvanceResult, SnakeState};
use crate::store::{ScoreEntry, ScoreStore};

/// Discriminant of the round-level state machine.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    Countdown,
    Playing,
    Paused,
    Ended,
}

/// Why a round ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    /// The snake hit a wall or itself.
    Collision,
    /// No free cell was left for food; the board is full, an implicit win.
    BoardFull,
}

/// Delayed transitions routed through the scheduler.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum TimerEvent {
    CountdownStep,
    CountdownGo,
    SimTick,
}

/// Read-only view of the round for rendering, sampled between ticks.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub snake: Vec<Cell>,
    pub heading: Option<Direction>,
    pub food_cell: Cell,
    pub food_remaining_secs: u64,
    pub score: u32,
    pub phase: Phase,
    /// Current countdown value; 0 means the "GO!" banner is showing.
    pub countdown: u8,
    pub end_reason: Option<EndReason>,
    /// Latest non-fatal persistence notice, if any.
    pub notice: Option<String>,
}

/// Top-level round state machine.
///
/// Owns the snake/food/score triple, the scheduler, and the optional score
/// store. The host measures wall-clock time and calls [`advance_time`] at
/// its frame cadence; all countdown steps and simulation ticks fire from
/// there. Commands arrive at arbitrary times through [`handle_command`] and
/// are ignored when not valid in the current phase.
///
/// [`advance_time`]: RoundController::advance_time
/// [`handle_command`]: RoundController::handle_command
pub struct RoundController {
    pub snake: SnakeState,
    pub food: Food,
    pub score: u32,
    phase: Phase,
    countdown: u8,
    end_reason: Option<EndReason>,
    scheduler: Scheduler<TimerEvent>,
    countdown_handle: Option<TimerHandle>,
    tick_handle: Option<TimerHandle>,
    rng: StdRng,
    store: Option<Box<dyn ScoreStore>>,
    pause_enabled: bool,
    notice: Option<String>,
}

impl RoundController {
    /// Creates a controller with an entropy-seeded RNG and starts the
    /// countdown.
    #[must_use]
    pub fn new(store: Option<Box<dyn ScoreStore>>, pause_enabled: bool) -> Self {
        Self::with_rng(StdRng::from_entropy(), store, pause_enabled)
    }

    /// Creates a deterministic controller for tests and seeded runs.
    #[must_use]
    pub fn with_seed(seed: u64, store: Option<Box<dyn ScoreStore>>, pause_enabled: bool) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), store, pause_enabled)
    }

    fn with_rng(mut rng: StdRng, store: Option<Box<dyn ScoreStore>>, pause_enabled: bool) -> Self {
        let (snake, food) = fresh_round(&mut rng);

        let mut controller = Self {
            snake,
            food,
            score: 0,
            phase: Phase::Countdown,
            countdown: COUNTDOWN_START,
            end_reason: None,
            scheduler: Scheduler::new(),
            countdown_handle: None,
            tick_handle: None,
            rng,
            store,
            pause_enabled,
            notice: None,
        };
        controller.begin_countdown();
        controller
    }

    /// Feeds elapsed wall-clock time into the scheduler and fires every
    /// state transition that came due.
    pub fn advance_time(&mut self, delta_ms: u64) {
        for event in self.scheduler.advance(delta_ms) {
            self.handle_timer(event);
        }
    }

    /// Applies one external command, silently ignoring commands that are
    /// invalid in the current phase.
    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::Direction(direction) => {
                if self.phase == Phase::Playing {
                    self.snake.set_heading(direction);
                }
            }
            Command::TogglePause => self.toggle_pause(),
            Command::Reset => self.reset(),
        }
    }

    /// Current phase of the round.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current countdown value; only meaningful during [`Phase::Countdown`].
    #[must_use]
    pub fn countdown(&self) -> u8 {
        self.countdown
    }

    /// Captures a read-only view for the renderer.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.segments().copied().collect(),
            heading: self.snake.heading(),
            food_cell: self.food.cell,
            food_remaining_secs: self.food.remaining_secs(),
            score: self.score,
            phase: self.phase,
            countdown: self.countdown,
            end_reason: self.end_reason,
            notice: self.notice.clone(),
        }
    }

    /// Returns whether a score store is plugged in.
    #[must_use]
    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    /// Reads the best scores from the store; failures surface as a notice
    /// and an empty list.
    pub fn top_scores(&mut self, limit: usize) -> Vec<ScoreEntry> {
        let Some(store) = self.store.as_ref() else {
            return Vec::new();
        };

        match store.top_n(limit) {
            Ok(entries) => entries,
            Err(error) => {
                self.notice = Some(format!("score history unavailable: {error}"));
                Vec::new()
            }
        }
    }

    /// Wipes the persisted score history; failures surface as a notice.
    pub fn clear_scores(&mut self) {
        let Some(store) = self.store.as_mut() else {
            return;
        };

        if let Err(error) = store.clear() {
            self.notice = Some(format!("score history not cleared: {error}"));
        }
    }

    /// Discards the snake/food/score triple and re-enters the countdown.
    ///
    /// Honored in every phase; a countdown already in progress keeps
    /// running (never two at once).
    fn reset(&mut self) {
        let (snake, food) = fresh_round(&mut self.rng);
        self.snake = snake;
        self.food = food;
        self.score = 0;
        self.end_reason = None;

        if let Some(handle) = self.tick_handle.take() {
            self.scheduler.cancel(handle);
        }

        self.phase = Phase::Countdown;
        self.begin_countdown();
    }

    /// Starts the countdown cadence. No-op while one is already pending,
    /// so at most one countdown drives the phase at any time.
    fn begin_countdown(&mut self) {
        if self.countdown_handle.is_some() {
            return;
        }

        self.countdown = COUNTDOWN_START;
        self.countdown_handle = Some(
            self.scheduler
                .schedule(COUNTDOWN_STEP_MS, TimerEvent::CountdownStep),
        );
    }

    fn handle_timer(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::CountdownStep => {
                self.countdown = self.countdown.saturating_sub(1);
                let (delay, next) = if self.countdown > 0 {
                    (COUNTDOWN_STEP_MS, TimerEvent::CountdownStep)
                } else {
                    // Zero shows the "GO!" banner for a short hold before
                    // play begins.
                    (COUNTDOWN_GO_HOLD_MS, TimerEvent::CountdownGo)
                };
                self.countdown_handle = Some(self.scheduler.schedule(delay, next));
            }
            TimerEvent::CountdownGo => {
                self.countdown_handle = None;
                self.phase = Phase::Playing;
                self.snake.set_heading(Direction::Right);
                self.tick_handle = Some(
                    self.scheduler
                        .schedule(TICK_INTERVAL_MS, TimerEvent::SimTick),
                );
            }
            TimerEvent::SimTick => {
                if self.phase != Phase::Playing {
                    return;
                }
                self.step();
                if self.phase == Phase::Playing {
                    self.tick_handle = Some(
                        self.scheduler
                            .schedule(TICK_INTERVAL_MS, TimerEvent::SimTick),
                    );
                } else {
                    self.tick_handle = None;
                }
            }
        }
    }

    /// One simulation tick: advance, then settle score/food/phase before
    /// anything can observe the state.
    fn step(&mut self) {
        match self.snake.advance(self.food.cell) {
            AdvanceResult::Moved => {
                if self.food.accumulate(TICK_INTERVAL_MS) {
                    self.respawn_food();
                }
            }
            AdvanceResult::Ate => {
                self.score += 1;
                self.respawn_food();
            }
            AdvanceResult::Collided => self.end_round(EndReason::Collision),
        }
    }

    fn respawn_food(&mut self) {
        match Food::spawn(&mut self.rng, &self.snake) {
            Ok(food) => self.food = food,
            Err(SpawnError::BoardFull) => self.end_round(EndReason::BoardFull),
        }
    }

    fn end_round(&mut self, reason: EndReason) {
        self.phase = Phase::Ended;
        self.end_reason = Some(reason);

        if let Some(handle) = self.tick_handle.take() {
            self.scheduler.cancel(handle);
        }

        // Fire-and-forget: a failing store becomes a notice, never a
        // game-state change.
        if self.score > 0 {
            if let Some(store) = self.store.as_mut() {
                if let Err(error) = store.add(self.score) {
                    self.notice = Some(format!("score not saved: {error}"));
                }
            }
        }
    }

    /// Toggles pause while playing. Available only when the pause
    /// capability is enabled, and only in Playing/Paused.
    fn toggle_pause(&mut self) {
        if !self.pause_enabled {
            return;
        }

        match self.phase {
            Phase::Playing => {
                self.phase = Phase::Paused;
                if let Some(handle) = self.tick_handle.take() {
                    self.scheduler.cancel(handle);
                }
            }
            Phase::Paused => {
                self.phase = Phase::Playing;
                self.tick_handle = Some(
                    self.scheduler
                        .schedule(TICK_INTERVAL_MS, TimerEvent::SimTick),
                );
            }
            Phase::Countdown | Phase::Ended => {}
        }
    }
}

/// Builds the snake/food pair every round starts from.
fn fresh_round<R: Rng + ?Sized>(rng: &mut R) -> (SnakeState, Food) {
    let snake = SnakeState::new(START_CELL);
    let food = Food::spawn(rng, &snake).expect("a fresh board cannot be full");
    (snake, food)
}
