use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use crate::crate_sim::CrateSimulation;
use crate::error::ArcadeError;
use crate::input::{Direction, GameInput};
use crate::snake::{SnakeRules, SnakeSimulation};
use crate::snapshot::{Snapshot, render_crates, render_snake};

/// A single-actor grid game that takes directional commands.
///
/// Turn-based games act on [`on_direction`](GridGame::on_direction) alone.
/// Tick-driven games record the direction and act on
/// [`on_tick`](GridGame::on_tick), which the host calls on a fixed cadence.
pub trait GridGame {
    fn title(&self) -> &'static str;

    fn on_direction(&mut self, direction: Direction);

    fn on_tick(&mut self);

    fn reset(&mut self);

    /// Won or lost; only `reset` changes state from here.
    fn is_terminal(&self) -> bool;

    /// Whether the host needs to call `on_tick` for the game to progress.
    fn ticks_driven(&self) -> bool;

    fn snapshot(&self) -> Snapshot;
}

impl GridGame for CrateSimulation {
    fn title(&self) -> &'static str {
        GameKind::Crates.title()
    }

    fn on_direction(&mut self, direction: Direction) {
        let _ = self.attempt_move(direction);
    }

    fn on_tick(&mut self) {}

    fn reset(&mut self) {
        CrateSimulation::reset(self);
    }

    fn is_terminal(&self) -> bool {
        self.won()
    }

    fn ticks_driven(&self) -> bool {
        false
    }

    fn snapshot(&self) -> Snapshot {
        render_crates(self)
    }
}

impl GridGame for SnakeSimulation {
    fn title(&self) -> &'static str {
        GameKind::Snake.title()
    }

    fn on_direction(&mut self, direction: Direction) {
        self.set_direction(direction);
    }

    fn on_tick(&mut self) {
        let outcome = self.step();
        debug!(?outcome, head = ?self.head(), "snake step");
    }

    fn reset(&mut self) {
        SnakeSimulation::reset(self);
    }

    fn is_terminal(&self) -> bool {
        !self.is_alive()
    }

    fn ticks_driven(&self) -> bool {
        true
    }

    fn snapshot(&self) -> Snapshot {
        render_snake(self)
    }
}

/// Selects which game a session is showing.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum GameKind {
    #[default]
    Crates,
    Snake,
}

impl GameKind {
    /// Display name shown in the board title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Crates => "Crates",
            Self::Snake => "Snake",
        }
    }

    /// The other game, for cycling.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Crates => Self::Snake,
            Self::Snake => Self::Crates,
        }
    }
}

impl FromStr for GameKind {
    type Err = ArcadeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "crates" | "crate" | "sokoban" => Ok(Self::Crates),
            "snake" => Ok(Self::Snake),
            _ => Err(ArcadeError::UnknownGame(raw.to_owned())),
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Crates => "crates",
            Self::Snake => "snake",
        })
    }
}

/// Everything one player owns: both games plus which one is active.
///
/// Sessions share nothing, so running several side by side needs no
/// coordination.
#[derive(Debug, Clone)]
pub struct Session {
    crates: CrateSimulation,
    snake: SnakeSimulation,
    active: GameKind,
    paused: bool,
}

impl Session {
    #[must_use]
    pub fn new(active: GameKind, rules: SnakeRules, seed: Option<u64>) -> Self {
        let snake = match seed {
            Some(seed) => SnakeSimulation::with_seed(seed, rules),
            None => SnakeSimulation::new(rules),
        };

        Self {
            crates: CrateSimulation::new(),
            snake,
            active,
            paused: false,
        }
    }

    #[must_use]
    pub fn active(&self) -> GameKind {
        self.active
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn crates(&self) -> &CrateSimulation {
        &self.crates
    }

    #[must_use]
    pub fn snake(&self) -> &SnakeSimulation {
        &self.snake
    }

    /// The active game behind the shared interface.
    #[must_use]
    pub fn game(&self) -> &dyn GridGame {
        match self.active {
            GameKind::Crates => &self.crates,
            GameKind::Snake => &self.snake,
        }
    }

    fn game_mut(&mut self) -> &mut dyn GridGame {
        match self.active {
            GameKind::Crates => &mut self.crates,
            GameKind::Snake => &mut self.snake,
        }
    }

    /// Routes one command. Returns `false` for [`GameInput::Quit`].
    pub fn apply_input(&mut self, input: GameInput) -> bool {
        match input {
            GameInput::Direction(direction) => {
                if !self.paused {
                    self.game_mut().on_direction(direction);
                }
            }
            GameInput::Reset => {
                self.game_mut().reset();
                self.paused = false;
            }
            GameInput::Pause => {
                if self.game().ticks_driven() && !self.game().is_terminal() {
                    self.paused = !self.paused;
                }
            }
            GameInput::SwitchGame => {
                self.active = self.active.next();
                self.paused = false;
                info!(game = %self.active, "switched game");
            }
            GameInput::Quit => return false,
        }
        true
    }

    /// Advances the active game by one tick when it is tick-driven, running
    /// and not paused.
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }
        let game = self.game_mut();
        if game.ticks_driven() && !game.is_terminal() {
            game.on_tick();
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.game().snapshot()
    }
}
