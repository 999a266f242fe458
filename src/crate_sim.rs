use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::config::CRATE_LAYOUT;
use crate::error::ArcadeError;
use crate::grid::{Cell, GridSize, GridWorld};
use crate::input::Direction;

/// What a single move did to the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MoveKind {
    /// Actor stepped into an empty cell.
    Moved,
    /// Actor pushed one crate ahead of it.
    Pushed,
    /// Nothing changed.
    Blocked,
}

/// Result of [`CrateSimulation::attempt_move`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MoveOutcome {
    pub kind: MoveKind,
    pub won: bool,
}

#[derive(Debug, Clone, Eq, PartialEq)]
struct Layout {
    actor: Cell,
    crates: BTreeSet<Cell>,
}

/// Crate-pushing puzzle state for one session.
///
/// Targets and walls are fixed at construction. Crates are only ever
/// relocated, so their count always equals the target count.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CrateSimulation {
    world: GridWorld,
    targets: BTreeSet<Cell>,
    start: Layout,
    actor: Cell,
    crates: BTreeSet<Cell>,
    won: bool,
    moves: u32,
    pushes: u32,
}

impl Default for CrateSimulation {
    fn default() -> Self {
        Self::new()
    }
}

impl CrateSimulation {
    /// Builds the standard 5×7 starting board.
    #[must_use]
    pub fn new() -> Self {
        match Self::from_layout(&CRATE_LAYOUT) {
            Ok(simulation) => simulation,
            Err(error) => unreachable!("built-in crate layout is valid: {error}"),
        }
    }

    /// Parses an ASCII board.
    ///
    /// Glyphs: `#` wall, `.` target, `$` crate, `*` crate on target,
    /// `@` actor, `+` actor on target, space for an empty floor cell.
    pub fn from_layout(rows: &[&str]) -> Result<Self, ArcadeError> {
        let Some(first) = rows.first() else {
            return Err(ArcadeError::layout("board has no rows"));
        };
        let width = first.chars().count();
        if width == 0 {
            return Err(ArcadeError::layout("board has no columns"));
        }

        let height = u16::try_from(rows.len())
            .map_err(|_| ArcadeError::layout("board is too tall"))?;
        let width_u16 =
            u16::try_from(width).map_err(|_| ArcadeError::layout("board is too wide"))?;
        let size = GridSize::new(height, width_u16);

        let mut walls = Vec::new();
        let mut targets = BTreeSet::new();
        let mut crates = BTreeSet::new();
        let mut actor = None;

        for (row, line) in (0_i32..).zip(rows) {
            if line.chars().count() != width {
                return Err(ArcadeError::layout(format!(
                    "row {row} is not {width} cells wide"
                )));
            }

            for (col, glyph) in (0_i32..).zip(line.chars()) {
                let cell = Cell::new(row, col);
                match glyph {
                    '#' => walls.push(cell),
                    '.' => {
                        targets.insert(cell);
                    }
                    '$' => {
                        crates.insert(cell);
                    }
                    '*' => {
                        targets.insert(cell);
                        crates.insert(cell);
                    }
                    '@' | '+' => {
                        if actor.replace(cell).is_some() {
                            return Err(ArcadeError::layout("more than one actor"));
                        }
                        if glyph == '+' {
                            targets.insert(cell);
                        }
                    }
                    ' ' => {}
                    other => {
                        return Err(ArcadeError::layout(format!(
                            "unknown glyph `{other}` at ({row}, {col})"
                        )));
                    }
                }
            }
        }

        let Some(actor) = actor else {
            return Err(ArcadeError::layout("no actor on the board"));
        };
        if targets.is_empty() {
            return Err(ArcadeError::layout("no target cells"));
        }
        if crates.len() != targets.len() {
            return Err(ArcadeError::layout(format!(
                "{} crates for {} targets",
                crates.len(),
                targets.len()
            )));
        }

        let world = GridWorld::with_walls(size, walls);
        let start = Layout {
            actor,
            crates: crates.clone(),
        };

        Ok(Self {
            world,
            targets,
            start,
            actor,
            crates,
            won: false,
            moves: 0,
            pushes: 0,
        })
    }

    /// Applies one directional move.
    ///
    /// Illegal moves are rejected with [`MoveKind::Blocked`] and leave the
    /// state untouched. Once a move has solved the puzzle every further move
    /// is blocked until [`reset`](Self::reset).
    pub fn attempt_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.won {
            return self.outcome(MoveKind::Blocked);
        }

        let dest = self.actor.offset(direction);
        if !self.world.is_open(dest) {
            debug!(?direction, ?dest, "move blocked by wall or edge");
            return self.outcome(MoveKind::Blocked);
        }

        if !self.crates.contains(&dest) {
            self.actor = dest;
            self.moves += 1;
            debug!(?direction, actor = ?self.actor, "actor moved");
            return self.settle(MoveKind::Moved);
        }

        let beyond = dest.offset(direction);
        if !self.world.is_open(beyond) || self.crates.contains(&beyond) {
            debug!(?direction, crate_cell = ?dest, "push blocked");
            return self.outcome(MoveKind::Blocked);
        }

        self.crates.remove(&dest);
        self.crates.insert(beyond);
        self.actor = dest;
        self.moves += 1;
        self.pushes += 1;
        debug!(?direction, from = ?dest, to = ?beyond, "crate pushed");
        self.settle(MoveKind::Pushed)
    }

    /// True when every target holds a crate.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.targets.iter().all(|target| self.crates.contains(target))
    }

    /// Restores the layout this simulation was built from.
    pub fn reset(&mut self) {
        self.actor = self.start.actor;
        self.crates = self.start.crates.clone();
        self.won = false;
        self.moves = 0;
        self.pushes = 0;
        info!("crate puzzle reset");
    }

    #[must_use]
    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    #[must_use]
    pub fn actor(&self) -> Cell {
        self.actor
    }

    pub fn crates(&self) -> impl Iterator<Item = &Cell> {
        self.crates.iter()
    }

    #[must_use]
    pub fn has_crate(&self, cell: Cell) -> bool {
        self.crates.contains(&cell)
    }

    #[must_use]
    pub fn is_target(&self, cell: Cell) -> bool {
        self.targets.contains(&cell)
    }

    pub fn targets(&self) -> impl Iterator<Item = &Cell> {
        self.targets.iter()
    }

    /// True once a move has solved the puzzle.
    #[must_use]
    pub fn won(&self) -> bool {
        self.won
    }

    /// Accepted steps since the last reset.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn pushes(&self) -> u32 {
        self.pushes
    }

    fn settle(&mut self, kind: MoveKind) -> MoveOutcome {
        self.won = self.is_solved();
        if self.won {
            info!(moves = self.moves, pushes = self.pushes, "crate puzzle solved");
        }
        self.outcome(kind)
    }

    fn outcome(&self, kind: MoveKind) -> MoveOutcome {
        MoveOutcome {
            kind,
            won: self.won,
        }
    }
}
