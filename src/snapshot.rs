//! Read-only render snapshots.
//!
//! A [`Snapshot`] is rebuilt from simulation state after every mutating call
//! and handed to whatever draws it. The simulations themselves know nothing
//! about drawing.

use std::fmt;

use crate::arcade::GameKind;
use crate::crate_sim::CrateSimulation;
use crate::grid::{Cell, GridSize};
use crate::snake::SnakeSimulation;

/// What occupies one cell, as seen by a presentation layer.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Tile {
    Empty,
    Wall,
    Target,
    Crate,
    CrateOnTarget,
    Actor,
    ActorOnTarget,
    SnakeHead,
    SnakeBody,
    SnakeTail,
    Food,
    /// Food left under a body segment by a respawn onto the snake.
    SnakeOnFood,
}

impl Tile {
    /// Single-character glyph used by the text rendering.
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Wall => '#',
            Self::Target => '.',
            Self::Crate => '$',
            Self::CrateOnTarget => '*',
            Self::Actor => '@',
            Self::ActorOnTarget => '+',
            Self::SnakeHead => 'H',
            Self::SnakeBody => 'o',
            Self::SnakeTail => 't',
            Self::Food => 'f',
            Self::SnakeOnFood => 'F',
        }
    }
}

/// High-level game status shown to the player.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Status {
    Playing,
    Won,
    GameOver,
}

/// Immutable view of one game at one point in time.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
    pub kind: GameKind,
    pub size: GridSize,
    pub score: u32,
    pub moves: u64,
    pub status: Status,
    tiles: Vec<Tile>,
}

impl Snapshot {
    fn blank(kind: GameKind, size: GridSize) -> Self {
        Self {
            kind,
            size,
            score: 0,
            moves: 0,
            status: Status::Playing,
            tiles: vec![Tile::Empty; size.total_cells()],
        }
    }

    fn put(&mut self, cell: Cell, tile: Tile) {
        if let Some(index) = self.size.index_of(cell) {
            self.tiles[index] = tile;
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    /// Tile at `cell`, or `None` when out of bounds.
    #[must_use]
    pub fn tile(&self, cell: Cell) -> Option<Tile> {
        self.size.index_of(cell).map(|index| self.tiles[index])
    }

    /// Rows of tiles, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(usize::from(self.size.width).max(1))
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status != Status::Playing
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.rows().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            let line: String = row.iter().map(|tile| tile.glyph()).collect();
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Renders the crate puzzle.
#[must_use]
pub fn render_crates(sim: &CrateSimulation) -> Snapshot {
    let world = sim.world();
    let mut snapshot = Snapshot::blank(GameKind::Crates, world.size());

    for cell in world.size().cells() {
        let tile = match (world.is_wall(cell), sim.is_target(cell), sim.has_crate(cell)) {
            (true, _, _) => Tile::Wall,
            (false, true, true) => Tile::CrateOnTarget,
            (false, false, true) => Tile::Crate,
            (false, true, false) => Tile::Target,
            (false, false, false) => Tile::Empty,
        };
        snapshot.put(cell, tile);
    }

    let actor = sim.actor();
    let actor_tile = if sim.is_target(actor) {
        Tile::ActorOnTarget
    } else {
        Tile::Actor
    };
    snapshot.put(actor, actor_tile);

    snapshot.score = sim.pushes();
    snapshot.moves = u64::from(sim.moves());
    snapshot.status = if sim.won() {
        Status::Won
    } else {
        Status::Playing
    };
    snapshot
}

/// Renders the snake game.
#[must_use]
pub fn render_snake(sim: &SnakeSimulation) -> Snapshot {
    let mut snapshot = Snapshot::blank(GameKind::Snake, sim.world().size());

    if let Some(food) = sim.food() {
        snapshot.put(food, Tile::Food);
    }

    let last = sim.len().saturating_sub(1);
    for (index, segment) in sim.segments().enumerate() {
        let tile = match index {
            0 => Tile::SnakeHead,
            _ if sim.food() == Some(*segment) => Tile::SnakeOnFood,
            i if i == last => Tile::SnakeTail,
            _ => Tile::SnakeBody,
        };
        snapshot.put(*segment, tile);
    }

    snapshot.score = sim.score();
    snapshot.moves = sim.ticks();
    snapshot.status = if sim.is_alive() {
        Status::Playing
    } else {
        Status::GameOver
    };
    snapshot
}

#[cfg(test)]
mod tests {
    use crate::arcade::GameKind;
    use crate::crate_sim::CrateSimulation;
    use crate::food::FoodPlacement;
    use crate::grid::Cell;
    use crate::input::Direction;
    use crate::snake::{SnakeRules, SnakeSimulation, StepOutcome};

    use super::{Status, Tile, render_crates, render_snake};

    #[test]
    fn crate_board_text_matches_layout() {
        let snapshot = render_crates(&CrateSimulation::new());

        let expected = ["#######", "#.  $ #", "#  $@ #", "#.    #", "#######"].join("\n");
        assert_eq!(snapshot.to_string(), expected);
        assert_eq!(snapshot.status, Status::Playing);
        assert_eq!(snapshot.kind, GameKind::Crates);
    }

    #[test]
    fn crate_on_target_and_actor_on_target_are_marked() {
        let mut sim = CrateSimulation::from_layout(&["$ .@", "$ *."]).unwrap();

        sim.attempt_move(Direction::Down);
        let snapshot = render_crates(&sim);

        assert_eq!(snapshot.tile(Cell::new(1, 3)), Some(Tile::ActorOnTarget));
        assert_eq!(snapshot.tile(Cell::new(1, 2)), Some(Tile::CrateOnTarget));
        assert_eq!(snapshot.tile(Cell::new(0, 3)), Some(Tile::Empty));
        assert_eq!(snapshot.moves, 1);
    }

    #[test]
    fn solved_puzzle_renders_won() {
        let mut sim = CrateSimulation::from_layout(&[".$@"]).unwrap();
        sim.attempt_move(Direction::Left);

        let snapshot = render_crates(&sim);

        assert_eq!(snapshot.status, Status::Won);
        assert!(snapshot.is_terminal());
        assert_eq!(snapshot.score, 1);
    }

    #[test]
    fn snake_tiles_mark_head_body_tail_and_food() {
        let sim = SnakeSimulation::with_seed(2, SnakeRules::default());
        let snapshot = render_snake(&sim);

        assert_eq!(snapshot.tile(Cell::new(7, 7)), Some(Tile::SnakeHead));
        assert_eq!(snapshot.tile(Cell::new(7, 6)), Some(Tile::SnakeBody));
        assert_eq!(snapshot.tile(Cell::new(7, 5)), Some(Tile::SnakeTail));
        assert_eq!(snapshot.tile(Cell::new(7, 11)), Some(Tile::Food));
        assert_eq!(snapshot.tile(Cell::new(15, 0)), None);
        assert_eq!(snapshot.rows().count(), 15);
    }

    #[test]
    fn dead_snake_renders_game_over() {
        let mut sim = SnakeSimulation::with_seed(2, SnakeRules::default());
        sim.set_direction(Direction::Left);
        sim.step();

        assert_eq!(render_snake(&sim).status, Status::GameOver);
    }

    #[test]
    fn food_respawned_under_the_body_stays_visible() {
        let rules = SnakeRules {
            food: FoodPlacement::Anywhere,
            ..SnakeRules::default()
        };
        // Fourteen segments along row 5, head at the right edge, food below it.
        let body: Vec<Cell> = (1..=14).rev().map(|col| Cell::new(5, col)).collect();

        let mut covered = 0;
        for seed in 0..500 {
            let mut sim = SnakeSimulation::from_segments(
                body.clone(),
                Direction::Down,
                Cell::new(6, 14),
                rules,
                seed,
            )
            .unwrap();
            assert_eq!(sim.step(), StepOutcome::Grew);

            let food = sim.food().unwrap();
            let snapshot = render_snake(&sim);
            if sim.occupies(food) {
                covered += 1;
                assert_eq!(snapshot.tile(food), Some(Tile::SnakeOnFood));
                assert!(snapshot.to_string().contains('F'));
            } else {
                assert_eq!(snapshot.tile(food), Some(Tile::Food));
            }
        }

        assert!(covered > 0, "no seed respawned food under the snake");
    }
}
