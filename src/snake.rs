use std::collections::VecDeque;

use clap::ValueEnum;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{SNAKE_GRID, SNAKE_START_BODY, SNAKE_START_FOOD};
use crate::error::ArcadeError;
use crate::food::{FoodPlacement, spawn_food};
use crate::grid::{Cell, GridWorld};
use crate::input::Direction;

/// How a request to turn straight back is handled.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ReversalPolicy {
    /// Accept it; the next step runs into the neck and dies.
    #[default]
    Allow,
    /// Drop the request and keep travelling.
    Ignore,
}

/// Tunable rules for one snake game.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SnakeRules {
    pub food: FoodPlacement,
    pub reversal: ReversalPolicy,
}

/// Why the snake died.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Result of one [`SnakeSimulation::step`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    /// Moved one cell at constant length.
    Advanced,
    /// Ate the food and kept the tail.
    Grew,
    /// Hit a wall or itself. Terminal until reset.
    Dead(DeathReason),
}

/// Snake game state for one session.
#[derive(Debug, Clone)]
pub struct SnakeSimulation {
    world: GridWorld,
    rules: SnakeRules,
    body: VecDeque<Cell>,
    direction: Direction,
    requested: Option<Direction>,
    food: Option<Cell>,
    score: u32,
    ticks: u64,
    death: Option<DeathReason>,
    rng: StdRng,
}

impl SnakeSimulation {
    /// Creates the standard 15×15 game with entropy-seeded food placement.
    #[must_use]
    pub fn new(rules: SnakeRules) -> Self {
        Self::from_rng(rules, StdRng::from_entropy())
    }

    /// Creates a deterministic game for tests and reproducible runs.
    #[must_use]
    pub fn with_seed(seed: u64, rules: SnakeRules) -> Self {
        Self::from_rng(rules, StdRng::seed_from_u64(seed))
    }

    fn from_rng(rules: SnakeRules, rng: StdRng) -> Self {
        Self {
            world: GridWorld::open(SNAKE_GRID),
            rules,
            body: VecDeque::from(SNAKE_START_BODY.to_vec()),
            direction: Direction::Right,
            requested: None,
            food: Some(SNAKE_START_FOOD),
            score: 0,
            ticks: 0,
            death: None,
            rng,
        }
    }

    /// Builds a game from explicit segments (front is head) on the standard
    /// board.
    pub fn from_segments(
        segments: Vec<Cell>,
        direction: Direction,
        food: Cell,
        rules: SnakeRules,
        seed: u64,
    ) -> Result<Self, ArcadeError> {
        let world = GridWorld::open(SNAKE_GRID);
        if segments.is_empty() {
            return Err(ArcadeError::body("no segments"));
        }
        if let Some(outside) = segments.iter().find(|cell| !world.in_bounds(**cell)) {
            return Err(ArcadeError::body(format!("segment {outside:?} is off the board")));
        }
        for (index, segment) in segments.iter().enumerate() {
            if segments[index + 1..].contains(segment) {
                return Err(ArcadeError::body(format!("segment {segment:?} repeats")));
            }
        }
        if !world.in_bounds(food) {
            return Err(ArcadeError::body(format!("food {food:?} is off the board")));
        }
        if segments.contains(&food) {
            return Err(ArcadeError::body(format!("food {food:?} is under the body")));
        }

        let mut simulation = Self::with_seed(seed, rules);
        simulation.body = VecDeque::from(segments);
        simulation.direction = direction;
        simulation.food = Some(food);
        Ok(simulation)
    }

    /// Records the direction for the next step, replacing any earlier
    /// request that has not been consumed yet.
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.is_alive() {
            return;
        }
        if self.rules.reversal == ReversalPolicy::Ignore && direction == self.direction.opposite()
        {
            debug!(?direction, "reversal ignored");
            return;
        }
        self.requested = Some(direction);
    }

    /// Advances the game by exactly one tick.
    pub fn step(&mut self) -> StepOutcome {
        if let Some(reason) = self.death {
            return StepOutcome::Dead(reason);
        }

        if let Some(requested) = self.requested.take() {
            self.direction = requested;
        }

        let new_head = self.head().offset(self.direction);
        if !self.world.is_open(new_head) {
            return self.die(DeathReason::WallCollision, new_head);
        }
        if self.body.contains(&new_head) {
            return self.die(DeathReason::SelfCollision, new_head);
        }

        self.ticks += 1;
        self.body.push_front(new_head);

        if self.food == Some(new_head) {
            self.score += 1;
            self.food = spawn_food(
                &mut self.rng,
                self.world.size(),
                &self.body,
                self.rules.food,
                new_head,
            );
            debug!(score = self.score, food = ?self.food, len = self.body.len(), "snake grew");
            return StepOutcome::Grew;
        }

        let _ = self.body.pop_back();
        StepOutcome::Advanced
    }

    /// Restores the fixed starting body, direction, food and score. The rules
    /// and the random stream carry over.
    pub fn reset(&mut self) {
        self.body = VecDeque::from(SNAKE_START_BODY.to_vec());
        self.direction = Direction::Right;
        self.requested = None;
        self.food = Some(SNAKE_START_FOOD);
        self.score = 0;
        self.ticks = 0;
        self.death = None;
        info!("snake reset");
    }

    fn die(&mut self, reason: DeathReason, at: Cell) -> StepOutcome {
        self.death = Some(reason);
        info!(?reason, ?at, score = self.score, "snake died");
        StepOutcome::Dead(reason)
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Direction used by the most recent step.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction the next step will use.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.requested.unwrap_or(self.direction)
    }

    #[must_use]
    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Successful steps since the last reset.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.death.is_none()
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death
    }

    #[must_use]
    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    #[must_use]
    pub fn rules(&self) -> SnakeRules {
        self.rules
    }
}

#[cfg(test)]
mod tests {
    use crate::food::FoodPlacement;
    use crate::grid::Cell;
    use crate::input::Direction;

    use clap::ValueEnum;

    use super::{DeathReason, ReversalPolicy, SnakeRules, SnakeSimulation, StepOutcome};

    fn snake(segments: &[(i32, i32)], direction: Direction, food: (i32, i32)) -> SnakeSimulation {
        snake_with_rules(segments, direction, food, SnakeRules::default())
    }

    fn snake_with_rules(
        segments: &[(i32, i32)],
        direction: Direction,
        food: (i32, i32),
        rules: SnakeRules,
    ) -> SnakeSimulation {
        let segments = segments.iter().map(|&(r, c)| Cell::new(r, c)).collect();
        SnakeSimulation::from_segments(segments, direction, Cell::new(food.0, food.1), rules, 9)
            .unwrap()
    }

    #[test]
    fn starts_from_fixed_values() {
        let sim = SnakeSimulation::with_seed(1, SnakeRules::default());

        assert_eq!(sim.head(), Cell::new(7, 7));
        assert_eq!(sim.len(), 3);
        assert_eq!(sim.direction(), Direction::Right);
        assert_eq!(sim.food(), Some(Cell::new(7, 11)));
        assert_eq!(sim.score(), 0);
        assert!(sim.is_alive());
    }

    #[test]
    fn snake_moves_one_cell_per_tick() {
        let mut sim = SnakeSimulation::with_seed(1, SnakeRules::default());

        assert_eq!(sim.step(), StepOutcome::Advanced);

        assert_eq!(sim.head(), Cell::new(7, 8));
        assert_eq!(sim.len(), 3);
        assert!(!sim.occupies(Cell::new(7, 5)));
    }

    #[test]
    fn eating_grows_by_one_and_scores() {
        let mut sim = snake(&[(10, 9), (10, 8)], Direction::Right, (10, 10));

        assert_eq!(sim.step(), StepOutcome::Grew);

        assert_eq!(sim.len(), 3);
        assert_eq!(sim.score(), 1);
        assert_eq!(sim.head(), Cell::new(10, 10));
        assert_ne!(sim.food(), Some(Cell::new(10, 10)));
    }

    #[test]
    fn wall_collision_kills_and_freezes() {
        let mut sim = snake(&[(0, 3), (1, 3)], Direction::Up, (9, 9));

        assert_eq!(sim.step(), StepOutcome::Dead(DeathReason::WallCollision));
        assert!(!sim.is_alive());

        let head = sim.head();
        sim.set_direction(Direction::Right);
        assert_eq!(sim.step(), StepOutcome::Dead(DeathReason::WallCollision));
        assert_eq!(sim.head(), head);
        assert_eq!(sim.len(), 2);
    }

    #[test]
    fn moving_into_current_tail_is_fatal() {
        // A 2x2 loop: the head would step onto the tail before it is popped.
        let mut sim = snake(&[(5, 5), (5, 6), (6, 6), (6, 5)], Direction::Down, (0, 0));

        assert_eq!(sim.step(), StepOutcome::Dead(DeathReason::SelfCollision));
        assert_eq!(sim.death_reason(), Some(DeathReason::SelfCollision));
    }

    #[test]
    fn reversal_is_allowed_by_default_and_fatal() {
        let mut sim = SnakeSimulation::with_seed(1, SnakeRules::default());

        sim.set_direction(Direction::Left);

        assert_eq!(sim.step(), StepOutcome::Dead(DeathReason::SelfCollision));
    }

    #[test]
    fn reversal_can_be_ignored() {
        let rules = SnakeRules {
            reversal: ReversalPolicy::Ignore,
            ..SnakeRules::default()
        };
        let mut sim = SnakeSimulation::with_seed(1, rules);

        sim.set_direction(Direction::Left);

        assert_eq!(sim.step(), StepOutcome::Advanced);
        assert_eq!(sim.head(), Cell::new(7, 8));
    }

    #[test]
    fn later_request_overwrites_earlier_one() {
        let mut sim = SnakeSimulation::with_seed(1, SnakeRules::default());

        sim.set_direction(Direction::Up);
        sim.set_direction(Direction::Down);
        assert_eq!(sim.heading(), Direction::Down);

        sim.step();
        assert_eq!(sim.head(), Cell::new(8, 7));
        assert_eq!(sim.direction(), Direction::Down);
    }

    #[test]
    fn avoid_body_rule_keeps_food_off_the_snake() {
        let rules = SnakeRules {
            food: FoodPlacement::AvoidBody,
            ..SnakeRules::default()
        };
        let mut sim = snake_with_rules(&[(3, 3), (3, 2)], Direction::Right, (3, 4), rules);

        assert_eq!(sim.step(), StepOutcome::Grew);

        let food = sim.food().unwrap();
        assert!(!sim.occupies(food));
    }

    #[test]
    fn reset_restores_start_after_death() {
        let mut sim = SnakeSimulation::with_seed(4, SnakeRules::default());
        sim.set_direction(Direction::Left);
        sim.step();
        assert!(!sim.is_alive());

        sim.reset();

        assert!(sim.is_alive());
        assert_eq!(sim.head(), Cell::new(7, 7));
        assert_eq!(sim.len(), 3);
        assert_eq!(sim.food(), Some(Cell::new(7, 11)));
        assert_eq!(sim.score(), 0);
        assert_eq!(sim.direction(), Direction::Right);
    }

    #[test]
    fn malformed_bodies_are_rejected() {
        let rules = SnakeRules::default();
        let food = Cell::new(0, 0);

        assert!(SnakeSimulation::from_segments(vec![], Direction::Up, food, rules, 1).is_err());
        assert!(
            SnakeSimulation::from_segments(vec![Cell::new(-1, 0)], Direction::Up, food, rules, 1)
                .is_err()
        );
        assert!(
            SnakeSimulation::from_segments(
                vec![Cell::new(1, 1), Cell::new(1, 2), Cell::new(1, 1)],
                Direction::Up,
                food,
                rules,
                1
            )
            .is_err()
        );
        assert!(
            SnakeSimulation::from_segments(
                vec![Cell::new(1, 1)],
                Direction::Up,
                Cell::new(15, 0),
                rules,
                1
            )
            .is_err()
        );

        let error = SnakeSimulation::from_segments(
            vec![Cell::new(1, 1), Cell::new(1, 2)],
            Direction::Up,
            Cell::new(1, 2),
            rules,
            1,
        )
        .unwrap_err();
        assert!(error.to_string().contains("under the body"));
    }

    #[test]
    fn reversal_policy_parses_from_command_line_values() {
        assert_eq!(
            ReversalPolicy::from_str("ignore", false),
            Ok(ReversalPolicy::Ignore)
        );
        assert_eq!(
            ReversalPolicy::from_str("allow", false),
            Ok(ReversalPolicy::Allow)
        );
        assert!(ReversalPolicy::from_str("bounce", false).is_err());
    }
}
