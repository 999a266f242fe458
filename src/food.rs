use std::collections::VecDeque;

use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::{Cell, GridSize};

/// Where new food may appear after the old one is eaten.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FoodPlacement {
    /// Any cell except the one just eaten, including cells under the snake.
    #[default]
    Anywhere,
    /// Only cells the snake does not occupy.
    AvoidBody,
}

/// Picks the next food cell uniformly among the cells allowed by `placement`.
///
/// Returns `None` when no cell qualifies.
#[must_use]
pub fn spawn_food<R: Rng + ?Sized>(
    rng: &mut R,
    size: GridSize,
    body: &VecDeque<Cell>,
    placement: FoodPlacement,
    eaten: Cell,
) -> Option<Cell> {
    let candidates: Vec<Cell> = match placement {
        FoodPlacement::Anywhere => size.cells().filter(|cell| *cell != eaten).collect(),
        FoodPlacement::AvoidBody => size.cells().filter(|cell| !body.contains(cell)).collect(),
    };

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}
