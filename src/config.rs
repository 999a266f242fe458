use ratatui::style::Color;

use crate::grid::{Cell, GridSize};

/// Crate puzzle board dimensions.
pub const CRATE_GRID: GridSize = GridSize::new(5, 7);

/// Starting board for the crate puzzle.
///
/// `#` wall, `.` target, `$` crate, `*` crate on target, `@` actor,
/// `+` actor on target.
pub const CRATE_LAYOUT: [&str; 5] = [
    "#######",
    "#.  $ #",
    "#  $@ #",
    "#.    #",
    "#######",
];

/// Snake board dimensions.
pub const SNAKE_GRID: GridSize = GridSize::new(15, 15);

/// Initial snake body, head first.
pub const SNAKE_START_BODY: [Cell; 3] = [Cell::new(7, 7), Cell::new(7, 6), Cell::new(7, 5)];

/// Initial food cell.
pub const SNAKE_START_FOOD: Cell = Cell::new(7, 11);

/// Base snake tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 40;

/// Input poll timeout per frame in milliseconds.
pub const FRAME_POLL_MS: u64 = 16;

/// Horizontal padding around the play area.
pub const PLAY_AREA_MARGIN_X: u16 = 1;

/// Terminal columns drawn per logical cell.
pub const CELL_WIDTH: u16 = 2;

/// Solid block used for walls, crates and snake segments.
pub const GLYPH_BLOCK: &str = "██";

/// Target marker.
pub const GLYPH_TARGET: &str = "··";

/// Food marker.
pub const GLYPH_FOOD: &str = "◆ ";

/// Actor marker.
pub const GLYPH_ACTOR: &str = "@@";

/// Separator between HUD fields.
pub const GLYPH_SEPARATOR: &str = "│";

/// Colors for every tile kind and the HUD.
#[derive(Debug)]
pub struct Theme {
    pub wall: Color,
    pub target: Color,
    pub crate_idle: Color,
    pub crate_placed: Color,
    pub actor: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_value: Color,
    pub hud_muted: Color,
    pub menu_title: Color,
}

pub const THEME: Theme = Theme {
    wall: Color::DarkGray,
    target: Color::Yellow,
    crate_idle: Color::Rgb(176, 120, 64),
    crate_placed: Color::Green,
    actor: Color::White,
    snake_head: Color::White,
    snake_body: Color::Blue,
    snake_tail: Color::DarkGray,
    food: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::White,
    hud_value: Color::White,
    hud_muted: Color::DarkGray,
    menu_title: Color::Green,
};
