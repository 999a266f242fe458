use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    CELL_WIDTH, GLYPH_ACTOR, GLYPH_BLOCK, GLYPH_FOOD, GLYPH_TARGET, THEME, Theme,
};
use crate::grid::{Cell, GridSize};
use crate::snapshot::{Snapshot, Status, Tile};
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_won_menu};

/// Renders the full frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, hud_info: HudInfo) {
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot, &hud_info);
    let board_area = centered_board(play_area, snapshot.size);

    let block = Block::bordered()
        .title(format!(" {} ", snapshot.title()))
        .border_style(Style::new().fg(THEME.border_fg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_tiles(frame, inner, snapshot, &THEME);

    match snapshot.status {
        Status::Won => render_won_menu(frame, board_area, snapshot.moves),
        Status::GameOver => render_game_over_menu(frame, board_area, snapshot.score),
        Status::Playing if hud_info.paused => render_pause_menu(frame, board_area),
        Status::Playing => {}
    }
}

fn render_tiles(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, theme: &Theme) {
    let buffer = frame.buffer_mut();

    for (row, tiles) in (0_i32..).zip(snapshot.rows()) {
        for (col, tile) in (0_i32..).zip(tiles) {
            let Some((x, y)) = logical_to_terminal(inner, snapshot.size, Cell::new(row, col))
            else {
                continue;
            };
            let Some((glyph, style)) = tile_appearance(*tile, theme) else {
                continue;
            };
            buffer.set_string(x, y, glyph, style.bg(theme.play_bg));
        }
    }
}

fn tile_appearance(tile: Tile, theme: &Theme) -> Option<(&'static str, Style)> {
    let appearance = match tile {
        Tile::Empty => return None,
        Tile::Wall => (GLYPH_BLOCK, Style::new().fg(theme.wall)),
        Tile::Target => (GLYPH_TARGET, Style::new().fg(theme.target)),
        Tile::Crate => (GLYPH_BLOCK, Style::new().fg(theme.crate_idle)),
        Tile::CrateOnTarget => (GLYPH_BLOCK, Style::new().fg(theme.crate_placed)),
        Tile::Actor => (
            GLYPH_ACTOR,
            Style::new().fg(theme.actor).add_modifier(Modifier::BOLD),
        ),
        Tile::ActorOnTarget => (
            GLYPH_ACTOR,
            Style::new().fg(theme.target).add_modifier(Modifier::BOLD),
        ),
        Tile::SnakeHead => (
            GLYPH_BLOCK,
            Style::new().fg(theme.snake_head).add_modifier(Modifier::BOLD),
        ),
        Tile::SnakeBody => (GLYPH_BLOCK, Style::new().fg(theme.snake_body)),
        Tile::SnakeTail => (GLYPH_BLOCK, Style::new().fg(theme.snake_tail)),
        Tile::Food => (GLYPH_FOOD, Style::new().fg(theme.food)),
        Tile::SnakeOnFood => (GLYPH_BLOCK, Style::new().fg(theme.food)),
    };
    Some(appearance)
}

/// Centers a bordered board of `size` cells inside `area`.
fn centered_board(area: Rect, size: GridSize) -> Rect {
    let width = size.width.saturating_mul(CELL_WIDTH).saturating_add(2);
    let height = size.height.saturating_add(2);

    let [_, column, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, board, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(column);

    board
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, cell: Cell) -> Option<(u16, u16)> {
    if !bounds.contains(cell) {
        return None;
    }

    let x_offset = u16::try_from(cell.col).ok()?.saturating_mul(CELL_WIDTH);
    let y_offset = u16::try_from(cell.row).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
