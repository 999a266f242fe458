use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::THEME;

/// Draws the pause overlay.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    render_popup(
        frame,
        area,
        " pause ",
        vec![
            Line::from("PAUSED"),
            Line::from(""),
            Line::from("[P] Resume"),
            Line::from("[Q] Quit"),
        ],
    );
}

/// Draws the solved-puzzle overlay.
pub fn render_won_menu(frame: &mut Frame<'_>, area: Rect, moves: u64) {
    render_popup(
        frame,
        area,
        " solved ",
        vec![
            Line::from("SOLVED").style(title_style()),
            Line::from(format!("Moves: {moves}")),
            Line::from(""),
            Line::from("[R] Play Again"),
        ],
    );
}

/// Draws the game-over overlay.
pub fn render_game_over_menu(frame: &mut Frame<'_>, area: Rect, score: u32) {
    render_popup(
        frame,
        area,
        " game over ",
        vec![
            Line::from("GAME OVER").style(title_style()),
            Line::from(format!("Score: {score}")),
            Line::from(""),
            Line::from("[R] Play Again"),
        ],
    );
}

fn title_style() -> Style {
    Style::default()
        .fg(THEME.menu_title)
        .add_modifier(Modifier::BOLD)
}

fn render_popup(frame: &mut Frame<'_>, area: Rect, title: &'static str, lines: Vec<Line<'static>>) {
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let popup = centered_popup(area, 20, height);
    frame.render_widget(Clear, popup);

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title)),
        popup,
    );
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .areas(mid);

    center
}
