use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::arcade::GameKind;
use crate::config::{GLYPH_SEPARATOR, PLAY_AREA_MARGIN_X, THEME};
use crate::snapshot::Snapshot;

/// Values shown in the HUD that are not part of the game snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct HudInfo {
    pub paused: bool,
    pub tick_interval_ms: u64,
}

/// Renders the one-line HUD and the key hints, returning the remaining play
/// area above them.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot, info: &HudInfo) -> Rect {
    let [play_area, status_area, hint_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let status_area = inset_horizontal(status_area, PLAY_AREA_MARGIN_X);
    let hint_area = inset_horizontal(hint_area, PLAY_AREA_MARGIN_X);

    frame.render_widget(
        Paragraph::new(status_line(snapshot, info, usize::from(status_area.width)))
            .alignment(Alignment::Right),
        status_area,
    );
    frame.render_widget(
        Paragraph::new(Line::from("arrows/WASD move  r reset  p pause  tab switch  q quit"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(THEME.hud_muted)),
        hint_area,
    );

    play_area
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}

/// Label/value pairs for the active game, wide or compact.
fn status_fields(snapshot: &Snapshot, info: &HudInfo, compact: bool) -> Vec<(&'static str, String)> {
    let score_label = match (snapshot.kind, compact) {
        (GameKind::Crates, false) => "Pushes",
        (GameKind::Crates, true) => "P",
        (GameKind::Snake, false) => "Score",
        (GameKind::Snake, true) => "S",
    };
    let moves_label = if compact { "M" } else { "Moves" };

    let mut fields = vec![
        (score_label, snapshot.score.to_string()),
        (moves_label, snapshot.moves.to_string()),
        ("", format!("{}x{}", snapshot.size.width, snapshot.size.height)),
    ];
    if info.tick_interval_ms > 0 && snapshot.kind == GameKind::Snake {
        fields.push(("", format!("{}ms", info.tick_interval_ms)));
    }
    fields
}

fn fields_width(fields: &[(&'static str, String)]) -> usize {
    let separator = format!(" {GLYPH_SEPARATOR} ").width();
    let content: usize = fields
        .iter()
        .map(|(label, value)| {
            let label_width = if label.is_empty() { 0 } else { label.width() + 2 };
            label_width + value.width()
        })
        .sum();
    content + separator * fields.len().saturating_sub(1)
}

fn status_line(snapshot: &Snapshot, info: &HudInfo, available_width: usize) -> Line<'static> {
    let mut fields = status_fields(snapshot, info, false);
    if fields_width(&fields) > available_width {
        fields = status_fields(snapshot, info, true);
    }

    let value_style = Style::default().fg(THEME.hud_value);
    let muted_style = Style::default().fg(THEME.hud_muted);
    let mut spans = Vec::with_capacity(fields.len() * 3);

    for (index, (label, value)) in fields.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(format!(" {GLYPH_SEPARATOR} "), muted_style));
        }
        if !label.is_empty() {
            spans.push(Span::styled(format!("{label}: "), muted_style));
        }
        spans.push(Span::styled(value, value_style));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use crate::arcade::GameKind;
    use crate::crate_sim::CrateSimulation;
    use crate::snake::{SnakeRules, SnakeSimulation};
    use crate::snapshot::{render_crates, render_snake};

    use super::{HudInfo, fields_width, status_fields, status_line};

    fn line_text(line: &ratatui::text::Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn crate_hud_labels_pushes() {
        let snapshot = render_crates(&CrateSimulation::new());

        let text = line_text(&status_line(&snapshot, &HudInfo::default(), 80));

        assert!(text.contains("Pushes: 0"));
        assert!(text.contains("7x5"));
    }

    #[test]
    fn narrow_hud_switches_to_compact_labels() {
        let snapshot = render_snake(&SnakeSimulation::with_seed(1, SnakeRules::default()));
        let info = HudInfo {
            paused: false,
            tick_interval_ms: 150,
        };

        let wide = status_fields(&snapshot, &info, false);
        let text = line_text(&status_line(&snapshot, &info, fields_width(&wide) - 1));

        assert!(text.contains("S: 0"));
        assert!(text.contains("150ms"));
    }

    #[test]
    fn labels_follow_the_game_kind() {
        let info = HudInfo {
            paused: false,
            tick_interval_ms: 150,
        };
        let mut snapshot = render_crates(&CrateSimulation::new());
        assert_eq!(status_fields(&snapshot, &info, false)[0].0, "Pushes");
        assert_eq!(status_fields(&snapshot, &info, false).len(), 3);

        snapshot.kind = GameKind::Snake;
        let fields = status_fields(&snapshot, &info, false);
        assert_eq!(fields[0].0, "Score");
        assert_eq!(fields.last().map(|(_, value)| value.as_str()), Some("150ms"));
    }

    #[test]
    fn width_counts_labels_values_and_separators() {
        let fields = vec![("S", "12".to_owned()), ("", "7x5".to_owned())];
        // "S: 12" + " │ " + "7x5"
        assert_eq!(fields_width(&fields), 5 + 3 + 3);
    }
}
