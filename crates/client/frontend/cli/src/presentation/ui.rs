//! Frame composition: board, status lines and key help.
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use super::board::BoardFrame;
use super::theme::RatatuiTheme;

const STATUS_HEIGHT: u16 = 3;
const KEY_HELP: &str = "hjkl/arrows move · enter/space click · n new · s save · o load · q quit";

/// Draws the whole screen from the board model.
pub fn render(frame: &mut Frame, board: &BoardFrame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(board.height().saturating_add(2)),
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(frame.area());

    let board_area = Rect {
        width: board.width().saturating_add(2).min(chunks[0].width),
        ..chunks[0]
    };
    let block = Block::bordered().title(format!(" Tactics · {} ", board.theme()));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);
    frame.render_widget(board, inner);

    frame.render_widget(Paragraph::new(status_lines(board)), chunks[1]);
    frame.render_widget(
        Paragraph::new(KEY_HELP).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}

fn status_lines(board: &BoardFrame) -> Vec<Line<'_>> {
    let theme = RatatuiTheme::new(board.theme());
    let mut lines = Vec::with_capacity(STATUS_HEIGHT as usize);

    let mut hover = vec![Span::raw(board.tooltip().unwrap_or_default())];
    let hint = board.cursor_hint();
    if !hint.is_empty() {
        hover.push(Span::styled(
            format!("  [{hint}]"),
            Style::default().add_modifier(Modifier::ITALIC),
        ));
    }
    lines.push(Line::from(hover));

    if let Some((level, text)) = board.message() {
        lines.push(Line::styled(text, theme.message_style(level)));
    }
    lines
}
