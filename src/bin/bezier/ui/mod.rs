//! TUI for the bezier binary
//!
//! Status bar on top, one scope per output, key help at the bottom.

mod scope;
mod status;

use bezier_cv::module::ChannelView;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use scope::render_scope;
use status::render_status;

/// Everything on screen that is not a channel.
pub struct Panel<'a> {
    pub layout: &'a str,
    /// Knob positions, 0..1
    pub knobs: &'a [f32],
    pub notice: Option<&'a str>,
}

pub fn render(frame: &mut Frame, panel: &Panel, views: &[ChannelView]) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status bar
            Constraint::Min(4),    // Scopes
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    render_status(frame, chunks[0], panel);

    let count = views.len().max(1) as u32;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(views.iter().map(|_| Constraint::Ratio(1, count)))
        .split(chunks[1]);
    for (view, row) in views.iter().zip(rows.iter()) {
        render_scope(frame, *row, view);
    }

    let help = Paragraph::new(" [←/→] Knob 1  [↓/↑] Knob 2  [Space] Clip mode  [Q] Quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);
}
