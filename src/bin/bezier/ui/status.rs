//! Status bar - layout, knob positions and the last settings error

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Panel;

pub fn render_status(frame: &mut Frame, area: Rect, panel: &Panel) {
    let block = Block::default().title(" bezier ").borders(Borders::ALL);

    let mut spans = vec![Span::styled(
        format!(" {}  ", panel.layout),
        Style::default().fg(Color::Cyan),
    )];
    for (i, position) in panel.knobs.iter().enumerate() {
        spans.push(Span::styled(
            format!("Knob {}: {:>3.0}%  ", i + 1, position * 100.0),
            Style::default().fg(Color::White),
        ));
    }
    if let Some(notice) = panel.notice {
        spans.push(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Red),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
