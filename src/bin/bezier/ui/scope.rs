//! Per-channel scope: recent output history as a line chart

use bezier_cv::{channel::history::HISTORY_ROWS, module::ChannelView};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

pub fn render_scope(frame: &mut Frame, area: Rect, view: &ChannelView) {
    let title = format!(
        " {}  {}  {:.2}V ",
        view.label,
        view.status(),
        view.last_output
    );
    let block = Block::default().title(title).borders(Borders::ALL);

    // Oldest sample on the left; a partly filled history is right-aligned
    let width = view.history.width();
    let offset = width - view.history.len();
    let data: Vec<(f64, f64)> = view
        .history
        .iter()
        .enumerate()
        .map(|(i, row)| ((offset + i) as f64, row as f64))
        .collect();

    let color = if view.curve_k.is_some() {
        Color::Cyan
    } else {
        Color::Yellow
    };
    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, width.saturating_sub(1) as f64])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, HISTORY_ROWS as f64])
                .labels([
                    format!("{:.1}", view.min_voltage),
                    format!("{:.1}", view.max_voltage),
                ])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
