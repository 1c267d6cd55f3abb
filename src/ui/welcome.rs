use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
    ])
    .split(area);

    let bank = app.bank();
    let minutes = app.config().duration.as_secs() / 60;

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "TIMED EXAM",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} questions loaded", bank.len()),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            format!("{} questions · {} minutes", app.exam_size(), minutes),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    if !bank.dropped().is_empty() {
        content.push(Line::from(Span::styled(
            format!("{} incomplete questions skipped", bank.dropped().len()),
            Style::default().fg(Color::Yellow),
        )));
    } else {
        content.push(Line::from(""));
    }

    content.extend([
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start".fg(Color::DarkGray)),
    ]);

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
