use std::time::{Duration, Instant};

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::exam::{format_clock, ExamQuestion, ExamSession};
use crate::models::OptionLetter;

/// Below this the clock turns red.
const LOW_TIME: Duration = Duration::from_secs(60);
const NAVIGATOR_COLUMNS: usize = 5;
const NAVIGATOR_WIDTH: u16 = 24;

pub fn render(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let Some(session) = app.session() else {
        return;
    };
    let Some(question) = app.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_status(frame, chunks[0], app, session, now);

    let (question_area, options_area) = if app.show_navigator() {
        let body = Rect {
            height: chunks[1].height + chunks[2].height,
            ..chunks[1]
        };
        let columns =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(NAVIGATOR_WIDTH)])
                .split(body);
        render_navigator(frame, columns[1], app, session);

        let left = Layout::vertical([Constraint::Length(6), Constraint::Fill(1)]).split(columns[0]);
        (left[0], left[1])
    } else {
        (chunks[1], chunks[2])
    };

    render_question_text(frame, question_area, app.current_question_number(), &question.record.text);
    render_options(
        frame,
        options_area,
        question,
        session.answer(app.current_question_index()),
        app.selected_option(),
    );
    render_controls(frame, chunks[3], app.show_navigator());

    if app.confirming_submit() {
        render_confirm(frame, area, session);
    }
}

fn render_status(frame: &mut Frame, area: Rect, app: &App, session: &ExamSession, now: Instant) {
    let columns = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ])
    .split(area);

    let progress = Paragraph::new(format!(
        "Question {}/{}",
        app.current_question_number(),
        app.total_questions()
    ))
    .fg(Color::Cyan)
    .bold();
    frame.render_widget(progress, columns[0]);

    let answered = Paragraph::new(format!(
        "{} / {} answered",
        session.answered_count(),
        session.len()
    ))
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);
    frame.render_widget(answered, columns[1]);

    let remaining = session.remaining_at(now);
    let clock_color = if remaining <= LOW_TIME {
        Color::Red
    } else {
        Color::Yellow
    };
    let clock = Paragraph::new(format_clock(remaining))
        .alignment(Alignment::Right)
        .fg(clock_color)
        .bold();
    frame.render_widget(clock, columns[2]);
}

fn render_question_text(frame: &mut Frame, area: Rect, number: usize, text: &str) {
    let content = Line::from(vec![
        Span::styled(format!("Câu {} ", number), Style::default().fg(Color::Cyan).bold()),
        Span::styled(text, Style::default().fg(Color::White).bold()),
    ]);

    let widget = Paragraph::new(content).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &ExamQuestion,
    answer: Option<OptionLetter>,
    selected: usize,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(question.choices.len() * 2);

    for (index, choice) in question.choices.iter().enumerate() {
        let is_selected = index == selected;
        let is_chosen = answer == Some(choice.label);

        let style = match (is_selected, is_chosen) {
            (true, _) => Style::default().fg(Color::Cyan).bold(),
            (false, true) => Style::default().fg(Color::Green),
            (false, false) => Style::default().fg(Color::Gray),
        };
        let marker = if is_selected { ">" } else { " " };
        let radio = if is_chosen { "(•)" } else { "( )" };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} {} ", marker, radio), style),
            Span::styled(format!("{}. ", choice.label), style),
            Span::styled(choice.text.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Choose one answer ")
                .title_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::vertical(1)),
        );
    frame.render_widget(widget, area);
}

fn render_navigator(frame: &mut Frame, area: Rect, app: &App, session: &ExamSession) {
    let lines: Vec<Line> = (0..session.len())
        .collect::<Vec<_>>()
        .chunks(NAVIGATOR_COLUMNS)
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|&index| {
                    let style = if index == app.current_question_index() {
                        Style::default().fg(Color::Black).bg(Color::Cyan).bold()
                    } else if session.answer(index).is_some() {
                        Style::default().fg(Color::Green)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    };
                    Span::styled(format!("{:02} ", index + 1), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let title = if app.navigator_input().is_empty() {
        " Questions ".to_string()
    } else {
        format!(" Go to {} ", app.navigator_input())
    };

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(title)
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_confirm(frame: &mut Frame, area: Rect, session: &ExamSession) {
    let popup = centered(area, 44, 7);
    let unanswered = session.len() - session.answered_count();

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Submit the exam?",
            Style::default().fg(Color::White).bold(),
        )),
    ];
    if unanswered > 0 {
        content.push(Line::from(Span::styled(
            format!("{} questions left unanswered", unanswered),
            Style::default().fg(Color::Yellow),
        )));
    } else {
        content.push(Line::from(""));
    }
    content.push(Line::from(""));
    content.push(Line::from("y submit  ·  n keep working".fg(Color::DarkGray)));

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::Cyan),
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(widget, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_controls(frame: &mut Frame, area: Rect, navigator_open: bool) {
    let keys = if navigator_open {
        "digits + enter go to question  ·  esc close  ·  j/k option  ·  s submit  ·  q quit"
    } else {
        "j/k option  ·  enter choose  ·  n/p question  ·  g overview  ·  s submit  ·  q quit"
    };
    let widget = Paragraph::new(keys)
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
