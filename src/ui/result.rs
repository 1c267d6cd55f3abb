use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::exam::{ExamReport, QuestionOutcome};

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(report) = app.report() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], report);
    render_question_breakdown(frame, chunks[2], report, app.result_scroll());
    render_controls(frame, chunks[3]);
}

fn get_grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, report: &ExamReport) {
    let grade_color = get_grade_color(report.percent());

    let notice = if report.auto_submitted {
        Line::from(Span::styled(
            "Time is up, the exam was submitted automatically.",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from("")
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Score {}  ·  {} / {}  ({}%)",
                report.score_label(),
                report.correct_count(),
                report.total(),
                report.percent_label()
            ),
            Style::default().fg(grade_color).bold(),
        )),
        notice,
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, report: &ExamReport, scroll: usize) {
    let lines: Vec<Line> = report
        .outcomes
        .iter()
        .enumerate()
        .map(|(index, outcome)| outcome_line(index, outcome))
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn outcome_line(index: usize, outcome: &QuestionOutcome) -> Line<'static> {
    let (symbol, color) = if outcome.is_correct() {
        ("+", Color::Green)
    } else {
        ("-", Color::Red)
    };

    let answer = match outcome.selected {
        Some(label) if outcome.is_correct() => format!("{}", label),
        Some(label) => format!("{} → {}", label, outcome.correct),
        None => format!("_ → {}", outcome.correct),
    };

    Line::from(vec![
        Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
        Span::styled(
            format!("{:2}. ", index + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!("{:<6} ", answer), Style::default().fg(color)),
        Span::styled(
            truncate_question(&outcome.text),
            Style::default().fg(Color::Gray),
        ),
    ])
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r new exam  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
