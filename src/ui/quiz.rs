use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::validate::ValidationReport;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], app);
    render_question_text(frame, chunks[1], app);
    render_options(frame, chunks[2], app);
    render_controls(frame, chunks[3]);

    if let Some(report) = app.report() {
        render_report(frame, area, report);
    }
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let left = Paragraph::new(format!("Part {}", app.current_part())).fg(Color::DarkGray);
    frame.render_widget(left, area);

    let progress = format!(
        "answered {}/{}  ·  {}/{}",
        app.registry().answered_count(),
        app.total_questions(),
        app.current_question_number(),
        app.total_questions()
    );
    let right = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(right, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, app: &App) {
    let text = format!(
        "{}. {}",
        app.current_question_number(),
        app.current_question().text
    );
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn option_label(index: usize) -> String {
    if index < 26 {
        char::from(b'A' + index as u8).to_string()
    } else {
        (index + 1).to_string()
    }
}

fn render_options(frame: &mut Frame, area: Rect, app: &App) {
    let question = app.current_question();
    let saved = app
        .registry()
        .selected_choice(app.current_question_number());
    let highlighted = app.highlighted_option();

    let mut lines: Vec<Line> = Vec::with_capacity(question.choices.len() * 2);
    for (index, choice) in question.choices.iter().enumerate() {
        let is_highlighted = index == highlighted;
        let is_saved = saved == Some(index);

        let style = if is_highlighted {
            Style::default().fg(Color::Cyan).bold()
        } else if is_saved {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_highlighted { ">" } else { " " };
        let saved_marker = if is_saved { "●" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} {} ", marker, saved_marker), style),
            Span::styled(format!("{}. ", option_label(index)), style),
            Span::styled(choice.label.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget =
        Paragraph::new("j/k options  ·  enter answer  ·  ←/→ question  ·  s submit  ·  q quit")
            .alignment(Alignment::Center)
            .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_report(frame: &mut Frame, area: Rect, report: &ValidationReport) {
    let popup = super::popup_area(area, 60, 40);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from(Span::styled(
            "Some questions are still unanswered!",
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(""),
    ];
    for part in &report.parts {
        let numbers = part
            .numbers
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", part.title), Style::default().fg(Color::White)),
            Span::styled(numbers, Style::default().fg(Color::Red)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(
        "press any key to jump to the first missing question".fg(Color::DarkGray),
    ));

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Incomplete ")
                .borders(Borders::ALL)
                .border_style(Color::Yellow)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, popup);
}
