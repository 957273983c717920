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

    let subtitle = format!(
        "{} Questions · {} Academies",
        app.total_questions(),
        app.config().category_count()
    );
    let resume = if app.restored_count() > 0 {
        format!(
            "Saved progress found: {}/{} answered",
            app.restored_count(),
            app.total_questions()
        )
        .fg(Color::Yellow)
    } else {
        "".fg(Color::DarkGray)
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "ACADEMY QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(subtitle.fg(Color::DarkGray)),
        Line::from(resume),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
