use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::present::RenderInstruction;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(scored) = app.scored() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_headline(frame, chunks[1], &scored.instruction, scored.revealed());
    render_score_table(frame, chunks[2], &scored.instruction);
    render_controls(frame, chunks[3]);
}

fn render_headline(frame: &mut Frame, area: Rect, instruction: &RenderInstruction, revealed: bool) {
    // Appears only once the reveal delay has passed; until then the score
    // table stands alone.
    let content = if revealed {
        vec![
            Line::from(Span::styled(
                "TOP ACADEMY",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                instruction.headline.clone(),
                Style::default().fg(Color::Green).bold(),
            )),
        ]
    } else {
        vec![Line::from(""), Line::from("…".fg(Color::DarkGray))]
    };

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_score_table(frame: &mut Frame, area: Rect, instruction: &RenderInstruction) {
    let lines: Vec<Line> = instruction
        .rows
        .iter()
        .map(|row| {
            let is_top = row.score == instruction.top_score;
            let style = if is_top {
                Style::default().fg(Color::Green).bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(vec![
                Span::styled(format!(" {:<28}", row.name), style),
                Span::styled(format!("{:>5}", row.score), style),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("e edit answers  ·  r start over  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
