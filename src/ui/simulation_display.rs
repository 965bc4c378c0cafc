use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use crate::app::App;
use crate::flow::{SimulationEffects, SimulationResult};
use crate::utils::shorten_id;

/// Renders the last dry-run, if any
pub fn render_simulation(f: &mut Frame, app: &App, area: Rect, primary_color: Color, secondary_color: Color) {
    let block = Block::default()
        .title(format!(" SIMULATION · {} ", app.get_phase_animation()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(primary_color));

    let lines = match app.flow.simulation() {
        None => vec![Line::from(Span::styled(
            "Fill in the form and press F5 to simulate the mint.",
            Style::default().fg(Color::DarkGray),
        ))],
        Some(SimulationResult::Failed { message }) => vec![
            Line::from(Span::styled(
                "✗ SIMULATION FAILED",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red))),
        ],
        Some(SimulationResult::Succeeded(effects)) => effect_lines(effects, secondary_color),
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn effect_lines(effects: &SimulationEffects, secondary_color: Color) -> Vec<Line<'static>> {
    let row = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<18}", label), Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().fg(secondary_color)),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("✓ STATUS: {}", effects.status.to_uppercase()),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        row("Computation cost", format!("{} MIST", effects.gas.computation_cost)),
        row("Storage cost", format!("{} MIST", effects.gas.storage_cost)),
        row("Storage rebate", format!("{} MIST", effects.gas.storage_rebate)),
        row("Net gas", format!("{} MIST", effects.gas.net_cost())),
        Line::from(""),
    ];

    if effects.created.is_empty() {
        lines.push(row("Created objects", "none".to_string()));
    } else {
        lines.push(row("Created objects", effects.created.len().to_string()));
        for id in &effects.created {
            lines.push(Line::from(Span::styled(
                format!("  ◈ {}", shorten_id(&id.to_string())),
                Style::default().fg(secondary_color),
            )));
        }
    }
    lines
}
