use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use crate::app::App;
use super::{main_view, utils::centered_rect};

/// Main entry point for UI rendering.
/// A pending prompt is drawn as a modal over the main view.
pub fn draw(f: &mut Frame, app: &App) {
    main_view::draw_main(f, app);

    if let Some(prompt) = &app.prompt {
        draw_prompt(f, prompt);
    }
}

fn draw_prompt(f: &mut Frame, prompt: &str) {
    let area = centered_rect(50, 25, f.size());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" NOTICE ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow));

    let text = format!("{}\n\n[press any key]", prompt);
    let paragraph = Paragraph::new(text)
        .block(block)
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
