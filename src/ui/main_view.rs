use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};
use crate::app::{App, MessageType};
use crate::constants::MESSAGE_AREA_MARGIN;
use crate::flow::{Field, Phase};
use crate::utils::format_sui_balance;
use super::simulation_display::render_simulation;
use textwrap;

const PRIMARY_COLOR: Color = Color::Cyan;
const SECONDARY_COLOR: Color = Color::LightBlue;
const DIM_COLOR: Color = Color::DarkGray;
const HIGHLIGHT_COLOR: Color = Color::Yellow;

/// Render the mint form, simulation result and activity log
pub fn draw_main(f: &mut Frame, app: &App) {
    let main_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(PRIMARY_COLOR));
    f.render_widget(main_block, f.size());

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(1),   // Title
            Constraint::Length(3),   // Network and wallet
            Constraint::Min(10),     // Form and results
            Constraint::Length(3),   // Controls
        ])
        .split(f.size());

    let title = Paragraph::new("◈ LOYALTY CARD NFT MINTER ◈")
        .style(Style::default().fg(HIGHLIGHT_COLOR).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(title, main_layout[0]);

    render_status_bar(f, app, main_layout[1]);

    let content_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),  // Form
            Constraint::Percentage(50),  // Results
        ])
        .split(main_layout[2]);

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Package ID
            Constraint::Length(3),  // Recipient
            Constraint::Length(3),  // Image URL
            Constraint::Length(3),  // Buttons
            Constraint::Min(0),     // Activity log
        ])
        .split(content_layout[0]);

    render_input(f, app, Field::PackageId, left_chunks[0]);
    render_input(f, app, Field::RecipientAddress, left_chunks[1]);
    render_image_url(f, app, left_chunks[2]);
    render_buttons(f, app, left_chunks[3]);
    render_activity_log(f, app, left_chunks[4]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),   // Message
            Constraint::Min(0),      // Simulation result
        ])
        .split(content_layout[1]);

    render_message_area(f, app, right_chunks[0]);
    render_simulation(f, app, right_chunks[1], PRIMARY_COLOR, SECONDARY_COLOR);

    render_help_controls(f, main_layout[3]);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    let network_text = if app.is_switching_network {
        "SWITCHING NETWORK...".to_string()
    } else {
        format!("NETWORK: {}", app.network_state.get_current_network().to_uppercase())
    };
    let network = Paragraph::new(network_text)
        .block(bordered(" NETWORK [F3] "))
        .style(Style::default().fg(SECONDARY_COLOR));
    f.render_widget(network, chunks[0]);

    let wallet = Paragraph::new(app.wallet_address())
        .block(bordered(" WALLET [F2] "))
        .style(Style::default().fg(SECONDARY_COLOR));
    f.render_widget(wallet, chunks[1]);

    let balance_text = match app.sui_balance {
        Some(balance) => format_sui_balance(balance),
        None => "--".to_string(),
    };
    let balance = Paragraph::new(balance_text)
        .block(bordered(" SUI BALANCE "))
        .style(Style::default().fg(SECONDARY_COLOR));
    f.render_widget(balance, chunks[2]);
}

fn render_input(f: &mut Frame, app: &App, field: Field, area: Rect) {
    let focused = app.focus == field;
    let locked = app.flow.is_pending();
    let value = app.flow.request().field(field);

    let border_color = if focused && !locked { HIGHLIGHT_COLOR } else { PRIMARY_COLOR };
    let title = format!(" {}{} ", if focused { "▶ " } else { "" }, field.label());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));

    let line = if value.is_empty() {
        Line::from(Span::styled(field.placeholder(), Style::default().fg(DIM_COLOR)))
    } else {
        let mut spans = vec![Span::styled(value.to_string(), Style::default().fg(SECONDARY_COLOR))];
        if focused && !locked {
            spans.push(Span::styled("█", Style::default().fg(HIGHLIGHT_COLOR)));
        }
        Line::from(spans)
    };

    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_image_url(f: &mut Frame, app: &App, area: Rect) {
    let image = Paragraph::new(app.options().image_url.clone())
        .block(bordered(" IMAGE URL "))
        .style(Style::default().fg(DIM_COLOR));
    f.render_widget(image, area);
}

fn render_buttons(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(area);

    let simulating = matches!(app.flow.phase(), Phase::Simulating);
    let executing = matches!(app.flow.phase(), Phase::Executing(_));

    let simulate_label = if simulating { app.get_phase_animation() } else { "SIMULATE [F5]".to_string() };
    render_button(f, chunks[0], simulate_label, app.flow.can_simulate());

    let execute_label = if executing { app.get_phase_animation() } else { "MINT NFT [F6]".to_string() };
    render_button(f, chunks[1], execute_label, app.flow.can_execute() && !app.flow.is_pending());
}

fn render_button(f: &mut Frame, area: Rect, label: String, enabled: bool) {
    let style = if enabled {
        Style::default().fg(Color::Black).bg(PRIMARY_COLOR).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DIM_COLOR)
    };
    let button = Paragraph::new(label)
        .block(Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if enabled { PRIMARY_COLOR } else { DIM_COLOR })))
        .style(style)
        .alignment(Alignment::Center);
    f.render_widget(button, area);
}

fn render_message_area(f: &mut Frame, app: &App, area: Rect) {
    let message_block = bordered(" MESSAGE ");

    match &app.message {
        Some(message) => {
            let color = match app.message_type {
                MessageType::Error => Color::Red,
                MessageType::Success => Color::Green,
                MessageType::Info => SECONDARY_COLOR,
            };
            let available_width = area.width.saturating_sub(MESSAGE_AREA_MARGIN);
            let wrapped_text = textwrap::wrap(message, available_width as usize)
                .join("\n");

            let message_text = Paragraph::new(wrapped_text)
                .style(Style::default().fg(color))
                .alignment(Alignment::Left)
                .block(message_block);
            f.render_widget(message_text, area);
        }
        None => f.render_widget(message_block, area),
    }
}

fn render_activity_log(f: &mut Frame, app: &App, area: Rect) {
    // newest lines that fit, borders excluded
    let visible = area.height.saturating_sub(2) as usize;
    let skip = app.activity_log.len().saturating_sub(visible);

    let items: Vec<ListItem> = app.activity_log
        .iter()
        .skip(skip)
        .map(|line| {
            let style = if line.starts_with("[ERROR]") {
                Style::default().fg(Color::Red)
            } else if line.starts_with("[PROMPT]") {
                Style::default().fg(HIGHLIGHT_COLOR)
            } else if line.starts_with("[LOG]") {
                Style::default().fg(SECONDARY_COLOR)
            } else {
                Style::default().fg(DIM_COLOR)
            };
            ListItem::new(Line::from(Span::styled(line.as_str(), style)))
        })
        .collect();

    let log = List::new(items).block(Block::default()
        .title(" ACTIVITY LOG ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(PRIMARY_COLOR)));
    f.render_widget(log, area);
}

fn render_help_controls(f: &mut Frame, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(HIGHLIGHT_COLOR).add_modifier(Modifier::BOLD));
    let help_text = Line::from(vec![
        key("TAB"),
        Span::raw(" NEXT FIELD   "),
        key("F5/ENTER"),
        Span::raw(" SIMULATE   "),
        key("F6"),
        Span::raw(" MINT   "),
        key("F2"),
        Span::raw(" WALLET   "),
        key("F3"),
        Span::raw(" NETWORK   "),
        key("ESC"),
        Span::raw(" QUIT"),
    ]);

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(DIM_COLOR))
        .alignment(Alignment::Center)
        .block(Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(DIM_COLOR)));
    f.render_widget(help, area);
}

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(PRIMARY_COLOR))
}
