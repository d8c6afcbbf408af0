use crate::app::{App, ProxyOverlay, ProxyRow};
use crate::proxy::{PRESETS, ProxyMode};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::centered_rect;

pub fn render(app: &App, overlay: &ProxyOverlay, frame: &mut Frame) {
    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" GitHub Proxy ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = ProxyRow::all(&app.proxy);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(rows.len() as u16),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(inner);

    let prompt = Paragraph::new("Prefix applied to GitHub download, icon and screenshot links")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(prompt, chunks[0]);

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let label = match row {
                ProxyRow::None => "No proxy".to_string(),
                ProxyRow::Preset(p) => PRESETS.get(*p).map(|s| s.to_string()).unwrap_or_default(),
                ProxyRow::Saved => match &app.proxy.mode {
                    ProxyMode::Preset(p) => format!("{} (saved)", p),
                    _ => String::new(),
                },
                ProxyRow::Custom => "Custom...".to_string(),
            };
            let marker = if row.is_active(&app.proxy) { "●" } else { "○" };
            let style = if i == overlay.selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(format!("  {} {}", marker, label), style))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), chunks[1]);

    if let Some(ref input) = overlay.custom_input {
        let field = Paragraph::new(input.as_str())
            .style(Style::default().fg(Color::Cyan))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Custom prefix "),
            );
        frame.render_widget(field, chunks[3]);

        use unicode_width::UnicodeWidthStr;
        frame.set_cursor_position((chunks[3].x + 1 + input.width() as u16, chunks[3].y + 1));
    }

    let hint = if overlay.custom_input.is_some() {
        "Enter/Tab: Save | Esc: Cancel | Empty disables the proxy"
    } else {
        "↑/↓: Choose | Enter: Apply | Esc: Close"
    };
    let help = Paragraph::new(hint)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}
