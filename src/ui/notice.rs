use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::centered_rect;

const RECORD_FIELDS: &[&str] = &[
    "id, name, author, description, category",
    "stars, forks, version, lastUpdate",
    "iconUrl, downloadUrl, repository, screenshots",
];

/// How to get an app listed.
pub fn render_submit(frame: &mut Frame) {
    let area = centered_rect(64, 60, frame.area());
    frame.render_widget(Clear, area);

    let bold = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Submit an app", bold)),
        Line::from(""),
        Line::from("  1. Fork the catalog repository."),
        Line::from("  2. Add an entry for your app to app_details.json."),
        Line::from("  3. Open a pull request describing the app."),
        Line::from(""),
        Line::from(Span::styled("  Entry fields", bold)),
    ];
    lines.extend(
        RECORD_FIELDS
            .iter()
            .map(|f| Line::from(Span::styled(format!("    {}", f), Style::default().fg(Color::Yellow)))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(
        "  Only id, name, author and repository are required; the rest may be omitted.",
    ));

    let popup = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Submit ")
                .title_bottom(Line::from(" Press Esc to close ").style(Style::default().fg(Color::DarkGray))),
        )
        .style(Style::default().fg(Color::White));
    frame.render_widget(popup, area);
}

/// Blocking message; the event loop drops it on the next key.
pub fn render_alert(message: &str, frame: &mut Frame) {
    let area = centered_rect(50, 25, frame.area());
    frame.render_widget(Clear, area);

    let alert = Paragraph::new(vec![
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled("Press any key", Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .style(Style::default().fg(Color::Red))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Alert "),
    );
    frame.render_widget(alert, area);
}
