use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::centered_rect;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Global",
        &[
            ("?", "Toggle this help"),
            ("Ctrl+C", "Quit from anywhere"),
            ("p", "Proxy settings"),
            ("a", "How to submit an app"),
            ("r", "Reload the catalog"),
        ],
    ),
    (
        "List View",
        &[
            ("↑/k ↓/j", "Move selection"),
            ("g/G", "Jump to first/last app"),
            ("Enter", "Open app detail"),
            ("/", "Search name, description and author"),
            ("Tab ←/→", "Switch category"),
            ("s", "Cycle sort: name, stars, updated"),
            ("Esc", "Clear search"),
            ("q", "Quit"),
        ],
    ),
    (
        "Detail View",
        &[
            ("↑/k ↓/j", "Scroll"),
            ("d", "Open download link"),
            ("o", "Open repository"),
            ("y", "Copy repository link"),
            ("Esc/q", "Back to list"),
        ],
    ),
    (
        "Proxy Settings",
        &[
            ("↑/↓", "Choose a row"),
            ("Enter", "Apply, or edit the custom prefix"),
            ("Enter/Tab", "Save the custom prefix"),
            ("Esc", "Leave the custom prefix unsaved"),
        ],
    ),
];

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, 80, frame.area());
    frame.render_widget(Clear, area);

    let mut help_text = vec![Line::from("")];
    for (title, keys) in SECTIONS {
        help_text.push(Line::from(Span::styled(
            format!("  {}", title),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for (key, action) in keys.iter() {
            help_text.push(Line::from(vec![
                Span::styled(format!("    {:<14}", key), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ]));
        }
        help_text.push(Line::from(""));
    }

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Keybindings ")
                .title_bottom(Line::from(" Press ? or Esc to close ").style(Style::default().fg(Color::DarkGray))),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}
