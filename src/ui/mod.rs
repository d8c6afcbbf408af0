mod detail;
mod help;
mod list;
mod notice;
mod proxy;

use std::time::Instant;

use crate::app::{App, View};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
};

/// Top-level render dispatch. Only the active view is drawn.
pub fn render(app: &App, frame: &mut Frame) {
    let now = Instant::now();
    match app.view {
        View::List => list::render(app, frame, now),
        View::Detail => detail::render(app, frame, now),
    }

    if let Some(ref overlay) = app.proxy_overlay {
        proxy::render(app, overlay, frame);
    }
    if app.show_submit {
        notice::render_submit(frame);
    }
    if app.show_help {
        help::render(frame);
    }
    // Alerts block everything else, so they go on top
    if let Some(ref message) = app.alert {
        notice::render_alert(message, frame);
    }
}

/// Dim `style` while a view is still fading in.
pub(crate) fn faded(style: Style, progress: f32) -> Style {
    if progress < 1.0 {
        style.fg(Color::DarkGray)
    } else {
        style
    }
}

/// Create a centered rectangle using percentage of parent area.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// Truncate to `max_width` display columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        result.push(c);
        width += w;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::LoadMessage;
    use crate::config::Settings;
    use crate::model::AppRecord;
    use crate::prefs::MemoryStore;
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app_with(apps: Vec<AppRecord>) -> App {
        let mut app = App::new(&Settings::default(), Box::new(MemoryStore::default()));
        app.apply_load(LoadMessage::Loaded(apps));
        app
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a longer line", 6), "a lon…");
        assert_eq!(truncate_str("应用商店", 5), "应用…");
    }

    #[test]
    fn test_render_empty_list_shows_placeholder() {
        let mut app = app_with(Vec::new());
        app.push_search_char('z');
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| render(&app, f)).unwrap();
        let text = buffer_text(&terminal);
        assert_eq!(text.matches("No matching apps").count(), 1);
    }

    #[test]
    fn test_render_list_and_detail() {
        let mut app = app_with(vec![AppRecord {
            id: "fd".to_string(),
            name: "fdroid".to_string(),
            author: "fdroid-team".to_string(),
            repository: "https://github.com/f/fdroid".to_string(),
            ..Default::default()
        }]);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(&app, f)).unwrap();
        assert!(buffer_text(&terminal).contains("fdroid-team"));

        app.open_detail("fd");
        terminal.draw(|f| render(&app, f)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("https://github.com/f/fdroid"));
        assert!(!text.contains("Download"));
    }

    #[test]
    fn test_render_alert_on_top() {
        let mut app = app_with(Vec::new());
        app.alert = Some("Please enter a valid URL".to_string());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| render(&app, f)).unwrap();
        assert!(buffer_text(&terminal).contains("Please enter a valid URL"));
    }
}
