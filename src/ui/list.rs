use std::time::Instant;

use crate::app::{App, InputMode};
use crate::categories;
use crate::view_model::{CardView, IconView, ListViewModel};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use super::{faded, truncate_str};

pub fn render(app: &App, frame: &mut Frame, now: Instant) {
    let area = frame.area();
    let fade = app.fade_progress(now);

    // Layout: header(3) + search(3) + categories(3) + list(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header ──
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " App Catalog",
            faded(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD), fade),
        ),
        Span::styled(
            format!("   [{} apps]", app.store.visible_len()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("   sort: {}   proxy: {}", app.store.sort().label(), app.proxy.describe()),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .alignment(Alignment::Left)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, chunks[0]);

    // ── Search bar ──
    let search_style = match app.input_mode {
        InputMode::Editing => Style::default().fg(Color::Yellow),
        InputMode::Normal => Style::default().fg(Color::DarkGray),
    };
    let search_label = if app.input_mode == InputMode::Editing {
        " 🔍 Search (Enter/Esc to finish): "
    } else {
        " 🔍 Search (/): "
    };
    let search_bar = Paragraph::new(format!("{}{}", search_label, app.search))
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(search_style)
                .title(" Search "),
        );
    frame.render_widget(search_bar, chunks[1]);

    if app.input_mode == InputMode::Editing {
        use unicode_width::UnicodeWidthStr;
        let cursor_x = chunks[1].x + 1 + search_label.width() as u16 + app.search.width() as u16;
        frame.set_cursor_position((cursor_x, chunks[1].y + 1));
    }

    // ── Category chips ──
    let titles: Vec<Line> = app
        .store
        .categories()
        .iter()
        .map(|key| Line::from(categories::display_name(key, app.locale)))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.category_index)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Categories [←/→] "),
        );
    frame.render_widget(tabs, chunks[2]);

    // ── Cards ──
    match app.list_view() {
        ListViewModel::Cards(cards) => render_cards(app, &cards, frame, chunks[3], now, fade),
        ListViewModel::Empty(message) | ListViewModel::Loading(message) => {
            render_placeholder(&message, Color::White, frame, chunks[3])
        }
        ListViewModel::Error(message) => render_placeholder(&message, Color::Red, frame, chunks[3]),
    }

    // ── Status bar ──
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    };
    let status_line = Line::from(vec![
        key(" ↑↓"),
        Span::raw(" Navigate  "),
        key("/"),
        Span::raw(" Search  "),
        key("s"),
        Span::raw(" Sort  "),
        key("Enter"),
        Span::raw(" Detail  "),
        key("p"),
        Span::raw(" Proxy  "),
        key("?"),
        Span::raw(" Help  "),
        key("q"),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[4]);
}

fn render_cards(app: &App, cards: &[CardView], frame: &mut Frame, area: Rect, now: Instant, fade: f32) {
    let width = (area.width as usize).saturating_sub(8);
    let items: Vec<ListItem> = cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let revealed = app.card_revealed(i, now) && fade >= 1.0;
            card_item(card, width, revealed, app.locale.author_prefix())
        })
        .collect();

    let list_widget = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Apps ")
                .title_bottom(
                    Line::from(format!(" {} of {} ", app.selected + 1, cards.len())).alignment(Alignment::Right),
                ),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    list_state.select(Some(app.selected));
    frame.render_stateful_widget(list_widget, area, &mut list_state);
}

fn card_item<'a>(card: &'a CardView, width: usize, revealed: bool, author_prefix: &'a str) -> ListItem<'a> {
    let dim = Style::default().fg(Color::DarkGray);
    let pick = |style: Style| if revealed { style } else { dim };

    let icon = match &card.icon {
        IconView::Image(_) => "[◧]".to_string(),
        IconView::Glyph(g) if g.is_empty() => "[ ]".to_string(),
        IconView::Glyph(g) => format!("[{}]", g),
    };

    ListItem::new(vec![
        Line::from(vec![
            Span::styled(format!("{} ", icon), pick(Style::default().fg(Color::Magenta))),
            Span::styled(
                card.name.as_str(),
                pick(Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            ),
            Span::styled(format!("  {}{}", author_prefix, card.author), dim),
        ]),
        Line::from(Span::styled(
            format!("    {}", truncate_str(&card.description, width)),
            pick(Style::default()),
        )),
        Line::from(vec![
            Span::styled(format!("    ⭐ {}", card.stars), pick(Style::default().fg(Color::Yellow))),
            Span::styled(format!("   🔄 {}", card.updated), dim),
        ]),
        Line::from(""),
    ])
}

fn render_placeholder(message: &str, color: Color, frame: &mut Frame, area: Rect) {
    let card = Paragraph::new(vec![Line::from(""), Line::from(message.to_string())])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(card, area);
}
