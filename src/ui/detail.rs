use std::time::Instant;

use crate::app::App;
use crate::view_model::{DetailViewModel, IconView};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::faded;

pub fn render(app: &App, frame: &mut Frame, now: Instant) {
    let area = frame.area();
    let Some(detail) = app.detail_view() else {
        return;
    };
    let fade = app.fade_progress(now);

    // Layout: header(5) + content(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    let label = Style::default().fg(Color::DarkGray);
    let icon = match &detail.icon {
        IconView::Image(url) => format!("[◧] {}", url),
        IconView::Glyph(g) => format!("[{}]", g),
    };

    // ── Header ──
    let header_lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", icon), faded(Style::default().fg(Color::Magenta), fade)),
        ]),
        Line::from(vec![
            Span::styled(
                format!(" {}", detail.name),
                faded(Style::default().fg(Color::White).add_modifier(Modifier::BOLD), fade),
            ),
            Span::styled(format!("   {}", app.locale.author_prefix()), label),
            Span::styled(detail.author.as_str(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled(format!(" ⭐ {}", detail.stars), Style::default().fg(Color::Yellow)),
            Span::styled(format!("   ⑂ {}", detail.forks), Style::default().fg(Color::White)),
            Span::styled("   Category: ", label),
            Span::styled(detail.category.as_str(), Style::default().fg(Color::Green)),
            Span::styled("   Version: ", label),
            Span::styled(detail.version.as_str(), Style::default().fg(Color::White)),
        ]),
    ];
    let header = Paragraph::new(header_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" App Detail "),
    );
    frame.render_widget(header, chunks[0]);

    // ── Body ──
    let body = Paragraph::new(body_lines(&detail, app.locale.last_update_prefix()))
        .style(faded(Style::default(), fade))
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(body, chunks[1]);

    // ── Status bar ──
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let mut status = vec![key(" Esc"), Span::raw(" Back  "), key("j/k"), Span::raw(" Scroll  ")];
    if detail.download.is_some() {
        status.extend([key("d"), Span::raw(" Download  ")]);
    }
    status.extend([
        key("o"),
        Span::raw(" Open repo  "),
        key("y"),
        Span::raw(" Copy link  "),
        Span::styled(app.status_msg.as_str(), label),
    ]);
    frame.render_widget(Paragraph::new(Line::from(status)), chunks[2]);
}

fn body_lines<'a>(detail: &'a DetailViewModel, updated_prefix: &'a str) -> Vec<Line<'a>> {
    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
    };
    let link = Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED);

    let mut lines = vec![heading(" Description"), Line::from("")];
    lines.extend(detail.description.lines().map(|l| Line::from(format!("   {}", l))));
    lines.push(Line::from(""));

    lines.push(heading(" Links"));
    if let Some(ref url) = detail.download {
        lines.push(Line::from(vec![
            Span::styled("   Download:   ", Style::default().fg(Color::Yellow)),
            Span::styled(url.as_str(), link),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("   Repository: ", Style::default().fg(Color::Yellow)),
        Span::styled(detail.repository.as_str(), link),
    ]));
    lines.push(Line::from(""));

    if !detail.screenshots.is_empty() {
        lines.push(heading(" Screenshots"));
        for (i, url) in detail.screenshots.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("   {:>2}. ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(url.as_str(), link),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled(format!(" {}", updated_prefix), Style::default().fg(Color::DarkGray)),
        Span::styled(detail.updated.as_str(), Style::default().fg(Color::White)),
    ]));
    lines
}
