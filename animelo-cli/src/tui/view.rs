/// Session screen layout.
use animelo_core::{Decision, Item, RatingStore, Session, Side};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw<S: RatingStore>(frame: &mut Frame, session: &Session<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(4),    // Top item
            Constraint::Min(4),    // Bottom item
            Constraint::Length(2), // Last decision
            Constraint::Length(1), // Footer shortcuts
        ])
        .split(frame.area());

    render_header(frame, session.decisions(), chunks[0]);

    if let Some(pair) = session.pair() {
        let focus = session.focus();
        render_item(frame, &pair.top, focus == Some(Side::Top), chunks[1]);
        render_item(frame, &pair.bottom, focus == Some(Side::Bottom), chunks[2]);
    }

    render_last_decision(frame, session.last_decision(), chunks[3]);
    render_footer(frame, chunks[4]);
}

fn render_header(frame: &mut Frame, decisions: usize, area: Rect) {
    let header = Line::from(vec![
        Span::styled("animelo", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw("  Which one is better?"),
        Span::styled(
            format!("  ({decisions} decided this session)"),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn render_item(frame: &mut Frame, item: &Item, focused: bool, area: Rect) {
    let (border_style, marker) = if focused {
        (Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD), "▶ ")
    } else {
        (Style::default().fg(Color::DarkGray), "  ")
    };

    let body = vec![
        Line::from(Span::styled(
            format!("{marker}{}", item.title),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("  rating {}  ·  {} comparisons", item.rating, item.comparisons),
            Style::default().fg(Color::Gray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if focused { BorderType::Thick } else { BorderType::Rounded })
        .border_style(border_style);

    frame.render_widget(
        Paragraph::new(body).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_last_decision(frame: &mut Frame, decision: Option<&Decision>, area: Rect) {
    let Some(d) = decision else {
        frame.render_widget(Paragraph::new(""), area);
        return;
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("won  ", Style::default().fg(Color::Green)),
            Span::raw(format!(
                "{}  {} → {} ({:+})",
                d.winner.title,
                d.winner.before,
                d.winner.after,
                d.winner.delta()
            )),
        ]),
        Line::from(vec![
            Span::styled("lost ", Style::default().fg(Color::Red)),
            Span::raw(format!(
                "{}  {} → {} ({:+})",
                d.loser.title,
                d.loser.before,
                d.loser.after,
                d.loser.delta()
            )),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(
        "↑/↓ k/j move   ←/h pick top   →/l pick bottom   enter/space pick focused   q quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
