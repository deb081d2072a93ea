use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::shell::{LineKind, LineTag, ScrollbackLine};

use super::*;

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Min(0)])
        .split(chunks[1]);
    draw_explorer(frame, body[0], app);
    draw_terminal(frame, body[1], app);

    let footer = match &app.notice {
        Some(n) => Span::styled(n.as_str(), Style::default().fg(Color::Yellow)),
        None => Span::styled(key_hints(app), Style::default().fg(Color::Gray)),
    };
    frame.render_widget(Paragraph::new(Line::from(footer)), chunks[2]);
}

fn draw_header(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let shell = app.shell();
    let mut spans = vec![Span::styled(
        format!("Kit Playground - {}", shell.user()),
        Style::default().fg(Color::Black).bg(Color::White),
    )];
    if shell.is_initialized() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!(" {} ", shell.current_branch()),
            Style::default().fg(Color::Black).bg(Color::Green),
        ));
    }
    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn draw_explorer(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Explorer;
    let prompt_h = if app.prompt.is_some() { 3 } else { 0 };
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(prompt_h)])
        .split(area);

    let tree = app.shell().tree();
    let lines: Vec<Line> = tree
        .visible_entries()
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let text = format!("{}{}", "  ".repeat(e.depth), e.node.display_name());
            let mut style = if e.node.is_folder() {
                Style::default().fg(Color::Blue)
            } else {
                Style::default()
            };
            if i == app.selected && focused {
                style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
            }
            Line::from(Span::styled(text, style))
        })
        .collect();

    let inner_h = parts[0].height.saturating_sub(2) as usize;
    let scroll = app.selected.saturating_sub(inner_h.saturating_sub(1)) as u16;
    let border = if focused { Color::Cyan } else { Color::Gray };
    frame.render_widget(
        Paragraph::new(lines).scroll((scroll, 0)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(format!("/{}", tree.name())),
        ),
        parts[0],
    );

    if let Some(prompt) = &app.prompt {
        frame.render_widget(
            Paragraph::new(prompt.input.buf())
                .block(Block::default().borders(Borders::ALL).title(prompt.title())),
            parts[1],
        );
        let x = prompt.input.buf()[..prompt.input.cursor()].chars().count() as u16;
        frame.set_cursor_position((parts[1].x + 1 + x, parts[1].y + 1));
    }
}

fn draw_terminal(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let shell = app.shell();
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let visible = parts[0].height.saturating_sub(2) as usize;
    let lines = shell.scrollback();
    let start = lines.len().saturating_sub(visible);
    let rendered: Vec<Line> = lines[start..].iter().map(scrollback_line).collect();
    frame.render_widget(
        Paragraph::new(rendered).block(Block::default().borders(Borders::ALL).title("Terminal")),
        parts[0],
    );

    let prompt = shell.prompt();
    let title = if shell.is_processing() { "running" } else { "" };
    let input = Line::from(vec![
        Span::styled(prompt.as_str(), Style::default().fg(Color::Green)),
        Span::raw(" "),
        Span::raw(shell.buffer()),
    ]);
    frame.render_widget(
        Paragraph::new(input).block(Block::default().borders(Borders::ALL).title(title)),
        parts[1],
    );

    if app.focus == Focus::Terminal && app.prompt.is_none() {
        let typed = shell.buffer()[..shell.input().cursor()].chars().count();
        let x = (prompt.chars().count() + 1 + typed) as u16;
        frame.set_cursor_position((parts[1].x + 1 + x, parts[1].y + 1));
    }
}

fn scrollback_line(line: &ScrollbackLine) -> Line<'_> {
    let style = match (line.kind, line.tag) {
        (LineKind::Input, _) => Style::default().fg(Color::Cyan),
        (LineKind::Error, _) => Style::default().fg(Color::Red),
        (LineKind::Output, Some(tag)) => tag_style(tag),
        (LineKind::Output, None) => Style::default(),
    };
    Line::from(vec![
        Span::styled(format!("{} ", line.clock()), Style::default().fg(Color::DarkGray)),
        Span::styled(line.text.as_str(), style),
    ])
}

fn tag_style(tag: LineTag) -> Style {
    match tag {
        LineTag::Staged => Style::default().fg(Color::Green),
        LineTag::Modified => Style::default().fg(Color::Yellow),
        LineTag::Untracked | LineTag::Deleted => Style::default().fg(Color::Red),
        LineTag::CommitHeader => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        LineTag::Author | LineTag::Date => Style::default().fg(Color::Gray),
        LineTag::Message => Style::default().add_modifier(Modifier::ITALIC),
    }
}

fn key_hints(app: &App) -> &'static str {
    if app.prompt.is_some() {
        return "Enter: apply  Esc: cancel";
    }
    match app.focus {
        Focus::Explorer => "j/k: move  a: new file  A: new folder  r: rename  d: delete  Tab: terminal  q: quit",
        Focus::Terminal => "Enter: run  Tab: complete  Up/Down: history  Esc: explorer  Ctrl+C: quit",
    }
}
