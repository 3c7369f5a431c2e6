use moodcheck_core::RequestOutcome;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use crate::app::{App, Focus};

const TITLE: &str = "How are you feeling today?";
const INPUT_PLACEHOLDER: &str = "Or type your mood...";
const QUOTE: &str = "\"Every day may not be good, but there's something good in every day.\" 💙";

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header_area);

    let [title_area, moods_area, input_area, submit_area, outcome_area, quote_area] =
        Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .areas(body_area);

    let title = Paragraph::new(vec![Line::default(), Line::from(TITLE).bold().fg(Color::Cyan)])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(title, title_area);

    render_moods(app, frame, moods_area);
    render_input(app, frame, input_area);
    render_submit(app, frame, submit_area);
    render_outcome(app, frame, outcome_area);

    let quote = Paragraph::new(Line::from(QUOTE).italic().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(quote, quote_area);

    render_footer(app, frame, footer_area);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" moodcheck ", Style::default().fg(Color::Cyan).bold()),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_moods(app: &App, frame: &mut Frame, area: Rect) {
    let options = app.catalog.options();
    if options.is_empty() {
        return;
    }

    let constraints = vec![Constraint::Ratio(1, options.len() as u32); options.len()];
    let cells = Layout::horizontal(constraints).split(area);
    let selected = app.view().input.selected_preset();
    let loading = app.is_loading();

    for (i, (option, cell)) in options.iter().zip(cells.iter()).enumerate() {
        let highlighted = app.focus == Focus::Moods && app.mood_cursor == i;
        let border_color = if highlighted { Color::Cyan } else { Color::DarkGray };

        let mut style = Style::default();
        if selected == Some(option.label.as_str()) {
            style = style.bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD);
        }
        if loading {
            style = style.fg(Color::DarkGray);
        }

        let button = Paragraph::new(format!("{} {}", option.glyph, option.label))
            .alignment(Alignment::Center)
            .style(style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_color)),
            );
        frame.render_widget(button, *cell);
    }
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == Focus::Input;
    let border_color = if focused { Color::Yellow } else { Color::DarkGray };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Your mood (Tab to focus) ");

    let text = app.free_text();

    // Calculate visible portion of input with horizontal scrolling
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.input_cursor;
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let input = if text.is_empty() {
        Paragraph::new(Span::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray)))
    } else {
        let visible_text: String = text.chars().skip(scroll_offset).take(inner_width).collect();
        let color = if app.is_loading() { Color::DarkGray } else { Color::Cyan };
        Paragraph::new(visible_text).style(Style::default().fg(color))
    };
    frame.render_widget(input.block(input_block), area);

    if focused && !app.is_loading() {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_submit(app: &App, frame: &mut Frame, area: Rect) {
    let label = if app.is_loading() {
        format!("[ Fetching{} ]", ".".repeat(app.animation_frame as usize + 1))
    } else {
        "[ Submit Mood ]".to_string()
    };

    let style = if app.view().can_submit_free_text() {
        Style::default().fg(Color::Black).bg(Color::Green).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let button = Paragraph::new(Span::styled(label, style)).alignment(Alignment::Center);
    frame.render_widget(button, area);
}

fn render_outcome(app: &App, frame: &mut Frame, area: Rect) {
    let text = match &app.view().outcome {
        RequestOutcome::Idle | RequestOutcome::Loading { .. } => return,
        RequestOutcome::Failed(failure) => Text::from(Span::styled(
            format!("❌ {}", failure.message),
            Style::default().fg(Color::Red),
        )),
        RequestOutcome::Success(suggestion) => {
            let body_style = if suggestion.is_degraded() {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Text::from(vec![
                Line::from(vec![
                    Span::styled("AI Suggestion: ", Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(suggestion.text.clone(), body_style),
                ]),
                Line::from(Span::styled(
                    format!("for \"{}\"", suggestion.mood),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        }
    };

    let panel = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(panel, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let mut hints = match app.focus {
        Focus::Moods => vec![
            Span::styled(" ←/→ ", key_style),
            Span::styled(" mood ", label_style),
            Span::styled(" Enter ", key_style),
            Span::styled(" select ", label_style),
            Span::styled(" 1-9 ", key_style),
            Span::styled(" pick ", label_style),
            Span::styled(" q ", key_style),
            Span::styled(" quit ", label_style),
        ],
        Focus::Input => vec![
            Span::styled(" Enter ", key_style),
            Span::styled(" submit ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" moods ", label_style),
        ],
    };
    hints.extend(vec![
        Span::styled(" Tab ", key_style),
        Span::styled(" focus ", label_style),
    ]);

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}
