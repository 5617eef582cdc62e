use crate::lesson::{Lesson, ResolveError, Section};
use crate::ui::app::{App, FocusPane, MenuItem, SelectedLesson};
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.bg)),
        frame.area(),
    );

    // Main layout: Header + Body + Footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, main_chunks[0]);

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(main_chunks[1]);

    render_menu(frame, app, body_chunks[0]);
    render_lesson_panel(frame, app, body_chunks[1]);
    render_footer(frame, app, main_chunks[2]);

    if app.show_info {
        render_info_modal(frame, app);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "  PRIMER ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "- {} lessons in {} topics",
                app.catalog.lesson_count(),
                app.catalog.entries().len()
            ),
            Style::default().fg(theme.fg_dim),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent)),
    );

    frame.render_widget(header, area);
}

fn render_menu(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let displayed = app.selection.lesson().map(|l| &l.key);

    let items: Vec<ListItem> = app
        .menu_items()
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let is_selected = i == app.selected_index;
            let base = match &item {
                MenuItem::Category { .. } => Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
                MenuItem::Lesson(_) => Style::default().fg(theme.fg),
            };
            let style = if is_selected {
                base.fg(theme.bg).bg(theme.accent)
            } else {
                base
            };

            let content = match item {
                MenuItem::Category { label, .. } => label,
                MenuItem::Lesson(key) => {
                    let marker = if displayed == Some(&key) { "▸" } else { " " };
                    format!("  {} {}", marker, key.lesson)
                }
            };
            ListItem::new(content).style(style)
        })
        .collect();

    let border_color = if app.focus == FocusPane::Menu {
        theme.accent
    } else {
        theme.fg_dim
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Topics ")
            .border_style(Style::default().fg(border_color)),
    );

    // The list scrolls to keep the cursor row on screen
    let mut state = ListState::default()
        .with_offset(app.menu_offset())
        .with_selected(Some(app.selected_index));
    frame.render_stateful_widget(list, area, &mut state);
    app.set_menu_offset(state.offset());
}

fn render_lesson_panel(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let border_color = if app.focus == FocusPane::Lesson {
        theme.accent
    } else {
        theme.fg_dim
    };

    let mut title = vec![Span::raw(" Lesson ")];
    if app.is_loading() {
        title.push(Span::styled(
            "loading... ",
            Style::default().fg(theme.pending),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(title))
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    app.set_lesson_viewport(inner.width, inner.height);

    let (text, scroll) = match (&app.last_error, &app.selection) {
        (Some(error), _) => (error_lines(error, theme), 0),
        (None, SelectedLesson::Displaying(lesson)) => (
            lesson_lines(lesson, theme),
            app.lesson_scroll.min(app.max_lesson_scroll()),
        ),
        (None, SelectedLesson::Empty) => (Vec::new(), 0),
    };

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

/// Lines of a lesson as shown in the lesson panel.
pub fn lesson_lines(lesson: &Lesson, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        lesson.title.clone(),
        Style::default()
            .fg(theme.secondary)
            .add_modifier(Modifier::BOLD),
    ))];
    if let Some(summary) = &lesson.summary {
        lines.push(Line::from(Span::styled(
            summary.clone(),
            Style::default()
                .fg(theme.fg_dim)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    for section in &lesson.sections {
        lines.push(Line::from(""));
        match section {
            Section::Prose(text) => {
                lines.push(Line::from(Span::styled(
                    text.clone(),
                    Style::default().fg(theme.fg),
                )));
            }
            Section::Code { language, lines: code } => {
                lines.push(Line::from(Span::styled(
                    format!("  [{}]", language),
                    Style::default().fg(theme.fg_dim),
                )));
                for line in code {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", line),
                        Style::default().fg(theme.code),
                    )));
                }
            }
        }
    }

    lines
}

fn error_lines(error: &ResolveError, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "✗ Could not load lesson",
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Lesson: ", Style::default().fg(theme.fg_dim)),
            Span::raw(error.key().to_string()),
        ]),
        Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(theme.error),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Pick another lesson from the menu.",
            Style::default().fg(theme.fg_dim),
        )),
    ]
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.focus {
        FocusPane::Menu => {
            "[↑↓/jk] Navigate  [Enter] Open lesson  [Tab] Lesson  [t] Theme  [i] Help  [q] Quit"
        }
        FocusPane::Lesson => "[↑↓/jk] Scroll  [g/G] Top/Bottom  [Esc] Menu  [Tab] Switch",
    };

    let footer = Paragraph::new(help_text).style(Style::default().fg(app.theme.fg_dim));

    frame.render_widget(footer, area);
}

fn render_info_modal(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let [area] = Layout::horizontal([Constraint::Length(50)])
        .flex(Flex::Center)
        .areas(frame.area());
    let [area] = Layout::vertical([Constraint::Length(12)])
        .flex(Flex::Center)
        .areas(area);

    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", k), Style::default().fg(theme.accent)),
            Span::styled(what, Style::default().fg(theme.fg)),
        ])
    };

    let text = vec![
        key("j / k", "Move through topics or scroll"),
        key("Enter", "Open the selected lesson"),
        key("Tab", "Switch between menu and lesson"),
        key("g / G", "Jump to top / bottom of lesson"),
        key("t", "Next theme"),
        key("i", "Close this help"),
        key("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            format!("  Theme: {}", theme.name),
            Style::default().fg(theme.fg_dim),
        )),
    ];

    let modal = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(modal, area);
}
