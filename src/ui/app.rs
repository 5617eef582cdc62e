use crate::catalog::{humanize, Catalog};
use crate::lesson::{Lesson, LessonKey, Resolution, ResolveError, Selector};
use crate::ui::render;
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::{Paragraph, Wrap};
use std::cell::Cell;
use tokio::sync::mpsc::UnboundedReceiver;

/// The lesson currently shown in the lesson panel.
///
/// Starts `Empty`; every successful resolution replaces the content. Nothing
/// moves it back to `Empty`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SelectedLesson {
    #[default]
    Empty,
    Displaying(Lesson),
}

impl SelectedLesson {
    pub fn lesson(&self) -> Option<&Lesson> {
        match self {
            SelectedLesson::Empty => None,
            SelectedLesson::Displaying(lesson) => Some(lesson),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusPane {
    Menu,
    Lesson,
}

/// One row of the menu.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuItem {
    Category { id: String, label: String },
    Lesson(LessonKey),
}

/// What the event loop has to do after a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Resolve this lesson.
    Activate(LessonKey),
    /// The theme changed and should be persisted.
    ThemeChanged,
}

/// How a resolution affected the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionEffect {
    Displayed,
    Failed,
    DiscardedStale,
}

pub struct App {
    pub catalog: Catalog,
    pub selection: SelectedLesson,
    /// Error of the last failed resolution, cleared by the next success.
    pub last_error: Option<ResolveError>,
    pub selected_index: usize,
    pub focus: FocusPane,
    pub lesson_scroll: u16,
    pub should_quit: bool,
    pub show_info: bool,
    pub theme: Theme,
    /// Drop resolutions older than the newest request.
    pub discard_stale: bool,
    latest_request: u64,
    in_flight: usize,
    // Written by the renderer on every draw.
    menu_offset: Cell<usize>,
    lesson_viewport: Cell<(u16, u16)>,
}

impl App {
    pub fn new(catalog: Catalog, theme: Theme) -> Self {
        Self {
            catalog,
            selection: SelectedLesson::Empty,
            last_error: None,
            selected_index: 0,
            focus: FocusPane::Menu,
            lesson_scroll: 0,
            should_quit: false,
            show_info: false,
            theme,
            discard_stale: false,
            latest_request: 0,
            in_flight: 0,
            menu_offset: Cell::new(0),
            lesson_viewport: Cell::new((0, 0)),
        }
    }

    /// Every category followed by its lessons, in catalog order.
    pub fn menu_items(&self) -> Vec<MenuItem> {
        let mut items = Vec::with_capacity(self.catalog.entries().len() + self.catalog.lesson_count());
        for entry in self.catalog.entries() {
            items.push(MenuItem::Category {
                id: entry.category.clone(),
                label: humanize(&entry.category),
            });
            for lesson in &entry.lessons {
                items.push(MenuItem::Lesson(LessonKey::new(&entry.category, lesson)));
            }
        }
        items
    }

    pub fn selected_item(&self) -> Option<MenuItem> {
        self.menu_items().get(self.selected_index).cloned()
    }

    pub fn next(&mut self) {
        let item_count = self.menu_items().len();
        if item_count > 0 {
            self.selected_index = (self.selected_index + 1) % item_count;
        }
    }

    pub fn previous(&mut self) {
        let item_count = self.menu_items().len();
        if item_count > 0 {
            if self.selected_index > 0 {
                self.selected_index -= 1;
            } else {
                self.selected_index = item_count - 1;
            }
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPane::Menu => {
                if self.selection.lesson().is_some() {
                    FocusPane::Lesson
                } else {
                    FocusPane::Menu
                }
            }
            FocusPane::Lesson => FocusPane::Menu,
        };
    }

    pub fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next().clone();
    }

    pub fn scroll_lesson_up(&mut self) {
        self.lesson_scroll = self.lesson_scroll.min(self.max_lesson_scroll()).saturating_sub(1);
    }

    pub fn scroll_lesson_down(&mut self) {
        if self.lesson_scroll < self.max_lesson_scroll() {
            self.lesson_scroll += 1;
        }
    }

    pub fn scroll_lesson_to_top(&mut self) {
        self.lesson_scroll = 0;
    }

    pub fn scroll_lesson_to_bottom(&mut self) {
        self.lesson_scroll = self.max_lesson_scroll();
    }

    /// Largest scroll offset that still fills the lesson panel.
    ///
    /// Before the first draw the panel size is unknown, and the last logical
    /// line is the limit.
    pub fn max_lesson_scroll(&self) -> u16 {
        let (_, height) = self.lesson_viewport.get();
        let max = self
            .lesson_line_count()
            .saturating_sub(usize::from(height.max(1)));
        u16::try_from(max).unwrap_or(u16::MAX)
    }

    /// Rows the displayed lesson takes once wrapped to the panel width.
    fn lesson_line_count(&self) -> usize {
        let Some(lesson) = self.selection.lesson() else {
            return 0;
        };
        let lines = render::lesson_lines(lesson, &self.theme);
        match self.lesson_viewport.get() {
            (0, _) => lines.len(),
            (width, _) => Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .line_count(width),
        }
    }

    /// Record the inner size of the lesson panel.
    pub fn set_lesson_viewport(&self, width: u16, height: u16) {
        self.lesson_viewport.set((width, height));
    }

    /// First visible menu row, kept between draws so the list scrolls smoothly.
    pub fn menu_offset(&self) -> usize {
        self.menu_offset.get()
    }

    pub fn set_menu_offset(&self, offset: usize) {
        self.menu_offset.set(offset);
    }

    /// Ask the selector for `key` and remember it as the newest request.
    pub fn request(&mut self, selector: &mut Selector, key: &LessonKey) -> u64 {
        let generation = selector.resolve(&key.category, &key.lesson);
        self.latest_request = generation;
        self.in_flight += 1;
        tracing::info!(%key, generation, "lesson requested");
        generation
    }

    /// Apply a finished resolution to the selection.
    ///
    /// Success replaces the displayed lesson. Failure leaves the selection as
    /// it was and records the error so the panel can show it.
    pub fn apply_resolution(&mut self, resolution: Resolution) -> ResolutionEffect {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.discard_stale && resolution.generation < self.latest_request {
            tracing::debug!(
                key = %resolution.key,
                generation = resolution.generation,
                latest = self.latest_request,
                "discarding stale resolution"
            );
            return ResolutionEffect::DiscardedStale;
        }

        match resolution.outcome {
            Ok(lesson) => {
                self.selection = SelectedLesson::Displaying(lesson);
                self.last_error = None;
                self.lesson_scroll = 0;
                ResolutionEffect::Displayed
            }
            Err(e) => {
                self.last_error = Some(e);
                ResolutionEffect::Failed
            }
        }
    }

    /// Apply every resolution that has arrived, without waiting.
    pub fn drain_resolutions(&mut self, receiver: &mut UnboundedReceiver<Resolution>) -> usize {
        let mut applied = 0;
        while let Ok(resolution) = receiver.try_recv() {
            self.apply_resolution(resolution);
            applied += 1;
        }
        applied
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn latest_request(&self) -> u64 {
        self.latest_request
    }

    /// Update state for a key press and report what the event loop must do.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        if self.show_info {
            if matches!(
                key.code,
                KeyCode::Char('i') | KeyCode::Char('q') | KeyCode::Esc
            ) {
                self.toggle_info();
            }
            return None;
        }

        match key.code {
            KeyCode::Char('i') => {
                self.toggle_info();
                return None;
            }
            KeyCode::Char('t') => {
                self.cycle_theme();
                return Some(Action::ThemeChanged);
            }
            KeyCode::Tab => {
                self.toggle_focus();
                return None;
            }
            _ => {}
        }

        match self.focus {
            FocusPane::Lesson => {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => self.focus = FocusPane::Menu,
                    KeyCode::Char('j') | KeyCode::Down => self.scroll_lesson_down(),
                    KeyCode::Char('k') | KeyCode::Up => self.scroll_lesson_up(),
                    KeyCode::Char('g') | KeyCode::Home => self.scroll_lesson_to_top(),
                    KeyCode::Char('G') | KeyCode::End => self.scroll_lesson_to_bottom(),
                    _ => {}
                }
                None
            }
            FocusPane::Menu => match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => {
                    self.should_quit = true;
                    None
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    self.next();
                    None
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.previous();
                    None
                }
                KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.activate_selected(),
                _ => None,
            },
        }
    }

    // A lesson row resolves; a category row moves to its first lesson.
    fn activate_selected(&mut self) -> Option<Action> {
        match self.selected_item()? {
            MenuItem::Lesson(key) => Some(Action::Activate(key)),
            MenuItem::Category { .. } => {
                if let Some(MenuItem::Lesson(_)) = self.menu_items().get(self.selected_index + 1) {
                    self.selected_index += 1;
                }
                None
            }
        }
    }
}
