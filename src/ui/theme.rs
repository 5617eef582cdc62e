//! # Theme System
//!
//! Color themes for the lesson browser.
//!
//! Rendering code never hardcodes `ratatui::style::Color` values; it reads
//! them from the active [`Theme`]. Press `t` to cycle through the built-in
//! themes; the choice is saved to the config file.
//!
//! ## Built-in Themes
//!
//! - **Catppuccin Mocha** (default)
//! - **Dracula**
//! - **Nord**
//! - **Gruvbox Dark**

use ratatui::style::Color;

/// All colors used by the UI, grouped by semantic role.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,

    /// Panel and modal background.
    pub bg: Color,
    /// Lesson prose and menu leaves.
    pub fg: Color,
    /// Hints, separators, footer.
    pub fg_dim: Color,
    /// Focused borders, selected row, category labels.
    pub accent: Color,
    /// Lesson titles.
    pub secondary: Color,
    /// Code block text.
    pub code: Color,
    /// Loading marker.
    pub pending: Color,
    /// Resolution failures.
    pub error: Color,
}

impl Theme {
    /// All built-in themes, in cycling order.
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }

    /// The theme after this one, wrapping around.
    pub fn next(&self) -> &'static Theme {
        let pos = BUILT_IN_THEMES
            .iter()
            .position(|t| t.name == self.name)
            .unwrap_or(0);
        &BUILT_IN_THEMES[(pos + 1) % BUILT_IN_THEMES.len()]
    }
}

static BUILT_IN_THEMES: [Theme; 4] = [
    Theme {
        name: "Catppuccin Mocha",
        bg: Color::Rgb(30, 30, 46),          // base
        fg: Color::Rgb(205, 214, 244),       // text
        fg_dim: Color::Rgb(108, 112, 134),   // overlay0
        accent: Color::Rgb(137, 180, 250),   // blue
        secondary: Color::Rgb(249, 226, 175), // yellow
        code: Color::Rgb(148, 226, 213),     // teal
        pending: Color::Rgb(250, 179, 135),  // peach
        error: Color::Rgb(243, 139, 168),    // red
    },
    Theme {
        name: "Dracula",
        bg: Color::Rgb(40, 42, 54),
        fg: Color::Rgb(248, 248, 242),
        fg_dim: Color::Rgb(98, 114, 164),
        accent: Color::Rgb(139, 233, 253),
        secondary: Color::Rgb(241, 250, 140),
        code: Color::Rgb(80, 250, 123),
        pending: Color::Rgb(255, 184, 108),
        error: Color::Rgb(255, 85, 85),
    },
    Theme {
        name: "Nord",
        bg: Color::Rgb(46, 52, 64),
        fg: Color::Rgb(216, 222, 233),
        fg_dim: Color::Rgb(76, 86, 106),
        accent: Color::Rgb(136, 192, 208),
        secondary: Color::Rgb(235, 203, 139),
        code: Color::Rgb(163, 190, 140),
        pending: Color::Rgb(208, 135, 112),
        error: Color::Rgb(191, 97, 106),
    },
    Theme {
        name: "Gruvbox Dark",
        bg: Color::Rgb(40, 40, 40),
        fg: Color::Rgb(235, 219, 178),
        fg_dim: Color::Rgb(146, 131, 116),
        accent: Color::Rgb(131, 165, 152),
        secondary: Color::Rgb(250, 189, 47),
        code: Color::Rgb(142, 192, 124),
        pending: Color::Rgb(254, 128, 25),
        error: Color::Rgb(251, 73, 52),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn ctp(color: catppuccin::Color) -> Color {
        Color::Rgb(color.rgb.r, color.rgb.g, color.rgb.b)
    }

    #[test]
    fn test_default_is_mocha() {
        assert_eq!(Theme::default_theme().name, "Catppuccin Mocha");
    }

    #[test]
    fn test_by_name_case_insensitive() {
        assert!(Theme::by_name("catppuccin mocha").is_some());
        assert!(Theme::by_name("NORD").is_some());
        assert!(Theme::by_name("nonexistent").is_none());
    }

    #[test]
    fn test_mocha_matches_palette() {
        let mocha = catppuccin::PALETTE.mocha.colors;
        let theme = Theme::default_theme();
        assert_eq!(theme.bg, ctp(mocha.base));
        assert_eq!(theme.fg, ctp(mocha.text));
        assert_eq!(theme.fg_dim, ctp(mocha.overlay0));
        assert_eq!(theme.accent, ctp(mocha.blue));
        assert_eq!(theme.secondary, ctp(mocha.yellow));
        assert_eq!(theme.code, ctp(mocha.teal));
        assert_eq!(theme.pending, ctp(mocha.peach));
        assert_eq!(theme.error, ctp(mocha.red));
    }

    #[test]
    fn test_next_cycles_through_all_themes() {
        let start = Theme::default_theme();
        let mut current = start;
        let mut visited = vec![current.name];
        for _ in 1..Theme::all().len() {
            current = current.next();
            visited.push(current.name);
        }
        assert_eq!(current.next().name, start.name);
        visited.sort_unstable();
        visited.dedup();
        assert_eq!(visited.len(), Theme::all().len());
    }
}
