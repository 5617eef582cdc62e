//! # UI Module
//!
//! This module provides the terminal user interface for the lesson browser.
//!
//! ## Components
//!
//! - [`App`] - the shell: menu cursor, focus, and the selected lesson
//! - [`mod@render`] - rendering functions for drawing the TUI
//! - [`config`] - persisted user settings
//! - [`theme`] - built-in color themes
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                    Header                        │
//! ├─────────────────┬───────────────────────────────┤
//! │                 │                               │
//! │   Topics        │      Lesson                   │
//! │   (categories   │   (title, prose, code, or     │
//! │    & lessons)   │    the last load error)       │
//! │                 │                               │
//! ├─────────────────┴───────────────────────────────┤
//! │                    Footer                        │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod config;
pub mod render;
pub mod theme;

pub use app::App;
pub use render::render;
