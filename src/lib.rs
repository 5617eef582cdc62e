//! Primer - a terminal lesson browser
//!
//! This library provides the lesson catalog, the registry and selector that
//! load lessons asynchronously, and the TUI shell that displays them.

pub mod catalog;
pub mod lesson;
pub mod logging;
pub mod ui;
