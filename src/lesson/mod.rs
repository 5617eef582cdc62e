//! # Lesson Module
//!
//! Everything between a menu click and a rendered lesson.
//!
//! - [`registry`] - explicit `(category, lesson)` -> loader table
//! - [`selector`] - asynchronous resolution and delivery of results
//! - [`document`] - the lesson format and its parser
//! - [`embedded`] - lesson documents bundled with the binary

pub mod document;
pub mod embedded;
pub mod registry;
pub mod selector;

pub use document::{Lesson, ParseError, Section};
pub use registry::{
    embedded_loader, LessonKey, LessonLoader, LessonRegistry, LoadFuture, RegistryError,
    ResolveError,
};
pub use selector::{Resolution, Selector};
