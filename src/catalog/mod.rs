//! # Catalog Module
//!
//! The fixed table of lesson categories and the lessons they contain.
//!
//! ## Overview
//!
//! A [`Catalog`] is an ordered list of [`CatalogEntry`] values. The order of
//! categories is the order the menu renders them in, and the order of lessons
//! inside a category is the order of the menu leaves beneath it.
//!
//! The built-in table is hand-authored; nothing here scans the filesystem.
//!
//! | Category | Lessons |
//! |----------|---------|
//! | `1_ReactOverview` | `Example` |
//! | `2_Components` | `Components` |
//! | `3_State` | `State` |
//! | `4_Props` | `Props` |
//! | `5_Hooks` | `UseState`, `UseEffect` |
//! | `6_ListeningToEvents` | `AddListeners` |
//! | `7_Styling` | `Flexbox`, `Margins`, `Padding` |
//!
//! Raw category identifiers are turned into menu labels by [`humanize`].

pub mod label;

pub use label::humanize;

use crate::lesson::LessonKey;
use thiserror::Error;

/// Hand-authored lesson table, in menu order.
const BUILTIN_TABLE: &[(&str, &[&str])] = &[
    ("1_ReactOverview", &["Example"]),
    ("2_Components", &["Components"]),
    ("3_State", &["State"]),
    ("4_Props", &["Props"]),
    ("5_Hooks", &["UseState", "UseEffect"]),
    ("6_ListeningToEvents", &["AddListeners"]),
    ("7_Styling", &["Flexbox", "Margins", "Padding"]),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Unknown category `{0}`")]
    NotFound(String),
    #[error("Category `{0}` is declared more than once")]
    DuplicateCategory(String),
}

/// One category and its lessons, in declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub category: String,
    pub lessons: Vec<String>,
}

impl CatalogEntry {
    pub fn new<C, I, L>(category: C, lessons: I) -> Self
    where
        C: Into<String>,
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            category: category.into(),
            lessons: lessons.into_iter().map(Into::into).collect(),
        }
    }

    /// Display label for the category (see [`humanize`]).
    pub fn label(&self) -> String {
        humanize(&self.category)
    }
}

/// Immutable, ordered mapping from category to lessons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from entries in menu order.
    ///
    /// Category identifiers must be unique; lesson identifiers inside a
    /// category are kept as given.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.category == entry.category) {
                return Err(CatalogError::DuplicateCategory(entry.category.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// The built-in lesson table.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_TABLE
                .iter()
                .map(|(category, lessons)| CatalogEntry::new(*category, lessons.iter().copied()))
                .collect(),
        }
    }

    /// Category identifiers in declared order.
    pub fn list_categories(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.category.as_str()).collect()
    }

    /// Lessons of `category` in declared order.
    pub fn list_lessons(&self, category: &str) -> Result<&[String], CatalogError> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.lessons.as_slice())
            .ok_or_else(|| CatalogError::NotFound(category.to_string()))
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn contains(&self, category: &str, lesson: &str) -> bool {
        self.list_lessons(category)
            .map(|lessons| lessons.iter().any(|l| l == lesson))
            .unwrap_or(false)
    }

    /// Every `(category, lesson)` pair in menu order.
    pub fn keys(&self) -> Vec<LessonKey> {
        self.entries
            .iter()
            .flat_map(|e| e.lessons.iter().map(|l| LessonKey::new(&e.category, l)))
            .collect()
    }

    pub fn lesson_count(&self) -> usize {
        self.entries.iter().map(|e| e.lessons.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
