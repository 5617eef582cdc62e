//! # Lesson Registry
//!
//! An explicit dispatch table from `(category, lesson)` keys to loader
//! functions. The table is built once at startup, can be enumerated, and is
//! checked against the [`Catalog`] so gaps show up in the log instead of at
//! click time.

use crate::catalog::Catalog;
use crate::lesson::document::{Lesson, ParseError};
use crate::lesson::embedded;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

/// Identifies one lesson: its category and its lesson identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LessonKey {
    pub category: String,
    pub lesson: String,
}

impl LessonKey {
    pub fn new(category: impl Into<String>, lesson: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            lesson: lesson.into(),
        }
    }

    /// Parse a `category/lesson` pair as accepted by `--open`.
    pub fn parse(text: &str) -> Option<Self> {
        let (category, lesson) = text.split_once('/')?;
        if category.is_empty() || lesson.is_empty() {
            return None;
        }
        Some(Self::new(category, lesson))
    }
}

impl fmt::Display for LessonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.lesson)
    }
}

/// Why a lesson could not be resolved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("No lesson is registered for `{0}`")]
    NotRegistered(LessonKey),
    #[error("Lesson `{key}` is malformed: {source}")]
    Malformed {
        key: LessonKey,
        #[source]
        source: ParseError,
    },
    #[error("Failed to load lesson `{key}`: {reason}")]
    Load { key: LessonKey, reason: String },
}

impl ResolveError {
    pub fn key(&self) -> &LessonKey {
        match self {
            ResolveError::NotRegistered(key) => key,
            ResolveError::Malformed { key, .. } => key,
            ResolveError::Load { key, .. } => key,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Lesson `{0}` is already registered")]
    Duplicate(LessonKey),
}

/// Future produced by a loader.
pub type LoadFuture = Pin<Box<dyn Future<Output = Result<Lesson, ResolveError>> + Send>>;

/// Loader entry point: takes the requested key, yields the lesson.
pub type LessonLoader = Arc<dyn Fn(LessonKey) -> LoadFuture + Send + Sync>;

#[derive(Default, Clone)]
pub struct LessonRegistry {
    loaders: HashMap<LessonKey, LessonLoader>,
}

impl fmt::Debug for LessonRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LessonRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

impl LessonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every bundled lesson.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (category, lesson, source) in embedded::LESSONS {
            // The bundled table has unique keys; a duplicate is a packaging bug.
            if let Err(e) = registry.register_embedded(*category, *lesson, *source) {
                tracing::error!("{}", e);
            }
        }
        registry
    }

    pub fn register(
        &mut self,
        category: impl Into<String>,
        lesson: impl Into<String>,
        loader: LessonLoader,
    ) -> Result<(), RegistryError> {
        let key = LessonKey::new(category, lesson);
        if self.loaders.contains_key(&key) {
            return Err(RegistryError::Duplicate(key));
        }
        self.loaders.insert(key, loader);
        Ok(())
    }

    /// Register a lesson whose document is compiled into the binary.
    pub fn register_embedded(
        &mut self,
        category: impl Into<String>,
        lesson: impl Into<String>,
        source: &'static str,
    ) -> Result<(), RegistryError> {
        self.register(category, lesson, embedded_loader(source))
    }

    pub fn get(&self, key: &LessonKey) -> Option<LessonLoader> {
        self.loaders.get(key).cloned()
    }

    pub fn contains(&self, key: &LessonKey) -> bool {
        self.loaders.contains_key(key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<LessonKey> {
        let mut keys: Vec<LessonKey> = self.loaders.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    /// Catalog entries that have no loader, in menu order.
    pub fn missing_from(&self, catalog: &Catalog) -> Vec<LessonKey> {
        catalog
            .keys()
            .into_iter()
            .filter(|key| !self.contains(key))
            .collect()
    }

    /// Registered keys that the catalog never lists.
    pub fn unlisted(&self, catalog: &Catalog) -> Vec<LessonKey> {
        self.keys()
            .into_iter()
            .filter(|key| !catalog.contains(&key.category, &key.lesson))
            .collect()
    }

    /// Run the loader for `key`.
    pub async fn load(&self, key: &LessonKey) -> Result<Lesson, ResolveError> {
        match self.get(key) {
            Some(loader) => loader(key.clone()).await,
            None => Err(ResolveError::NotRegistered(key.clone())),
        }
    }
}

/// Loader that parses a document compiled into the binary.
pub fn embedded_loader(source: &'static str) -> LessonLoader {
    Arc::new(move |key: LessonKey| -> LoadFuture {
        Box::pin(async move {
            Lesson::parse(key.clone(), source)
                .map_err(|source| ResolveError::Malformed { key, source })
        })
    })
}
