//! # Lesson Selector
//!
//! Resolves a `(category, lesson)` selection into a [`Lesson`] on a tokio
//! task and reports the outcome on a channel.
//!
//! ## Delivery
//!
//! [`Selector::new`] returns the receiving half of an unbounded channel. Every
//! call to [`Selector::resolve`] produces exactly one [`Resolution`] on that
//! channel, successful or not. The UI loop drains the channel between frames
//! and hands each resolution to the shell.
//!
//! ## Ordering
//!
//! Overlapping requests are not ordered. Each one completes on its own
//! schedule, so a slow early request can land after a fast later one. Every
//! resolution carries the generation number returned by `resolve`, which lets
//! the receiver tell stale results apart when it wants to.

use crate::lesson::document::Lesson;
use crate::lesson::registry::{LessonKey, LessonRegistry, ResolveError};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Outcome of one `resolve` call.
#[derive(Debug)]
pub struct Resolution {
    pub generation: u64,
    pub key: LessonKey,
    pub outcome: Result<Lesson, ResolveError>,
}

pub struct Selector {
    registry: Arc<LessonRegistry>,
    sender: mpsc::UnboundedSender<Resolution>,
    last_generation: u64,
}

impl Selector {
    pub fn new(registry: Arc<LessonRegistry>) -> (Self, mpsc::UnboundedReceiver<Resolution>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let selector = Self {
            registry,
            sender,
            last_generation: 0,
        };
        (selector, receiver)
    }

    /// Start resolving `category`/`lesson` and return its generation.
    ///
    /// Must be called from within a tokio runtime. The pair is not checked
    /// up front; an unknown pair resolves to [`ResolveError::NotRegistered`].
    pub fn resolve(&mut self, category: &str, lesson: &str) -> u64 {
        self.last_generation += 1;
        let generation = self.last_generation;
        let key = LessonKey::new(category, lesson);
        let registry = Arc::clone(&self.registry);
        let sender = self.sender.clone();

        tracing::debug!(%key, generation, "resolving lesson");

        tokio::spawn(async move {
            let outcome = registry.load(&key).await;
            match &outcome {
                Ok(_) => tracing::debug!(%key, generation, "lesson resolved"),
                Err(e) => tracing::warn!(%key, generation, "lesson resolution failed: {}", e),
            }
            let resolution = Resolution {
                generation,
                key,
                outcome,
            };
            if sender.send(resolution).is_err() {
                tracing::debug!(generation, "resolution dropped, receiver closed");
            }
        });

        generation
    }

    /// Generation of the most recent request, `0` before the first one.
    pub fn last_generation(&self) -> u64 {
        self.last_generation
    }

    pub fn registry(&self) -> &LessonRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin_selector() -> (Selector, mpsc::UnboundedReceiver<Resolution>) {
        Selector::new(Arc::new(LessonRegistry::builtin()))
    }

    #[tokio::test]
    async fn test_resolve_delivers_lesson() {
        let (mut selector, mut receiver) = builtin_selector();
        let generation = selector.resolve("5_Hooks", "UseState");

        let resolution = receiver.recv().await.expect("one resolution");
        assert_eq!(resolution.generation, generation);
        assert_eq!(resolution.key, LessonKey::new("5_Hooks", "UseState"));
        let lesson = resolution.outcome.expect("lesson loads");
        assert_eq!(lesson.title, "The useState hook");
    }

    #[tokio::test]
    async fn test_resolve_unknown_pair_fails() {
        let (mut selector, mut receiver) = builtin_selector();
        selector.resolve("1_ReactOverview", "Example");

        let resolution = receiver.recv().await.expect("one resolution");
        assert_eq!(
            resolution.outcome,
            Err(ResolveError::NotRegistered(LessonKey::new(
                "1_ReactOverview",
                "Example"
            )))
        );
    }

    #[tokio::test]
    async fn test_generations_increase() {
        let (mut selector, mut receiver) = builtin_selector();
        assert_eq!(selector.last_generation(), 0);
        let first = selector.resolve("3_State", "State");
        let second = selector.resolve("4_Props", "Props");
        assert_eq!((first, second), (1, 2));
        assert_eq!(selector.last_generation(), 2);

        let mut seen = vec![
            receiver.recv().await.expect("resolution").generation,
            receiver.recv().await.expect("resolution").generation,
        ];
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_exactly_one_resolution_per_call() {
        let (mut selector, mut receiver) = builtin_selector();
        selector.resolve("7_Styling", "Margins");
        selector.resolve("9_Nope", "Nothing");
        drop(selector);

        let mut count = 0;
        while receiver.recv().await.is_some() {
            count += 1;
        }
        assert_eq!(count, 2);
    }
}
