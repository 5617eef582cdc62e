//! Lesson resolution tests
//!
//! Drives the selector and the shell together. Loaders are gated on oneshot
//! channels so each test decides the order in which resolutions complete.

use primer::catalog::Catalog;
use primer::lesson::{
    LessonKey, LessonLoader, LessonRegistry, LoadFuture, Resolution, ResolveError, Selector,
};
use primer::ui::app::{ResolutionEffect, SelectedLesson};
use primer::ui::theme::Theme;
use primer::ui::App;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

/// A loader that parses `source` once the returned sender fires.
fn gated_loader(source: &'static str) -> (LessonLoader, oneshot::Sender<()>) {
    let (release, gate) = oneshot::channel::<()>();
    let gate = Arc::new(Mutex::new(Some(gate)));
    let loader: LessonLoader = Arc::new(move |key: LessonKey| -> LoadFuture {
        let gate = gate.lock().expect("gate lock").take();
        Box::pin(async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            primer::lesson::Lesson::parse(key.clone(), source)
                .map_err(|source| ResolveError::Malformed { key, source })
        })
    });
    (loader, release)
}

struct Harness {
    app: App,
    selector: Selector,
    resolutions: mpsc::UnboundedReceiver<Resolution>,
    release_use_state: oneshot::Sender<()>,
    release_use_effect: oneshot::Sender<()>,
}

fn harness() -> Harness {
    let mut registry = LessonRegistry::new();
    let (use_state, release_use_state) = gated_loader("# UseState\n\nState hook.");
    let (use_effect, release_use_effect) = gated_loader("# UseEffect\n\nEffect hook.");
    registry
        .register("5_Hooks", "UseState", use_state)
        .expect("register");
    registry
        .register("5_Hooks", "UseEffect", use_effect)
        .expect("register");

    let (selector, resolutions) = Selector::new(Arc::new(registry));
    Harness {
        app: App::new(Catalog::builtin(), Theme::default_theme().clone()),
        selector,
        resolutions,
        release_use_state,
        release_use_effect,
    }
}

fn displayed_title(app: &App) -> Option<&str> {
    app.selection.lesson().map(|l| l.title.as_str())
}

#[tokio::test]
async fn test_request_then_resolution_displays_lesson() {
    let mut h = harness();
    let key = LessonKey::new("5_Hooks", "UseState");

    let generation = h.app.request(&mut h.selector, &key);
    assert!(h.app.is_loading());
    assert_eq!(h.app.selection, SelectedLesson::Empty);

    h.release_use_state.send(()).expect("release");
    let resolution = h.resolutions.recv().await.expect("resolution");
    assert_eq!(resolution.generation, generation);

    assert_eq!(h.app.apply_resolution(resolution), ResolutionEffect::Displayed);
    assert!(!h.app.is_loading());
    assert_eq!(displayed_title(&h.app), Some("UseState"));
}

#[tokio::test]
async fn test_slow_first_request_overwrites_newer_lesson() {
    let mut h = harness();

    let first = h
        .app
        .request(&mut h.selector, &LessonKey::new("5_Hooks", "UseState"));
    let second = h
        .app
        .request(&mut h.selector, &LessonKey::new("5_Hooks", "UseEffect"));
    assert!(first < second);

    // The newer request finishes first...
    h.release_use_effect.send(()).expect("release");
    let resolution = h.resolutions.recv().await.expect("resolution");
    assert_eq!(resolution.generation, second);
    h.app.apply_resolution(resolution);
    assert_eq!(displayed_title(&h.app), Some("UseEffect"));

    // ...then the older one lands and replaces it.
    h.release_use_state.send(()).expect("release");
    let resolution = h.resolutions.recv().await.expect("resolution");
    assert_eq!(resolution.generation, first);
    assert_eq!(h.app.apply_resolution(resolution), ResolutionEffect::Displayed);
    assert_eq!(displayed_title(&h.app), Some("UseState"));
}

#[tokio::test]
async fn test_discard_stale_keeps_newest_request() {
    let mut h = harness();
    h.app.discard_stale = true;

    let first = h
        .app
        .request(&mut h.selector, &LessonKey::new("5_Hooks", "UseState"));
    let second = h
        .app
        .request(&mut h.selector, &LessonKey::new("5_Hooks", "UseEffect"));
    assert_eq!(h.app.latest_request(), second);

    h.release_use_effect.send(()).expect("release");
    let resolution = h.resolutions.recv().await.expect("resolution");
    h.app.apply_resolution(resolution);

    h.release_use_state.send(()).expect("release");
    let resolution = h.resolutions.recv().await.expect("resolution");
    assert_eq!(resolution.generation, first);
    assert_eq!(
        h.app.apply_resolution(resolution),
        ResolutionEffect::DiscardedStale
    );

    assert_eq!(displayed_title(&h.app), Some("UseEffect"));
    assert!(!h.app.is_loading());
}

#[tokio::test]
async fn test_unregistered_lesson_leaves_selection_and_shows_error() {
    let mut h = harness();

    h.app
        .request(&mut h.selector, &LessonKey::new("5_Hooks", "UseState"));
    h.release_use_state.send(()).expect("release");
    let resolution = h.resolutions.recv().await.expect("resolution");
    h.app.apply_resolution(resolution);

    h.app
        .request(&mut h.selector, &LessonKey::new("1_ReactOverview", "Example"));
    let resolution = h.resolutions.recv().await.expect("resolution");
    assert!(matches!(
        resolution.outcome,
        Err(ResolveError::NotRegistered(_))
    ));
    assert_eq!(h.app.apply_resolution(resolution), ResolutionEffect::Failed);

    assert_eq!(displayed_title(&h.app), Some("UseState"));
    assert!(h.app.last_error.is_some());
}

#[tokio::test]
async fn test_pending_request_never_resolves_without_release() {
    let mut h = harness();
    h.app
        .request(&mut h.selector, &LessonKey::new("5_Hooks", "UseState"));

    tokio::task::yield_now().await;
    assert_eq!(h.app.drain_resolutions(&mut h.resolutions), 0);
    assert!(h.app.is_loading());
    assert_eq!(h.app.selection, SelectedLesson::Empty);
}

#[tokio::test]
async fn test_drain_applies_everything_that_arrived() {
    let mut registry = LessonRegistry::builtin();
    registry
        .register_embedded("9_Extra", "Broken", "missing title")
        .expect("register");
    let (mut selector, mut resolutions) = Selector::new(Arc::new(registry));
    let mut app = App::new(Catalog::builtin(), Theme::default_theme().clone());

    app.request(&mut selector, &LessonKey::new("3_State", "State"));
    app.request(&mut selector, &LessonKey::new("9_Extra", "Broken"));

    // Wait for both, then hand them back through the channel in arrival order
    let (forward, mut replay) = mpsc::unbounded_channel();
    for _ in 0..2 {
        let resolution = resolutions.recv().await.expect("resolution");
        forward.send(resolution).expect("forward");
    }

    assert_eq!(app.drain_resolutions(&mut replay), 2);
    assert!(!app.is_loading());
    assert!(displayed_title(&app).is_some());
}
