//! Lesson documents compiled into the binary.
//!
//! `1_ReactOverview/Example` is listed in the catalog but has no document;
//! activating it resolves to [`ResolveError::NotRegistered`].
//!
//! [`ResolveError::NotRegistered`]: crate::lesson::ResolveError::NotRegistered

/// `(category, lesson, document)` for every bundled lesson.
pub const LESSONS: &[(&str, &str, &str)] = &[
    (
        "2_Components",
        "Components",
        include_str!("content/2_Components/Components.md"),
    ),
    ("3_State", "State", include_str!("content/3_State/State.md")),
    ("4_Props", "Props", include_str!("content/4_Props/Props.md")),
    (
        "5_Hooks",
        "UseState",
        include_str!("content/5_Hooks/UseState.md"),
    ),
    (
        "5_Hooks",
        "UseEffect",
        include_str!("content/5_Hooks/UseEffect.md"),
    ),
    (
        "6_ListeningToEvents",
        "AddListeners",
        include_str!("content/6_ListeningToEvents/AddListeners.md"),
    ),
    (
        "7_Styling",
        "Flexbox",
        include_str!("content/7_Styling/Flexbox.md"),
    ),
    (
        "7_Styling",
        "Margins",
        include_str!("content/7_Styling/Margins.md"),
    ),
    (
        "7_Styling",
        "Padding",
        include_str!("content/7_Styling/Padding.md"),
    ),
];
