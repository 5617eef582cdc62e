/// Turns a raw category identifier into a menu label.
///
/// - Drops everything up to and including the first underscore
/// - Inserts a space before each uppercase letter after the first character
/// - Trims leading whitespace
///
/// Examples:
///   - "6_ListeningToEvents" -> "Listening To Events"
///   - "7_Styling" -> "Styling"
///   - "Hooks" -> "Hooks"
pub fn humanize(identifier: &str) -> String {
    let stem = identifier
        .split_once('_')
        .map_or(identifier, |(_, rest)| rest);

    let mut label = String::with_capacity(stem.len() + 4);
    let mut prev: Option<char> = None;
    for c in stem.chars() {
        // Already-spaced input keeps a single separator.
        if c.is_ascii_uppercase() && prev.is_some_and(|p| !p.is_whitespace()) {
            label.push(' ');
        }
        label.push(c);
        prev = Some(c);
    }

    label.trim_start().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_strips_ordering_prefix() {
        assert_eq!(humanize("1_ReactOverview"), "React Overview");
        assert_eq!(humanize("7_Styling"), "Styling");
        assert_eq!(humanize("6_ListeningToEvents"), "Listening To Events");
    }

    #[test]
    fn test_humanize_without_underscore() {
        assert_eq!(humanize("Hooks"), "Hooks");
        assert_eq!(humanize("UseEffect"), "Use Effect");
        assert_eq!(humanize("lowercase"), "lowercase");
    }

    #[test]
    fn test_humanize_only_first_underscore_is_consumed() {
        assert_eq!(humanize("1_Deep_Dive"), "Deep_ Dive");
    }

    #[test]
    fn test_humanize_consecutive_capitals() {
        assert_eq!(humanize("0_ABC"), "A B C");
    }

    #[test]
    fn test_humanize_is_total() {
        assert_eq!(humanize(""), "");
        assert_eq!(humanize("_"), "");
        assert_eq!(humanize("5_"), "");
        assert_eq!(humanize("   Padded"), "Padded");
    }

    #[test]
    fn test_humanize_idempotent_on_spaced_input() {
        let once = humanize("6_ListeningToEvents");
        assert_eq!(humanize(&once), once);
        assert_eq!(humanize("React Overview"), "React Overview");
    }
}
