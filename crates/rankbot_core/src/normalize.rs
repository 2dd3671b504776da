//! Chat line normalization.

/// Turns a raw chat line (or a configured command key) into a command token.
///
/// The text is lowercased, every non-ASCII character is removed (not
/// replaced), and surrounding whitespace is trimmed. Trimming runs last so
/// that whitespace exposed by a removed character is also stripped, which
/// keeps the function idempotent.
///
/// # Examples
///
/// ```
/// use rankbot_core::normalize;
///
/// assert_eq!(normalize("  !Rank  "), "!rank");
/// assert_eq!(normalize("!rank 🔥"), "!rank");
/// assert_eq!(normalize("!rånk"), "!rnk");
/// ```
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let ascii: String = lowered.chars().filter(char::is_ascii).collect();
    ascii.trim().to_string()
}
