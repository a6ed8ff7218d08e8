#[inline]
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Splits text into lowercase word tokens.
///
/// Every character that is neither a word character (alphanumeric or `_`) nor
/// whitespace acts as a separator, so `git-basics` yields `git` and `basics`.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[must_use]
pub(crate) fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}
