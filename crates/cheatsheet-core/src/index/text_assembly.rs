use crate::models::Sheet;

/// Fields scanned by full-text indexing and substring search, in that order.
pub(crate) fn indexed_fields(sheet: &Sheet) -> impl Iterator<Item = &str> {
    std::iter::once(sheet.name.as_str())
        .chain(sheet.categories.iter().map(String::as_str))
        .chain(sheet.keyword_path().unwrap_or_default().iter().map(String::as_str))
        .chain(std::iter::once(sheet.description.as_str()))
        .chain(std::iter::once(sheet.content.as_str()))
}

/// Fields scored by fuzzy search: the name, each category and each path
/// segment.
pub(crate) fn fuzzy_fields(sheet: &Sheet) -> impl Iterator<Item = &str> {
    std::iter::once(sheet.name.as_str())
        .chain(sheet.categories.iter().map(String::as_str))
        .chain(sheet.keyword_path().unwrap_or_default().iter().map(String::as_str))
}

/// Lowercased corpus text for vector ranking. The name is repeated so it
/// carries double weight.
#[cfg(feature = "tfidf")]
pub(crate) fn build_weighted_text(sheet: &Sheet) -> String {
    let path = sheet.keyword_path().unwrap_or_default();
    let mut text = String::with_capacity(
        sheet.name.len() * 2
            + sheet.categories.iter().map(String::len).sum::<usize>()
            + path.iter().map(String::len).sum::<usize>()
            + sheet.description.len()
            + sheet.content.len()
            + 5
            + sheet.categories.len()
            + path.len(),
    );
    text.push_str(&sheet.name);
    text.push(' ');
    text.push_str(&sheet.name);
    text.push(' ');
    text.push_str(&sheet.categories.join(" "));
    text.push(' ');
    text.push_str(&path.join(" "));
    text.push(' ');
    text.push_str(&sheet.description);
    text.push(' ');
    text.push_str(&sheet.content);
    text.to_lowercase()
}
