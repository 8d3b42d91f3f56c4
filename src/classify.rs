//! Fragment filename classification
//!
//! A file belongs to language `L` when its base name ends with `L.json` and
//! the character before `L` (if any) is `.` or `-`, or the name starts there.
//! So `en.json`, `common.en.json` and `common-en.json` all belong to `en`,
//! while `frozen.json` does not. Matching is case-sensitive.

/// Check whether `file_name` is a fragment of `language`.
pub fn matches_language(file_name: &str, language: &str) -> bool {
    if language.is_empty() {
        return false;
    }

    let suffix = format!("{language}.json");
    let Some(prefix) = file_name.strip_suffix(suffix.as_str()) else {
        return false;
    };

    prefix.is_empty() || prefix.ends_with('.') || prefix.ends_with('-')
}

/// Classify `file_name` against the configured languages.
///
/// Returns the first configured language whose pattern matches. A name can
/// only ever belong to one language; if several configured languages would
/// match, configuration order decides. Ambiguous configurations are not
/// validated.
pub fn classify<'a>(file_name: &str, languages: &'a [String]) -> Option<&'a str> {
    languages
        .iter()
        .map(String::as_str)
        .find(|language| matches_language(file_name, language))
}
