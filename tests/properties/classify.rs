//! Property tests for fragment filename classification.

use proptest::prelude::*;

use localepack::{classify, matches_language};

fn language_code() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z]{2}(-[A-Z]{2})?").unwrap()
}

fn name_stem() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_]{1,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `matches_language` never panics on arbitrary input.
    #[test]
    fn property_matches_language_never_panics(
        name in ".{0,64}",
        language in ".{0,16}"
    ) {
        let _ = matches_language(&name, &language);
    }

    /// PROPERTY: the documented naming convention always matches.
    #[test]
    fn property_conventional_names_match(
        stem in name_stem(),
        language in language_code(),
        dash in any::<bool>()
    ) {
        let separator = if dash { '-' } else { '.' };

        let bare = format!("{language}.json");
        let separated = format!("{stem}{separator}{language}.json");

        prop_assert!(matches_language(&bare, &language));
        prop_assert!(matches_language(&separated, &language));
    }

    /// PROPERTY: a language occurring mid-name without a separator never
    /// matches (no substring matching).
    #[test]
    fn property_no_substring_match(
        stem in proptest::string::string_regex("[a-z0-9_]{1,8}").unwrap(),
        language in language_code()
    ) {
        // Glue the stem directly onto the language: "xyzen.json"
        let glued = format!("{stem}{language}.json");
        // Unless the glue itself re-creates a valid boundary (stem ending
        // in '.' or '-' is excluded by the stem charset), this must fail.
        prop_assert!(!matches_language(&glued, &language));
    }

    /// PROPERTY: classify returns a language from the configured set.
    #[test]
    fn property_classify_returns_configured_language(
        name in ".{0,32}",
        languages in proptest::collection::vec(language_code(), 1..4)
    ) {
        if let Some(found) = classify(&name, &languages) {
            prop_assert!(languages.iter().any(|l| l == found));
        }
    }
}
