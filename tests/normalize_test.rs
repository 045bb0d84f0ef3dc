// tests/normalize_test.rs
//
// Property checks for text normalization.

use fakecheckr::normalize;
use proptest::prelude::*;

/// Letters, digits, ASCII punctuation and whitespace, with URL-ish pieces mixed in
fn article_text() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        "[a-zA-Z0-9]{1,8}",
        "[!-/:-@\\[-`{-~]{1,3}",
        "[ \t\n]{1,3}",
        Just("http://".to_string()),
        Just("https://Example.com/a?b=c".to_string()),
        Just("www".to_string()),
        Just("w.w.w".to_string()),
        "[àéîõüßΣ]{1,2}",
    ];
    prop::collection::vec(piece, 0..24).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn normalize_is_idempotent(s in article_text()) {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_is_idempotent_any_string(s in any::<String>()) {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_strips_ascii_punctuation(s in article_text()) {
        let out = normalize(&s);
        prop_assert!(!out.chars().any(|c| c.is_ascii_punctuation()), "{:?}", out);
    }

    #[test]
    fn normalize_collapses_whitespace(s in article_text()) {
        let out = normalize(&s);
        prop_assert!(!out.contains("  "));
        prop_assert_eq!(out.trim(), out.as_str());
        prop_assert!(!out.contains('\t') && !out.contains('\n'));
    }

    #[test]
    fn normalize_leaves_no_urls(s in article_text()) {
        let out = normalize(&s);
        prop_assert!(!out.contains("http://") && !out.contains("https://") && !out.contains("www"));
    }
}

#[test]
fn normalize_examples() {
    assert_eq!(
        normalize("SHOCKING: Secret government files reveal unbelievable truth they don't want you to know!"),
        "shocking secret government files reveal unbelievable truth they dont want you to know"
    );
    assert_eq!(
        normalize("The S&P 500 gained 1.2% while the Dow Jones increased by 0.8%."),
        "the sp 500 gained 12 while the dow jones increased by 08"
    );
    assert_eq!(normalize("Source: https://news.example.com/x (2024)"), "source 2024");
}
