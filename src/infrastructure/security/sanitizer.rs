//! Markup stripping for user-submitted text.
//!
//! No tag or attribute survives: elements are removed, the bodies of
//! non-text elements (`script`, `style`, `textarea`, `option`, `noscript`)
//! and HTML comments are dropped, and zero-width formatting characters are
//! deleted. Entities are left as written. A `<` only opens a tag when a
//! letter, `/` or `!` follows it, so comparisons like `3 < 5` survive.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HTML_COMMENT: Regex = Regex::new(r"(?s)<!--.*?-->").expect("valid comment pattern");
    static ref NON_TEXT_ELEMENTS: Vec<Regex> = ["script", "style", "textarea", "option", "noscript"]
        .iter()
        .map(|tag| {
            Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>"))
                .expect("valid non-text element pattern")
        })
        .collect();
    static ref HTML_TAG: Regex = Regex::new(r"</?[A-Za-z!][^>]*>").expect("valid tag pattern");
    static ref INVISIBLE_CHARS: Regex =
        Regex::new(r"[\u{200B}-\u{200D}\u{FEFF}]").expect("valid invisible char pattern");
}

fn strip_once(input: &str) -> String {
    let mut text = HTML_COMMENT.replace_all(input, "").into_owned();
    for element in NON_TEXT_ELEMENTS.iter() {
        text = element.replace_all(&text, "").into_owned();
    }
    let text = HTML_TAG.replace_all(&text, "");
    INVISIBLE_CHARS.replace_all(&text, "").into_owned()
}

/// Returns `input` with all markup and invisible formatting characters removed.
///
/// Passes repeat until nothing changes, so removing one construct can never
/// leave a new one behind and the function is idempotent.
pub fn sanitize(input: &str) -> String {
    let mut current = strip_once(input);
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}
