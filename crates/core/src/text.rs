use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:http|www)\S+").expect("url pattern"));

// Unicode punctuation plus the ASCII symbol set, minus the ASCII and
// typographic (U+2019) apostrophes.
static PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{P}[:punct:]&&[^'\x{2019}]]").expect("punctuation pattern"));

/// Cleans raw user text before scoring and translation.
///
/// URLs (`http...`, `https...`, `www...`, any case) are dropped up to the next
/// whitespace, punctuation other than `'` and `’` is removed, the result is
/// lowercased and trimmed. Interior whitespace is kept as-is.
///
/// The URL pass runs again after punctuation removal: stripping punctuation
/// can glue fragments such as `h.t.t.p.x` into a new match, and the second
/// pass keeps `normalize_text(normalize_text(x)) == normalize_text(x)`.
pub fn normalize_text(raw: &str) -> String {
    let without_urls = strip_urls(raw);
    let without_punctuation = PUNCT_RE.replace_all(&without_urls, "");
    let cleaned = strip_urls(&without_punctuation);

    cleaned.to_lowercase().trim().to_string()
}

fn strip_urls(input: &str) -> String {
    URL_RE.replace_all(input, "").into_owned()
}
