use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref RE: Regex = Regex::new(r"[\p{L}\p{M}\p{N}]+").expect("valid regex");
}

/// Tokenize text into lower-cased alphanumeric terms.
///
/// Text is NFKC-normalized before case folding, and anything that is not a
/// letter, combining mark or digit separates terms. Indexing and query parsing
/// both go through here, so the two sides always agree on what a term is.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    RE.find_iter(&normalized).map(|m| m.as_str().to_string()).collect()
}
