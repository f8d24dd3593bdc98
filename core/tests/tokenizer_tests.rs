use search_core::tokenizer::tokenize;

#[test]
fn it_lowercases_and_splits_on_punctuation() {
    let words = tokenize("Running-Shoes, RUN! runner's");
    assert_eq!(words, vec!["running", "shoes", "run", "runner", "s"]);
}

#[test]
fn it_normalizes_compatibility_forms() {
    // U+FB01 LATIN SMALL LIGATURE FI
    let words = tokenize("\u{FB01}tness");
    assert_eq!(words, vec!["fitness"]);
}

#[test]
fn it_keeps_unicode_letters() {
    let words = tokenize("Café Über");
    assert_eq!(words, vec!["café", "über"]);
}

#[test]
fn query_and_index_side_agree() {
    assert_eq!(tokenize("RED"), tokenize("red"));
}
