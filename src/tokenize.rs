//! This is the text tokenization module
//! Provide lowercasing, stop-word filtering and unigram/bigram extraction

/// English stop words dropped before weighting. Question words (who, what,
/// how, ...) are included on purpose: they carry no information about which
/// record a query is about.
const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "also", "am", "an",
    "and", "any", "are", "as", "at", "be", "because", "been", "before",
    "being", "below", "between", "both", "but", "by", "can", "cannot",
    "could", "did", "do", "does", "doing", "down", "during", "each", "else",
    "few", "for", "from", "further", "had", "has", "have", "having", "he",
    "her", "here", "hers", "herself", "him", "himself", "his", "how", "if",
    "in", "into", "is", "it", "its", "itself", "just", "me", "more", "most",
    "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own",
    "same", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "themselves", "then", "there", "these",
    "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "whether", "which",
    "while", "who", "whom", "whose", "why", "will", "with", "would", "you",
    "your", "yours", "yourself", "yourselves",
];

/// Returns true if the token is an English stop word.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Splits text into lowercase word tokens with stop words removed.
///
/// A token is a run of alphanumeric characters at least two characters long;
/// single letters and punctuation are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 2)
        .filter(|t| !is_stop_word(t))
        .map(|t| t.to_string())
        .collect()
}

/// Produces the terms of a text: every unigram plus every bigram of adjacent
/// surviving tokens.
///
/// Stop words are removed *before* bigrams are formed, so "principal of APS"
/// yields the bigram "principal aps". This matches how the document
/// vocabulary is fitted, so queries and documents always land on the same
/// terms.
pub fn terms(text: &str) -> Vec<String> {
    let tokens = tokenize(text);
    let mut terms = tokens.clone();
    for pair in tokens.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms
}
