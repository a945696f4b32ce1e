//! Word tokenization used for lexical overlap scoring.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

// Runs of Unicode word characters (letters, digits, underscore).
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());

/// Lowercase `text` and collect its distinct word tokens.
///
/// Anything that is not a word character separates tokens, so punctuation and
/// whitespace never appear in the result.
///
/// ```
/// use lexrag_retriever::retrieval::word_set;
///
/// let words = word_set("The cat, the CAT and the_dog!");
/// assert_eq!(words.len(), 4);
/// assert!(words.contains("cat"));
/// assert!(words.contains("the_dog"));
/// ```
pub fn word_set(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}
