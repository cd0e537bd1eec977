//! Word-boundary tokenization of prose fields.
//!
//! Every heuristic for spotting identifiers inside free text lives here so
//! rules only ever ask "is this token a register?" and never match regexes
//! of their own.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*\b").expect("WORD must compile"));

/// x86 and x86-64 general purpose, flags, vector and control registers.
///
/// Segment registers are two-letter words that collide with prose, so
/// they live in [`SEGMENT_REGISTER`] and only count in override syntax.
static X86_REGISTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:",
        r"[re]?(?:ax|bx|cx|dx|si|di|sp|bp|ip)",
        r"|[abcd][lh]|sil|dil|spl|bpl",
        r"|r(?:8|9|1[0-5])[dwb]?",
        r"|[re]flags",
        r"|[xyz]mm(?:[0-9]|[12][0-9]|3[01])",
        r"|mm[0-7]|st[0-7]|k[0-7]",
        r"|cr[0-8]|dr[0-7]",
        r")$"
    ))
    .expect("X86_REGISTER must compile")
});

static SEGMENT_REGISTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[cdefgs]s$").expect("SEGMENT_REGISTER must compile")
});

/// PascalCase with at least two capitalised humps, e.g. `DataBuffer`.
static PASCAL_CASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-z0-9]+(?:[A-Z][a-z0-9]*)+$").expect("PASCAL_CASE must compile")
});

static UPPER_SNAKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][A-Z0-9]*(?:_[A-Z0-9]+)+$").expect("UPPER_SNAKE must compile")
});

const STOPWORDS: &[&str] = &[
    "and", "any", "are", "but", "can", "does", "each", "for", "from", "has", "have", "into",
    "its", "must", "not", "should", "test", "that", "the", "then", "this", "when", "with",
    "without",
];

/// A word found in prose, with its byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    pub text: &'a str,
    pub start: usize,
}

/// Split text into identifier-shaped words.
pub fn words(text: &str) -> impl Iterator<Item = Word<'_>> {
    WORD.find_iter(text).map(|m| Word {
        text: m.as_str(),
        start: m.start(),
    })
}

/// Whether `token` names an x86/x86-64 register or one of `extra`.
pub fn is_register_name(token: &str, extra: &[String]) -> bool {
    X86_REGISTER.is_match(token) || extra.iter().any(|r| r.eq_ignore_ascii_case(token))
}

/// Whether `token` is a segment register (`cs`, `ds`, `es`, `fs`, `gs`, `ss`).
///
/// Callers decide the context: on its own the shape is too common in
/// prose to count as a register mention.
pub fn is_segment_register(token: &str) -> bool {
    SEGMENT_REGISTER.is_match(token)
}

/// Whether `token` looks like an error type name.
pub fn is_error_type_candidate(token: &str) -> bool {
    (token.len() > "_error".len() && token.ends_with("_error"))
        || (token.len() > "Error".len() && token.ends_with("Error"))
}

/// Whether `token` looks like a structure name.
///
/// Error-shaped names belong to the error type domain and are excluded.
pub fn is_structure_candidate(token: &str) -> bool {
    PASCAL_CASE.is_match(token) && !token.ends_with("Error")
}

/// Whether `token` looks like a symbolic constant.
pub fn is_constant_candidate(token: &str) -> bool {
    UPPER_SNAKE.is_match(token)
}

/// Find `phrase` in `text` as a whole-word match.
///
/// Used for declared names that contain spaces or other non-word
/// characters, which the word tokenizer would split apart.
/// ASCII case folding keeps byte offsets stable, so offsets found in the
/// folded text are valid in `text`.
pub fn contains_phrase(text: &str, phrase: &str, case_insensitive: bool) -> Option<usize> {
    if phrase.is_empty() {
        return None;
    }
    let (haystack, needle) = if case_insensitive {
        (text.to_ascii_lowercase(), phrase.to_ascii_lowercase())
    } else {
        (text.to_string(), phrase.to_string())
    };
    haystack
        .match_indices(needle.as_str())
        .map(|(start, _)| start)
        .find(|&start| boundary_ok(text, start, start + needle.len()))
}

fn boundary_ok(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    !before.is_some_and(is_word) && !after.is_some_and(is_word)
}

/// Significant tokens used to correlate edge cases with tests.
///
/// Lowercases, splits identifiers on underscores, drops short words and
/// stopwords, and strips a trailing plural `s`.
pub fn significant_tokens(text: &str) -> BTreeSet<String> {
    words(text)
        .flat_map(|w| w.text.split('_').map(str::to_ascii_lowercase).collect::<Vec<_>>())
        .filter(|t| t.len() >= 3 && !STOPWORDS.contains(&t.as_str()))
        .map(|t| singular(&t))
        .collect()
}

fn singular(token: &str) -> String {
    if token.len() > 3 && token.ends_with('s') && !token.ends_with("ss") {
        token[..token.len() - 1].to_string()
    } else {
        token.to_string()
    }
}
