//! Case conversion and line/token text transforms.
//!
//! Everything here is a pure `&str -> String` rewrite, ASCII-oriented and
//! locale-independent by design (the word-boundary logic looks at ASCII
//! case, not Unicode word segmentation).
//!
//! Word splitting for the programmatic cases (camel/pascal/snake/kebab)
//! detects camelCase humps in addition to whitespace, hyphen, and underscore
//! delimiters, so `fooBar` converts to `foo-bar` and `foo_bar` just like
//! `foo bar` does. Acronym runs keep their grouping: `HTTPServer` splits as
//! `HTTP` + `Server`, and an all-caps token passes through camel/pascal
//! output unchanged (`HTTPServer` stays `HTTPServer` in pascal). Snake and
//! kebab lowercase everything. All four conversions are idempotent.
//!
//! ## Examples
//!
//! ```rust
//! use omniconv::text::{convert_case, CaseMode};
//!
//! assert_eq!(convert_case("helloWorld", CaseMode::Kebab), "hello-world");
//! assert_eq!(convert_case("hello_world", CaseMode::Pascal), "HelloWorld");
//! assert_eq!(convert_case("HELLO world", CaseMode::Title), "Hello World");
//! ```

use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target convention for [`convert_case`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    Upper,
    Lower,
    Title,
    Sentence,
    Camel,
    Pascal,
    Snake,
    Kebab,
}

impl CaseMode {
    /// Every case mode, in canonical order.
    pub const ALL: &'static [CaseMode] = &[
        CaseMode::Upper,
        CaseMode::Lower,
        CaseMode::Title,
        CaseMode::Sentence,
        CaseMode::Camel,
        CaseMode::Pascal,
        CaseMode::Snake,
        CaseMode::Kebab,
    ];

    /// Canonical lowercase key for this mode.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            CaseMode::Upper => "upper",
            CaseMode::Lower => "lower",
            CaseMode::Title => "title",
            CaseMode::Sentence => "sentence",
            CaseMode::Camel => "camel",
            CaseMode::Pascal => "pascal",
            CaseMode::Snake => "snake",
            CaseMode::Kebab => "kebab",
        }
    }
}

impl FromStr for CaseMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "upper" | "uppercase" => Ok(CaseMode::Upper),
            "lower" | "lowercase" => Ok(CaseMode::Lower),
            "title" | "titlecase" => Ok(CaseMode::Title),
            "sentence" | "sentencecase" => Ok(CaseMode::Sentence),
            "camel" | "camelcase" => Ok(CaseMode::Camel),
            "pascal" | "pascalcase" => Ok(CaseMode::Pascal),
            "snake" | "snakecase" | "snake_case" => Ok(CaseMode::Snake),
            "kebab" | "kebabcase" | "kebab-case" => Ok(CaseMode::Kebab),
            _ => Err(Error::unsupported_mode("case mode", s)),
        }
    }
}

impl fmt::Display for CaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Splits text into words for the programmatic case conventions.
///
/// Boundaries: any non-alphanumeric run, a lower-to-upper hump
/// (`fooBar`), a digit-to-letter edge, and the end of an acronym run
/// (`HTTPServer` → `HTTP`, `Server`). Original casing is preserved.
#[must_use]
pub fn split_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = text.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if !current.is_empty() {
            let prev = chars[i - 1];
            let hump = prev.is_lowercase() && c.is_uppercase();
            let digit_edge = prev.is_ascii_digit() != c.is_ascii_digit();
            let acronym_end = prev.is_uppercase()
                && c.is_uppercase()
                && chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if hump || digit_edge || acronym_end {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

fn capitalize(word: &str) -> String {
    // Acronym tokens pass through unchanged; downcasing their tail would
    // make the camel/pascal conversions unstable under re-application
    // ("A A" -> "AA" -> "Aa").
    if is_all_caps(word) {
        return word.to_string();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Rewrites `text` in the given case convention.
///
/// Upper/lower/title/sentence work on the text in place, preserving
/// whitespace and punctuation. Camel/pascal/snake/kebab re-tokenize via
/// [`split_words`] and rebuild.
///
/// # Examples
///
/// ```rust
/// use omniconv::text::{convert_case, CaseMode};
///
/// assert_eq!(convert_case("user HTTPResponse 2x", CaseMode::Snake), "user_http_response_2_x");
/// assert_eq!(convert_case("it was. a dark night.", CaseMode::Sentence), "It was. A dark night.");
/// ```
#[must_use]
pub fn convert_case(text: &str, mode: CaseMode) -> String {
    match mode {
        CaseMode::Upper => text.to_uppercase(),
        CaseMode::Lower => text.to_lowercase(),
        CaseMode::Title => {
            let mut out = String::with_capacity(text.len());
            let mut at_word_start = true;
            for c in text.chars() {
                if c.is_alphanumeric() {
                    if at_word_start {
                        out.extend(c.to_uppercase());
                    } else {
                        out.extend(c.to_lowercase());
                    }
                    at_word_start = false;
                } else {
                    at_word_start = true;
                    out.push(c);
                }
            }
            out
        }
        CaseMode::Sentence => {
            let mut out = String::with_capacity(text.len());
            let mut at_sentence_start = true;
            for c in text.chars() {
                if c.is_alphanumeric() {
                    if at_sentence_start {
                        out.extend(c.to_uppercase());
                        at_sentence_start = false;
                    } else {
                        out.extend(c.to_lowercase());
                    }
                } else {
                    if matches!(c, '.' | '!' | '?') {
                        at_sentence_start = true;
                    }
                    out.push(c);
                }
            }
            out
        }
        CaseMode::Camel => {
            let words = split_words(text);
            let mut iter = words.iter();
            let mut out = iter.next().map(|w| w.to_lowercase()).unwrap_or_default();
            for word in iter {
                out.push_str(&capitalize(word));
            }
            out
        }
        CaseMode::Pascal => split_words(text).iter().map(|w| capitalize(w)).collect(),
        CaseMode::Snake => split_words(text)
            .iter()
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join("_"),
        CaseMode::Kebab => split_words(text)
            .iter()
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join("-"),
    }
}

/// What [`reverse_text`] reverses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReverseMode {
    /// Reverse the sequence of `char`s. Not grapheme-aware: combining marks
    /// and emoji sequences may reorder (documented limitation).
    Characters,
    /// Reverse whitespace-separated token order; token contents untouched.
    Words,
}

/// Reverses text by characters or by words.
///
/// # Examples
///
/// ```rust
/// use omniconv::text::{reverse_text, ReverseMode};
///
/// assert_eq!(reverse_text("hello world", ReverseMode::Characters), "dlrow olleh");
/// assert_eq!(reverse_text("hello big world", ReverseMode::Words), "world big hello");
/// ```
#[must_use]
pub fn reverse_text(text: &str, mode: ReverseMode) -> String {
    match mode {
        ReverseMode::Characters => text.chars().rev().collect(),
        ReverseMode::Words => text.split_whitespace().rev().collect::<Vec<_>>().join(" "),
    }
}

/// Removes duplicate lines, keeping the first occurrence of each in order.
///
/// # Examples
///
/// ```rust
/// use omniconv::text::dedup_lines;
///
/// assert_eq!(dedup_lines("a\nb\na\nc"), "a\nb\nc");
/// ```
#[must_use]
pub fn dedup_lines(text: &str) -> String {
    let mut seen = std::collections::HashSet::new();
    text.lines()
        .filter(|line| seen.insert(*line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Line ordering for [`sort_lines`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(Error::unsupported_mode("sort order", s)),
        }
    }
}

/// Sorts lines lexicographically.
///
/// # Examples
///
/// ```rust
/// use omniconv::text::{sort_lines, SortOrder};
///
/// assert_eq!(sort_lines("pear\napple\nbanana", SortOrder::Ascending), "apple\nbanana\npear");
/// ```
#[must_use]
pub fn sort_lines(text: &str, order: SortOrder) -> String {
    let mut lines: Vec<&str> = text.lines().collect();
    lines.sort_unstable();
    if order == SortOrder::Descending {
        lines.reverse();
    }
    lines.join("\n")
}

/// Prefixes each line with a number, counting from `start_from`.
///
/// # Examples
///
/// ```rust
/// use omniconv::text::number_lines;
///
/// assert_eq!(number_lines("a\nb", 1), "1. a\n2. b");
/// assert_eq!(number_lines("a\nb", 10), "10. a\n11. b");
/// ```
#[must_use]
pub fn number_lines(text: &str, start_from: usize) -> String {
    text.lines()
        .enumerate()
        .map(|(i, line)| format!("{}. {}", start_from + i, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// How [`replace`] interprets the search pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplaceMode {
    /// Plain substring match. Never fails.
    Literal,
    /// Regular expression match; `$1`-style group references work in the
    /// replacement.
    Regex,
}

/// Replaces every occurrence of `pattern` in `text`.
///
/// # Errors
///
/// Regex mode returns [`Error::InvalidPattern`] when the pattern fails to
/// compile; literal mode never fails.
///
/// # Examples
///
/// ```rust
/// use omniconv::text::{replace, ReplaceMode};
///
/// let out = replace("a1 b2 c3", r"([a-z])(\d)", "$2$1", ReplaceMode::Regex).unwrap();
/// assert_eq!(out, "1a 2b 3c");
///
/// assert!(replace("x", "(", "", ReplaceMode::Regex).is_err());
/// assert_eq!(replace("x", "(", "[", ReplaceMode::Literal).unwrap(), "x");
/// ```
pub fn replace(text: &str, pattern: &str, replacement: &str, mode: ReplaceMode) -> Result<String> {
    match mode {
        ReplaceMode::Literal => Ok(text.replace(pattern, replacement)),
        ReplaceMode::Regex => {
            let re = Regex::new(pattern).map_err(Error::invalid_pattern)?;
            Ok(re.replace_all(text, replacement).into_owned())
        }
    }
}

/// Percentage of whitespace-separated words equal to `keyword`,
/// case-insensitively.
///
/// Returns 0.0 for empty text or an empty keyword.
///
/// # Examples
///
/// ```rust
/// use omniconv::text::keyword_density;
///
/// let density = keyword_density("the cat sat on the mat the", "the");
/// assert!((density - 42.857142857142854).abs() < 1e-9);
/// ```
#[must_use]
pub fn keyword_density(text: &str, keyword: &str) -> f64 {
    if keyword.is_empty() {
        return 0.0;
    }
    let mut total = 0usize;
    let mut hits = 0usize;
    for word in text.split_whitespace() {
        total += 1;
        if word.eq_ignore_ascii_case(keyword) {
            hits += 1;
        }
    }
    if total == 0 {
        return 0.0;
    }
    hits as f64 / total as f64 * 100.0
}

/// Size summary of a text buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub chars: usize,
    pub chars_no_whitespace: usize,
    pub words: usize,
    pub lines: usize,
    pub sentences: usize,
}

/// Counts characters, words, lines, and sentences.
///
/// Sentences are runs ending in `.`, `!`, or `?`; a trailing run without a
/// terminator still counts.
///
/// # Examples
///
/// ```rust
/// use omniconv::text::analyze;
///
/// let stats = analyze("Hi there. How are you?");
/// assert_eq!(stats.words, 5);
/// assert_eq!(stats.sentences, 2);
/// ```
#[must_use]
pub fn analyze(text: &str) -> TextStats {
    let mut sentences = 0;
    let mut in_sentence = false;
    for c in text.chars() {
        if matches!(c, '.' | '!' | '?') {
            if in_sentence {
                sentences += 1;
                in_sentence = false;
            }
        } else if !c.is_whitespace() {
            in_sentence = true;
        }
    }
    if in_sentence {
        sentences += 1;
    }

    TextStats {
        chars: text.chars().count(),
        chars_no_whitespace: text.chars().filter(|c| !c.is_whitespace()).count(),
        words: text.split_whitespace().count(),
        lines: if text.is_empty() { 0 } else { text.lines().count() },
        sentences,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words_boundaries() {
        assert_eq!(split_words("fooBar"), vec!["foo", "Bar"]);
        assert_eq!(split_words("foo_bar-baz qux"), vec!["foo", "bar", "baz", "qux"]);
        assert_eq!(split_words("HTTPServer"), vec!["HTTP", "Server"]);
        assert_eq!(split_words("v2Final"), vec!["v", "2", "Final"]);
        assert_eq!(split_words(""), Vec::<String>::new());
        assert_eq!(split_words("  --  "), Vec::<String>::new());
    }

    #[test]
    fn test_case_spec_examples() {
        assert_eq!(convert_case("helloWorld", CaseMode::Kebab), "hello-world");
        assert_eq!(convert_case("hello_world", CaseMode::Pascal), "HelloWorld");
    }

    #[test]
    fn test_case_modes() {
        let input = "hello wonderful world";
        assert_eq!(convert_case(input, CaseMode::Upper), "HELLO WONDERFUL WORLD");
        assert_eq!(convert_case(input, CaseMode::Title), "Hello Wonderful World");
        assert_eq!(convert_case(input, CaseMode::Camel), "helloWonderfulWorld");
        assert_eq!(convert_case(input, CaseMode::Snake), "hello_wonderful_world");
        assert_eq!(convert_case("MIXED case Text", CaseMode::Lower), "mixed case text");
    }

    #[test]
    fn test_sentence_case() {
        assert_eq!(
            convert_case("hello world. HOW are you? fine!", CaseMode::Sentence),
            "Hello world. How are you? Fine!"
        );
    }

    #[test]
    fn test_case_mode_keys_parse() {
        for mode in CaseMode::ALL {
            assert_eq!(mode.key().parse::<CaseMode>().unwrap(), *mode);
        }
        assert!("shouting".parse::<CaseMode>().is_err());
    }

    #[test]
    fn test_kebab_idempotent() {
        let once = convert_case("someUser_inputHere", CaseMode::Kebab);
        assert_eq!(convert_case(&once, CaseMode::Kebab), once);
    }

    #[test]
    fn test_pascal_camel_stable_on_all_caps_runs() {
        // Single-letter words join into an acronym run; re-converting must
        // not downcase it
        let once = convert_case("A A", CaseMode::Pascal);
        assert_eq!(once, "AA");
        assert_eq!(convert_case(&once, CaseMode::Pascal), "AA");

        assert_eq!(convert_case("HTTPServer", CaseMode::Pascal), "HTTPServer");
        assert_eq!(convert_case("fetch HTTP2 data", CaseMode::Camel), "fetchHTTP2Data");
        let once = convert_case("AB CD", CaseMode::Camel);
        assert_eq!(once, "abCD");
        assert_eq!(convert_case(&once, CaseMode::Camel), "abCD");
    }

    #[test]
    fn test_reverse() {
        assert_eq!(reverse_text("abc", ReverseMode::Characters), "cba");
        assert_eq!(reverse_text("one two three", ReverseMode::Words), "three two one");
        assert_eq!(reverse_text("", ReverseMode::Characters), "");
    }

    #[test]
    fn test_dedup_and_sort() {
        assert_eq!(dedup_lines("b\na\nb\nb\nc\na"), "b\na\nc");
        assert_eq!(sort_lines("b\na\nc", SortOrder::Ascending), "a\nb\nc");
        assert_eq!(sort_lines("b\na\nc", SortOrder::Descending), "c\nb\na");
    }

    #[test]
    fn test_number_lines_offsets() {
        assert_eq!(number_lines("x", 0), "0. x");
        assert_eq!(number_lines("x\ny\nz", 5), "5. x\n6. y\n7. z");
        assert_eq!(number_lines("", 1), "");
    }

    #[test]
    fn test_replace_literal_never_fails() {
        assert_eq!(
            replace("a.b.c", ".", "-", ReplaceMode::Literal).unwrap(),
            "a-b-c"
        );
        // A literal pattern that would be regex-invalid is fine
        assert_eq!(
            replace("f(x)", "(", "[", ReplaceMode::Literal).unwrap(),
            "f[x)"
        );
    }

    #[test]
    fn test_replace_regex() {
        assert_eq!(
            replace("a.b.c", r"\.", "-", ReplaceMode::Regex).unwrap(),
            "a-b-c"
        );
        let err = replace("x", "[unclosed", "", ReplaceMode::Regex).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }

    #[test]
    fn test_keyword_density_spec_example() {
        let density = keyword_density("the cat sat on the mat the", "the");
        assert!((density - 3.0 / 7.0 * 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_keyword_density_edges() {
        assert_eq!(keyword_density("", "the"), 0.0);
        assert_eq!(keyword_density("words here", ""), 0.0);
        assert_eq!(keyword_density("The THE the", "the"), 100.0);
    }

    #[test]
    fn test_analyze() {
        let stats = analyze("One two.\nThree!");
        assert_eq!(stats.words, 3);
        assert_eq!(stats.lines, 2);
        assert_eq!(stats.sentences, 2);
        assert_eq!(analyze("").words, 0);
        assert_eq!(analyze("").lines, 0);
        assert_eq!(analyze("no terminator").sentences, 1);
    }
}
