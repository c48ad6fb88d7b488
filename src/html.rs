//! Regex/scan-based HTML utilities: formatting, minification, entity
//! encoding, and link/image extraction.
//!
//! This is deliberately not an HTML parser. Tags are found by scanning for
//! `<...>` pairs and extraction runs on regular expressions, which is exactly
//! right for a convenience utility and exactly wrong for conformance:
//! malformed or deeply irregular markup can mis-indent or miss matches.
//! Growing this into a real DOM parser would change what the component is;
//! if that fidelity is ever needed it belongs in a new component with a
//! token/AST model, not here.
//!
//! Entity encoding covers a fixed six-character set (`& < > " ' /`), not the
//! HTML5 named-entity table.
//!
//! ## Examples
//!
//! ```rust
//! use omniconv::html::{format, minify};
//!
//! let pretty = format("<ul><li>one</li></ul>", 2);
//! assert_eq!(pretty, "<ul>\n  <li>\n    one\n  </li>\n</ul>");
//! assert_eq!(minify(&pretty), "<ul><li>one</li></ul>");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Elements that never take a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

fn comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("static pattern"))
}

fn after_tag_space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r">\s+").expect("static pattern"))
}

fn before_tag_space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+<").expect("static pattern"))
}

fn whitespace_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static pattern"))
}

fn anchor_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<a\b[^>]*\bhref\s*=\s*("([^"]*)"|'([^']*)')[^>]*>(.*?)</a>"#)
            .expect("static pattern")
    })
}

fn img_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<img\b[^>]*>").expect("static pattern"))
}

fn attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)\b([a-z-]+)\s*=\s*("([^"]*)"|'([^']*)')"#).expect("static pattern")
    })
}

fn strip_tags_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("static pattern"))
}

enum Token<'a> {
    Tag(&'a str),
    Text(&'a str),
}

/// Naive tag/text split: a tag runs from `<` to the next `>`. A `>` inside
/// a quoted attribute will fool it (accepted limitation).
fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = input;
    while !rest.is_empty() {
        match rest.find('<') {
            Some(open) => {
                if open > 0 {
                    tokens.push(Token::Text(&rest[..open]));
                }
                match rest[open..].find('>') {
                    Some(close) => {
                        tokens.push(Token::Tag(&rest[open..=open + close]));
                        rest = &rest[open + close + 1..];
                    }
                    None => {
                        // Unterminated tag: treat the remainder as text
                        tokens.push(Token::Text(&rest[open..]));
                        rest = "";
                    }
                }
            }
            None => {
                tokens.push(Token::Text(rest));
                rest = "";
            }
        }
    }
    tokens
}

fn tag_name(tag: &str) -> &str {
    let inner = tag.trim_start_matches('<').trim_start_matches('/');
    inner
        .split(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .next()
        .unwrap_or("")
}

fn is_closing(tag: &str) -> bool {
    tag.starts_with("</")
}

fn is_standalone(tag: &str) -> bool {
    tag.starts_with("<!")
        || tag.starts_with("<?")
        || tag.ends_with("/>")
        || VOID_ELEMENTS.contains(&tag_name(tag).to_ascii_lowercase().as_str())
}

/// Re-indents tag soup, one tag or text run per line.
///
/// Void elements, self-closing tags, comments, and doctypes do not change
/// the depth. Text runs are trimmed and printed at the depth of their
/// enclosing element. An unmatched closing tag clamps at depth zero rather
/// than underflowing.
///
/// # Examples
///
/// ```rust
/// use omniconv::html::format;
///
/// let out = format("<div><p>hi</p><br></div>", 2);
/// assert_eq!(out, "<div>\n  <p>\n    hi\n  </p>\n  <br>\n</div>");
/// ```
#[must_use]
pub fn format(input: &str, indent: usize) -> String {
    let mut lines = Vec::new();
    let mut depth = 0usize;
    for token in tokenize(input) {
        match token {
            Token::Tag(tag) => {
                let tag = tag.trim();
                if is_closing(tag) {
                    depth = depth.saturating_sub(1);
                    lines.push(format!("{}{}", " ".repeat(depth * indent), tag));
                } else if is_standalone(tag) {
                    lines.push(format!("{}{}", " ".repeat(depth * indent), tag));
                } else {
                    lines.push(format!("{}{}", " ".repeat(depth * indent), tag));
                    depth += 1;
                }
            }
            Token::Text(text) => {
                let text = whitespace_run_re().replace_all(text.trim(), " ");
                if !text.is_empty() {
                    lines.push(format!("{}{}", " ".repeat(depth * indent), text));
                }
            }
        }
    }
    lines.join("\n")
}

/// Collapses markup whitespace: strips HTML comments, drops whitespace
/// touching a tag boundary, and squeezes whitespace runs inside text to
/// single spaces.
///
/// For simple well-formed markup, `minify(format(x))` leaves tag and
/// attribute content untouched; only whitespace differs.
///
/// # Examples
///
/// ```rust
/// use omniconv::html::minify;
///
/// let out = minify("<div>\n  <!-- note -->\n  <p>some   text</p>\n</div>");
/// assert_eq!(out, "<div><p>some text</p></div>");
/// ```
#[must_use]
pub fn minify(input: &str) -> String {
    let out = comment_re().replace_all(input, "");
    let out = after_tag_space_re().replace_all(&out, ">");
    let out = before_tag_space_re().replace_all(&out, "<");
    let out = whitespace_run_re().replace_all(&out, " ");
    out.trim().to_string()
}

/// Encodes the fixed entity set: `&` `<` `>` `"` `'` `/`.
///
/// # Examples
///
/// ```rust
/// use omniconv::html::encode_entities;
///
/// assert_eq!(encode_entities("a < b & c"), "a &lt; b &amp; c");
/// ```
#[must_use]
pub fn encode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

/// Decodes the same fixed entity set as [`encode_entities`], plus the
/// common `&#39;` apostrophe alias. `&amp;` decodes last so that doubly
/// encoded text does not over-decode.
///
/// # Examples
///
/// ```rust
/// use omniconv::html::{decode_entities, encode_entities};
///
/// let original = "5 < 6 && \"quoted\"";
/// assert_eq!(decode_entities(&encode_entities(original)), original);
/// assert_eq!(decode_entities("&amp;lt;"), "&lt;");
/// ```
#[must_use]
pub fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&#x2F;", "/")
        .replace("&amp;", "&")
}

/// An anchor found by [`extract_links`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    /// Inner text with nested tags stripped and whitespace collapsed.
    pub text: String,
}

/// An image found by [`extract_images`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub src: String,
    pub alt: Option<String>,
}

/// Extracts `<a href>` targets with their inner text, in document order.
///
/// Anchors without an `href` attribute are skipped.
///
/// # Examples
///
/// ```rust
/// use omniconv::html::extract_links;
///
/// let links = extract_links(r#"<p><a href="/home"><b>Go</b> home</a></p>"#);
/// assert_eq!(links[0].href, "/home");
/// assert_eq!(links[0].text, "Go home");
/// ```
#[must_use]
pub fn extract_links(input: &str) -> Vec<Link> {
    anchor_re()
        .captures_iter(input)
        .map(|caps| {
            let href = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map(|m| m.as_str())
                .unwrap_or_default();
            let inner = caps.get(4).map(|m| m.as_str()).unwrap_or_default();
            let text = strip_tags_re().replace_all(inner, "");
            let text = whitespace_run_re().replace_all(text.trim(), " ");
            Link {
                href: href.to_string(),
                text: text.into_owned(),
            }
        })
        .collect()
}

/// Extracts `<img>` sources with their alt text, in document order.
///
/// Images without a `src` attribute are skipped; a missing `alt` is `None`.
///
/// # Examples
///
/// ```rust
/// use omniconv::html::extract_images;
///
/// let images = extract_images(r#"<img alt="logo" src="/logo.png"><img src="a.gif">"#);
/// assert_eq!(images[0].src, "/logo.png");
/// assert_eq!(images[0].alt.as_deref(), Some("logo"));
/// assert_eq!(images[1].alt, None);
/// ```
#[must_use]
pub fn extract_images(input: &str) -> Vec<Image> {
    img_re()
        .find_iter(input)
        .filter_map(|tag| {
            let mut src = None;
            let mut alt = None;
            for caps in attr_re().captures_iter(tag.as_str()) {
                let value = caps
                    .get(3)
                    .or_else(|| caps.get(4))
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();
                match caps.get(1).map(|m| m.as_str().to_ascii_lowercase()).as_deref() {
                    Some("src") => src = Some(value),
                    Some("alt") => alt = Some(value),
                    _ => {}
                }
            }
            src.map(|src| Image { src, alt })
        })
        .collect()
}
