//! Line-oriented `.env` parsing.
//!
//! Every line is handled on its own: there is no continuation, escaping or
//! interpolation. Lines that don't look like `KEY=VALUE` are skipped rather
//! than reported.

use tracing::trace;

use super::environment::ParsedEnvironment;

const QUOTES: [char; 2] = ['\'', '"'];

/// Parses `.env` text into an ordered mapping.
///
/// Later assignments to the same key win. Inline comments are cut at the
/// first `#` on the line, even when that `#` sits inside a quoted value:
///
/// ```
/// let env = rootenv::parse_lines("A='x#y'\nB = \"two\" # note\nJUSTATOKEN");
/// assert_eq!(env.get("A"), Some("x"));
/// assert_eq!(env.get("B"), Some("two"));
/// assert!(!env.contains_key("JUSTATOKEN"));
/// ```
pub fn parse_lines(content: &str) -> ParsedEnvironment {
    let mut env = ParsedEnvironment::new();

    for (idx, raw) in split_lines(content).enumerate() {
        match classify(raw) {
            Line::Pair { key, value } => {
                env.insert(key, value);
            }
            Line::Malformed => trace!(line = idx + 1, "skipping line without '='"),
            Line::Blank | Line::Comment => {}
        }
    }

    env
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Comment,
    Malformed,
    Pair { key: &'a str, value: &'a str },
}

fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim();
    if line.is_empty() {
        return Line::Blank;
    }
    if line.starts_with('#') {
        return Line::Comment;
    }

    let (line, cut) = match line.find('#') {
        Some(pos) => (line[..pos].trim(), &line[pos..]),
        None => (line, ""),
    };

    let Some((key, value)) = line.split_once('=') else {
        return Line::Malformed;
    };

    Line::Pair {
        key: key.trim(),
        value: unquote(value.trim(), cut),
    }
}

/// Strips one layer of matching single or double quotes.
///
/// `cut` is the text removed by the inline-comment strip. When it holds the
/// closing partner of the value's opening quote, the `#` landed inside the
/// quoted value and the dangling opening quote is dropped.
fn unquote<'a>(value: &'a str, cut: &str) -> &'a str {
    for quote in QUOTES {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }

    for quote in QUOTES {
        if let Some(rest) = value.strip_prefix(quote) {
            if !rest.contains(quote) && cut.contains(quote) {
                return rest;
            }
        }
    }

    value
}

/// Splits on `\r\n`, `\n` or a lone `\r`.
fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(content);
    std::iter::from_fn(move || {
        let text = rest?;
        match text.find(|c: char| c == '\r' || c == '\n') {
            Some(pos) => {
                let width = if text[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&text[pos + width..]);
                Some(&text[..pos])
            }
            None => {
                rest = None;
                Some(text)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair<'a>(key: &'a str, value: &'a str) -> Line<'a> {
        Line::Pair { key, value }
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(classify("   \t "), Line::Blank);
        assert_eq!(classify("# full comment"), Line::Comment);
        assert_eq!(classify("   #indented"), Line::Comment);
    }

    #[test]
    fn test_malformed_lines() {
        assert_eq!(classify("JUSTATOKEN"), Line::Malformed);
        assert_eq!(classify("KEY # =not an assignment"), Line::Malformed);
    }

    #[test]
    fn test_inline_comment_is_stripped() {
        assert_eq!(classify("KEY=value # trailing comment"), pair("KEY", "value"));
        assert_eq!(classify("KEY=value#tight"), pair("KEY", "value"));
    }

    #[test]
    fn test_key_and_value_are_trimmed() {
        assert_eq!(classify("  KEY  =  spaced out  "), pair("KEY", "spaced out"));
    }

    #[test]
    fn test_split_on_first_equals_only() {
        assert_eq!(classify("URL=a=b=c"), pair("URL", "a=b=c"));
        assert_eq!(classify("A==b"), pair("A", "=b"));
        assert_eq!(classify("=orphan"), pair("", "orphan"));
        assert_eq!(classify("EMPTY="), pair("EMPTY", ""));
    }

    #[test]
    fn test_quote_stripping() {
        assert_eq!(classify("KEY='hello'"), pair("KEY", "hello"));
        assert_eq!(classify("KEY=\"hello\""), pair("KEY", "hello"));
        assert_eq!(classify("KEY=hello"), pair("KEY", "hello"));
        assert_eq!(classify("KEY=\"mismatched'"), pair("KEY", "\"mismatched'"));
        assert_eq!(classify("KEY=\"\""), pair("KEY", ""));
        assert_eq!(classify("KEY=\""), pair("KEY", "\""));
    }

    #[test]
    fn test_only_one_quote_layer_is_removed() {
        assert_eq!(classify("KEY=\"'inner'\""), pair("KEY", "'inner'"));
        assert_eq!(classify("KEY='\"inner\"'"), pair("KEY", "\"inner\""));
    }

    #[test]
    fn test_hash_inside_quotes_truncates() {
        assert_eq!(
            classify("DB_PASS=\"s3cr3t#notacomment\"   # real comment"),
            pair("DB_PASS", "s3cr3t")
        );
        assert_eq!(classify("KEY='a#b'"), pair("KEY", "a"));
    }

    #[test]
    fn test_trailing_comment_keeps_unpaired_quote() {
        assert_eq!(
            classify("KEY=\"mismatched' # note"),
            pair("KEY", "\"mismatched'")
        );
        assert_eq!(classify("KEY=\"abc # note"), pair("KEY", "\"abc"));
        assert_eq!(classify("KEY=\"abc"), pair("KEY", "\"abc"));
        assert_eq!(classify("KEY='abc # it's"), pair("KEY", "abc"));
    }

    #[test]
    fn test_split_lines_handles_all_breaks() {
        let lines: Vec<_> = split_lines("a\nb\r\nc\rd").collect();
        assert_eq!(lines, vec!["a", "b", "c", "d"]);

        let trailing: Vec<_> = split_lines("a\n").collect();
        assert_eq!(trailing, vec!["a", ""]);
    }

    #[test]
    fn test_parse_lines_last_write_wins() {
        let env = parse_lines("A=1\nB=x\nA=2\n");
        assert_eq!(env.get("A"), Some("2"));
        assert_eq!(env.keys().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_parse_lines_mixed_line_endings() {
        let env = parse_lines("A=1\r\nB=2\rC=3\n# done");
        assert_eq!(env.len(), 3);
        assert_eq!(env.get("B"), Some("2"));
        assert_eq!(env.get("C"), Some("3"));
    }

    #[test]
    fn test_parse_lines_empty_input() {
        assert!(parse_lines("").is_empty());
        assert!(parse_lines("\n\n# only comments\n").is_empty());
    }
}
