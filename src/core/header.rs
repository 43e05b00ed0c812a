//! Header block extraction for text artifacts.
//!
//! Skills, agents, commands and rule files may start with a block of
//! `key: value` lines between two `---` marker lines. The parser here is
//! deliberately permissive: it never fails, and anything it cannot make
//! sense of degrades to "no header" with the body left intact.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{CensusError, Probed};

/// Marker line that opens and closes a header block.
pub const HEADER_DELIMITER: &str = "---";

/// Ordered string-to-string mapping parsed from a header block.
///
/// Keys keep first-seen order. A repeated key overwrites the earlier value
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    entries: Vec<(String, String)>,
}

impl Header {
    /// Create an empty header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a key. `None` means the key is not present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a key, treating an empty value as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the header has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Header {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut header = Header::new();
        for (k, v) in iter {
            header.insert(k, v);
        }
        header
    }
}

impl Serialize for Header {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Result of splitting a text artifact into header and body.
#[derive(Debug)]
pub struct Extracted<'a> {
    /// `Found` when a complete block was parsed, `Absent` when the text has
    /// no opening marker, `Degraded` when the block is never closed.
    pub header: Probed<Header>,
    /// Body text with the header block removed. The full text unless a
    /// header was found.
    pub body: &'a str,
}

impl<'a> Extracted<'a> {
    /// Split into an optional header and the body.
    pub fn into_parts(self) -> (Option<Header>, &'a str) {
        (self.header.into_option(), self.body)
    }
}

/// Split an optional leading header block from `content`.
///
/// The first line must be exactly `---` (trailing whitespace allowed). The
/// block ends at the next line that is exactly `---`. Blank lines right after
/// the closing marker are not part of the body. Inside the block, every line
/// with a colon contributes `key: value` (both trimmed, split at the first
/// colon); other lines are skipped.
pub fn extract_header(content: &str) -> Extracted<'_> {
    let no_header = |header| Extracted {
        header,
        body: content,
    };

    let Some(after_open) = open_block(content) else {
        return no_header(Probed::Absent);
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        let line_end = offset + line.len();
        if line.trim_end() == HEADER_DELIMITER {
            let header = parse_block(&after_open[..offset]);
            let body = skip_blank_lines(&after_open[line_end..]);
            return Extracted {
                header: Probed::Found(header),
                body,
            };
        }
        offset = line_end;
    }

    no_header(Probed::Degraded(CensusError::malformed_header(
        "no closing delimiter",
    )))
}

/// Return the text after the opening marker line, if there is one.
fn open_block(content: &str) -> Option<&str> {
    let (first, rest) = match content.split_once('\n') {
        Some(split) => split,
        None => (content, ""),
    };
    (first.trim_end() == HEADER_DELIMITER).then_some(rest)
}

fn parse_block(block: &str) -> Header {
    block
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim(), value.trim()))
        .collect()
}

fn skip_blank_lines(mut text: &str) -> &str {
    while let Some((line, rest)) = text.split_once('\n') {
        if !line.trim().is_empty() {
            break;
        }
        text = rest;
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_basic_header() {
        let (header, body) = extract_header("---\na: 1\nb: two\n---\nBODY").into_parts();
        let header = header.unwrap();
        assert_eq!(header.get("a"), Some("1"));
        assert_eq!(header.get("b"), Some("two"));
        assert_eq!(header.len(), 2);
        assert_eq!(body, "BODY");
    }

    #[test]
    fn test_no_marker_returns_text_unchanged() {
        let text = "# Title\n\nname: not a header\n";
        let extracted = extract_header(text);
        assert!(matches!(extracted.header, Probed::Absent));
        assert_eq!(extracted.body, text);
    }

    #[test]
    fn test_empty_text() {
        let (header, body) = extract_header("").into_parts();
        assert!(header.is_none());
        assert_eq!(body, "");
    }

    #[test]
    fn test_unterminated_block_degrades() {
        let text = "---\nname: broken\nno closing marker";
        let extracted = extract_header(text);
        assert!(extracted.header.is_degraded());
        assert_eq!(extracted.body, text);
    }

    #[test]
    fn test_lines_without_colon_are_skipped() {
        let (header, _) = extract_header("---\nname: x\njust words\n- item\n---\n").into_parts();
        let header = header.unwrap();
        assert_eq!(header.len(), 1);
        assert_eq!(header.get("name"), Some("x"));
    }

    #[test]
    fn test_value_split_at_first_colon() {
        let (header, _) =
            extract_header("---\nurl: http://example.com:8080\n---\nbody").into_parts();
        assert_eq!(header.unwrap().get("url"), Some("http://example.com:8080"));
    }

    #[test]
    fn test_keys_and_values_trimmed() {
        let (header, _) =
            extract_header("---\n  allowed-tools :  Read, Grep  \n---\n").into_parts();
        assert_eq!(header.unwrap().get("allowed-tools"), Some("Read, Grep"));
    }

    #[test]
    fn test_repeated_key_overwrites_in_place() {
        let (header, _) = extract_header("---\na: 1\nb: 2\na: 3\n---\n").into_parts();
        let header = header.unwrap();
        let keys: Vec<_> = header.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(header.get("a"), Some("3"));
    }

    #[test]
    fn test_empty_block_is_empty_header() {
        let (header, body) = extract_header("---\n---\nBody").into_parts();
        assert!(header.unwrap().is_empty());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_blank_lines_after_closer_dropped() {
        let (_, body) = extract_header("---\na: 1\n---\n\n\nBody\n\nMore").into_parts();
        assert_eq!(body, "Body\n\nMore");
    }

    #[test]
    fn test_closer_with_trailing_whitespace_and_crlf() {
        let (header, body) = extract_header("---\r\na: 1\r\n---  \r\nBody").into_parts();
        assert_eq!(header.unwrap().get("a"), Some("1"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_closer_at_end_of_text() {
        let (header, body) = extract_header("---\na: 1\n---").into_parts();
        assert_eq!(header.unwrap().get("a"), Some("1"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_opening_line_must_be_exact_marker() {
        let text = "----\na: 1\n---\nbody";
        let (header, body) = extract_header(text).into_parts();
        assert!(header.is_none());
        assert_eq!(body, text);
    }

    #[test]
    fn test_indented_closer_does_not_close() {
        let text = "---\na: 1\n  ---\nbody";
        let extracted = extract_header(text);
        assert!(extracted.header.is_degraded());
    }

    #[test]
    fn test_header_lookup_absent_key() {
        let header: Header = [("name", "x"), ("description", "")].into_iter().collect();
        assert_eq!(header.get("model"), None);
        assert_eq!(header.get("description"), Some(""));
        assert_eq!(header.get_non_empty("description"), None);
    }

    #[test]
    fn test_header_serializes_in_order() {
        let header: Header = [("z", "1"), ("a", "2")].into_iter().collect();
        let json = serde_json::to_string(&header).unwrap();
        assert_eq!(json, r#"{"z":"1","a":"2"}"#);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_entries() -> impl Strategy<Value = Vec<(String, String)>> {
            prop::collection::vec(("[a-z][a-z-]{0,8}", "[A-Za-z0-9 ,./]{0,16}"), 0..6)
        }

        proptest! {
            // Property: well-formed blocks parse to their trimmed entries
            #[test]
            fn prop_well_formed_block_parses(
                entries in arb_entries(),
                body in "[A-Za-z#][A-Za-z0-9 \n]{0,40}",
            ) {
                let mut text = String::from("---\n");
                for (k, v) in &entries {
                    text.push_str(&format!("{k}: {v}\n"));
                }
                text.push_str("---\n");
                text.push_str(&body);

                let (header, parsed_body) = extract_header(&text).into_parts();
                let header = header.unwrap();
                let expected: Header = entries
                    .iter()
                    .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                    .collect();
                prop_assert_eq!(header, expected);
                prop_assert_eq!(parsed_body, body.as_str());
            }

            // Property: text without an opening marker passes through untouched
            #[test]
            fn prop_no_marker_is_identity(text in "[A-Za-z0-9 :\n-]{0,80}") {
                prop_assume!(!text.starts_with("---"));
                let extracted = extract_header(&text);
                prop_assert!(!extracted.header.is_found());
                prop_assert_eq!(extracted.body, text.as_str());
            }

            // Property: extraction never panics on arbitrary input
            #[test]
            fn prop_never_panics(text in "\\PC{0,120}") {
                let _ = extract_header(&text);
            }
        }
    }
}
