//! Parsing primitives

use lazy_regex::regex;
use nom::{
    bytes::complete::{tag, take_until},
    sequence::{preceded, terminated},
    IResult, Parser,
};

/// Find the record type marker in a line, a `#` and a non-space run followed
/// by a space, eg. `#KONTO ` in `#KONTO 1930 "Kassa"`.
///
/// The marker can be anywhere in the value, the leftmost one is returned.
pub fn tag_marker(s: &str) -> Option<&str> {
    regex!(r"#\S+ ").find(s).map(|m| m.as_str())
}

/// Reduce a raw first column value to its record type marker if it has one,
/// otherwise leave it as is.
pub fn normalize_tag(s: &str) -> &str {
    tag_marker(s).unwrap_or(s)
}

/// Lone braces open and close the sub-record blocks of SIE files.
pub fn is_brace(s: &str) -> bool {
    s == "{" || s == "}"
}

/// Split the payload out of a browser upload value of the form
/// `data:<mime>;base64,<payload>`. Anything else gives `None`.
pub fn data_url_payload(s: &str) -> Option<&str> {
    fn header(s: &str) -> IResult<&str, &str> {
        preceded(tag("data:"), terminated(take_until(","), tag(","))).parse(s)
    }

    let Ok((payload, header)) = header(s) else {
        return None;
    };

    header.ends_with(";base64").then_some(payload)
}

/// Decode ISO-8859-1 text. Every byte is the code point of the same value,
/// so this can't fail.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_marker() {
        assert_eq!(tag_marker("#KONTO 1930 \"Kassa\""), Some("#KONTO "));
        assert_eq!(tag_marker("#TRANS 1930 {} 100"), Some("#TRANS "));
        assert_eq!(tag_marker("   #TRANS 1930 {} 100"), Some("#TRANS "));
        assert_eq!(tag_marker("#KONTO "), Some("#KONTO "));
        assert_eq!(tag_marker("#KONTO"), None);
        assert_eq!(tag_marker("# KONTO"), None);
        assert_eq!(tag_marker("KONTO 1930"), None);
        assert_eq!(tag_marker(""), None);
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("#KONTO 1930 Cash"), "#KONTO ");
        assert_eq!(normalize_tag("plain"), "plain");
        assert_eq!(normalize_tag("#FLAGGA"), "#FLAGGA");

        for s in ["#KONTO 1930 Cash", "#VER A 1 20240101", "x", "#X "] {
            let once = normalize_tag(s);
            assert_eq!(normalize_tag(once), once);
        }
    }

    #[test]
    fn test_is_brace() {
        assert!(is_brace("{"));
        assert!(is_brace("}"));
        assert!(!is_brace("{}"));
        assert!(!is_brace(" {"));
        assert!(!is_brace(""));
    }

    #[test]
    fn test_data_url_payload() {
        assert_eq!(
            data_url_payload("data:text/csv;base64,I0tPTlRP"),
            Some("I0tPTlRP")
        );
        assert_eq!(
            data_url_payload("data:application/octet-stream;base64,"),
            Some("")
        );
        assert_eq!(data_url_payload("data:text/csv,plain"), None);
        assert_eq!(data_url_payload("I0tPTlRP"), None);
        assert_eq!(data_url_payload("data:text/csv;base64"), None);
    }

    #[test]
    fn test_decode_latin1() {
        assert_eq!(decode_latin1(b"abc"), "abc");
        // "Försäljning" in ISO-8859-1.
        assert_eq!(
            decode_latin1(b"F\xf6rs\xe4ljning"),
            "F\u{f6}rs\u{e4}ljning"
        );
    }
}
