//! Reversible text encodings: base64, URL, hex, HTML entities, backslash
//! escapes.

use std::sync::LazyLock;

use base64::Engine as _;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use html_escape::decode_html_entities;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use regex::Regex;
use toolbox_model::{Mode, Result, ToolError};

/// Standard alphabet that accepts input with or without `=` padding.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode standard or URL-safe base64, padded or not, ignoring whitespace.
pub(crate) fn decode_base64_lenient(input: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    LENIENT_BASE64.decode(cleaned.as_bytes())
}

/// UTF-8 text to and from base64.
///
/// Decoding also accepts the URL-safe alphabet (`-` and `_`) and surrounding
/// whitespace.
pub fn base64(input: &str, mode: Mode) -> Result<String> {
    match mode {
        Mode::Encode => Ok(STANDARD.encode(input.as_bytes())),
        Mode::Decode => {
            let bytes = decode_base64_lenient(input)
                .map_err(|e| ToolError::validation("Invalid Base64 string", e))?;
            String::from_utf8(bytes).map_err(|_| {
                ToolError::validation("Invalid Base64 string", "decoded bytes are not UTF-8 text")
            })
        }
    }
}

/// `encodeURIComponent`'s reserved set, minus `:` and `/`.
const URL_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b':')
    .remove(b'/');

static PERCENT_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%([0-9A-Fa-f]{2})?").expect("valid escape regex"));

/// Percent-encoding with `+` for spaces; `:` and `/` stay readable.
pub fn url(input: &str, mode: Mode) -> Result<String> {
    match mode {
        Mode::Encode => Ok(utf8_percent_encode(input, URL_COMPONENT)
            .to_string()
            .replace("%20", "+")),
        Mode::Decode => url_decode(input),
    }
}

fn url_decode(input: &str) -> Result<String> {
    let invalid = |message: String| ToolError::validation("Invalid URL encoding", message);
    if let Some(bad) = PERCENT_ESCAPE
        .captures_iter(input)
        .find(|caps| caps.get(1).is_none())
    {
        let start = bad.get(0).map_or(0, |m| m.start());
        let escape: String = input[start..].chars().take(3).collect();
        return Err(invalid(format!("'{escape}' is not a valid escape")));
    }
    let spaced = input.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .map_err(|_| invalid("escapes do not form UTF-8 text".to_string()))
}

/// Text to hex bytes (UTF-8) and back.
pub fn hex_ascii(input: &str, mode: Mode) -> Result<String> {
    match mode {
        Mode::Encode => Ok(hex::encode(input.as_bytes())),
        Mode::Decode => {
            let cleaned: String = input
                .trim()
                .trim_start_matches("0x")
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            let bytes = hex::decode(&cleaned).map_err(|e| ToolError::validation("Invalid hex string", e))?;
            String::from_utf8(bytes)
                .map_err(|_| ToolError::validation("Invalid hex string", "bytes are not UTF-8 text"))
        }
    }
}

/// Numeric HTML entities for `<`, `>`, `&` and U+00A0..=U+9999.
pub fn html_entity(input: &str, mode: Mode) -> Result<String> {
    match mode {
        Mode::Encode => Ok(input
            .chars()
            .map(|c| {
                if matches!(c, '<' | '>' | '&' | '\u{a0}'..='\u{9999}') {
                    format!("&#{};", c as u32)
                } else {
                    c.to_string()
                }
            })
            .collect()),
        Mode::Decode => Ok(decode_html_entities(input).into_owned()),
    }
}

/// Escape or unescape `\\`, `"`, `'`, tab, newline and carriage return.
pub fn backslash(input: &str, mode: Mode) -> Result<String> {
    let mut output = String::with_capacity(input.len());
    match mode {
        Mode::Encode => {
            for c in input.chars() {
                match c {
                    '\\' => output.push_str("\\\\"),
                    '"' => output.push_str("\\\""),
                    '\'' => output.push_str("\\'"),
                    '\t' => output.push_str("\\t"),
                    '\n' => output.push_str("\\n"),
                    '\r' => output.push_str("\\r"),
                    other => output.push(other),
                }
            }
        }
        Mode::Decode => {
            let mut chars = input.chars().peekable();
            while let Some(c) = chars.next() {
                if c != '\\' {
                    output.push(c);
                    continue;
                }
                let unescaped = match chars.peek() {
                    Some('\\') => '\\',
                    Some('"') => '"',
                    Some('\'') => '\'',
                    Some('t') => '\t',
                    Some('n') => '\n',
                    Some('r') => '\r',
                    _ => {
                        // Unknown escape: keep the backslash.
                        output.push('\\');
                        continue;
                    }
                };
                chars.next();
                output.push(unescaped);
            }
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn base64_decode_is_lenient() {
        assert_eq!(base64("héllo", Mode::Encode).unwrap(), "aMOpbGxv");
        assert_eq!(base64(" aMOpbGxv\n", Mode::Decode).unwrap(), "héllo");
        // URL-safe alphabet, no padding.
        assert_eq!(base64("Pz8-", Mode::Decode).unwrap(), "??>");
        assert_eq!(base64("Pz8_", Mode::Decode).unwrap(), "???");
        assert_eq!(base64("YQ", Mode::Decode).unwrap(), "a");
        assert!(
            base64("@@@", Mode::Decode)
                .unwrap_err()
                .to_string()
                .starts_with("Invalid Base64 string: ")
        );
    }

    #[test]
    fn url_keeps_colons_and_slashes() {
        assert_eq!(
            url("https://a.b/c d?x=1&y=ü", Mode::Encode).unwrap(),
            "https://a.b/c+d%3Fx%3D1%26y%3D%C3%BC"
        );
        assert_eq!(url("a+b%20c%2B", Mode::Decode).unwrap(), "a b c+");
        assert!(url("%zz", Mode::Decode).is_err());
        assert!(url("%4", Mode::Decode).is_err());
        assert_eq!(
            url("100%", Mode::Decode).unwrap_err().to_string(),
            "Invalid URL encoding: '%' is not a valid escape"
        );
        assert!(url("%C3", Mode::Decode).is_err());
        assert_eq!(url("~*'()!", Mode::Encode).unwrap(), "~*'()!");
    }

    #[test]
    fn hex_uses_utf8_bytes() {
        assert_eq!(hex_ascii("Hi!", Mode::Encode).unwrap(), "486921");
        assert_eq!(hex_ascii("48 69 21", Mode::Decode).unwrap(), "Hi!");
        assert_eq!(hex_ascii("0x4869", Mode::Decode).unwrap(), "Hi");
        assert!(hex_ascii("4g", Mode::Decode).is_err());
    }

    #[test]
    fn html_entities_cover_range_and_names() {
        assert_eq!(
            html_entity("<a> & é", Mode::Encode).unwrap(),
            "&#60;a&#62; &#38; &#233;"
        );
        assert_eq!(
            html_entity("&lt;b&gt; &#233; &#xE9; &amp; &bogus;", Mode::Decode).unwrap(),
            "<b> é é & &bogus;"
        );
    }

    #[test]
    fn html_entities_decode_every_named_entity() {
        assert_eq!(
            html_entity("caf&eacute; &hearts; &lt;", Mode::Decode).unwrap(),
            "café ♥ <"
        );
        assert_eq!(html_entity("&Omega;&rarr;&frac12;", Mode::Decode).unwrap(), "Ω→½");
    }

    #[test]
    fn backslash_escapes_round_trip() {
        let raw = "say \"hi\"\n\tit's C:\\";
        let escaped = backslash(raw, Mode::Encode).unwrap();
        assert_eq!(escaped, "say \\\"hi\\\"\\n\\tit\\'s C:\\\\");
        assert_eq!(backslash(&escaped, Mode::Decode).unwrap(), raw);
        assert_eq!(backslash("\\q", Mode::Decode).unwrap(), "\\q");
    }

    proptest! {
        #[test]
        fn base64_round_trips(text in "\\PC*") {
            let encoded = base64(&text, Mode::Encode).unwrap();
            prop_assert_eq!(base64(&encoded, Mode::Decode).unwrap(), text);
        }

        #[test]
        fn url_round_trips(text in "\\PC*") {
            let encoded = url(&text, Mode::Encode).unwrap();
            prop_assert!(!encoded.contains(' '));
            prop_assert_eq!(url(&encoded, Mode::Decode).unwrap(), text);
        }

        #[test]
        fn hex_round_trips_ascii(text in "[ -~]*") {
            let encoded = hex_ascii(&text, Mode::Encode).unwrap();
            prop_assert_eq!(hex_ascii(&encoded, Mode::Decode).unwrap(), text);
        }
    }
}
