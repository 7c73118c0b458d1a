//! Number base conversion for the number-base panel.

use toolbox_model::{Result, ToolError};

use super::{PanelSection, PanelView, require_input};

/// A parsed integer: sign plus magnitude, so every base prints as
/// `-<prefix><digits>` rather than two's complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedNumber {
    pub negative: bool,
    pub magnitude: u64,
}

impl SignedNumber {
    fn sign(self) -> &'static str {
        if self.negative { "-" } else { "" }
    }
}

/// Parse an integer written in base 2 (`0b`), 8 (`0o`), 16 (`0x`) or 10,
/// with an optional leading `-`. `_` separators are ignored.
pub fn parse(input: &str) -> Result<SignedNumber> {
    let raw = require_input(input, "Please enter a number")?;
    let cleaned: String = raw.chars().filter(|c| *c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();
    let (negative, unsigned) = match lower.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, lower.as_str()),
    };
    let (digits, radix) = if let Some(rest) = unsigned.strip_prefix("0b") {
        (rest, 2)
    } else if let Some(rest) = unsigned.strip_prefix("0o") {
        (rest, 8)
    } else if let Some(rest) = unsigned.strip_prefix("0x") {
        (rest, 16)
    } else {
        (unsigned, 10)
    };
    // from_str_radix would take a second sign after the one stripped above.
    if digits.starts_with(['+', '-']) {
        return Err(ToolError::validation(
            format!("Invalid base {radix} number"),
            "unexpected sign",
        ));
    }
    let magnitude = u64::from_str_radix(digits, radix)
        .map_err(|e| ToolError::validation(format!("Invalid base {radix} number"), e))?;
    Ok(SignedNumber {
        negative: negative && magnitude != 0,
        magnitude,
    })
}

/// The number in all four bases; hexadecimal digits are uppercase.
pub fn view(input: &str) -> Result<PanelView> {
    let number = parse(input)?;
    let sign = number.sign();
    let value = number.magnitude;
    let bases = PanelSection::new("Bases")
        .with_entry("Binary", format!("{sign}{value:#b}"))
        .with_entry("Octal", format!("{sign}{value:#o}"))
        .with_entry("Decimal", format!("{sign}{value}"))
        .with_entry("Hexadecimal", format!("{sign}{value:#X}"));
    Ok(PanelView::new().with_section(bases))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positive(magnitude: u64) -> SignedNumber {
        SignedNumber {
            negative: false,
            magnitude,
        }
    }

    #[test]
    fn converts_between_bases() {
        let view = view("0xff").unwrap();
        let bases = view.section("Bases").unwrap();
        assert_eq!(bases.get("Binary"), Some("0b11111111"));
        assert_eq!(bases.get("Octal"), Some("0o377"));
        assert_eq!(bases.get("Decimal"), Some("255"));
        assert_eq!(bases.get("Hexadecimal"), Some("0xFF"));
        assert!(view.preview.is_none());
    }

    #[test]
    fn negative_numbers_keep_their_sign() {
        let view = view("-0x1A").unwrap();
        let bases = view.section("Bases").unwrap();
        assert_eq!(bases.get("Binary"), Some("-0b11010"));
        assert_eq!(bases.get("Octal"), Some("-0o32"));
        assert_eq!(bases.get("Decimal"), Some("-26"));
        assert_eq!(bases.get("Hexadecimal"), Some("-0x1A"));

        assert_eq!(
            parse("-5").unwrap(),
            SignedNumber {
                negative: true,
                magnitude: 5
            }
        );
        assert_eq!(parse("-0").unwrap(), positive(0));
    }

    #[test]
    fn accepts_prefixes_and_separators() {
        assert_eq!(parse("0b1010").unwrap(), positive(10));
        assert_eq!(parse("0O17").unwrap(), positive(15));
        assert_eq!(parse("1_000").unwrap(), positive(1000));
        assert_eq!(parse(&u64::MAX.to_string()).unwrap(), positive(u64::MAX));
    }

    #[test]
    fn rejects_bad_digits() {
        assert!(
            parse("0b102")
                .unwrap_err()
                .to_string()
                .starts_with("Invalid base 2 number: ")
        );
        assert_eq!(parse("").unwrap_err().to_string(), "Please enter a number");
        assert!(parse("--5").is_err());
        assert!(parse("-+5").is_err());
        assert!(parse("0x-5").is_err());
    }
}
