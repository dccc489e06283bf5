//! Parsing of textual color notations
//!
//! Accepted forms (case-insensitive, surrounding whitespace ignored):
//! * `#RGB`, `#RRGGBB`, with or without the leading `#`
//! * `rgb(r, g, b)` and `rgba(r, g, b, a)` with channels in 0-255
//! * `hsl(h, s%, l%)` and `hsla(h, s%, l%, a)`
//!
//! Text is first classified into a [`ParsedColor`], which is then resolved
//! once into a [`Color`]. Nothing downstream looks at the string again.

use super::Color;
use crate::error::ParseError;

/// Result of reading a color notation, before it becomes a [`Color`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedColor {
    Hex { r: u8, g: u8, b: u8 },
    Rgb { r: u8, g: u8, b: u8, alpha: Option<f64> },
    Hsl { h: f64, s: f64, l: f64, alpha: Option<f64> },
}

impl From<ParsedColor> for Color {
    fn from(parsed: ParsedColor) -> Self {
        match parsed {
            ParsedColor::Hex { r, g, b } => Color::rgb8(r, g, b),
            ParsedColor::Rgb { r, g, b, alpha } => with_optional_alpha(Color::rgb8(r, g, b), alpha),
            ParsedColor::Hsl { h, s, l, alpha } => with_optional_alpha(Color::hsl(h, s, l), alpha),
        }
    }
}

fn with_optional_alpha(color: Color, alpha: Option<f64>) -> Color {
    match alpha {
        Some(a) => color.with_alpha(a),
        None => color,
    }
}

/// Parse a color from text
///
/// # Errors
///
/// Returns [`ParseError::Malformed`] for unrecognized notations,
/// [`ParseError::InvalidHex`] for bad hex digits or lengths and
/// [`ParseError::OutOfRange`] naming the offending component.
pub fn parse_color(text: &str) -> Result<Color, ParseError> {
    parse_notation(text).map(Color::from)
}

/// Classify and read a color notation without resolving it
pub fn parse_notation(text: &str) -> Result<ParsedColor, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    let lower = trimmed.to_ascii_lowercase();

    if let Some(hex) = lower.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| ParseError::InvalidHex {
            input: trimmed.to_string(),
        });
    }
    if let Some(args) = function_args(&lower, &["rgba", "rgb"]) {
        return parse_rgb(args, trimmed);
    }
    if let Some(args) = function_args(&lower, &["hsla", "hsl"]) {
        return parse_hsl(args, trimmed);
    }
    if matches!(lower.len(), 3 | 6) {
        if let Some(parsed) = parse_hex(&lower) {
            return Ok(parsed);
        }
    }

    Err(malformed(trimmed))
}

fn malformed(input: &str) -> ParseError {
    ParseError::Malformed {
        input: input.to_string(),
    }
}

/// Argument text of `name(...)` for the first matching name
fn function_args<'a>(text: &'a str, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| {
        text.strip_prefix(*name)?
            .trim_start()
            .strip_prefix('(')?
            .strip_suffix(')')
    })
}

fn parse_hex(digits: &str) -> Option<ParsedColor> {
    if !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        3 => {
            let mut it = digits.chars().map(|c| c.to_digit(16).map(|d| d as u8 * 17));
            Some(ParsedColor::Hex {
                r: it.next()??,
                g: it.next()??,
                b: it.next()??,
            })
        }
        6 => Some(ParsedColor::Hex {
            r: channel(&digits[0..2])?,
            g: channel(&digits[2..4])?,
            b: channel(&digits[4..6])?,
        }),
        _ => None,
    }
}

fn split_args(args: &str) -> Vec<&str> {
    args.split(',').map(str::trim).collect()
}

fn parse_rgb(args: &str, input: &str) -> Result<ParsedColor, ParseError> {
    let parts = split_args(args);
    if !matches!(parts.len(), 3 | 4) {
        return Err(malformed(input));
    }

    let channel = |field: &'static str, text: &str| -> Result<u8, ParseError> {
        let value: f64 = text.parse().map_err(|_| malformed(input))?;
        if !(0.0..=255.0).contains(&value) {
            return Err(ParseError::OutOfRange {
                field,
                value: text.to_string(),
            });
        }
        Ok(value.round() as u8)
    };

    Ok(ParsedColor::Rgb {
        r: channel("red", parts[0])?,
        g: channel("green", parts[1])?,
        b: channel("blue", parts[2])?,
        alpha: parts.get(3).map(|a| parse_alpha(a, input)).transpose()?,
    })
}

fn parse_hsl(args: &str, input: &str) -> Result<ParsedColor, ParseError> {
    let parts = split_args(args);
    if !matches!(parts.len(), 3 | 4) {
        return Err(malformed(input));
    }

    let hue_text = parts[0].strip_suffix("deg").unwrap_or(parts[0]).trim_end();
    let h: f64 = hue_text.parse().map_err(|_| malformed(input))?;
    if !h.is_finite() {
        return Err(ParseError::OutOfRange {
            field: "hue",
            value: parts[0].to_string(),
        });
    }

    let percent = |field: &'static str, text: &str| -> Result<f64, ParseError> {
        let number = text.strip_suffix('%').unwrap_or(text).trim_end();
        let value: f64 = number.parse().map_err(|_| malformed(input))?;
        if !(0.0..=100.0).contains(&value) {
            return Err(ParseError::OutOfRange {
                field,
                value: text.to_string(),
            });
        }
        Ok(value / 100.0)
    };

    Ok(ParsedColor::Hsl {
        h,
        s: percent("saturation", parts[1])?,
        l: percent("lightness", parts[2])?,
        alpha: parts.get(3).map(|a| parse_alpha(a, input)).transpose()?,
    })
}

fn parse_alpha(text: &str, input: &str) -> Result<f64, ParseError> {
    let (number, scale) = match text.strip_suffix('%') {
        Some(n) => (n.trim_end(), 100.0),
        None => (text, 1.0),
    };
    let value: f64 = number.parse().map_err(|_| malformed(input))?;
    let alpha = value / scale;
    if !(0.0..=1.0).contains(&alpha) {
        return Err(ParseError::OutOfRange {
            field: "alpha",
            value: text.to_string(),
        });
    }
    Ok(alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Channels, ColorSpace};

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_color("#FF0000").unwrap(), Color::rgb8(255, 0, 0));
        assert_eq!(parse_color("ff0000").unwrap(), Color::rgb8(255, 0, 0));
        assert_eq!(parse_color("#f00").unwrap(), Color::rgb8(255, 0, 0));
        assert_eq!(parse_color("  #336699 ").unwrap(), Color::rgb8(0x33, 0x66, 0x99));
        assert_eq!(parse_color("abc").unwrap(), Color::rgb8(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_parse_hex_invalid() {
        assert!(matches!(parse_color("#FF"), Err(ParseError::InvalidHex { .. })));
        assert!(matches!(parse_color("#GGGGGG"), Err(ParseError::InvalidHex { .. })));
        assert!(matches!(parse_color("#FF00001"), Err(ParseError::InvalidHex { .. })));
    }

    #[test]
    fn test_parse_rgb() {
        assert_eq!(parse_color("rgb(255, 0, 0)").unwrap(), Color::rgb8(255, 0, 0));
        assert_eq!(parse_color("RGB(1,2,3)").unwrap(), Color::rgb8(1, 2, 3));
        let c = parse_color("rgba(10, 20, 30, 0.5)").unwrap();
        assert_eq!(c, Color::rgb8(10, 20, 30).with_alpha(0.5));
    }

    #[test]
    fn test_parse_rgb_out_of_range_names_field() {
        assert_eq!(
            parse_color("rgb(0, 300, 0)"),
            Err(ParseError::OutOfRange {
                field: "green",
                value: "300".to_string()
            })
        );
        assert!(matches!(
            parse_color("rgba(0, 0, 0, 2)"),
            Err(ParseError::OutOfRange { field: "alpha", .. })
        ));
    }

    #[test]
    fn test_parse_hsl() {
        let c = parse_color("hsl(210, 50%, 40%)").unwrap();
        assert_eq!(c.channels, Channels::Hsl { h: 210.0, s: 0.5, l: 0.4 });
        assert_eq!(c.to_hex(), "#336699");

        let wrapped = parse_color("hsl(-150deg, 50%, 40%)").unwrap();
        assert_eq!(wrapped.space(), ColorSpace::Hsl);
        assert_eq!(wrapped.to_hex(), "#336699");

        let with_alpha = parse_color("hsla(0, 100%, 50%, 50%)").unwrap();
        assert_eq!(with_alpha.alpha, Some(0.5));
    }

    #[test]
    fn test_parse_hsl_out_of_range() {
        assert!(matches!(
            parse_color("hsl(0, 120%, 50%)"),
            Err(ParseError::OutOfRange { field: "saturation", .. })
        ));
        assert!(matches!(
            parse_color("hsl(0, 10%, -5%)"),
            Err(ParseError::OutOfRange { field: "lightness", .. })
        ));
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(parse_color(""), Err(ParseError::Empty));
        assert_eq!(parse_color("   "), Err(ParseError::Empty));
        for text in ["red", "rgb(1,2)", "rgb(a,b,c)", "hsl(1,2,3,4,5)", "cmyk(0,0,0,0)", "12345"] {
            assert!(
                matches!(parse_color(text), Err(ParseError::Malformed { .. })),
                "{} should be malformed",
                text
            );
        }
    }

    #[test]
    fn test_parse_notation_keeps_variant() {
        assert_eq!(
            parse_notation("#010203").unwrap(),
            ParsedColor::Hex { r: 1, g: 2, b: 3 }
        );
        assert!(matches!(parse_notation("rgb(1,2,3)").unwrap(), ParsedColor::Rgb { .. }));
    }
}
