//! Color token parsing.
//!
//! Colors arrive as the tail of a `symbol#color` wire token: a 3- or 6-digit
//! hex run (with or without a leading `#`) or one of a fixed set of color
//! names. Everything resolves to normalized RGB here; no name survives past
//! this module.

use serde::Deserialize;
use serde::Serialize;

/// A normalized RGB color. Channels are in `0.0..=1.0`; rendering is always
/// fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
pub const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);
pub const ORANGE: Rgb = Rgb::new(1.0, 0.5, 0.0);
pub const YELLOW: Rgb = Rgb::new(1.0, 1.0, 0.0);
pub const GREEN: Rgb = Rgb::new(0.0, 1.0, 0.0);
pub const CYAN: Rgb = Rgb::new(0.0, 1.0, 1.0);
pub const BLUE: Rgb = Rgb::new(0.0, 0.0, 1.0);
pub const PURPLE: Rgb = Rgb::new(0.5, 0.0, 0.5);
pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
pub const GRAY: Rgb = Rgb::new(0.5, 0.5, 0.5);
/// Tint used when a token names a symbol but no color (#007AFF).
pub const ACCENT: Rgb = Rgb::new(0.0, 122.0 / 255.0, 1.0);

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parses one color token: hex (`f00`, `#f00`, `ff0000`, `#ff0000`) or a
    /// color name. Returns `None` when the token is neither.
    ///
    /// The hex candidate must be a pure hex-digit run of exactly 3 or 6
    /// characters. With a `#` prefix the candidate is everything up to a
    /// second `#`; without one it is the leading hex-digit run. Candidates of
    /// any other length fall through to name matching.
    pub fn parse(token: &str) -> Option<Rgb> {
        if let Some(rest) = token.strip_prefix('#') {
            let candidate = rest.split('#').next().unwrap_or("");
            if let Some(rgb) = decode_hex(candidate) {
                return Some(rgb);
            }
        } else {
            let run = token
                .as_bytes()
                .iter()
                .take_while(|byte| byte.is_ascii_hexdigit())
                .count();
            if let Some(rgb) = decode_hex(&token[..run]) {
                return Some(rgb);
            }
        }
        named(token)
    }
}

fn decode_hex(candidate: &str) -> Option<Rgb> {
    if !candidate.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return None;
    }
    match candidate.len() {
        3 => {
            let value = u32::from_str_radix(candidate, 16).ok()?;
            Some(Rgb::new(
                f64::from((value >> 8) & 0xF) / 15.0,
                f64::from((value >> 4) & 0xF) / 15.0,
                f64::from(value & 0xF) / 15.0,
            ))
        }
        6 => {
            let value = u32::from_str_radix(candidate, 16).ok()?;
            Some(Rgb::new(
                f64::from((value >> 16) & 0xFF) / 255.0,
                f64::from((value >> 8) & 0xFF) / 255.0,
                f64::from(value & 0xFF) / 255.0,
            ))
        }
        _ => None,
    }
}

fn named(token: &str) -> Option<Rgb> {
    match token.to_ascii_lowercase().as_str() {
        "white" => Some(WHITE),
        "red" => Some(RED),
        "orange" => Some(ORANGE),
        "yellow" => Some(YELLOW),
        "green" => Some(GREEN),
        "cyan" => Some(CYAN),
        "blue" => Some(BLUE),
        "purple" => Some(PURPLE),
        "black" => Some(BLACK),
        "gray" => Some(GRAY),
        "accent" => Some(ACCENT),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_digit_hex_with_prefix() {
        let rgb = Rgb::parse("#ff8000").unwrap();
        assert_eq!(rgb, Rgb::new(1.0, 128.0 / 255.0, 0.0));
    }

    #[test]
    fn test_six_digit_hex_without_prefix() {
        assert_eq!(Rgb::parse("ff0000"), Some(RED));
        assert_eq!(Rgb::parse("00ff00"), Some(GREEN));
        assert_eq!(Rgb::parse("0000ff"), Some(BLUE));
    }

    #[test]
    fn test_three_digit_hex_expands_per_nibble() {
        assert_eq!(Rgb::parse("f00"), Some(RED));
        assert_eq!(Rgb::parse("#0f0"), Some(GREEN));
        let rgb = Rgb::parse("8cf").unwrap();
        assert_eq!(rgb, Rgb::new(8.0 / 15.0, 12.0 / 15.0, 15.0 / 15.0));
    }

    #[test]
    fn test_hex_is_case_insensitive() {
        assert_eq!(Rgb::parse("FF0000"), Rgb::parse("ff0000"));
        assert_eq!(Rgb::parse("#AbCdEf"), Rgb::parse("#abcdef"));
    }

    #[test]
    fn test_wrong_length_hex_runs_are_rejected() {
        assert_eq!(Rgb::parse("ff00"), None);
        assert_eq!(Rgb::parse("#ff00f"), None);
        assert_eq!(Rgb::parse("ff00000"), None);
        assert_eq!(Rgb::parse("f"), None);
    }

    #[test]
    fn test_mixed_hex_and_garbage_is_rejected() {
        // The leading run "ff00" has length 4, so this is not green.
        assert_eq!(Rgb::parse("ff00zz"), None);
        assert_eq!(Rgb::parse("#ff00zz"), None);
    }

    #[test]
    fn test_prefixed_candidate_stops_at_second_hash() {
        assert_eq!(Rgb::parse("#ff0000#ignored"), Some(RED));
        assert_eq!(Rgb::parse("#f00#ignored"), Some(RED));
    }

    #[test]
    fn test_color_names() {
        assert_eq!(Rgb::parse("red"), Some(RED));
        assert_eq!(Rgb::parse("ORANGE"), Some(ORANGE));
        assert_eq!(Rgb::parse("Purple"), Some(PURPLE));
        assert_eq!(Rgb::parse("accent"), Some(ACCENT));
    }

    #[test]
    fn test_unknown_tokens_are_rejected() {
        assert_eq!(Rgb::parse(""), None);
        assert_eq!(Rgb::parse("#"), None);
        assert_eq!(Rgb::parse("notacolor"), None);
        assert_eq!(Rgb::parse("grey"), None);
    }

    #[test]
    fn test_name_lookalike_hex_prefers_hex() {
        // "add" and "fab" are pure hex runs of length 3, not names.
        assert_eq!(Rgb::parse("add"), decode_hex("add"));
        assert!(Rgb::parse("fab").is_some());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn six_digit_hex_always_parses(s in "[0-9a-fA-F]{6}") {
                let rgb = Rgb::parse(&s).expect("6-digit hex must parse");
                prop_assert!((0.0..=1.0).contains(&rgb.r));
                prop_assert!((0.0..=1.0).contains(&rgb.g));
                prop_assert!((0.0..=1.0).contains(&rgb.b));
            }

            #[test]
            fn three_digit_hex_always_parses(s in "[0-9a-fA-F]{3}") {
                prop_assert!(Rgb::parse(&s).is_some());
            }

            #[test]
            fn four_and_five_digit_hex_never_parses(s in "[0-9a-fA-F]{4,5}") {
                prop_assert_eq!(Rgb::parse(&s), None);
            }

            #[test]
            fn byte_channels_round_trip((r, g, b) in (any::<u8>(), any::<u8>(), any::<u8>())) {
                let token = format!("{r:02x}{g:02x}{b:02x}");
                let rgb = Rgb::parse(&token).expect("formatted hex must parse");
                prop_assert_eq!(
                    rgb,
                    Rgb::new(
                        f64::from(r) / 255.0,
                        f64::from(g) / 255.0,
                        f64::from(b) / 255.0
                    )
                );
            }

            #[test]
            fn prefix_never_changes_the_result(s in "[0-9a-fA-F]{3}|[0-9a-fA-F]{6}") {
                prop_assert_eq!(Rgb::parse(&s), Rgb::parse(&format!("#{s}")));
            }
        }
    }
}
