//! Symbol token resolution.
//!
//! A symbol token is `id` or `id#color`. Resolution is strict and is checked
//! against a host-provided catalog; the legacy color-word table from the
//! older color-only protocol lives here too, as the final fallback for bare
//! single tokens.

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::color;
use crate::color::Rgb;

/// Outline circle; also the glyph behind the universal fallback.
pub const GLYPH_CIRCLE: &str = "circle";
/// Small dot inside an outline circle.
pub const GLYPH_DOT: &str = "smallcircle.filled.circle";
/// Small dot inside a filled circle.
pub const GLYPH_DOT_FILLED: &str = "smallcircle.filled.circle.fill";
/// Filled exclamation-mark badge.
pub const GLYPH_EXCLAMATION: &str = "exclamationmark.circle.fill";
/// Filled question-mark badge.
pub const GLYPH_QUESTION: &str = "questionmark.circle.fill";

/// Existence check against the host's glyph set.
pub trait SymbolCatalog: Send + Sync {
    fn contains(&self, id: &str) -> bool;
}

impl SymbolCatalog for HashSet<String> {
    fn contains(&self, id: &str) -> bool {
        HashSet::contains(self, id)
    }
}

/// A displayable glyph: a catalog id plus its tint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolSpec {
    pub id: String,
    pub color: Rgb,
}

impl SymbolSpec {
    pub fn new(id: impl Into<String>, color: Rgb) -> Self {
        Self {
            id: id.into(),
            color,
        }
    }

    /// Shown for a single token that matched nothing at all.
    pub fn fallback() -> Self {
        Self::new(GLYPH_CIRCLE, color::RED)
    }

    /// Shown when a whole symbol list resolved to nothing.
    pub fn unknown() -> Self {
        Self::new(GLYPH_QUESTION, color::GRAY)
    }
}

/// Strict resolution of one token. `id` must be in the catalog, and
/// `id#color` must name both a cataloged symbol and a parseable color;
/// anything else is `None`. Callers decide between dropping the token
/// (comma lists) and falling back (single commands).
///
/// Only the text between the first and second `#` counts as the color.
pub fn resolve(token: &str, catalog: &dyn SymbolCatalog) -> Option<SymbolSpec> {
    let token = token.trim();
    match token.split_once('#') {
        Some((id, color_part)) => {
            let id = id.trim();
            let rgb = Rgb::parse(color_part.trim())?;
            if catalog.contains(id) {
                Some(SymbolSpec::new(id, rgb))
            } else {
                None
            }
        }
        None => catalog
            .contains(token)
            .then(|| SymbolSpec::new(token, color::ACCENT)),
    }
}

/// Total resolution for bare single tokens that missed both the catalog and
/// the image directory: the legacy color-word table (exact match, case
/// sensitive), else the universal fallback.
pub fn legacy_fallback(token: &str) -> SymbolSpec {
    match token {
        "white" => SymbolSpec::new(GLYPH_DOT, color::WHITE),
        "red" => SymbolSpec::new(GLYPH_DOT_FILLED, color::RED),
        "orange" => SymbolSpec::new(GLYPH_DOT_FILLED, color::ORANGE),
        "yellow" => SymbolSpec::new(GLYPH_DOT_FILLED, color::YELLOW),
        "green" => SymbolSpec::new(GLYPH_DOT_FILLED, color::GREEN),
        "cyan" => SymbolSpec::new(GLYPH_DOT_FILLED, color::CYAN),
        "blue" => SymbolSpec::new(GLYPH_DOT_FILLED, color::BLUE),
        "purple" => SymbolSpec::new(GLYPH_DOT_FILLED, color::PURPLE),
        "black" => SymbolSpec::new(GLYPH_DOT_FILLED, color::BLACK),
        "hollow" => SymbolSpec::new(GLYPH_CIRCLE, color::GRAY),
        "filled" => SymbolSpec::new(GLYPH_DOT_FILLED, color::GRAY),
        "exclamation" => SymbolSpec::new(GLYPH_EXCLAMATION, color::RED),
        "question" => SymbolSpec::new(GLYPH_QUESTION, color::BLUE),
        _ => SymbolSpec::fallback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|id| (*id).to_string()).collect()
    }

    #[test]
    fn test_bare_symbol_gets_accent_tint() {
        let cat = catalog(&["star.fill"]);
        let spec = resolve("star.fill", &cat).unwrap();
        assert_eq!(spec, SymbolSpec::new("star.fill", color::ACCENT));
    }

    #[test]
    fn test_colored_symbol_resolves() {
        let cat = catalog(&["star.fill"]);
        let spec = resolve("star.fill#ff0000", &cat).unwrap();
        assert_eq!(spec, SymbolSpec::new("star.fill", color::RED));
    }

    #[test]
    fn test_whitespace_is_trimmed_around_both_parts() {
        let cat = catalog(&["star.fill"]);
        let spec = resolve("  star.fill # f00 ", &cat).unwrap();
        assert_eq!(spec, SymbolSpec::new("star.fill", color::RED));
    }

    #[test]
    fn test_unknown_symbol_fails_even_with_valid_color() {
        let cat = catalog(&[]);
        assert_eq!(resolve("nonexistent.symbol#ff0000", &cat), None);
    }

    #[test]
    fn test_known_symbol_with_bad_color_fails() {
        let cat = catalog(&["star.fill"]);
        assert_eq!(resolve("star.fill#notacolor", &cat), None);
        assert_eq!(resolve("star.fill#", &cat), None);
    }

    #[test]
    fn test_bare_unknown_symbol_fails() {
        let cat = catalog(&["star.fill"]);
        assert_eq!(resolve("heart.fill", &cat), None);
    }

    #[test]
    fn test_second_hash_ends_the_color() {
        let cat = catalog(&["star.fill"]);
        let spec = resolve("star.fill#ff0000#trailing", &cat).unwrap();
        assert_eq!(spec.color, color::RED);
    }

    #[test]
    fn test_legacy_color_words() {
        let table = [
            ("white", GLYPH_DOT, color::WHITE),
            ("red", GLYPH_DOT_FILLED, color::RED),
            ("orange", GLYPH_DOT_FILLED, color::ORANGE),
            ("yellow", GLYPH_DOT_FILLED, color::YELLOW),
            ("green", GLYPH_DOT_FILLED, color::GREEN),
            ("cyan", GLYPH_DOT_FILLED, color::CYAN),
            ("blue", GLYPH_DOT_FILLED, color::BLUE),
            ("purple", GLYPH_DOT_FILLED, color::PURPLE),
            ("black", GLYPH_DOT_FILLED, color::BLACK),
            ("hollow", GLYPH_CIRCLE, color::GRAY),
            ("filled", GLYPH_DOT_FILLED, color::GRAY),
            ("exclamation", GLYPH_EXCLAMATION, color::RED),
            ("question", GLYPH_QUESTION, color::BLUE),
        ];
        for (word, glyph, rgb) in table {
            assert_eq!(legacy_fallback(word), SymbolSpec::new(glyph, rgb), "{word}");
        }
    }

    #[test]
    fn test_legacy_words_are_case_sensitive() {
        assert_eq!(legacy_fallback("RED"), SymbolSpec::fallback());
        assert_eq!(legacy_fallback("Hollow"), SymbolSpec::fallback());
    }

    #[test]
    fn test_unmatched_tokens_fall_back_to_red_circle() {
        assert_eq!(legacy_fallback("no.such.thing"), SymbolSpec::fallback());
        assert_eq!(
            legacy_fallback(""),
            SymbolSpec::new(GLYPH_CIRCLE, color::RED)
        );
    }
}
