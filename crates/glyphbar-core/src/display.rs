//! Display-state types shared by the parser, the controller, and renderers.

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::symbol::SymbolSpec;

/// Rotation cadence used when none is configured or the configured one is
/// unusable.
pub const DEFAULT_ROTATION_INTERVAL: Duration = Duration::from_secs(2);

/// How a multi-symbol state is laid out over time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    Single,
    Rotating { interval: Duration },
    SideBySide,
}

impl DisplayMode {
    /// Builds a rotating mode. Intervals that are non-positive, non-finite,
    /// or not representable as a [`Duration`] coerce to
    /// [`DEFAULT_ROTATION_INTERVAL`].
    pub fn rotating(interval_secs: f64) -> Self {
        let interval = Duration::try_from_secs_f64(interval_secs)
            .ok()
            .filter(|interval| !interval.is_zero())
            .unwrap_or(DEFAULT_ROTATION_INTERVAL);
        Self::Rotating { interval }
    }

    /// Parses a configured mode name. `interval_secs` only matters for
    /// `rotating`.
    pub fn from_name(name: &str, interval_secs: f64) -> Option<Self> {
        match name.trim() {
            "single" => Some(Self::Single),
            "rotating" => Some(Self::rotating(interval_secs)),
            // Settings written by older builds spell this camelCase.
            "side-by-side" | "sideBySide" => Some(Self::SideBySide),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Rotating { .. } => "rotating",
            Self::SideBySide => "side-by-side",
        }
    }
}

impl Default for DisplayMode {
    fn default() -> Self {
        Self::Single
    }
}

/// Opaque handle to a custom image, produced by an [`ImageCatalog`] and
/// consumed by renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Lookup of custom images by bare wire name.
pub trait ImageCatalog: Send + Sync {
    fn lookup(&self, name: &str) -> Option<ImageRef>;
}

/// A validated visual state, ready for a renderer. The `Multiple` list is
/// never empty; construct through [`DisplayState::multiple`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    Single(SymbolSpec),
    #[non_exhaustive]
    Multiple {
        symbols: Vec<SymbolSpec>,
        mode: DisplayMode,
    },
    Image(ImageRef),
}

impl DisplayState {
    /// Builds a multi-symbol state; an empty list collapses to the
    /// unknown-input icon instead.
    pub fn multiple(symbols: Vec<SymbolSpec>, mode: DisplayMode) -> Self {
        if symbols.is_empty() {
            Self::Single(SymbolSpec::unknown())
        } else {
            Self::Multiple { symbols, mode }
        }
    }

    /// Number of selectable symbol slots. Single and image states count as
    /// one slot.
    pub fn slot_count(&self) -> usize {
        match self {
            Self::Multiple { symbols, .. } => symbols.len(),
            Self::Single(_) | Self::Image(_) => 1,
        }
    }
}
