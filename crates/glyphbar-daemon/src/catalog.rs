//! Concrete symbol and image catalogs.
//!
//! The core crate only knows the [`SymbolCatalog`] and [`ImageCatalog`]
//! ports; this module supplies the daemon's implementations: a builtin glyph
//! set (optionally extended from a file) and a directory of PNG images.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use glyphbar_core::display::ImageCatalog;
use glyphbar_core::display::ImageRef;
use glyphbar_core::symbol;
use glyphbar_core::symbol::SymbolCatalog;

/// Glyph ids every install can rely on. Kept to names that exist across
/// symbol font versions; site-specific ids come in through
/// `GLYPHBAR_SYMBOLS`.
const BUILTIN_SYMBOLS: &[&str] = &[
    symbol::GLYPH_CIRCLE,
    symbol::GLYPH_DOT,
    symbol::GLYPH_DOT_FILLED,
    symbol::GLYPH_EXCLAMATION,
    symbol::GLYPH_QUESTION,
    "airplane",
    "ant.fill",
    "antenna.radiowaves.left.and.right",
    "arrow.down.circle.fill",
    "arrow.triangle.2.circlepath",
    "arrow.up.circle.fill",
    "battery.100",
    "battery.25",
    "bell",
    "bell.fill",
    "bolt",
    "bolt.circle.fill",
    "bolt.fill",
    "bookmark.fill",
    "bubble.left.fill",
    "calendar",
    "chart.bar.fill",
    "checkmark.circle",
    "checkmark.circle.fill",
    "checkmark.seal.fill",
    "circle.fill",
    "clock.fill",
    "cloud.fill",
    "cpu",
    "doc.fill",
    "drop.fill",
    "envelope.fill",
    "exclamationmark.triangle.fill",
    "externaldrive.fill",
    "eye.fill",
    "flag.fill",
    "flame.fill",
    "folder.fill",
    "gearshape.fill",
    "hammer.fill",
    "hare.fill",
    "heart",
    "heart.fill",
    "hourglass",
    "internaldrive",
    "key.fill",
    "ladybug.fill",
    "leaf.fill",
    "lightbulb.fill",
    "location.fill",
    "lock.fill",
    "lock.open.fill",
    "memorychip",
    "mic.fill",
    "moon.fill",
    "music.note",
    "network",
    "paperplane.fill",
    "pause.fill",
    "pin.fill",
    "play.fill",
    "powerplug.fill",
    "record.circle",
    "shield.fill",
    "speaker.wave.2.fill",
    "star",
    "star.circle.fill",
    "star.fill",
    "stop.fill",
    "sun.max.fill",
    "tag.fill",
    "terminal.fill",
    "thermometer",
    "timer",
    "tortoise.fill",
    "tray.full.fill",
    "wifi",
    "wrench.and.screwdriver.fill",
    "xmark.circle",
    "xmark.circle.fill",
    "xmark.octagon.fill",
];

/// In-memory symbol catalog backing the parser.
#[derive(Debug, Clone)]
pub struct SymbolSet {
    ids: HashSet<String>,
}

impl SymbolSet {
    pub fn builtin() -> Self {
        Self {
            ids: BUILTIN_SYMBOLS.iter().map(|id| (*id).to_string()).collect(),
        }
    }

    /// The builtin set extended with ids read from `path`, one per line.
    /// Blank lines and `#` comment lines are skipped.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let mut set = Self::builtin();
        let raw = fs::read_to_string(path)?;
        for line in raw.lines() {
            let id = line.trim();
            if id.is_empty() || id.starts_with('#') {
                continue;
            }
            set.ids.insert(id.to_string());
        }
        Ok(set)
    }

    pub fn insert(&mut self, id: impl Into<String>) {
        self.ids.insert(id.into());
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl SymbolCatalog for SymbolSet {
    fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }
}

/// Custom-image lookup over a directory: `<name>.png` first, then the
/// retina-style `<name>@2x.png`.
#[derive(Debug, Clone)]
pub struct IconDir {
    root: PathBuf,
}

impl IconDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ImageCatalog for IconDir {
    fn lookup(&self, name: &str) -> Option<ImageRef> {
        // Names come straight off the wire; they must not walk out of the
        // icon directory.
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return None;
        }
        for file in [format!("{name}.png"), format!("{name}@2x.png")] {
            let path = self.root.join(&file);
            if path.is_file() {
                return Some(ImageRef::new(path.to_string_lossy().into_owned()));
            }
        }
        None
    }
}
