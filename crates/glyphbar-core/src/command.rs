//! Inbound message parsing.

use std::sync::Arc;

use crate::display::DisplayMode;
use crate::display::DisplayState;
use crate::display::ImageCatalog;
use crate::symbol;
use crate::symbol::SymbolCatalog;
use crate::symbol::SymbolSpec;

/// Outcome of parsing one inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Terminate the application. Never reaches a renderer.
    Quit,
    /// Replace the current visual state.
    Show(DisplayState),
}

/// Turns raw wire text into [`Command`]s.
///
/// Parsing is total: input that matches nothing degrades to a visibly
/// distinct fallback icon, so the display always ends up showing something.
pub struct CommandParser {
    symbols: Arc<dyn SymbolCatalog>,
    images: Arc<dyn ImageCatalog>,
}

impl CommandParser {
    pub fn new(symbols: Arc<dyn SymbolCatalog>, images: Arc<dyn ImageCatalog>) -> Self {
        Self { symbols, images }
    }

    /// Parses one message. `mode` is the currently configured display mode;
    /// it is embedded into multi-symbol states and never derived from the
    /// message itself.
    pub fn parse(&self, message: &str, mode: DisplayMode) -> Command {
        let message = message.trim();
        if message == "quit" {
            return Command::Quit;
        }
        if message.contains(',') {
            return Command::Show(self.parse_list(message, mode));
        }
        Command::Show(self.parse_single(message))
    }

    /// Comma lists keep only entries that resolve strictly; legacy color
    /// words and unknown ids are dropped, not substituted.
    fn parse_list(&self, message: &str, mode: DisplayMode) -> DisplayState {
        let symbols: Vec<SymbolSpec> = message
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .filter_map(|token| symbol::resolve(token, self.symbols.as_ref()))
            .collect();
        DisplayState::multiple(symbols, mode)
    }

    /// Single tokens try the catalog first, then the image directory, then
    /// the legacy table.
    fn parse_single(&self, token: &str) -> DisplayState {
        if let Some(spec) = symbol::resolve(token, self.symbols.as_ref()) {
            return DisplayState::Single(spec);
        }
        if let Some(image) = self.images.lookup(token) {
            return DisplayState::Image(image);
        }
        DisplayState::Single(symbol::legacy_fallback(token))
    }
}
