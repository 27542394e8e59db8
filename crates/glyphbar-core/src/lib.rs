//! Core engine for glyphbar.
//!
//! Wire text goes in through [`CommandParser`], validated visual states come
//! out as [`DisplayState`], and [`DisplayController`] decides which symbol
//! slot is active while a rotating state is shown. Everything here is
//! synchronous and I/O-free: the host supplies the glyph catalog, the image
//! lookup, the clock, and the renderers through the port traits.

#![deny(clippy::all)]

pub mod clock;
pub mod color;
pub mod command;
pub mod controller;
pub mod display;
pub mod observer;
pub mod symbol;

pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use color::Rgb;
pub use command::Command;
pub use command::CommandParser;
pub use controller::DisplayController;
pub use controller::STARTUP_GLYPH;
pub use display::DisplayMode;
pub use display::DisplayState;
pub use display::ImageCatalog;
pub use display::ImageRef;
pub use display::DEFAULT_ROTATION_INTERVAL;
pub use observer::DisplayObserver;
pub use observer::RecordingObserver;
pub use symbol::SymbolCatalog;
pub use symbol::SymbolSpec;
