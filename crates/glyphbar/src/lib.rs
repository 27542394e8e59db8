//! CLI surface of glyphbar: argument parsing, subcommand handlers, and
//! tracing setup. The engine lives in `glyphbar-core`, the server loop in
//! `glyphbar-daemon`.

#![deny(clippy::all)]

pub mod commands;
pub mod handlers;
pub mod telemetry;
