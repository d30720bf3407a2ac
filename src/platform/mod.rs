// LogWarden - platform/mod.rs
//
// Platform abstraction layer: config directories, config.toml, file reading.
// Dependencies: standard library, directories crate.
// Must NOT depend on: core, app, ui.

pub mod config;
pub mod fs;
