// LogWarden - lib.rs
//
// Library entry point, exposing all modules for integration testing and
// programmatic use. The binary in `main.rs` is a thin CLI over these.
//
// Layering:
//   core     - rule table, classification, annotation, reports, export
//   app      - load / analyze / clear workflow state
//   platform - config.toml, config directories, file reading
//   ui       - terminal rendering
//   util     - errors, constants, logging

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
