// LogWarden - app/mod.rs
//
// Application layer: load / analyze / clear orchestration.
// Dependencies: core, platform::fs.
// Must NOT depend on: ui.

pub mod state;
