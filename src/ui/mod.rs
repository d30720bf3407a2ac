// LogWarden - ui/mod.rs
//
// UI layer: terminal presentation only.
// Dependencies: core (read-only models).
// Must NOT depend on: app state, platform, direct file I/O.

pub mod render;
pub mod theme;
