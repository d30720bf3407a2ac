// LogWarden - core/mod.rs
//
// Core business logic layer: rule table, classification, annotation,
// reporting, export.
// Must NOT depend on: ui, platform, app, or filesystem I/O.

pub mod annotate;
pub mod classify;
pub mod export;
pub mod model;
pub mod report;
pub mod rules;
