//! Ideagen — random game idea generation.
//!
//! Expands a small template language (generator tags, article tags,
//! verb-agreement tags and inline option groups) against pools of
//! phrases, then tidies the result into a single sentence of prose.

pub mod core;
pub mod data;
