// Resume generation: defaults and fallback content, scoring, and HTML rendering.
// Scoring goes through the ats module; templates through layout.

pub mod achievements;
pub mod generator;
pub mod handlers;
