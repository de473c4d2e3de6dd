// HTML rendering layer: named layout templates with placeholder injection.
// Template I/O is async; callers await it before or after scoring.

pub mod templates;

pub use templates::{render, FsTemplateStore, TemplateStore};
