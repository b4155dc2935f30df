//! # Outline Format
//!
//! Conversion between indented outline text and the topic tree.
//!
//! ```text
//! # Topic                 topic heading
//! Topic description
//!
//! ## Task                 task heading
//!
//! - Todo                  todo (level 0)
//!   - progress: 40%       detail (level 1)
//!   - note: ask Sam
//! ```
//!
//! ## Pipeline
//!
//! | Step | Module | Direction |
//! |------|--------|-----------|
//! | Classify lines | [`line`] | text |
//! | Parse | [`parser`] | text → topics |
//! | Render | [`render`] | topics → text |
//! | Validate | [`validate`] | text → diagnostics |
//!
//! Parsing never fails; [`validate()`] is the place to find out whether the
//! parser had to repair anything.

pub mod line;
pub mod parser;
pub mod render;
pub mod validate;

pub use line::{classify, LineKind};
pub use parser::{parse, parse_with, ParseOptions, DEFAULT_TASK_NAME, DEFAULT_TOPIC_NAME};
pub use render::render;
pub use validate::{validate, Diagnostic, DiagnosticKind, Validation};
