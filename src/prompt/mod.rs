mod builder;
mod engine;
mod style;

pub use builder::{FeedbackPromptBuilder, Submission, criterion_line};
pub use engine::TeraEngine;
pub use style::{FeedbackStyle, StyleTemplate};
