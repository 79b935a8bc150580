use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `GradeCraft`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide how to surface a failure; provider internals and CLI glue
/// keep using `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum GradeError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Rubric / scores ─────────────────────────────────────────────────
    #[error("rubric: {0}")]
    Rubric(#[from] RubricError),

    // ── Operator input ──────────────────────────────────────────────────
    #[error("input: {0}")]
    Input(#[from] InputError),

    // ── Prompt / Template ───────────────────────────────────────────────
    #[error("prompt: {0}")]
    Prompt(#[from] PromptError),

    // ── Feedback service ────────────────────────────────────────────────
    #[error("feedback service: {0}")]
    Service(#[from] ServiceError),

    // ── Batch upload ────────────────────────────────────────────────────
    #[error("batch: {0}")]
    Batch(#[from] BatchError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Rubric errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq)]
pub enum RubricError {
    #[error("rubric {rubric:?} has no criteria")]
    NoCriteria { rubric: String },

    #[error("criterion name must not be empty")]
    EmptyCriterionName,

    #[error("duplicate criterion {0:?}")]
    DuplicateCriterion(String),

    #[error("criterion {criterion:?} has non-finite weight {weight}")]
    NonFiniteWeight { criterion: String, weight: f64 },

    #[error("a custom rubric holds at most {max} criteria")]
    TooManyCriteria { max: usize },

    #[error("unknown criterion {0:?}")]
    UnknownCriterion(String),

    #[error("unknown rubric template {0:?}")]
    UnknownTemplate(String),

    #[error("score {score} for {criterion:?} is outside 0..={max_score}")]
    ScoreOutOfRange {
        criterion: String,
        score: u32,
        max_score: u32,
    },

    #[error("invalid score assignment {0:?} (expected <criterion>=<score>)")]
    InvalidAssignment(String),

    #[error("invalid rubric definition: {0}")]
    Definition(String),
}

// ─── Operator input errors ───────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("please enter a student name")]
    MissingStudentName,
}

// ─── Prompt / Template errors ───────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("unknown feedback style {0:?} (expected constructive, detailed or brief)")]
    UnknownStyle(String),

    #[error("template render failed: {0}")]
    Render(String),
}

// ─── Feedback service errors ────────────────────────────────────────────────

/// Any failure reported by the text-generation service.
///
/// Subtypes (network, auth, quota, malformed response) are not distinguished;
/// the message is what the operator sees.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ServiceError {
    message: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Text shown in place of feedback when generation failed.
    pub fn as_feedback_text(&self) -> String {
        format!("Error generating feedback: {}", self.message)
    }
}

// ─── Batch errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("error processing file: {0}")]
    Malformed(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for BatchError {
    fn from(err: csv::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, GradeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_correctly() {
        let err = GradeError::Config(ConfigError::Validation("bad temp".into()));
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn service_error_renders_as_feedback_text() {
        let err = ServiceError::new("quota exceeded");
        assert_eq!(
            err.as_feedback_text(),
            "Error generating feedback: quota exceeded"
        );
        assert_eq!(
            GradeError::from(err).to_string(),
            "feedback service: quota exceeded"
        );
    }

    #[test]
    fn missing_student_name_displays_prompt() {
        let err = GradeError::Input(InputError::MissingStudentName);
        assert!(err.to_string().contains("student name"));
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let grade_err: GradeError = anyhow_err.into();
        assert!(grade_err.to_string().contains("something went wrong"));
    }

    #[test]
    fn score_out_of_range_names_criterion() {
        let err = RubricError::ScoreOutOfRange {
            criterion: "ML".into(),
            score: 9,
            max_score: 4,
        };
        let text = err.to_string();
        assert!(text.contains("\"ML\""));
        assert!(text.contains("0..=4"));
    }
}
