use crate::error::ServiceError;
use crate::prompt::FeedbackStyle;
use crate::scoring::Aggregate;
use chrono::{DateTime, Local};
use serde::Serialize;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FeedbackStatus {
    Generated,
    Failed,
}

/// One generation attempt that reached the feedback service.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRecord {
    student: String,
    assignment: Option<String>,
    style: FeedbackStyle,
    total: f64,
    max_possible: f64,
    feedback: String,
    status: FeedbackStatus,
    created_at: DateTime<Local>,
}

impl FeedbackRecord {
    /// A failed `outcome` is kept as its display text with status `Failed`.
    pub fn new(
        student: &str,
        assignment: Option<&str>,
        style: FeedbackStyle,
        totals: Aggregate,
        outcome: Result<String, ServiceError>,
    ) -> Self {
        let (feedback, status) = match outcome {
            Ok(text) => (text, FeedbackStatus::Generated),
            Err(err) => (err.as_feedback_text(), FeedbackStatus::Failed),
        };
        Self {
            student: student.trim().to_string(),
            assignment: assignment
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(String::from),
            style,
            total: totals.total,
            max_possible: totals.max_possible,
            feedback,
            status,
            created_at: Local::now(),
        }
    }

    pub fn student(&self) -> &str {
        &self.student
    }

    pub fn assignment(&self) -> Option<&str> {
        self.assignment.as_deref()
    }

    pub fn style(&self) -> FeedbackStyle {
        self.style
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn max_possible(&self) -> f64 {
        self.max_possible
    }

    pub fn percentage(&self) -> f64 {
        crate::scoring::percentage(self.total, self.max_possible)
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn status(&self) -> FeedbackStatus {
        self.status
    }

    pub fn is_failed(&self) -> bool {
        self.status == FeedbackStatus::Failed
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }
}
